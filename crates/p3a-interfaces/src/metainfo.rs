use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Channel, Platform};

/// Contextual attributes attached to every reported metric.
///
/// One instance is built per reporting event from live client state. The
/// anonymization policy mutates it in place, so concurrent reporters must
/// each work on their own copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageMetainfo {
    /// Two-letter country code, or `"other"` once anonymized.
    pub country_code: String,
    /// Platform tag, e.g. `linux-bc`.
    pub platform: String,
    pub version: String,
    pub channel: String,
    /// Referral code. Collected but always replaced by `"none"` before sending.
    pub refcode: String,
    /// Week of install.
    pub woi: u32,
    /// Week of survey.
    pub wos: u32,
    pub date_of_install: DateTime<Utc>,
    pub date_of_survey: DateTime<Utc>,
}

impl MessageMetainfo {
    /// Builds the metainfo for a freshly installed client.
    ///
    /// `woi` is derived from the install date. The survey date starts equal
    /// to the install date until [`MessageMetainfo::update_survey`] is called.
    pub fn new(
        platform: Platform,
        channel: Channel,
        version: impl Into<String>,
        country_code: impl Into<String>,
        refcode: impl Into<String>,
        date_of_install: DateTime<Utc>,
    ) -> Self {
        let woi = iso_week(&date_of_install);
        Self {
            country_code: country_code.into(),
            platform: platform.tag().to_string(),
            version: version.into(),
            channel: channel.name().to_string(),
            refcode: refcode.into(),
            woi,
            wos: woi,
            date_of_install,
            date_of_survey: date_of_install,
        }
    }

    /// Moves the survey date to `now` and recomputes the week of survey.
    pub fn update_survey(&mut self, now: DateTime<Utc>) {
        self.date_of_survey = now;
        self.wos = iso_week(&now);
        log::trace!("Survey date updated, wos={}", self.wos);
    }
}

/// ISO-8601 week number of the local calendar date of `date`.
pub fn iso_week(date: &DateTime<Utc>) -> u32 {
    date.with_timezone(&Local).iso_week().week()
}

/// Calendar year of `date` in local time.
pub fn local_year(date: &DateTime<Utc>) -> i32 {
    date.with_timezone(&Local).year()
}
