//! Population-size based stripping of identifying metainfo fields.
//!
//! A country is only reported when enough users share it for the smallest
//! cohort (one week of install on one platform) to stay anonymous. The
//! Linux user base is small enough to need its own list.

use p3a_interfaces::{COUNTRY_OTHER, MessageMetainfo, Platform, REFCODE_NONE};

/// Countries with more than 3/0.05 = 60 Linux users per week of install.
pub const LINUX_COUNTRIES: &[&str] = &[
    "US", "FR", "DE", "GB", "IN", "BR", "PL", "NL", "ES", "CA", "IT", "AU", "MX", "CH", "RU",
    "ZA", "SE", "BE", "JP",
];

/// Countries above the cut-off for the smallest non-Linux platform
/// (macOS at ~3%, so 3/(0.05*0.03) = 2000 users).
pub const NOTABLE_COUNTRIES: &[&str] = &[
    "US", "FR", "PH", "GB", "IN", "DE", "BR", "CA", "IT", "ES", "NL", "MX", "AU", "RU", "JP",
    "PL", "ID", "KR", "AR",
];

/// The allow-list applied to records from `platform`.
pub fn allow_list_for(platform: &str) -> &'static [&'static str] {
    if platform == Platform::LINUX_TAG {
        LINUX_COUNTRIES
    } else {
        NOTABLE_COUNTRIES
    }
}

pub fn is_reportable_country(platform: &str, country_code: &str) -> bool {
    allow_list_for(platform).contains(&country_code)
}

/// Strips the referral code and coarsens the country code in place.
///
/// Must run on every record before it is formatted. Applying it twice is
/// the same as applying it once.
pub fn apply_anonymization_policy(meta: &mut MessageMetainfo) {
    // The refcode is no longer used to partition data.
    meta.refcode = REFCODE_NONE.to_string();

    if !is_reportable_country(&meta.platform, &meta.country_code) {
        log::trace!(
            "Country '{}' not reportable on '{}', sending '{}'",
            meta.country_code,
            meta.platform,
            COUNTRY_OTHER
        );
        meta.country_code = COUNTRY_OTHER.to_string();
    }
}
