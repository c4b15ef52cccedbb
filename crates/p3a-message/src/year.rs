use chrono::{DateTime, Utc};
use p3a_interfaces::{MIN_PLAUSIBLE_YEAR, local_year};

use crate::error::MessageError;

/// Local-time year of `date`, rejecting years a sane clock cannot produce.
pub(crate) fn checked_year(field: &'static str, date: &DateTime<Utc>) -> Result<i32, MessageError> {
    let year = local_year(date);
    if year < MIN_PLAUSIBLE_YEAR {
        log::warn!("Dropping record: {} decomposed to year {}", field, year);
        return Err(MessageError::ImplausibleYear { field, year });
    }
    Ok(year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_boundary_year() {
        let date = Utc.with_ymd_and_hms(999, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(checked_year("yoi", &date).unwrap(), 999);
    }

    #[test]
    fn rejects_year_below_threshold() {
        let date = Utc.with_ymd_and_hms(998, 6, 15, 12, 0, 0).unwrap();
        match checked_year("yos", &date) {
            Err(MessageError::ImplausibleYear { field, year }) => {
                assert_eq!(field, "yos");
                assert_eq!(year, 998);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
