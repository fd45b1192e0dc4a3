//! Helpers for working with the server's configured local timezone.
//!
//! Records are matched by calendar date, so "today" and "this year" must be
//! computed in the timezone the server was configured with rather than UTC.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset for a canonical timezone name, e.g. "Pacific/Auckland".
///
/// Returns `None` if `canonical_timezone` is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Get today's date in the timezone `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a known timezone.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod timezone_tests {
    use time::OffsetDateTime;

    use crate::{Error, timezone::local_today};

    #[test]
    fn utc_today_matches_system_clock() {
        let want = OffsetDateTime::now_utc().date();

        let got = local_today("Etc/UTC").expect("Etc/UTC should be a valid timezone");

        // Allow for the test running across midnight.
        assert!((got - want).whole_days().abs() <= 1);
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(
            local_today("Middle/Earth"),
            Err(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
