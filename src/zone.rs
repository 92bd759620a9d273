//! Time zone resolution for the local day.

use std::fmt;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use iana_time_zone::get_timezone;
use log::warn;
use sun_path::{Error, UtcOffsetSource};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Zone {
    /// Today's date as seen on this zone's wall clock.
    pub fn today(&self) -> NaiveDate {
        let now = Utc::now();
        match self {
            Zone::Named(tz) => now.with_timezone(tz).date_naive(),
            Zone::Fixed(offset) => now.with_timezone(offset).date_naive(),
        }
    }
}

impl UtcOffsetSource for Zone {
    fn utc_offset(&self, local: &NaiveDateTime) -> FixedOffset {
        match self {
            Zone::Named(tz) => tz.utc_offset(local),
            Zone::Fixed(offset) => offset.utc_offset(local),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Named(tz) => write!(f, "{}", tz.name()),
            Zone::Fixed(offset) => write!(f, "UTC{}", offset),
        }
    }
}

/// The host's configured zone, or UTC when it cannot be determined.
pub fn system_zone() -> Tz {
    match get_timezone() {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            warn!("system time zone '{name}' is unknown, falling back to UTC");
            Tz::UTC
        }),
        Err(e) => {
            warn!("cannot determine system time zone ({e}), falling back to UTC");
            Tz::UTC
        }
    }
}

pub fn resolve_zone(spec: &str) -> Result<Zone, Error> {
    let spec = spec.trim();
    match spec.to_ascii_lowercase().as_str() {
        "system" => return Ok(Zone::Named(system_zone())),
        "utc" => return Ok(Zone::Named(Tz::UTC)),
        _ => {}
    }
    if let Ok(tz) = spec.parse::<Tz>() {
        return Ok(Zone::Named(tz));
    }
    spec.parse::<FixedOffset>()
        .map(Zone::Fixed)
        .map_err(|_| Error::InvalidTimezone(spec.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_resolve_named_and_fixed() {
        assert_eq!(resolve_zone("UTC").unwrap(), Zone::Named(Tz::UTC));
        assert_eq!(
            resolve_zone("Europe/Berlin").unwrap(),
            Zone::Named(chrono_tz::Europe::Berlin)
        );
        assert_eq!(
            resolve_zone("+05:30").unwrap(),
            Zone::Fixed(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
        );
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        assert_eq!(
            resolve_zone("Mars/Olympus"),
            Err(Error::InvalidTimezone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn test_named_zone_follows_dst() {
        let zone = resolve_zone("Europe/Berlin").unwrap();
        let winter = NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let summer = NaiveDate::from_ymd_opt(2026, 7, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(zone.utc_offset(&winter).local_minus_utc(), 3600);
        assert_eq!(zone.utc_offset(&summer).local_minus_utc(), 7200);
    }
}
