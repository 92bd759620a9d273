use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};

use crate::types::{GeoPosition, SolarAngles, SolarPosition};

/// Julian date of the J2000.0 epoch.
pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Years for which the low-precision ephemeris stays near 0.01°.
pub const VALID_YEARS: RangeInclusive<i32> = 1901..=2099;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Integer Gregorian-to-Julian day number (truncating division).
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let d = day as i64;
    let a = (m - 14) / 12;
    (1461 * (y + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
        - (3 * ((y + 4900 + a) / 100)) / 4
        + d
        - 32075
}

/// Fractional Julian date; the day number refers to noon, hence the `- 12`.
pub fn julian_date(jdn: i64, hour: u32, minute: u32, second: u32) -> f64 {
    jdn as f64
        + (hour as f64 - 12.0) / 24.0
        + minute as f64 / 1440.0
        + second as f64 / 86400.0
}

// L and g keep the dividend's sign (truncating remainder).
pub fn mean_longitude(n: f64) -> f64 {
    (280.46 + 0.9856474 * n) % 360.0
}

pub fn mean_anomaly(n: f64) -> f64 {
    (357.528 + 0.9856003 * n) % 360.0
}

pub fn ecliptic_longitude(mean_longitude: f64, mean_anomaly: f64) -> f64 {
    let g = deg_to_rad(mean_anomaly);
    mean_longitude + 1.915 * g.sin() + 0.01997 * (2.0 * g).sin()
}

pub fn obliquity_of_ecliptic(n: f64) -> f64 {
    23.439 - 0.0000004 * n
}

pub fn right_ascension(ecliptic_longitude: f64, obliquity: f64) -> f64 {
    let lambda = deg_to_rad(ecliptic_longitude);
    let eps = deg_to_rad(obliquity);
    let alpha = rad_to_deg((eps.cos() * lambda.tan()).atan());
    // atan only covers ±90°
    if lambda.cos() > 0.0 {
        alpha
    } else {
        alpha + 180.0
    }
}

pub fn declination(ecliptic_longitude: f64, obliquity: f64) -> f64 {
    let lambda = deg_to_rad(ecliptic_longitude);
    let eps = deg_to_rad(obliquity);
    rad_to_deg((eps.sin() * lambda.sin()).clamp(-1.0, 1.0).asin())
}

/// Greenwich sidereal time in hours.
///
/// `t0` is in Julian centuries since J2000 at 00:00 UTC of the day,
/// `utc_hours` the UTC clock time on that day.
pub fn greenwich_sidereal_hours(t0: f64, utc_hours: f64) -> f64 {
    (6.697376 + 2400.05134 * t0 + 1.002738 * utc_hours) % 24.0
}

/// Sun's local hour angle in degrees.
pub fn hour_angle(sidereal_hours: f64, longitude: f64, right_ascension: f64) -> f64 {
    DEGREES_PER_HOUR * sidereal_hours + longitude - right_ascension
}

/// Azimuth in degrees, 0 = south, continuous over -180..180.
pub fn azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat = deg_to_rad(latitude);
    let dec = deg_to_rad(declination);
    let tau = deg_to_rad(hour_angle);
    let num = tau.sin();
    let den = tau.cos() * lat.sin() - dec.tan() * lat.cos();

    if den == 0.0 {
        return if num > 0.0 {
            90.0
        } else if num < 0.0 {
            -90.0
        } else {
            0.0
        };
    }

    let mut az = rad_to_deg((num / den).atan());
    if den < 0.0 {
        az += 180.0;
        if num < 0.0 {
            az -= 360.0;
        }
    }
    az
}

pub fn altitude(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat = deg_to_rad(latitude);
    let dec = deg_to_rad(declination);
    let tau = deg_to_rad(hour_angle);
    let sin_alt = dec.cos() * tau.cos() * lat.cos() + dec.sin() * lat.sin();
    rad_to_deg(sin_alt.clamp(-1.0, 1.0).asin())
}

/// Full ephemeris evaluation for a naive UTC instant.
pub fn solar_position_utc(position: &GeoPosition, utc: &NaiveDateTime) -> SolarPosition {
    let jdn = julian_day_number(utc.year(), utc.month(), utc.day());
    let jd = julian_date(jdn, utc.hour(), utc.minute(), utc.second());
    let jd0 = julian_date(jdn, 0, 0, 0);
    let n = jd - J2000;

    let l = mean_longitude(n);
    let g = mean_anomaly(n);
    let lambda = ecliptic_longitude(l, g);
    let eps = obliquity_of_ecliptic(n);
    let alpha = right_ascension(lambda, eps);
    let delta = declination(lambda, eps);

    let t0 = (jd0 - J2000) / DAYS_PER_CENTURY;
    let utc_hours = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let sidereal = greenwich_sidereal_hours(t0, utc_hours);
    let tau = hour_angle(sidereal, position.longitude, alpha);

    SolarPosition {
        julian_date: jd,
        days_since_j2000: n,
        ecliptic_longitude: lambda,
        obliquity: eps,
        right_ascension: alpha,
        declination: delta,
        hour_angle: tau,
        azimuth: azimuth(position.latitude, delta, tau),
        altitude: altitude(position.latitude, delta, tau),
    }
}

pub fn solar_position<Tz: TimeZone>(position: &GeoPosition, dt: &DateTime<Tz>) -> SolarPosition {
    solar_position_utc(position, &dt.naive_utc())
}

pub fn solar_angles_utc(position: &GeoPosition, utc: &NaiveDateTime) -> SolarAngles {
    solar_position_utc(position, utc).angles()
}

pub fn solar_angles<Tz: TimeZone>(position: &GeoPosition, dt: &DateTime<Tz>) -> SolarAngles {
    solar_position(position, dt).angles()
}
