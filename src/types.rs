use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    /// Latitude in [-90, 90] and longitude in [-180, 180], both in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidLongitude { value: longitude });
        }
        Ok(Self { latitude, longitude })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .ok_or(Error::InvalidDate { year, month, day })
    }

    pub fn to_naive(self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(Error::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        })
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Sun direction in degrees.
///
/// `azimuth` runs continuously through -180..180 with 0 = south,
/// negative towards east and positive towards west.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarAngles {
    pub azimuth: f64,
    pub altitude: f64,
}

impl SolarAngles {
    pub fn zenith(&self) -> f64 {
        90.0 - self.altitude
    }

    /// Azimuth as a compass bearing: 0 = north, clockwise, in [0, 360).
    pub fn compass_bearing(&self) -> f64 {
        crate::angles::normalize_angle(self.azimuth + 180.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub julian_date: f64,
    pub days_since_j2000: f64,
    pub ecliptic_longitude: f64,
    pub obliquity: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub hour_angle: f64,
    pub azimuth: f64,
    pub altitude: f64,
}

impl SolarPosition {
    pub fn angles(&self) -> SolarAngles {
        SolarAngles {
            azimuth: self.azimuth,
            altitude: self.altitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Minute of the local day, also the sample's index.
    pub minute: u32,
    pub local_hour: f64,
    pub utc: NaiveDateTime,
    pub angles: SolarAngles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunsetIndex {
    Found(usize),
    /// The sun rose but was still up when the table ended.
    NotWithinDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    PolarNight,
    PolarDay,
    RiseAndSet { sunrise: usize, sunset: SunsetIndex },
}

/// A per-day result that is either a value or one of the "no such event" markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventValue<T> {
    At(T),
    NeverRises,
    NeverSets,
    NoSetWithinDay,
}

impl<T> EventValue<T> {
    pub fn value(self) -> Option<T> {
        match self {
            EventValue::At(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EventValue<U> {
        match self {
            EventValue::At(v) => EventValue::At(f(v)),
            EventValue::NeverRises => EventValue::NeverRises,
            EventValue::NeverSets => EventValue::NeverSets,
            EventValue::NoSetWithinDay => EventValue::NoSetWithinDay,
        }
    }
}

/// The six display strings of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub sunrise: String,
    pub azimuth_at_sunrise: String,
    pub culmination: String,
    pub altitude_at_culmination: String,
    pub sunset: String,
    pub azimuth_at_sunset: String,
}

/// Observer defaults used when no coordinates are given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub position: GeoPosition,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            position: GeoPosition {
                latitude: 51.514886,
                longitude: 7.453226,
            },
        }
    }
}
