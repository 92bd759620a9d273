use chrono::{FixedOffset, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone};
use log::{debug, trace, warn};

use crate::angles;
use crate::error::{Error, Result};
use crate::types::{
    CalendarDate, DayKind, DayReport, EventValue, GeoPosition, SunsetIndex, TimeSample,
};

pub const MINUTES_PER_DAY: usize = 1440;

pub const NEVER_RISES: &str = "sun does not rise";
pub const NEVER_SETS: &str = "sun does not set";
pub const NO_SET_WITHIN_DAY: &str = "sun does not set before midnight";

/// Maps a local wall-clock time to its offset from UTC.
pub trait UtcOffsetSource {
    fn utc_offset(&self, local: &NaiveDateTime) -> FixedOffset;
}

impl<Tz: TimeZone> UtcOffsetSource for Tz {
    fn utc_offset(&self, local: &NaiveDateTime) -> FixedOffset {
        match self.offset_from_local_datetime(local) {
            LocalResult::Single(offset) => offset.fix(),
            LocalResult::Ambiguous(earliest, _) => {
                trace!("{local} is ambiguous, using the earlier offset");
                earliest.fix()
            }
            LocalResult::None => {
                // Skipped by a forward transition: keep the offset in force before it.
                trace!("{local} does not exist, using the offset before the gap");
                let before = local.checked_sub_signed(TimeDelta::days(1)).unwrap_or(*local);
                self.offset_from_utc_datetime(&before).fix()
            }
        }
    }
}

/// One local day of sun positions, sampled every minute from local midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTrajectory {
    position: GeoPosition,
    date: CalendarDate,
    samples: Vec<TimeSample>,
    culmination: usize,
    nadir: usize,
    kind: DayKind,
}

impl DayTrajectory {
    pub fn new<O: UtcOffsetSource + ?Sized>(
        position: &GeoPosition,
        date: CalendarDate,
        offsets: &O,
    ) -> Result<Self> {
        let midnight = date.to_naive()?.and_time(NaiveTime::MIN);
        if !angles::VALID_YEARS.contains(&date.year) {
            warn!(
                "year {} is outside {:?}, solar positions lose accuracy",
                date.year,
                angles::VALID_YEARS
            );
        }

        // Near chrono's date limits the day's UTC instants may not exist.
        let out_of_range = Error::InvalidDate {
            year: date.year,
            month: date.month,
            day: date.day,
        };
        let samples = (0..MINUTES_PER_DAY as u32)
            .map(|minute| -> Result<TimeSample> {
                let local = midnight
                    .checked_add_signed(TimeDelta::minutes(minute as i64))
                    .ok_or(out_of_range.clone())?;
                let offset = offsets.utc_offset(&local);
                let utc = local
                    .checked_sub_signed(TimeDelta::seconds(offset.local_minus_utc() as i64))
                    .ok_or(out_of_range.clone())?;
                Ok(TimeSample {
                    minute,
                    local_hour: minute as f64 / 60.0,
                    utc,
                    angles: angles::solar_angles_utc(position, &utc),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_samples(*position, date, samples)
    }

    /// Derives the day's events from an existing per-minute table.
    pub fn from_samples(
        position: GeoPosition,
        date: CalendarDate,
        samples: Vec<TimeSample>,
    ) -> Result<Self> {
        if samples.len() != MINUTES_PER_DAY {
            return Err(Error::SampleCount {
                expected: MINUTES_PER_DAY,
                actual: samples.len(),
            });
        }

        let (culmination, nadir) = find_extrema(&samples);
        let kind = classify(&samples, culmination, nadir);
        debug!(
            "{:04}-{:02}-{:02} at ({}, {}): {:?}, culmination at minute {}",
            date.year, date.month, date.day, position.latitude, position.longitude, kind, culmination
        );

        Ok(Self {
            position,
            date,
            samples,
            culmination,
            nadir,
            kind,
        })
    }

    pub fn position(&self) -> &GeoPosition {
        &self.position
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn samples(&self) -> &[TimeSample] {
        &self.samples
    }

    pub fn sample(&self, index: usize) -> Option<&TimeSample> {
        self.samples.get(index)
    }

    pub fn kind(&self) -> DayKind {
        self.kind
    }

    pub fn culmination(&self) -> usize {
        self.culmination
    }

    pub fn nadir(&self) -> usize {
        self.nadir
    }

    /// The highest altitude of the day is at or below the horizon.
    pub fn never_rises(&self) -> bool {
        self.samples[self.culmination].angles.altitude <= 0.0
    }

    /// The lowest altitude of the day is at or above the horizon.
    ///
    /// Independent of [`never_rises`](Self::never_rises): a day held at exactly
    /// 0° satisfies both, while its `kind()` and markers report `PolarNight`.
    pub fn never_sets(&self) -> bool {
        self.samples[self.nadir].angles.altitude >= 0.0
    }

    pub fn sunrise(&self) -> EventValue<usize> {
        match self.kind {
            DayKind::PolarNight => EventValue::NeverRises,
            DayKind::PolarDay => EventValue::NeverSets,
            DayKind::RiseAndSet { sunrise, .. } => EventValue::At(sunrise),
        }
    }

    pub fn sunset(&self) -> EventValue<usize> {
        match self.kind {
            DayKind::PolarNight => EventValue::NeverRises,
            DayKind::PolarDay => EventValue::NeverSets,
            DayKind::RiseAndSet {
                sunset: SunsetIndex::Found(sunset),
                ..
            } => EventValue::At(sunset),
            DayKind::RiseAndSet {
                sunset: SunsetIndex::NotWithinDay,
                ..
            } => EventValue::NoSetWithinDay,
        }
    }

    pub fn sunrise_local_time(&self) -> EventValue<NaiveTime> {
        self.sunrise().map(local_time_of)
    }

    pub fn sunset_local_time(&self) -> EventValue<NaiveTime> {
        self.sunset().map(local_time_of)
    }

    pub fn culmination_local_time(&self) -> NaiveTime {
        local_time_of(self.culmination)
    }

    pub fn azimuth_at_sunrise(&self) -> EventValue<f64> {
        self.sunrise()
            .map(|i| round_to(self.samples[i].angles.azimuth, 2))
    }

    pub fn azimuth_at_sunset(&self) -> EventValue<f64> {
        self.sunset()
            .map(|i| round_to(self.samples[i].angles.azimuth, 2))
    }

    pub fn altitude_at_culmination(&self) -> f64 {
        round_to(self.samples[self.culmination].angles.altitude, 2)
    }

    /// Minutes of the day with the sun above the horizon.
    pub fn daylight_minutes(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.angles.altitude > 0.0)
            .count()
    }

    pub fn report(&self) -> DayReport {
        DayReport {
            sunrise: format_event_time(self.sunrise_local_time()),
            azimuth_at_sunrise: format_event_degrees(self.azimuth_at_sunrise()),
            culmination: format_time(self.culmination_local_time()),
            altitude_at_culmination: format_degrees(self.altitude_at_culmination()),
            sunset: format_event_time(self.sunset_local_time()),
            azimuth_at_sunset: format_event_degrees(self.azimuth_at_sunset()),
        }
    }
}

/// First index of the highest and of the lowest altitude.
fn find_extrema(samples: &[TimeSample]) -> (usize, usize) {
    let mut max = 0;
    let mut min = 0;
    for (i, s) in samples.iter().enumerate().skip(1) {
        if s.angles.altitude > samples[max].angles.altitude {
            max = i;
        }
        if s.angles.altitude < samples[min].angles.altitude {
            min = i;
        }
    }
    (max, min)
}

fn classify(samples: &[TimeSample], culmination: usize, nadir: usize) -> DayKind {
    if samples[culmination].angles.altitude <= 0.0 {
        return DayKind::PolarNight;
    }
    if samples[nadir].angles.altitude >= 0.0 {
        return DayKind::PolarDay;
    }

    // The culmination is above the horizon, so a rise always exists.
    let sunrise = samples
        .iter()
        .position(|s| s.angles.altitude > 0.0)
        .unwrap_or(culmination);
    let sunset = samples[sunrise..]
        .iter()
        .position(|s| s.angles.altitude < 0.0)
        .map_or(SunsetIndex::NotWithinDay, |offset| {
            SunsetIndex::Found(sunrise + offset)
        });

    DayKind::RiseAndSet { sunrise, sunset }
}

pub fn local_time_of(index: usize) -> NaiveTime {
    NaiveTime::MIN + TimeDelta::minutes(index as i64)
}

/// Rounds to `places` decimals; halves go towards positive infinity.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale + 0.5).floor() / scale
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Rounds to two decimals, then appends the degree sign; whole values keep one decimal.
pub fn format_degrees(value: f64) -> String {
    // adding 0.0 folds -0.0 into 0.0
    let rounded = round_to(value, 2) + 0.0;
    if rounded.fract() == 0.0 {
        format!("{:.1}°", rounded)
    } else {
        format!("{}°", rounded)
    }
}

pub fn marker<T>(value: &EventValue<T>) -> Option<&'static str> {
    match value {
        EventValue::At(_) => None,
        EventValue::NeverRises => Some(NEVER_RISES),
        EventValue::NeverSets => Some(NEVER_SETS),
        EventValue::NoSetWithinDay => Some(NO_SET_WITHIN_DAY),
    }
}

pub fn format_event_time(value: EventValue<NaiveTime>) -> String {
    match value {
        EventValue::At(t) => format_time(t),
        other => marker(&other).unwrap_or_default().to_string(),
    }
}

pub fn format_event_degrees(value: EventValue<f64>) -> String {
    match value {
        EventValue::At(v) => format_degrees(v),
        other => marker(&other).unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SolarAngles;

    fn table(altitude: impl Fn(usize) -> f64) -> Vec<TimeSample> {
        let midnight = NaiveDateTime::default();
        (0..MINUTES_PER_DAY)
            .map(|i| TimeSample {
                minute: i as u32,
                local_hour: i as f64 / 60.0,
                utc: midnight + TimeDelta::minutes(i as i64),
                angles: SolarAngles {
                    azimuth: i as f64 / 4.0 - 180.0,
                    altitude: altitude(i),
                },
            })
            .collect()
    }

    #[test]
    fn test_ties_favor_earliest_minute() {
        let samples = table(|i| match i {
            100 | 200 => 30.0,
            _ => -10.0,
        });
        let (max, min) = find_extrema(&samples);
        assert_eq!(max, 100);
        assert_eq!(min, 0);
    }

    #[test]
    fn test_rise_without_set_before_midnight() {
        let samples = table(|i| if i < 600 { -5.0 } else { 5.0 });
        let (max, min) = find_extrema(&samples);
        assert_eq!(
            classify(&samples, max, min),
            DayKind::RiseAndSet {
                sunrise: 600,
                sunset: SunsetIndex::NotWithinDay
            }
        );
    }

    #[test]
    fn test_exactly_zero_everywhere_is_polar_night() {
        let samples = table(|_| 0.0);
        let (max, min) = find_extrema(&samples);
        assert_eq!(classify(&samples, max, min), DayKind::PolarNight);
    }

    #[test]
    fn test_flat_zero_day_sets_both_flags() {
        let position = GeoPosition {
            latitude: 0.0,
            longitude: 0.0,
        };
        let date = CalendarDate {
            year: 2026,
            month: 3,
            day: 20,
        };
        let day = DayTrajectory::from_samples(position, date, table(|_| 0.0)).unwrap();
        assert!(day.never_rises());
        assert!(day.never_sets());
        assert_eq!(day.kind(), DayKind::PolarNight);
        assert_eq!(day.report().sunrise, NEVER_RISES);
        assert_eq!(day.report().sunset, NEVER_RISES);
    }

    #[test]
    fn test_touching_horizon_from_above_never_sets() {
        let samples = table(|i| if i == 0 { 0.0 } else { 2.0 });
        let (max, min) = find_extrema(&samples);
        assert_eq!(classify(&samples, max, min), DayKind::PolarDay);
    }

    #[test]
    fn test_round_before_suffix() {
        assert_eq!(format_degrees(59.999996), "60.0°");
        assert_eq!(format_degrees(12.3456), "12.35°");
        assert_eq!(format_degrees(-118.1), "-118.1°");
        assert_eq!(format_degrees(-0.001), "0.0°");
    }

    #[test]
    fn test_halves_round_up() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(format_degrees(-42.125), "-42.12°");
    }

    #[test]
    fn test_local_time_of_index() {
        assert_eq!(format_time(local_time_of(0)), "00:00");
        assert_eq!(format_time(local_time_of(317)), "05:17");
        assert_eq!(format_time(local_time_of(1439)), "23:59");
    }
}
