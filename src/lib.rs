pub mod angles;
pub mod error;
pub mod trajectory;
pub mod types;

pub use angles::{
    altitude, azimuth, declination, deg_to_rad, ecliptic_longitude, greenwich_sidereal_hours,
    hour_angle, julian_date, julian_day_number, mean_anomaly, mean_longitude, normalize_angle,
    obliquity_of_ecliptic, rad_to_deg, right_ascension, solar_angles, solar_angles_utc,
    solar_position, solar_position_utc, DAYS_PER_CENTURY, DEGREES_PER_HOUR, J2000, VALID_YEARS,
};

pub use error::{Error, Result};

pub use trajectory::{
    format_degrees, format_event_degrees, format_event_time, format_time, local_time_of, marker,
    round_to, DayTrajectory, UtcOffsetSource, MINUTES_PER_DAY, NEVER_RISES, NEVER_SETS,
    NO_SET_WITHIN_DAY,
};

pub use types::{
    CalendarDate, DayKind, DayReport, EventValue, GeoPosition, Observation, SolarAngles,
    SolarPosition, SunsetIndex, TimeSample,
};
