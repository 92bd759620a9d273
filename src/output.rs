//! Terminal and JSON rendering of a computed day.

use serde::Serialize;
use sun_path::{format_time, local_time_of, round_to, DayReport, DayTrajectory};

use crate::zone::Zone;

#[derive(Debug, Serialize)]
struct SampleRow {
    time: String,
    azimuth: f64,
    altitude: f64,
}

#[derive(Debug, Serialize)]
struct JsonOutput {
    latitude: f64,
    longitude: f64,
    date: String,
    timezone: String,
    #[serde(flatten)]
    report: DayReport,
    daylight_minutes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<Vec<SampleRow>>,
}

fn rows(trajectory: &DayTrajectory, every: u32) -> Vec<SampleRow> {
    trajectory
        .samples()
        .iter()
        .step_by(every as usize)
        .map(|s| SampleRow {
            time: format_time(local_time_of(s.minute as usize)),
            azimuth: round_to(s.angles.azimuth, 2),
            altitude: round_to(s.angles.altitude, 2),
        })
        .collect()
}

pub fn print_text(trajectory: &DayTrajectory, zone: &Zone) {
    let position = trajectory.position();
    let date = trajectory.date();
    let report = trajectory.report();

    println!(
        "Sun path for {:.6}°, {:.6}° on {:04}-{:02}-{:02} ({})",
        position.latitude, position.longitude, date.year, date.month, date.day, zone
    );
    println!();
    println!("Sunrise at                {}", report.sunrise);
    println!("Azimuth at sunrise        {}", report.azimuth_at_sunrise);
    println!("Culmination at            {}", report.culmination);
    println!("Altitude at culmination   {}", report.altitude_at_culmination);
    println!("Sunset at                 {}", report.sunset);
    println!("Azimuth at sunset         {}", report.azimuth_at_sunset);
}

pub fn print_table(trajectory: &DayTrajectory, every: u32) {
    println!();
    println!("{:<6} {:>9} {:>9}", "Time", "Azimuth", "Altitude");
    for row in rows(trajectory, every) {
        println!("{:<6} {:>9.2} {:>9.2}", row.time, row.azimuth, row.altitude);
    }
}

pub fn print_json(
    trajectory: &DayTrajectory,
    zone: &Zone,
    table_every: Option<u32>,
) -> Result<(), serde_json::Error> {
    let date = trajectory.date();
    let output = JsonOutput {
        latitude: trajectory.position().latitude,
        longitude: trajectory.position().longitude,
        date: format!("{:04}-{:02}-{:02}", date.year, date.month, date.day),
        timezone: zone.to_string(),
        report: trajectory.report(),
        daylight_minutes: trajectory.daylight_minutes(),
        samples: table_every.map(|every| rows(trajectory, every)),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
