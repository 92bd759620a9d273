use clap::Parser;
use env_logger::Env;
use log::info;
use sun_path::{CalendarDate, DayTrajectory, GeoPosition};

mod cli;
mod output;
mod zone;

use cli::{Args, Format};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let zone = zone::resolve_zone(&args.timezone)?;
    let date = args.date.unwrap_or_else(|| zone.today());
    let position = GeoPosition::new(args.latitude, args.longitude)?;
    info!(
        "computing {} at ({}, {}) in {}",
        date, position.latitude, position.longitude, zone
    );

    let trajectory = DayTrajectory::new(&position, CalendarDate::from(date), &zone)?;

    match args.format {
        Format::Text => {
            output::print_text(&trajectory, &zone);
            if args.table {
                output::print_table(&trajectory, args.every);
            }
        }
        Format::Json => {
            output::print_json(&trajectory, &zone, args.table.then_some(args.every))?;
        }
    }
    Ok(())
}
