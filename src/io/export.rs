//! CSV export of run results: the hourly series, the daily table and the
//! truck population.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::devices::Truck;
use crate::sim::kpi::DailyStats;
use crate::sim::types::HourResult;

/// Column header of the hourly CSV.
pub const HOURLY_HEADER: &str = "hour,day,hour_of_day,solar_kw,trucks,solar_to_trucks_kwh,\
                                 battery_charged_kwh,battery_discharged_kwh,grid_kwh,\
                                 surplus_kwh,unmet_kwh,battery_soc_kwh,total_loaded_kwh,\
                                 solar_served_small,solar_served_medium,solar_served_large";

/// Column header of the daily CSV.
pub const DAILY_HEADER: &str = "day,truck_count,avg_load_pct,end_soc_kwh,grid_kwh,\
                                surplus_kwh,solar_kwh,unmet_kwh";

/// Column header of the truck CSV.
pub const TRUCKS_HEADER: &str =
    "arrival_hour,arrival_day,class,energy_needed_kwh,energy_loaded_kwh";

fn write_header<W: Write>(wtr: &mut csv::Writer<W>, header: &str) -> csv::Result<()> {
    wtr.write_record(header.split(',').map(str::trim))
}

fn create(path: &Path) -> io::Result<io::BufWriter<File>> {
    Ok(io::BufWriter::new(File::create(path)?))
}

/// Writes the hourly series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_hourly_csv(hours: &[HourResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    write_header(&mut wtr, HOURLY_HEADER)?;

    for r in hours {
        wtr.write_record(&[
            r.hour.to_string(),
            r.day().to_string(),
            r.hour_of_day().to_string(),
            format!("{:.4}", r.solar_kw),
            r.trucks_present.to_string(),
            format!("{:.4}", r.solar_to_trucks_kwh),
            format!("{:.4}", r.battery_charged_kwh),
            format!("{:.4}", r.battery_discharged_kwh),
            format!("{:.4}", r.grid_kwh),
            format!("{:.4}", r.surplus_kwh),
            format!("{:.4}", r.unmet_kwh),
            format!("{:.4}", r.battery_soc_kwh),
            format!("{:.4}", r.total_loaded_kwh),
            r.solar_served.small.to_string(),
            r.solar_served.medium.to_string(),
            r.solar_served.large.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the daily table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_daily_csv(daily: &[DailyStats], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    write_header(&mut wtr, DAILY_HEADER)?;

    for d in daily {
        wtr.write_record(&[
            d.day.to_string(),
            d.truck_count.to_string(),
            format!("{:.2}", d.avg_load_pct),
            format!("{:.4}", d.end_soc_kwh),
            format!("{:.4}", d.grid_kwh),
            format!("{:.4}", d.surplus_kwh),
            format!("{:.4}", d.solar_kwh),
            format!("{:.4}", d.unmet_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the truck population as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_trucks_csv(trucks: &[Truck], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    write_header(&mut wtr, TRUCKS_HEADER)?;

    for t in trucks {
        wtr.write_record(&[
            t.arrival_hour.to_string(),
            t.arrival_day().to_string(),
            t.class.to_string(),
            format!("{:.1}", t.energy_needed_kwh()),
            format!("{:.4}", t.energy_loaded_kwh()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the hourly series to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_hourly_csv(hours: &[HourResult], path: &Path) -> io::Result<()> {
    write_hourly_csv(hours, create(path)?)
}

/// Exports the daily table to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_daily_csv(daily: &[DailyStats], path: &Path) -> io::Result<()> {
    write_daily_csv(daily, create(path)?)
}

/// Exports the truck population to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_trucks_csv(trucks: &[Truck], path: &Path) -> io::Result<()> {
    write_trucks_csv(trucks, create(path)?)
}
