use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use globetrotter::{
    Directory, Stop, Trip,
    domain::{day_label, money},
};
use tracing::instrument;

use super::{
    find_trip,
    terminal::{Colorize, status_badge},
};

/// Base URL of the public share page.
const SHARE_BASE_URL: &str = "https://globetrotter.app/trip";

/// Command arguments for `trip show`.
#[derive(Debug, Parser)]
#[command(about = "Show a trip's itinerary")]
pub struct Show {
    /// The trip to show (id, id prefix or name)
    trip: String,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = Directory::open(root);
        self.render(&directory, &mut io::stdout().lock())
    }

    fn render(&self, directory: &Directory, out: &mut impl Write) -> anyhow::Result<()> {
        let Some(trip) = find_trip(directory, &self.trip)? else {
            writeln!(out, "Trip not found")?;
            writeln!(out, "{}", "Run 'trip list' to see your trips.".dim())?;
            return Ok(());
        };

        match self.output {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(trip)?)?,
            OutputFormat::Table => print_itinerary(out, trip, directory.config().currency())?,
        }
        Ok(())
    }
}

fn share_link(trip: &Trip) -> String {
    format!("{SHARE_BASE_URL}/{}", trip.id())
}

fn print_itinerary(out: &mut impl Write, trip: &Trip, currency: &str) -> io::Result<()> {
    writeln!(out, "{}", trip.name().strong())?;
    writeln!(
        out,
        "{}  {}  {}",
        status_badge(trip.status()),
        (if trip.is_public() { "public" } else { "private" }).dim(),
        trip.id().as_str().dim()
    )?;
    writeln!(
        out,
        "{} → {} ({})",
        trip.start_date().format("%a, %b %-d, %Y"),
        trip.end_date().format("%a, %b %-d, %Y"),
        day_label(trip.duration_days())
    )?;
    if let Some(description) = trip.description() {
        writeln!(out)?;
        writeln!(out, "{description}")?;
    }
    if trip.is_public() {
        writeln!(out, "Share link: {}", share_link(trip).info())?;
    }

    writeln!(out)?;
    if trip.stops().is_empty() {
        writeln!(out, "No stops yet")?;
        writeln!(
            out,
            "{}",
            format!("Add one with 'trip add-stop {} <city>'.", trip.id()).dim()
        )?;
        return Ok(());
    }

    for (index, stop) in trip.stops().iter().enumerate() {
        print_stop(out, index + 1, stop, currency)?;
    }
    Ok(())
}

fn print_stop(
    out: &mut impl Write,
    number: usize,
    stop: &Stop,
    currency: &str,
) -> io::Result<()> {
    let city = stop.city();
    writeln!(
        out,
        "{number}. {} {}",
        city.city_name.strong(),
        city.country.dim()
    )?;
    writeln!(
        out,
        "   {} → {} ({})",
        stop.start_date().format("%b %-d"),
        stop.end_date().format("%b %-d"),
        day_label(stop.duration_days())
    )?;

    if let Some(transport) = stop.transport() {
        writeln!(
            out,
            "   Transport: {} ({})",
            transport.kind,
            money::format_with_symbol(currency, transport.cost)
        )?;
    }
    if let Some(accommodation) = stop.accommodation() {
        writeln!(
            out,
            "   Stay: {} ({})",
            accommodation.name,
            money::format_with_symbol(currency, accommodation.cost)
        )?;
    }

    if stop.activities().is_empty() {
        writeln!(out, "   {}", "No activities planned".dim())?;
    }
    for activity in stop.activities() {
        writeln!(
            out,
            "   • {} {} {}h  {}",
            activity.name(),
            format!("[{}]", activity.category()).dim(),
            activity.duration(),
            money::format_with_symbol(currency, activity.cost())
        )?;
        if let Some(description) = activity.description() {
            writeln!(out, "     {}", description.dim())?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use globetrotter::{ActivityCategory, TripDetails, domain::ActivityDraft, domain::city};
    use non_empty_string::NonEmptyString;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn share_link_uses_trip_id() {
        let trip = Trip::new(TripDetails::new(
            NonEmptyString::new("Coast".to_string()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        ));

        assert_eq!(
            share_link(&trip),
            format!("https://globetrotter.app/trip/{}", trip.id())
        );
    }

    fn render(root: &std::path::Path, trip: &str, output: OutputFormat) -> String {
        let directory = Directory::open(root.to_path_buf());
        let mut out = Vec::new();
        Show {
            trip: trip.to_string(),
            output,
        }
        .render(&directory, &mut out)
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn shows_trip_with_stops_and_activities() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let mut directory = Directory::open(root.clone());
        let store = directory.store_mut();
        let id = store
            .create(TripDetails::new(
                NonEmptyString::new("Coast".to_string()).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            ))
            .unwrap();
        let stop = store
            .add_stop(
                &id,
                city::find("chennai").unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            )
            .unwrap();
        store
            .add_activity(
                &id,
                &stop,
                ActivityDraft::new("Marina Beach", 0.0, 2.0, ActivityCategory::Relaxation),
            )
            .unwrap();
        store.set_visibility(&id, true).unwrap();
        directory.flush().unwrap();

        let table = render(&root, "Coast", OutputFormat::Table);
        assert!(table.contains("Marina Beach"), "{table}");
        assert!(table.contains(&format!("{SHARE_BASE_URL}/{id}")), "{table}");

        let json: serde_json::Value =
            serde_json::from_str(&render(&root, "Coast", OutputFormat::Json)).unwrap();
        assert_eq!(json["id"], id.as_str());

        Show {
            trip: "Coast".to_string(),
            output: OutputFormat::Table,
        }
        .run(root)
        .unwrap();
    }

    #[test]
    fn trip_without_stops_says_so() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let mut directory = Directory::open(root.clone());
        directory
            .store_mut()
            .create(TripDetails::new(
                NonEmptyString::new("Coast".to_string()).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            ))
            .unwrap();
        directory.flush().unwrap();

        let table = render(&root, "Coast", OutputFormat::Table);

        assert!(table.contains("No stops yet"), "{table}");
        assert!(!table.contains("Share link"), "{table}");
    }

    #[test]
    fn unknown_trip_shows_not_found() {
        let tmp = tempdir().unwrap();

        for output in [OutputFormat::Table, OutputFormat::Json] {
            let rendered = render(tmp.path(), "nowhere", output);
            assert!(rendered.starts_with("Trip not found\n"), "{rendered}");
        }

        let show = Show {
            trip: "nowhere".to_string(),
            output: OutputFormat::Table,
        };
        assert!(show.run(tmp.path().to_path_buf()).is_ok());
    }
}
