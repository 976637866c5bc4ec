use std::path::PathBuf;

use clap::Parser;
use globetrotter::{
    DashboardStats, Directory, Trip,
    domain::{city, day_label, money},
};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow, status_badge};

const RECENT_TRIPS: usize = 3;
const FEATURED_CITIES: usize = 3;

#[derive(Debug, Parser, Default)]
#[command(about = "Show trip counts, cities visited and total budget")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = Directory::open(root);
        let trips = directory.store().trips();
        let stats = DashboardStats::collect(trips, &directory.budget_policy());
        let currency = directory.config().currency();

        match self.output {
            OutputFormat::Json => Self::output_json(&stats, trips)?,
            OutputFormat::Table if self.quiet => Self::output_quiet(&stats),
            OutputFormat::Table => {
                if trips.is_empty() {
                    println!("No trips planned yet. Create one with 'trip create'.");
                    println!();
                    Self::output_destinations();
                    return Ok(());
                }
                Self::output_table(&stats, trips, currency);
            }
        }

        Ok(())
    }

    /// The most recently created trips, newest first.
    ///
    /// Creation dates have day granularity, so trips created on the same day
    /// keep reverse insertion order.
    fn recent(trips: &[Trip]) -> Vec<&Trip> {
        let mut recent: Vec<&Trip> = trips.iter().rev().collect();
        recent.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        recent.truncate(RECENT_TRIPS);
        recent
    }

    fn output_json(stats: &DashboardStats, trips: &[Trip]) -> anyhow::Result<()> {
        use serde_json::json;

        let recent: Vec<_> = Self::recent(trips)
            .into_iter()
            .map(|trip| {
                json!({
                    "id": trip.id(),
                    "name": trip.name(),
                    "status": trip.status(),
                    "startDate": trip.start_date(),
                    "endDate": trip.end_date(),
                    "stops": trip.stops().len(),
                })
            })
            .collect();

        let output = json!({
            "stats": stats,
            "recent": recent,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(stats: &DashboardStats) {
        println!(
            "trips={} active={} cities={} days={} budget={}",
            stats.trips, stats.active_trips, stats.cities, stats.days_planned, stats.total_budget
        );
    }

    fn output_table(stats: &DashboardStats, trips: &[Trip], currency: &str) {
        println!("{}", "Dashboard".strong());
        println!("{}", "─────────".dim());

        let rows = [
            ("Total trips", stats.trips.to_string()),
            ("Active trips", stats.active_trips.to_string()),
            ("Cities", stats.cities.to_string()),
            ("Days planned", stats.days_planned.to_string()),
            (
                "Total budget",
                money::format_with_symbol(currency, stats.total_budget),
            ),
        ];
        for (label, value) in rows {
            println!("{label:<14} {}", value.info());
        }

        println!();
        println!("{}", "Recent trips".strong());
        let narrow = is_narrow();
        for trip in Self::recent(trips) {
            if narrow {
                println!("  {} ({})", trip.name(), status_badge(trip.status()));
            } else {
                println!(
                    "  {:<28} {}  {} → {}  {}",
                    trip.name(),
                    status_badge(trip.status()),
                    trip.start_date().format("%b %-d"),
                    trip.end_date().format("%b %-d, %Y"),
                    day_label(trip.duration_days()).dim()
                );
            }
        }
        if trips.len() > RECENT_TRIPS {
            println!("{}", "  Run 'trip list' to see every trip.".dim());
        }

        println!();
        Self::output_destinations();
    }

    fn output_destinations() {
        println!("{}", "Popular destinations".strong());
        for city in city::catalog().iter().take(FEATURED_CITIES) {
            println!(
                "  {:<12} {}  {}",
                city.name,
                city.country.dim(),
                city.cost_index.label().dim()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use globetrotter::TripDetails;
    use non_empty_string::NonEmptyString;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn runs_on_empty_and_populated_planner() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        Status::default().run(root.clone()).unwrap();

        let mut directory = Directory::open(root.clone());
        directory
            .store_mut()
            .create(TripDetails::new(
                NonEmptyString::new("Coast".to_string()).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            ))
            .unwrap();
        directory.flush().unwrap();

        Status::default().run(root.clone()).unwrap();
        Status {
            output: OutputFormat::Json,
            quiet: false,
        }
        .run(root)
        .unwrap();
    }

    #[test]
    fn recent_lists_newest_first() {
        let details = |name: &str| {
            TripDetails::new(
                NonEmptyString::new(name.to_string()).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            )
        };
        let trips: Vec<Trip> = (1..=4)
            .map(|day| {
                Trip::new_with(
                    globetrotter::TripId::generate(),
                    NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                    details(&format!("Trip {day}")),
                )
            })
            .collect();

        let names: Vec<&str> = Status::recent(&trips).iter().map(|t| t.name()).collect();

        assert_eq!(names, ["Trip 4", "Trip 3", "Trip 2"]);
    }

    #[test]
    fn recent_prefers_later_trips_created_the_same_day() {
        let trips: Vec<Trip> = (1..=4)
            .map(|n| {
                Trip::new(TripDetails::new(
                    NonEmptyString::new(format!("Trip {n}")).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                ))
            })
            .collect();

        let names: Vec<&str> = Status::recent(&trips).iter().map(|t| t.name()).collect();

        assert_eq!(names, ["Trip 4", "Trip 3", "Trip 2"]);
    }
}
