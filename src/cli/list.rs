use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use globetrotter::{Directory, Trip, TripStatus, domain::money};
use serde::Serialize;
use tracing::instrument;

use super::{
    short_id,
    terminal::{Colorize, is_narrow, status_badge},
};

/// Stops named in the table before collapsing into "+N".
const STOPS_SHOWN: usize = 2;

/// Command arguments for `trip list`.
#[derive(Debug, Parser)]
#[command(about = "List trips, optionally filtered by name or status")]
pub struct List {
    /// Case-insensitive substring match against the trip name.
    #[arg(default_value = "")]
    search: String,

    /// Show only trips with this status.
    #[arg(long, value_enum, default_value_t)]
    status: StatusFilter,

    /// Sort field (default: created).
    #[arg(long, value_enum, default_value_t)]
    sort: SortField,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Status filter; `all` disables filtering.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Planning,
    Upcoming,
    Ongoing,
    Completed,
}

impl StatusFilter {
    const fn status(self) -> Option<TripStatus> {
        match self {
            Self::All => None,
            Self::Planning => Some(TripStatus::Planning),
            Self::Upcoming => Some(TripStatus::Upcoming),
            Self::Ongoing => Some(TripStatus::Ongoing),
            Self::Completed => Some(TripStatus::Completed),
        }
    }
}

/// Sortable fields.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum SortField {
    /// Storage order, which is creation order.
    #[default]
    Created,
    Name,
    Start,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Row<'a> {
    id: &'a str,
    name: &'a str,
    status: TripStatus,
    start_date: String,
    end_date: String,
    days: i64,
    stops: Vec<&'a str>,
    is_public: bool,
    budget: f64,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = Directory::open(root);
        let policy = directory.budget_policy();

        let mut trips: Vec<&Trip> = directory
            .store()
            .search(&self.search, self.status.status())
            .collect();
        self.sort.apply(&mut trips);

        let rows: Vec<Row<'_>> = trips
            .into_iter()
            .map(|trip| Row {
                id: trip.id().as_str(),
                name: trip.name(),
                status: trip.status(),
                start_date: trip.start_date().to_string(),
                end_date: trip.end_date().to_string(),
                days: trip.duration_days(),
                stops: trip
                    .stops()
                    .iter()
                    .map(|stop| stop.city().city_name.as_str())
                    .collect(),
                is_public: trip.is_public(),
                budget: globetrotter::domain::budget::aggregate(trip.stops(), &policy).total,
            })
            .collect();

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table if self.quiet => {
                for row in &rows {
                    println!("{}\t{}\t{}", row.id, row.status, row.name);
                }
            }
            OutputFormat::Table => {
                if rows.is_empty() {
                    if directory.store().is_empty() {
                        println!("No trips yet. Create one with 'trip create'.");
                    } else {
                        println!("No trips match the filters.");
                    }
                    return Ok(());
                }
                Self::output_table(&rows, directory.config().currency());
            }
        }

        Ok(())
    }

    fn output_table(rows: &[Row<'_>], currency: &str) {
        if is_narrow() {
            for row in rows {
                println!("{} {} ({})", short_id(row.id).dim(), row.name, status_badge(row.status));
            }
            return;
        }

        println!(
            "{:<13}  {:<24}  {:<10}  {:<23}  {:>4}  {:<24}  {:>10}",
            "ID", "Name", "Status", "Dates", "Days", "Stops", "Budget"
        );
        for row in rows {
            // pad before coloring so escape codes don't skew the columns
            let status = format!("{:<10}", row.status.as_str());
            let status = status.replace(row.status.as_str(), &status_badge(row.status));
            let visibility = if row.is_public { " ⇗" } else { "" };
            println!(
                "{:<13}  {:<24}  {status}  {} → {}  {:>4}  {:<24}  {:>10}{}",
                short_id(row.id),
                row.name,
                row.start_date,
                row.end_date,
                row.days,
                summarize_stops(&row.stops),
                money::format_with_symbol(currency, row.budget),
                visibility.dim()
            );
        }
        println!("{}", format!("{} trips", rows.len()).dim());
    }
}

impl SortField {
    fn apply(self, trips: &mut [&Trip]) {
        match self {
            Self::Created => {}
            Self::Name => trips.sort_by_key(|trip| trip.name().to_lowercase()),
            Self::Start => trips.sort_by_key(|trip| trip.start_date()),
        }
    }
}

/// "Chennai, Madurai +2"
fn summarize_stops(stops: &[&str]) -> String {
    if stops.is_empty() {
        return "-".to_string();
    }
    let shown = stops[..stops.len().min(STOPS_SHOWN)].join(", ");
    match stops.len().saturating_sub(STOPS_SHOWN) {
        0 => shown,
        rest => format!("{shown} +{rest}"),
    }
}
