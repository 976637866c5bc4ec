use std::path::{Path, PathBuf};

mod budget;
mod cities;
mod list;
mod show;
mod status;
mod terminal;
mod validate;

use budget::Budget;
use chrono::NaiveDate;
use cities::Cities;
use clap::ArgAction;
use globetrotter::{
    ActivityCategory, Directory, Stop, Trip, TripStatus,
    domain::{Accommodation, ActivityDraft, Transport, TransportKind, city, dates, money},
};
use list::List;
use non_empty_string::NonEmptyString;
use show::Show;
use status::Status;
use tracing::instrument;
use validate::Validate;

/// Parse a `YYYY-MM-DD` date at the CLI boundary.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    dates::parse_date(s).map_err(|e| e.to_string())
}

/// Parse a trip name, trimming surrounding whitespace.
fn parse_name(s: &str) -> Result<NonEmptyString, String> {
    NonEmptyString::new(s.trim().to_string()).map_err(|_| "name cannot be blank".to_string())
}

/// Finds a trip by full id, unique id prefix, or exact name (ignoring case).
///
/// Returns `Ok(None)` when nothing matches and an error when the key is
/// blank or ambiguous.
fn find_trip<'a>(directory: &'a Directory, key: &str) -> anyhow::Result<Option<&'a Trip>> {
    if key.trim().is_empty() {
        anyhow::bail!("trip reference cannot be empty");
    }
    let trips = directory.store().trips();
    if let Some(trip) = trips.iter().find(|trip| trip.id().as_str() == key) {
        return Ok(Some(trip));
    }

    let matches: Vec<&Trip> = trips
        .iter()
        .filter(|trip| trip.id().as_str().starts_with(key) || trip.name().eq_ignore_ascii_case(key))
        .collect();

    match matches.as_slice() {
        [trip] => Ok(Some(*trip)),
        [] => Ok(None),
        many => anyhow::bail!(
            "'{key}' matches {} trips; use a longer id",
            many.len()
        ),
    }
}

/// Like [`find_trip`], but a missing trip is an error.
fn resolve_trip<'a>(directory: &'a Directory, key: &str) -> anyhow::Result<&'a Trip> {
    find_trip(directory, key)?.ok_or_else(|| anyhow::anyhow!("Trip '{key}' not found"))
}

/// Finds a stop by its 1-based position in the itinerary, id or id prefix,
/// or city.
fn resolve_stop<'a>(trip: &'a Trip, key: &str) -> anyhow::Result<&'a Stop> {
    if key.trim().is_empty() {
        anyhow::bail!("stop reference cannot be empty");
    }
    if let Ok(position) = key.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| trip.stops().get(index))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "'{}' has no stop {position} (it has {})",
                    trip.name(),
                    trip.stops().len()
                )
            });
    }

    let matches: Vec<&Stop> = trip
        .stops()
        .iter()
        .filter(|stop| {
            stop.id().as_str().starts_with(key)
                || stop.city().city_id.eq_ignore_ascii_case(key)
                || stop.city().city_name.eq_ignore_ascii_case(key)
        })
        .collect();

    match matches.as_slice() {
        [stop] => Ok(*stop),
        [] => anyhow::bail!("Stop '{key}' not found in '{}'", trip.name()),
        many => anyhow::bail!(
            "'{key}' matches {} stops in '{}'; use the stop number instead",
            many.len(),
            trip.name()
        ),
    }
}

/// The leading part of an id, enough to tell trips apart on screen.
fn short_id(id: &str) -> &str {
    id.get(..13).unwrap_or(id)
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The folder holding the planner data
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the dashboard (default)
    Status(Status),

    /// Set up a new planner
    Init,

    /// Create a new trip
    Create(Create),

    /// Change a trip's details, status or visibility
    Edit(Edit),

    /// Delete a trip
    Delete(Delete),

    /// List trips, optionally filtered by name or status
    List(List),

    /// Show a trip's itinerary
    Show(Show),

    /// Add a destination to a trip's itinerary
    AddStop(AddStop),

    /// Add an activity to a stop
    AddActivity(AddActivity),

    /// Set or clear how a stop is reached
    SetTransport(SetTransport),

    /// Set or clear where to stay at a stop
    SetAccommodation(SetAccommodation),

    /// Show a trip's budget breakdown
    Budget(Budget),

    /// Browse destinations
    Cities(Cities),

    /// Check stored trips for inconsistent dates
    Validate(Validate),

    /// Show or modify configuration settings
    Config(Config),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Init => Init::run(&root)?,
            Self::Create(command) => command.run(root)?,
            Self::Edit(command) => command.run(root)?,
            Self::Delete(command) => command.run(root)?,
            Self::List(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::AddStop(command) => command.run(root)?,
            Self::AddActivity(command) => command.run(root)?,
            Self::SetTransport(command) => command.run(root)?,
            Self::SetAccommodation(command) => command.run(root)?,
            Self::Budget(command) => command.run(root)?,
            Self::Cities(command) => command.run(root)?,
            Self::Validate(command) => command.run(root)?,
            Self::Config(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let data_dir = Directory::init(root)?;

        println!("Initialised planner in {}", root.display());
        println!("  Created: {}", data_dir.join("config.toml").display());
        println!();
        println!("Next steps:");
        println!("  trip create \"Temple Trail\" --start 2025-06-01 --end 2025-06-10");
        println!("  trip cities");

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Create {
    /// The name of the trip
    #[clap(value_parser = parse_name)]
    name: NonEmptyString,

    /// First day of the trip (YYYY-MM-DD)
    #[clap(long, value_parser = parse_date)]
    start: NaiveDate,

    /// Last day of the trip (YYYY-MM-DD)
    #[clap(long, value_parser = parse_date)]
    end: NaiveDate,

    /// A short description
    #[clap(long, short)]
    description: Option<String>,

    /// Cover image URL
    #[clap(long)]
    cover_image: Option<String>,
}

impl Create {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut directory = Directory::open(root);

        let mut details = globetrotter::TripDetails::new(self.name, self.start, self.end);
        details.description = self.description.filter(|d| !d.trim().is_empty());
        details.cover_image = self.cover_image;

        let id = directory.store_mut().create(details)?;
        directory.flush()?;

        println!("Created trip {id}");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Edit {
    /// The trip to edit (id, id prefix or name)
    trip: String,

    /// New name
    #[clap(long, value_parser = parse_name)]
    name: Option<NonEmptyString>,

    /// New first day (YYYY-MM-DD)
    #[clap(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// New last day (YYYY-MM-DD)
    #[clap(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// New description (an empty string clears it)
    #[clap(long, short)]
    description: Option<String>,

    /// New cover image URL (an empty string clears it)
    #[clap(long)]
    cover_image: Option<String>,

    /// New status (planning, upcoming, ongoing, completed)
    #[clap(long)]
    status: Option<TripStatus>,

    /// Make the trip shareable
    #[arg(long)]
    public: bool,

    /// Make the trip private
    #[arg(long, conflicts_with = "public")]
    private: bool,
}

impl Edit {
    const fn changes_details(&self) -> bool {
        self.name.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.description.is_some()
            || self.cover_image.is_some()
    }

    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let changes_details = self.changes_details();
        if !changes_details && self.status.is_none() && !self.public && !self.private {
            anyhow::bail!("Nothing to change; pass at least one option");
        }

        let mut directory = Directory::open(root);
        let trip = resolve_trip(&directory, &self.trip)?;
        let id = trip.id().clone();

        if changes_details {
            let mut details = trip.details();
            if let Some(name) = self.name {
                details.name = name;
            }
            if let Some(start) = self.start {
                details.start_date = start;
            }
            if let Some(end) = self.end {
                details.end_date = end;
            }
            if let Some(description) = self.description {
                details.description = Some(description).filter(|d| !d.trim().is_empty());
            }
            if let Some(cover_image) = self.cover_image {
                details.cover_image = Some(cover_image).filter(|c| !c.trim().is_empty());
            }
            directory.store_mut().update(&id, details)?;
        }
        if let Some(status) = self.status {
            directory.store_mut().set_status(&id, status)?;
        }
        if self.public || self.private {
            directory.store_mut().set_visibility(&id, self.public)?;
        }
        directory.flush()?;

        println!("Updated trip {id}");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Delete {
    /// The trip to delete (id, id prefix or name)
    trip: String,

    /// Show what would be deleted without deleting
    #[arg(long)]
    dry_run: bool,
}

impl Delete {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        use terminal::Colorize;

        let mut directory = Directory::open(root);
        let trip = resolve_trip(&directory, &self.trip)?;
        let id = trip.id().clone();

        if self.dry_run {
            println!(
                "Would delete '{}' ({} stops)",
                trip.name(),
                trip.stops().len()
            );
            return Ok(());
        }

        let removed = directory.store_mut().remove(&id)?;
        directory.flush()?;

        println!("{}", format!("Deleted trip '{}'", removed.name()).success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct AddStop {
    /// The trip to add the stop to (id, id prefix or name)
    trip: String,

    /// Catalog id of the destination (see 'trip cities')
    city: String,

    /// Arrival day (defaults to the trip's first day)
    #[clap(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Departure day (defaults to the trip's last day)
    #[clap(long, value_parser = parse_date)]
    end: Option<NaiveDate>,
}

impl AddStop {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let Some(city) = city::find(&self.city) else {
            anyhow::bail!("Unknown city '{}'; run 'trip cities' to browse", self.city);
        };

        let mut directory = Directory::open(root);
        let trip = resolve_trip(&directory, &self.trip)?;
        let id = trip.id().clone();
        let start = self.start.unwrap_or_else(|| trip.start_date());
        let end = self.end.unwrap_or_else(|| trip.end_date());

        let stop_id = directory.store_mut().add_stop(&id, city, start, end)?;
        directory.flush()?;

        println!("Added {} to trip {id} as stop {stop_id}", city.name);
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct AddActivity {
    /// The trip (id, id prefix or name)
    trip: String,

    /// The stop (number in the itinerary, id prefix or city)
    stop: String,

    /// Name of the activity
    name: String,

    /// Cost
    #[clap(long, default_value_t = 0.0)]
    cost: f64,

    /// Duration in hours
    #[clap(long, default_value_t = 1.0)]
    duration: f64,

    /// Category (sightseeing, food, adventure, culture, relaxation, shopping)
    #[clap(long, short, default_value = "sightseeing")]
    category: ActivityCategory,

    /// A short description
    #[clap(long, short)]
    description: Option<String>,
}

impl AddActivity {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut directory = Directory::open(root);
        let trip = resolve_trip(&directory, &self.trip)?;
        let trip_id = trip.id().clone();
        let stop = resolve_stop(trip, &self.stop)?;
        let stop_id = stop.id().clone();
        let city_name = stop.city().city_name.clone();

        let mut draft = ActivityDraft::new(self.name, self.cost, self.duration, self.category);
        draft.description = self.description.filter(|d| !d.trim().is_empty());
        let name = draft.name.clone();

        directory
            .store_mut()
            .add_activity(&trip_id, &stop_id, draft)?;
        directory.flush()?;

        println!("Added '{name}' to {city_name}");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct SetTransport {
    /// The trip (id, id prefix or name)
    trip: String,

    /// The stop (number in the itinerary, id prefix or city)
    stop: String,

    /// Mode of travel (flight, train, bus, car)
    #[clap(required_unless_present = "clear")]
    kind: Option<TransportKind>,

    /// Ticket cost
    #[clap(long, default_value_t = 0.0)]
    cost: f64,

    /// Remove the transport from the stop
    #[arg(long, conflicts_with = "kind")]
    clear: bool,
}

impl SetTransport {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut directory = Directory::open(root);
        let trip = resolve_trip(&directory, &self.trip)?;
        let trip_id = trip.id().clone();
        let stop = resolve_stop(trip, &self.stop)?;
        let stop_id = stop.id().clone();
        let city_name = stop.city().city_name.clone();

        let transport = self.kind.map(|kind| Transport {
            kind,
            cost: self.cost,
        });
        let message = match &transport {
            Some(transport) => format!("{city_name} is reached by {}", transport.kind),
            None => format!("Cleared transport for {city_name}"),
        };

        directory
            .store_mut()
            .set_transport(&trip_id, &stop_id, transport)?;
        directory.flush()?;

        println!("{message}");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct SetAccommodation {
    /// The trip (id, id prefix or name)
    trip: String,

    /// The stop (number in the itinerary, id prefix or city)
    stop: String,

    /// Hotel or host name
    #[clap(required_unless_present = "clear")]
    name: Option<String>,

    /// Total cost of the stay
    #[clap(long, default_value_t = 0.0)]
    cost: f64,

    /// Remove the accommodation from the stop
    #[arg(long, conflicts_with = "name")]
    clear: bool,
}

impl SetAccommodation {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut directory = Directory::open(root);
        let trip = resolve_trip(&directory, &self.trip)?;
        let trip_id = trip.id().clone();
        let stop = resolve_stop(trip, &self.stop)?;
        let stop_id = stop.id().clone();
        let city_name = stop.city().city_name.clone();

        let accommodation = self.name.map(|name| Accommodation {
            name,
            cost: self.cost,
        });
        let message = match &accommodation {
            Some(accommodation) => format!("Staying at {} in {city_name}", accommodation.name),
            None => format!("Cleared accommodation for {city_name}"),
        };

        directory
            .store_mut()
            .set_accommodation(&trip_id, &stop_id, accommodation)?;
        directory.flush()?;

        println!("{message}");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Config {
    #[instrument]
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        use terminal::Colorize;

        let mut directory = Directory::open(root);

        match self.command {
            ConfigCommand::Show => {
                let config = directory.config();
                println!("Configuration:");
                println!(
                    "  food_per_day: {} {}",
                    config.food_per_day(),
                    money::format_with_symbol(config.currency(), config.food_per_day()).dim()
                );
                println!("  currency: {}", config.currency());
            }
            ConfigCommand::Set { key, value } => {
                let mut config = directory.config().clone();

                match key.as_str() {
                    "food_per_day" => {
                        let amount: f64 = value.trim().parse().map_err(|_| {
                            anyhow::anyhow!("Invalid value for food_per_day: '{value}'")
                        })?;
                        config.set_food_per_day(amount).map_err(|e| anyhow::anyhow!(e))?;
                    }
                    "currency" => {
                        let symbol = value.trim();
                        if symbol.is_empty() {
                            anyhow::bail!("currency cannot be blank");
                        }
                        config.set_currency(symbol.to_string());
                    }
                    _ => {
                        anyhow::bail!(
                            "Unknown configuration key: '{key}'\nSupported keys: food_per_day, \
                             currency"
                        );
                    }
                }

                directory.save_config(config)?;
                println!("{}", format!("Set {key} = {}", value.trim()).success());
            }
        }

        Ok(())
    }
}
