use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use globetrotter::{City, Directory, StoreError, domain::city};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

/// Command arguments for `trip cities`.
#[derive(Debug, Parser)]
#[command(about = "Browse destinations")]
pub struct Cities {
    /// Case-insensitive match against city name or region.
    #[arg(default_value = "")]
    search: String,

    /// Add this city to the first trip still being planned.
    #[arg(long, value_name = "CITY")]
    add: Option<String>,

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

impl Cities {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        if let Some(city_id) = &self.add {
            return Self::quick_add(root, city_id);
        }

        let cities: Vec<&City> = city::search(&self.search).collect();

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cities)?),
            OutputFormat::Table => {
                if cities.is_empty() {
                    println!("No destinations match '{}'.", self.search);
                    return Ok(());
                }
                Self::output_table(&cities);
            }
        }
        Ok(())
    }

    fn quick_add(root: PathBuf, city_id: &str) -> anyhow::Result<()> {
        let Some(city) = city::find(city_id) else {
            anyhow::bail!("Unknown city '{city_id}'; run 'trip cities' to browse");
        };

        let mut directory = Directory::open(root);
        let (trip_id, _) = match directory.store_mut().add_city_to_first_planning_trip(city) {
            Ok(added) => added,
            Err(StoreError::NoPlanningTrip) => {
                anyhow::bail!("Create a trip first! No trip is currently being planned.")
            }
            Err(e) => return Err(e.into()),
        };
        directory.flush()?;

        let trip_name = directory
            .store()
            .get(&trip_id)
            .map_or_else(|| trip_id.to_string(), |trip| trip.name().to_string());
        println!("{}", format!("Added {} to {trip_name}", city.name).success());
        Ok(())
    }

    fn output_table(cities: &[&City]) {
        let narrow = is_narrow();
        for city in cities {
            println!(
                "{} {}  {}",
                city.name.strong(),
                format!("({})", city.id).dim(),
                city.cost_index.label().info()
            );
            println!("  {}", city.country.dim());
            if narrow {
                continue;
            }
            println!("  {}", city.description);
            println!("  Popular: {}", city.popular_activities.join(", "));
            println!();
        }
        println!(
            "{}",
            "Add one to your plan with 'trip cities --add <city>'.".dim()
        );
    }
}
