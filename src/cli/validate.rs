use std::path::PathBuf;

use clap::Parser;
use globetrotter::{Directory, Trip, domain::validation};
use serde::Serialize;
use tracing::instrument;

use super::{resolve_trip, short_id, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Check stored trips for inconsistent dates")]
pub struct Validate {
    /// Only check this trip (id, id prefix or name)
    trip: Option<String>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Advisories found in one trip.
#[derive(Debug, Serialize)]
struct TripFindings<'a> {
    id: &'a str,
    name: &'a str,
    advisories: Vec<String>,
}

fn audit<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> Vec<TripFindings<'a>> {
    trips
        .into_iter()
        .filter_map(|trip| {
            let advisories = validation::audit(trip);
            if advisories.is_empty() {
                return None;
            }
            tracing::debug!("{} advisories for trip {}", advisories.len(), trip.id());
            Some(TripFindings {
                id: trip.id().as_str(),
                name: trip.name(),
                advisories: advisories.iter().map(ToString::to_string).collect(),
            })
        })
        .collect()
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = Directory::open(root);

        let findings = match &self.trip {
            Some(key) => audit([resolve_trip(&directory, key)?]),
            None => audit(directory.store().trips()),
        };

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&findings)?),
            OutputFormat::Table if self.quiet => {}
            OutputFormat::Table => Self::output_table(&findings),
        }

        if !findings.is_empty() {
            std::process::exit(2);
        }

        Ok(())
    }

    fn output_table(findings: &[TripFindings<'_>]) {
        if findings.is_empty() {
            println!("{}", "✅ No problems found.".success());
            return;
        }

        let count: usize = findings.iter().map(|f| f.advisories.len()).sum();
        println!("{}", format!("⚠️  {count} problems found:").warning());
        for trip in findings {
            println!();
            println!("{} {}", trip.name.strong(), short_id(trip.id).dim());
            for advisory in &trip.advisories {
                println!("  - {advisory}");
            }
        }
        println!(
            "\n{}",
            "Fix the dates with 'trip edit' or remove the affected stops.".dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use globetrotter::storage::{FileStore, KeyValueStore, TRIPS_KEY};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn reports_only_trips_with_problems() {
        let tmp = tempdir().unwrap();
        let mut blobs = FileStore::new(tmp.path().join(globetrotter::storage::directory::DATA_DIR));
        blobs
            .set(
                TRIPS_KEY,
                r#"[
                  {
                    "id": "trip-1", "name": "Fine",
                    "startDate": "2025-06-01", "endDate": "2025-06-05",
                    "stops": [], "status": "planning", "isPublic": false,
                    "createdAt": "2025-05-01"
                  },
                  {
                    "id": "trip-2", "name": "Broken",
                    "startDate": "2025-06-05", "endDate": "2025-06-01",
                    "stops": [], "status": "planning", "isPublic": false,
                    "createdAt": "2025-05-01"
                  }
                ]"#,
            )
            .unwrap();

        let directory = Directory::open(tmp.path().to_path_buf());
        let findings = audit(directory.store().trips());

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name, "Broken");
        assert_eq!(findings[0].advisories, ["trip ends before it starts"]);
    }

    #[test]
    fn clean_planner_passes() {
        let tmp = tempdir().unwrap();
        Validate {
            trip: None,
            output: OutputFormat::Table,
            quiet: false,
        }
        .run(tmp.path().to_path_buf())
        .unwrap();
    }
}
