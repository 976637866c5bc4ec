//! A filesystem backed trip planner
//!
//! The [`Directory`] ties a data directory on disk to the in-memory
//! [`TripStore`]. It is a thin wrapper: the store knows nothing about the
//! filesystem, and the directory only loads and flushes the store.

use std::{
    io,
    path::{Path, PathBuf},
};

use crate::{
    domain::{BudgetPolicy, Config, TripStore},
    storage::{FileStore, load_trips, save_trips},
};

/// Name of the folder holding configuration and data.
pub const DATA_DIR: &str = ".globetrotter";

const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur when setting up a data directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The directory already contains a planner.
    #[error("already initialised (found existing {0})")]
    AlreadyInitialised(PathBuf),
    /// The configuration file could not be written.
    #[error("{0}")]
    Config(String),
    /// A filesystem operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A filesystem backed store of trips.
#[derive(Debug)]
pub struct Directory {
    /// The root the data folder lives in.
    root: PathBuf,
    config: Config,
    store: TripStore,
    blobs: FileStore,
}

impl Directory {
    /// Creates the data folder and a default configuration under `root`.
    ///
    /// # Errors
    ///
    /// Fails if the folder already exists or cannot be created.
    pub fn init(root: &Path) -> Result<PathBuf, DirectoryError> {
        let data_dir = root.join(DATA_DIR);
        if data_dir.exists() {
            return Err(DirectoryError::AlreadyInitialised(data_dir));
        }

        std::fs::create_dir_all(&data_dir)?;
        Config::default()
            .save(&data_dir.join(CONFIG_FILE))
            .map_err(DirectoryError::Config)?;

        tracing::info!("initialised planner in {}", data_dir.display());
        Ok(data_dir)
    }

    /// Opens the planner stored under `root` and loads every trip.
    ///
    /// A missing data folder is treated as an empty planner, a missing or
    /// invalid configuration falls back to the defaults, and malformed trip
    /// data falls back to an empty trip list.
    #[must_use]
    pub fn open(root: PathBuf) -> Self {
        let data_dir = root.join(DATA_DIR);
        let config = load_config(&data_dir);
        let blobs = FileStore::new(data_dir);
        let store = TripStore::new(load_trips(&blobs));

        Self {
            root,
            config,
            store,
            blobs,
        }
    }

    /// The root the data folder lives in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The budget policy from the configuration.
    #[must_use]
    pub const fn budget_policy(&self) -> BudgetPolicy {
        self.config.budget_policy()
    }

    /// Replaces the configuration and writes it to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn save_config(&mut self, config: Config) -> Result<(), DirectoryError> {
        std::fs::create_dir_all(self.blobs.dir())?;
        config
            .save(&self.blobs.dir().join(CONFIG_FILE))
            .map_err(DirectoryError::Config)?;
        self.config = config;
        Ok(())
    }

    /// The in-memory trip store.
    #[must_use]
    pub const fn store(&self) -> &TripStore {
        &self.store
    }

    /// Mutable access to the trip store. Changes are kept in memory until
    /// [`flush`](Self::flush) is called.
    pub const fn store_mut(&mut self) -> &mut TripStore {
        &mut self.store
    }

    /// Writes the current trip list to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip list cannot be written.
    pub fn flush(&mut self) -> io::Result<()> {
        save_trips(&mut self.blobs, self.store.trips())
    }
}

fn load_config(data_dir: &Path) -> Config {
    let path = data_dir.join(CONFIG_FILE);
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use non_empty_string::NonEmptyString;
    use tempfile::tempdir;

    use super::*;
    use crate::{TripDetails, domain::city, storage::TRIPS_KEY};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn details() -> TripDetails {
        TripDetails::new(
            NonEmptyString::new("Coast".to_string()).unwrap(),
            date("2025-06-01"),
            date("2025-06-10"),
        )
    }

    #[test]
    fn init_creates_default_config() {
        let tmp = tempdir().unwrap();

        let data_dir = Directory::init(tmp.path()).unwrap();

        assert!(data_dir.join(CONFIG_FILE).exists());
        assert_eq!(Directory::open(tmp.path().to_path_buf()).config(), &Config::default());
    }

    #[test]
    fn init_twice_fails() {
        let tmp = tempdir().unwrap();
        Directory::init(tmp.path()).unwrap();
        assert!(matches!(
            Directory::init(tmp.path()),
            Err(DirectoryError::AlreadyInitialised(_))
        ));
    }

    #[test]
    fn open_empty_root_has_no_trips() {
        let tmp = tempdir().unwrap();
        let directory = Directory::open(tmp.path().to_path_buf());
        assert!(directory.store().is_empty());
    }

    #[test]
    fn flushed_trips_are_reloaded() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let mut directory = Directory::open(root.clone());
        let id = directory.store_mut().create(details()).unwrap();
        directory
            .store_mut()
            .add_stop(
                &id,
                city::find("trichy").unwrap(),
                date("2025-06-02"),
                date("2025-06-03"),
            )
            .unwrap();
        directory.flush().unwrap();

        let reloaded = Directory::open(root);
        let trip = reloaded.store().get(&id).unwrap();
        assert_eq!(trip.name(), "Coast");
        assert_eq!(trip.stops()[0].city().city_name, "Trichy");
    }

    #[test]
    fn unflushed_changes_are_not_persisted() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let mut directory = Directory::open(root.clone());
        directory.store_mut().create(details()).unwrap();

        assert!(Directory::open(root).store().is_empty());
    }

    #[test]
    fn corrupt_trip_file_opens_empty() {
        let tmp = tempdir().unwrap();
        let data_dir = Directory::init(tmp.path()).unwrap();
        std::fs::write(data_dir.join(format!("{TRIPS_KEY}.json")), "garbage").unwrap();

        let directory = Directory::open(tmp.path().to_path_buf());
        assert!(directory.store().is_empty());
    }

    #[test]
    fn config_changes_are_saved() {
        let tmp = tempdir().unwrap();
        let mut directory = Directory::open(tmp.path().to_path_buf());

        let mut config = directory.config().clone();
        config.set_food_per_day(550.0).unwrap();
        directory.save_config(config).unwrap();

        let reloaded = Directory::open(tmp.path().to_path_buf());
        assert_eq!(reloaded.budget_policy().food_per_day, 550.0);
    }
}
