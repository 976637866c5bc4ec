pub mod directory;
/// Key-value blob stores.
pub mod kv;
/// Encoding the trip list as a single blob.
pub mod trips;

pub use directory::{Directory, DirectoryError};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use trips::{TRIPS_KEY, load_trips, save_trips};
