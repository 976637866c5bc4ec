//! Trip planning and budgeting
//!
//! Trips are ordered lists of city stops, each with its own activities,
//! transport and accommodation. The budget of a trip is derived from its
//! stops on demand.

pub mod domain;
pub use domain::{
    Activity, ActivityCategory, BudgetBreakdown, BudgetPolicy, City, Config, DashboardStats, Stop,
    StoreError, Trip, TripDetails, TripId, TripStatus, TripStore,
};

/// Key-value persistence and the on-disk data directory.
pub mod storage;
pub use storage::{Directory, DirectoryError};
