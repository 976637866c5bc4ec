//! Domain models for trip planning.
//!
//! This module contains the trip, stop and activity records, the static city
//! catalog, the pure budget and duration calculations, and the in-memory
//! [`TripStore`] that owns the list of trips.

/// Activities booked within a stop.
pub mod activity;
pub use activity::{Activity, ActivityCategory, ActivityDraft};

/// Trip budget aggregation.
pub mod budget;
pub use budget::{BudgetBreakdown, BudgetCategory, BudgetPolicy, BudgetSummary, StopCost};

/// The read-only destination catalog.
pub mod city;
pub use city::{City, CityRef, CostIndex};

mod config;
pub use config::Config;

/// Aggregate statistics across all trips.
pub mod dashboard;
pub use dashboard::DashboardStats;

/// Day-span calculations.
pub mod dates;
pub use dates::{DateError, day_label, days_between, duration_days};

mod ids;
pub use ids::{ActivityId, StopId, TripId};

/// Pure functions that build new trips with stops or activities appended.
pub mod itinerary;
pub use itinerary::ItineraryError;

/// Currency formatting.
pub mod money;

/// City visits within a trip.
pub mod stop;
pub use stop::{Accommodation, Stop, Transport, TransportKind};

/// The in-memory collection of trips.
pub mod store;
pub use store::{StoreError, TripStore};

/// Trips and their editable details.
pub mod trip;
pub use trip::{Trip, TripDetails, TripStatus};

/// Form-level validation and audits of stored trips.
pub mod validation;
pub use validation::{Advisory, ValidationError};
