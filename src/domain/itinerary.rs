//! None of these functions modify their arguments: each returns a freshly
//! built value and the caller decides whether to keep it.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    Accommodation, Activity, ActivityDraft, CityRef, Stop, StopId, Transport, Trip,
};

/// Errors that can occur when changing a trip's itinerary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItineraryError {
    /// The trip has no stop with the given id.
    #[error("stop {0} not found in this trip")]
    StopNotFound(StopId),
}

/// Builds a new stop for `city` with a fresh id, no activities, and no
/// transport or accommodation.
#[must_use]
pub fn new_stop(city: impl Into<CityRef>, start: NaiveDate, end: NaiveDate) -> Stop {
    Stop::new(city.into(), start, end)
}

/// Returns a copy of `trip` with a new stop for `city` appended to the end
/// of the itinerary.
///
/// The stop dates are not checked here; see
/// [`validate_stop_dates`](crate::domain::validation::validate_stop_dates).
#[must_use]
pub fn add_stop(trip: &Trip, city: impl Into<CityRef>, start: NaiveDate, end: NaiveDate) -> Trip {
    trip.with_stop(new_stop(city, start, end))
}

/// Builds a new activity with a fresh id.
#[must_use]
pub fn new_activity(draft: ActivityDraft) -> Activity {
    Activity::new(draft)
}

/// Returns a copy of `trip` with a new activity appended to the end of the
/// given stop's activity list.
///
/// # Errors
///
/// Returns [`ItineraryError::StopNotFound`] if the trip has no such stop.
pub fn add_activity(
    trip: &Trip,
    stop_id: &StopId,
    draft: ActivityDraft,
) -> Result<Trip, ItineraryError> {
    let activity = new_activity(draft);
    trip.map_stop(stop_id, |stop| stop.with_activity(activity))
        .ok_or_else(|| ItineraryError::StopNotFound(stop_id.clone()))
}

/// Returns a copy of `trip` with the stop's transport replaced.
///
/// # Errors
///
/// Returns [`ItineraryError::StopNotFound`] if the trip has no such stop.
pub fn set_transport(
    trip: &Trip,
    stop_id: &StopId,
    transport: Option<Transport>,
) -> Result<Trip, ItineraryError> {
    trip.map_stop(stop_id, |stop| stop.with_transport(transport))
        .ok_or_else(|| ItineraryError::StopNotFound(stop_id.clone()))
}

/// Returns a copy of `trip` with the stop's accommodation replaced.
///
/// # Errors
///
/// Returns [`ItineraryError::StopNotFound`] if the trip has no such stop.
pub fn set_accommodation(
    trip: &Trip,
    stop_id: &StopId,
    accommodation: Option<Accommodation>,
) -> Result<Trip, ItineraryError> {
    trip.map_stop(stop_id, |stop| stop.with_accommodation(accommodation))
        .ok_or_else(|| ItineraryError::StopNotFound(stop_id.clone()))
}
