//! The [`TripStore`] is the single source of truth for the list of trips.
//!
//! It knows nothing about persistence. Every mutation validates its input,
//! builds new [`Trip`] values with the pure functions in
//! [`itinerary`](crate::domain::itinerary), and swaps in a new list. A
//! [`snapshot`](TripStore::snapshot) taken before a mutation is never
//! affected by it.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    Accommodation, ActivityDraft, ActivityId, City, ItineraryError, StopId, Transport, Trip,
    TripDetails, TripId, TripStatus, itinerary,
    validation::{self, ValidationError},
};

/// Errors returned by [`TripStore`] mutations.
///
/// A failed mutation leaves the store unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// No trip has the given id.
    #[error("trip {0} not found")]
    TripNotFound(TripId),

    /// The trip has no stop with the given id.
    #[error("stop {stop} not found in trip {trip}")]
    StopNotFound {
        /// The trip that was searched.
        trip: TripId,
        /// The missing stop.
        stop: StopId,
    },

    /// There is no trip in the planning stage to add a destination to.
    #[error("no trip is in the planning stage; create a trip first")]
    NoPlanningTrip,

    /// The requested change failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// An ordered, copy-on-write collection of trips.
#[derive(Debug, Clone, Default)]
pub struct TripStore {
    trips: Arc<[Trip]>,
}

impl TripStore {
    /// Creates a store holding `trips` in the given order.
    #[must_use]
    pub fn new(trips: Vec<Trip>) -> Self {
        Self {
            trips: trips.into(),
        }
    }

    /// Every trip, in insertion order.
    #[must_use]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// A cheap, immutable handle on the current list.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Trip]> {
        Arc::clone(&self.trips)
    }

    /// Number of trips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the store holds no trips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Looks up a trip by id.
    #[must_use]
    pub fn get(&self, id: &TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id() == id)
    }

    /// Creates a trip and appends it to the list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] if the details fail validation.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&mut self, details: TripDetails) -> Result<TripId, StoreError> {
        validation::validate_details(&details)?;

        let trip = Trip::new(details);
        let id = trip.id().clone();
        self.push(trip);

        tracing::debug!("created trip {id}");
        Ok(id)
    }

    /// Replaces the editable details of a trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip does not exist or the details are
    /// invalid.
    pub fn update(&mut self, id: &TripId, details: TripDetails) -> Result<(), StoreError> {
        validation::validate_details(&details)?;
        self.replace_with(id, |trip| Ok(trip.updated(details)))
    }

    /// Changes the status of a trip.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TripNotFound`] if the trip does not exist.
    pub fn set_status(&mut self, id: &TripId, status: TripStatus) -> Result<(), StoreError> {
        self.replace_with(id, |trip| Ok(trip.with_status(status)))
    }

    /// Changes whether a trip is shared publicly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TripNotFound`] if the trip does not exist.
    pub fn set_visibility(&mut self, id: &TripId, is_public: bool) -> Result<(), StoreError> {
        self.replace_with(id, |trip| Ok(trip.with_visibility(is_public)))
    }

    /// Removes a trip from the list, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TripNotFound`] if the trip does not exist.
    pub fn remove(&mut self, id: &TripId) -> Result<Trip, StoreError> {
        let removed = self
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::TripNotFound(id.clone()))?;

        self.trips = self
            .trips
            .iter()
            .filter(|trip| trip.id() != id)
            .cloned()
            .collect();

        tracing::debug!("removed trip {id}");
        Ok(removed)
    }

    /// Appends a stop for `city` to a trip's itinerary.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip does not exist or the stop dates are not
    /// within the trip.
    #[instrument(level = "debug", skip(self, city), fields(city = city.id))]
    pub fn add_stop(
        &mut self,
        trip_id: &TripId,
        city: &City,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StopId, StoreError> {
        let mut stop_id = None;
        self.replace_with(trip_id, |trip| {
            validation::validate_stop_dates(trip, start, end)?;
            let updated = itinerary::add_stop(trip, city, start, end);
            stop_id = updated.stops().last().map(|stop| stop.id().clone());
            Ok(updated)
        })?;
        stop_id.ok_or_else(|| StoreError::TripNotFound(trip_id.clone()))
    }

    /// Adds a destination from the catalog to the first trip still in
    /// planning, spanning that trip's full date range.
    ///
    /// Returns the id of the trip that received the stop.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoPlanningTrip`] if no trip is being planned.
    pub fn add_city_to_first_planning_trip(
        &mut self,
        city: &City,
    ) -> Result<(TripId, StopId), StoreError> {
        let target = self
            .trips
            .iter()
            .find(|trip| trip.status() == TripStatus::Planning)
            .ok_or(StoreError::NoPlanningTrip)?;
        let trip_id = target.id().clone();
        let (start, end) = (target.start_date(), target.end_date());

        let stop_id = self.add_stop(&trip_id, city, start, end)?;
        Ok((trip_id, stop_id))
    }

    /// Appends an activity to a stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip or stop does not exist or the activity
    /// fails validation.
    #[instrument(level = "debug", skip(self, draft))]
    pub fn add_activity(
        &mut self,
        trip_id: &TripId,
        stop_id: &StopId,
        draft: ActivityDraft,
    ) -> Result<ActivityId, StoreError> {
        validation::validate_activity(&draft)?;

        let mut activity_id = None;
        self.replace_with(trip_id, |trip| {
            let updated = itinerary::add_activity(trip, stop_id, draft)
                .map_err(|e| stop_not_found(trip_id, e))?;
            activity_id = updated
                .stop(stop_id)
                .and_then(|stop| stop.activities().last())
                .map(|activity| activity.id().clone());
            Ok(updated)
        })?;
        activity_id.ok_or_else(|| StoreError::StopNotFound {
            trip: trip_id.clone(),
            stop: stop_id.clone(),
        })
    }

    /// Sets or clears the transport of a stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip or stop does not exist or the cost is
    /// invalid.
    pub fn set_transport(
        &mut self,
        trip_id: &TripId,
        stop_id: &StopId,
        transport: Option<Transport>,
    ) -> Result<(), StoreError> {
        if let Some(transport) = &transport {
            validation::validate_cost("transport cost", transport.cost)?;
        }
        self.replace_with(trip_id, |trip| {
            itinerary::set_transport(trip, stop_id, transport)
                .map_err(|e| stop_not_found(trip_id, e))
        })
    }

    /// Sets or clears the accommodation of a stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip or stop does not exist, the name is
    /// blank, or the cost is invalid.
    pub fn set_accommodation(
        &mut self,
        trip_id: &TripId,
        stop_id: &StopId,
        accommodation: Option<Accommodation>,
    ) -> Result<(), StoreError> {
        if let Some(accommodation) = &accommodation {
            if accommodation.name.trim().is_empty() {
                return Err(ValidationError::MissingField("accommodation name").into());
            }
            validation::validate_cost("accommodation cost", accommodation.cost)?;
        }
        self.replace_with(trip_id, |trip| {
            itinerary::set_accommodation(trip, stop_id, accommodation)
                .map_err(|e| stop_not_found(trip_id, e))
        })
    }

    /// Trips whose name contains `query` (ignoring case) and, if given,
    /// whose status matches.
    pub fn search<'a>(
        &'a self,
        query: &str,
        status: Option<TripStatus>,
    ) -> impl Iterator<Item = &'a Trip> + use<'a> {
        let query = query.trim().to_lowercase();
        self.trips.iter().filter(move |trip| {
            trip.name().to_lowercase().contains(&query)
                && status.is_none_or(|status| trip.status() == status)
        })
    }

    fn push(&mut self, trip: Trip) {
        let mut trips = self.trips.to_vec();
        trips.push(trip);
        self.trips = trips.into();
    }

    /// Rebuilds the list with the trip identified by `id` replaced by the
    /// output of `f`.
    fn replace_with(
        &mut self,
        id: &TripId,
        f: impl FnOnce(&Trip) -> Result<Trip, StoreError>,
    ) -> Result<(), StoreError> {
        let index = self
            .trips
            .iter()
            .position(|trip| trip.id() == id)
            .ok_or_else(|| StoreError::TripNotFound(id.clone()))?;

        let replacement = f(&self.trips[index])?;
        let mut trips = self.trips.to_vec();
        trips[index] = replacement;
        self.trips = trips.into();
        Ok(())
    }
}

fn stop_not_found(trip_id: &TripId, error: ItineraryError) -> StoreError {
    match error {
        ItineraryError::StopNotFound(stop) => StoreError::StopNotFound {
            trip: trip_id.clone(),
            stop,
        },
    }
}
