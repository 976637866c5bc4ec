use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate};
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::domain::{Stop, StopId, TripId, duration_days};

/// A planned journey: dates, descriptive details, and an ordered list of
/// stops.
///
/// Trips are never modified in place. Every change produces a new `Trip`
/// value, leaving the original available to anything still holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub(crate) id: TripId,
    pub(crate) name: NonEmptyString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) cover_image: Option<String>,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    #[serde(default)]
    pub(crate) stops: Vec<Stop>,
    #[serde(default)]
    pub(crate) status: TripStatus,
    #[serde(default)]
    pub(crate) is_public: bool,
    pub(crate) created_at: NaiveDate,
}

/// The user-editable fields of a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDetails {
    /// Display name.
    pub name: NonEmptyString,
    /// Optional free text.
    pub description: Option<String>,
    /// Image reference, either a data URI or a URL.
    pub cover_image: Option<String>,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip.
    pub end_date: NaiveDate,
}

impl TripDetails {
    /// Details with only the required fields set.
    #[must_use]
    pub const fn new(name: NonEmptyString, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name,
            description: None,
            cover_image: None,
            start_date,
            end_date,
        }
    }
}

impl Trip {
    /// Create a trip from its details.
    ///
    /// A new id is generated, the creation date is today, the status is
    /// [`TripStatus::Planning`], the trip is private and has no stops.
    #[must_use]
    pub fn new(details: TripDetails) -> Self {
        Self::new_with(TripId::generate(), Local::now().date_naive(), details)
    }

    /// Create a trip with an explicit id and creation date.
    #[must_use]
    pub fn new_with(id: TripId, created_at: NaiveDate, details: TripDetails) -> Self {
        let TripDetails {
            name,
            description,
            cover_image,
            start_date,
            end_date,
        } = details;

        Self {
            id,
            name,
            description,
            cover_image,
            start_date,
            end_date,
            stops: Vec::new(),
            status: TripStatus::default(),
            is_public: false,
            created_at,
        }
    }

    /// A copy of this trip with the editable details replaced.
    ///
    /// The id, creation date, stops, status and visibility are preserved.
    #[must_use]
    pub fn updated(&self, details: TripDetails) -> Self {
        let TripDetails {
            name,
            description,
            cover_image,
            start_date,
            end_date,
        } = details;

        Self {
            name,
            description,
            cover_image,
            start_date,
            end_date,
            ..self.clone()
        }
    }

    /// A copy of this trip with a different status.
    #[must_use]
    pub fn with_status(&self, status: TripStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// A copy of this trip with a different sharing flag.
    #[must_use]
    pub fn with_visibility(&self, is_public: bool) -> Self {
        Self {
            is_public,
            ..self.clone()
        }
    }

    /// A copy of this trip with the stop appended to the itinerary.
    #[must_use]
    pub fn with_stop(&self, stop: Stop) -> Self {
        let mut trip = self.clone();
        trip.stops.push(stop);
        trip
    }

    /// A copy of this trip with the stop identified by `id` replaced by the
    /// result of `f`.
    ///
    /// Returns `None` if the trip has no such stop.
    #[must_use]
    pub fn map_stop(&self, id: &StopId, f: impl FnOnce(&Stop) -> Stop) -> Option<Self> {
        let index = self.stops.iter().position(|stop| &stop.id == id)?;
        let mut trip = self.clone();
        trip.stops[index] = f(&self.stops[index]);
        Some(trip)
    }

    /// The unique identifier of this trip.
    #[must_use]
    pub const fn id(&self) -> &TripId {
        &self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional cover image reference.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    /// First day of the trip.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the trip.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Whole days between the start and end date.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }

    /// Stops in itinerary order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Looks up a stop by id.
    #[must_use]
    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.iter().find(|stop| &stop.id == id)
    }

    /// The planning status.
    #[must_use]
    pub const fn status(&self) -> TripStatus {
        self.status
    }

    /// Whether the trip is shared publicly.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public
    }

    /// The day the trip was created.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// The editable details of this trip.
    #[must_use]
    pub fn details(&self) -> TripDetails {
        TripDetails {
            name: self.name.clone(),
            description: self.description.clone(),
            cover_image: self.cover_image.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Where a trip is in its lifecycle.
///
/// The status only changes through an explicit edit; it never follows the
/// calendar automatically.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// Still being put together.
    #[default]
    Planning,
    /// Booked and not yet started.
    Upcoming,
    /// In progress.
    Ongoing,
    /// Finished.
    Completed,
}

impl TripStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Planning,
        Self::Upcoming,
        Self::Ongoing,
        Self::Completed,
    ];

    /// The lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    /// Whether the trip still lies ahead (planning or upcoming).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Planning | Self::Upcoming)
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown trip status.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown trip status '{0}' (expected planning, upcoming, ongoing or completed)")]
pub struct UnknownStatus(String);

impl FromStr for TripStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CityRef;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn details(name: &str) -> TripDetails {
        TripDetails::new(
            NonEmptyString::new(name.to_string()).unwrap(),
            date("2025-06-01"),
            date("2025-06-10"),
        )
    }

    #[test]
    fn new_trip_has_defaults() {
        let trip = Trip::new(details("Temple Run"));

        assert_eq!(trip.name(), "Temple Run");
        assert_eq!(trip.status(), TripStatus::Planning);
        assert!(!trip.is_public());
        assert!(trip.stops().is_empty());
        assert_eq!(trip.created_at(), Local::now().date_naive());
        assert_eq!(trip.duration_days(), 9);
    }

    #[test]
    fn rapid_creation_yields_distinct_ids() {
        let first = Trip::new(details("One"));
        let second = Trip::new(details("Two"));
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn update_preserves_identity_and_itinerary() {
        let trip = Trip::new_with(TripId::from("trip-1"), date("2025-01-01"), details("Old"))
            .with_status(TripStatus::Upcoming)
            .with_visibility(true)
            .with_stop(Stop::new(
                CityRef {
                    city_id: "ooty".to_string(),
                    city_name: "Ooty".to_string(),
                    country: "Tamil Nadu, India".to_string(),
                },
                date("2025-06-02"),
                date("2025-06-05"),
            ));
        let before = trip.clone();

        let mut new_details = details("New");
        new_details.description = Some("Hill stations".to_string());
        new_details.end_date = date("2025-06-12");
        let updated = trip.updated(new_details);

        assert_eq!(trip, before);
        assert_eq!(updated.id(), trip.id());
        assert_eq!(updated.created_at(), trip.created_at());
        assert_eq!(updated.stops(), trip.stops());
        assert_eq!(updated.status(), TripStatus::Upcoming);
        assert!(updated.is_public());
        assert_eq!(updated.name(), "New");
        assert_eq!(updated.description(), Some("Hill stations"));
        assert_eq!(updated.end_date(), date("2025-06-12"));
    }

    #[test]
    fn map_stop_reports_unknown_stop() {
        let trip = Trip::new(details("Empty"));
        assert!(trip.map_stop(&StopId::from("stop-x"), Clone::clone).is_none());
    }

    #[test]
    fn reads_blob_written_by_browser_app() {
        let json = r#"{
            "id": "trip-1717171717171",
            "name": "South India",
            "startDate": "2025-06-01",
            "endDate": "2025-06-10",
            "stops": [],
            "totalBudget": 0,
            "status": "upcoming",
            "isPublic": true,
            "createdAt": "2025-05-20"
        }"#;

        let trip: Trip = serde_json::from_str(json).unwrap();

        assert_eq!(trip.id().as_str(), "trip-1717171717171");
        assert_eq!(trip.status(), TripStatus::Upcoming);
        assert!(trip.is_public());
        assert_eq!(trip.description(), None);
        assert_eq!(trip.created_at(), date("2025-05-20"));
    }

    #[test]
    fn empty_name_is_rejected_on_load() {
        let json = r#"{
            "id": "trip-1",
            "name": "",
            "startDate": "2025-06-01",
            "endDate": "2025-06-10",
            "createdAt": "2025-05-20"
        }"#;

        assert!(serde_json::from_str::<Trip>(json).is_err());
    }

    #[test]
    fn status_parses() {
        assert_eq!("Completed".parse::<TripStatus>(), Ok(TripStatus::Completed));
        assert!("cancelled".parse::<TripStatus>().is_err());
        assert!(TripStatus::Planning.is_active());
        assert!(!TripStatus::Ongoing.is_active());
    }
}
