use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{ActivityDraft, StopId, Trip, TripDetails};

/// A reason a requested change was refused.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required text field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A date range ends before it starts.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// A stop date falls outside the trip.
    #[error("{field} {date} is outside the trip ({trip_start} to {trip_end})")]
    OutsideTrip {
        /// Which stop date is out of range.
        field: &'static str,
        /// The offending date.
        date: NaiveDate,
        /// First day of the trip.
        trip_start: NaiveDate,
        /// Last day of the trip.
        trip_end: NaiveDate,
    },

    /// A cost was negative or not a number.
    #[error("{field} must be a non-negative amount, got {value}")]
    InvalidCost {
        /// Which cost is invalid.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An activity duration was zero, negative or not a number.
    #[error("duration must be a positive number of hours, got {0}")]
    InvalidDuration(f64),
}

/// Checks the editable fields of a trip.
///
/// The name is guaranteed non-empty by its type, but must not be only
/// whitespace.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_details(details: &TripDetails) -> Result<(), ValidationError> {
    if details.name.as_str().trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    validate_range(details.start_date, details.end_date)
}

/// Checks that a new stop lies within its trip:
/// `trip start <= start <= end <= trip end`.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_stop_dates(
    trip: &Trip,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), ValidationError> {
    let outside = |field, date| ValidationError::OutsideTrip {
        field,
        date,
        trip_start: trip.start_date(),
        trip_end: trip.end_date(),
    };

    if start < trip.start_date() || start > trip.end_date() {
        return Err(outside("start date", start));
    }
    validate_range(start, end)?;
    if end > trip.end_date() {
        return Err(outside("end date", end));
    }
    Ok(())
}

/// Checks the fields of a new activity.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_activity(draft: &ActivityDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingField("activity name"));
    }
    validate_cost("cost", draft.cost)?;
    if !draft.duration.is_finite() || draft.duration <= 0.0 {
        return Err(ValidationError::InvalidDuration(draft.duration));
    }
    Ok(())
}

/// Checks that an amount is a finite, non-negative number.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCost`] naming `field`.
pub fn validate_cost(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidCost { field, value })
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }
    Ok(())
}

/// A problem found in a trip that is already stored.
///
/// Stored trips are accepted as they are; these findings are advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The trip ends before it starts.
    TripEndsBeforeStart,
    /// A stop ends before it starts.
    StopEndsBeforeStart(StopId),
    /// A stop starts before the trip or ends after it.
    StopOutsideTrip(StopId),
    /// A stop starts before the previous stop.
    StopOutOfOrder(StopId),
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TripEndsBeforeStart => write!(f, "trip ends before it starts"),
            Self::StopEndsBeforeStart(id) => write!(f, "stop {id} ends before it starts"),
            Self::StopOutsideTrip(id) => write!(f, "stop {id} falls outside the trip dates"),
            Self::StopOutOfOrder(id) => {
                write!(f, "stop {id} starts before the previous stop")
            }
        }
    }
}

/// Reports every advisory for a stored trip.
#[must_use]
pub fn audit(trip: &Trip) -> Vec<Advisory> {
    let mut findings = Vec::new();

    if trip.end_date() < trip.start_date() {
        findings.push(Advisory::TripEndsBeforeStart);
    }

    let mut previous_start: Option<NaiveDate> = None;
    for stop in trip.stops() {
        if stop.end_date() < stop.start_date() {
            findings.push(Advisory::StopEndsBeforeStart(stop.id().clone()));
        }
        if stop.start_date() < trip.start_date() || stop.end_date() > trip.end_date() {
            findings.push(Advisory::StopOutsideTrip(stop.id().clone()));
        }
        if previous_start.is_some_and(|previous| stop.start_date() < previous) {
            findings.push(Advisory::StopOutOfOrder(stop.id().clone()));
        }
        previous_start = Some(stop.start_date());
    }

    findings
}

#[cfg(test)]
mod tests {
    use non_empty_string::NonEmptyString;
    use test_case::test_case;

    use super::*;
    use crate::domain::{ActivityCategory, CityRef, Stop};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn trip() -> Trip {
        Trip::new(TripDetails::new(
            NonEmptyString::new("June".to_string()).unwrap(),
            date("2025-06-01"),
            date("2025-06-10"),
        ))
    }

    fn stop(start: &str, end: &str) -> Stop {
        Stop::new(
            CityRef {
                city_id: "chennai".to_string(),
                city_name: "Chennai".to_string(),
                country: "Tamil Nadu, India".to_string(),
            },
            date(start),
            date(end),
        )
    }

    #[test_case("2025-06-01", "2025-06-10"; "whole trip")]
    #[test_case("2025-06-01", "2025-06-01"; "single day at start")]
    #[test_case("2025-06-10", "2025-06-10"; "single day at end")]
    #[test_case("2025-06-03", "2025-06-07"; "inside")]
    fn stop_dates_within_trip_are_accepted(start: &str, end: &str) {
        assert_eq!(validate_stop_dates(&trip(), date(start), date(end)), Ok(()));
    }

    #[test_case("2025-05-31", "2025-06-03"; "starts before trip")]
    #[test_case("2025-06-11", "2025-06-12"; "starts after trip")]
    #[test_case("2025-06-05", "2025-06-11"; "ends after trip")]
    #[test_case("2025-06-05", "2025-06-04"; "ends before it starts")]
    fn stop_dates_outside_trip_are_rejected(start: &str, end: &str) {
        assert!(validate_stop_dates(&trip(), date(start), date(end)).is_err());
    }

    #[test]
    fn blank_trip_name_is_rejected() {
        let details = TripDetails::new(
            NonEmptyString::new("   ".to_string()).unwrap(),
            date("2025-06-01"),
            date("2025-06-10"),
        );
        assert_eq!(
            validate_details(&details),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn reversed_trip_dates_are_rejected() {
        let mut details = trip().details();
        details.end_date = date("2025-05-01");
        assert!(matches!(
            validate_details(&details),
            Err(ValidationError::EndBeforeStart { .. })
        ));
    }

    #[test_case(-1.0, 2.0; "negative cost")]
    #[test_case(f64::NAN, 2.0; "nan cost")]
    #[test_case(100.0, 0.0; "zero duration")]
    #[test_case(100.0, -3.0; "negative duration")]
    fn invalid_activities_are_rejected(cost: f64, duration: f64) {
        let draft = ActivityDraft::new("Boat ride", cost, duration, ActivityCategory::Adventure);
        assert!(validate_activity(&draft).is_err());
    }

    #[test]
    fn free_activity_is_accepted() {
        let draft = ActivityDraft::new("Beach walk", 0.0, 1.0, ActivityCategory::Relaxation);
        assert_eq!(validate_activity(&draft), Ok(()));
    }

    #[test]
    fn audit_accepts_consistent_trip() {
        let trip = trip()
            .with_stop(stop("2025-06-01", "2025-06-04"))
            .with_stop(stop("2025-06-04", "2025-06-10"));
        assert!(audit(&trip).is_empty());
    }

    #[test]
    fn audit_reports_each_problem() {
        let outside = stop("2025-06-08", "2025-06-12");
        let reversed = stop("2025-06-05", "2025-06-03");
        let trip = trip().with_stop(outside.clone()).with_stop(reversed.clone());

        assert_eq!(
            audit(&trip),
            vec![
                Advisory::StopOutsideTrip(outside.id().clone()),
                Advisory::StopEndsBeforeStart(reversed.id().clone()),
                Advisory::StopOutOfOrder(reversed.id().clone()),
            ]
        );
    }
}
