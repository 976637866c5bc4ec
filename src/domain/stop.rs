use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Activity, CityRef, StopId, duration_days};

/// A city visit within a [`Trip`](crate::Trip).
///
/// The city fields are a snapshot of the catalog entry at the time the stop
/// was added and are not kept in sync with the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub(crate) id: StopId,
    #[serde(flatten)]
    pub(crate) city: CityRef,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: NaiveDate,
    #[serde(default)]
    pub(crate) activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) accommodation: Option<Accommodation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) transport: Option<Transport>,
}

impl Stop {
    /// Construct a stop with a fresh id, no activities, and no transport or
    /// accommodation.
    #[must_use]
    pub fn new(city: CityRef, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::new_with_id(StopId::generate(), city, start_date, end_date)
    }

    pub(crate) const fn new_with_id(
        id: StopId,
        city: CityRef,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            city,
            start_date,
            end_date,
            activities: Vec::new(),
            accommodation: None,
            transport: None,
        }
    }

    /// The unique identifier of this stop.
    #[must_use]
    pub const fn id(&self) -> &StopId {
        &self.id
    }

    /// The city this stop visits.
    #[must_use]
    pub const fn city(&self) -> &CityRef {
        &self.city
    }

    /// First day of the stop.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the stop.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Whole days between the start and end date.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }

    /// Activities in insertion order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Where the traveller sleeps, if booked.
    #[must_use]
    pub const fn accommodation(&self) -> Option<&Accommodation> {
        self.accommodation.as_ref()
    }

    /// How the traveller arrives, if booked.
    #[must_use]
    pub const fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    /// A copy of this stop with the activity appended.
    #[must_use]
    pub fn with_activity(&self, activity: Activity) -> Self {
        let mut stop = self.clone();
        stop.activities.push(activity);
        stop
    }

    /// A copy of this stop with the accommodation replaced.
    #[must_use]
    pub fn with_accommodation(&self, accommodation: Option<Accommodation>) -> Self {
        Self {
            accommodation,
            ..self.clone()
        }
    }

    /// A copy of this stop with the transport replaced.
    #[must_use]
    pub fn with_transport(&self, transport: Option<Transport>) -> Self {
        Self {
            transport,
            ..self.clone()
        }
    }
}

/// A place to stay during a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    /// Hotel or host name.
    pub name: String,
    /// Total cost for the stop.
    pub cost: f64,
}

/// The leg of travel that reaches a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    /// Mode of travel.
    #[serde(rename = "type")]
    pub kind: TransportKind,
    /// Ticket cost.
    pub cost: f64,
}

/// Mode of travel for a [`Transport`] leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Air travel.
    Flight,
    /// Rail travel.
    Train,
    /// Coach or city bus.
    Bus,
    /// Road trip or taxi.
    Car,
}

impl TransportKind {
    /// Every mode of travel.
    pub const ALL: [Self; 4] = [Self::Flight, Self::Train, Self::Bus, Self::Car];

    /// The lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
            Self::Bus => "bus",
            Self::Car => "car",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode of travel.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown transport type '{0}' (expected flight, train, bus or car)")]
pub struct UnknownTransport(String);

impl FromStr for TransportKind {
    type Err = UnknownTransport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| UnknownTransport(s.to_string()))
    }
}
