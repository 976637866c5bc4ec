use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::ActivityId;

/// A single bookable item within a [`Stop`](crate::Stop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub(crate) id: ActivityId,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    /// Hours.
    pub(crate) duration: f64,
    pub(crate) cost: f64,
    pub(crate) category: ActivityCategory,
}

impl Activity {
    /// Construct an activity from a draft with a freshly generated id.
    #[must_use]
    pub fn new(draft: ActivityDraft) -> Self {
        Self::new_with_id(ActivityId::generate(), draft)
    }

    pub(crate) fn new_with_id(id: ActivityId, draft: ActivityDraft) -> Self {
        let ActivityDraft {
            name,
            description,
            duration,
            cost,
            category,
        } = draft;
        Self {
            id,
            name,
            description,
            duration,
            cost,
            category,
        }
    }

    /// The unique identifier of this activity.
    #[must_use]
    pub const fn id(&self) -> &ActivityId {
        &self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Duration in hours.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Cost in currency units.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// The kind of activity.
    #[must_use]
    pub const fn category(&self) -> ActivityCategory {
        self.category
    }
}

/// The user-supplied fields of a new activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    /// Display name; must not be blank.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Duration in hours; must be positive.
    pub duration: f64,
    /// Cost in currency units; must not be negative.
    pub cost: f64,
    /// The kind of activity.
    pub category: ActivityCategory,
}

impl ActivityDraft {
    /// A draft with no description.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: f64, duration: f64, category: ActivityCategory) -> Self {
        Self {
            name: name.into(),
            description: None,
            duration,
            cost,
            category,
        }
    }
}

/// The kind of an [`Activity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    /// Landmarks and viewpoints.
    Sightseeing,
    /// Restaurants, food tours and markets.
    Food,
    /// Outdoor and physical activities.
    Adventure,
    /// Museums, temples and heritage sites.
    Culture,
    /// Spas, beaches and downtime.
    Relaxation,
    /// Markets and stores.
    Shopping,
}

impl ActivityCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Sightseeing,
        Self::Food,
        Self::Adventure,
        Self::Culture,
        Self::Relaxation,
        Self::Shopping,
    ];

    /// The lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sightseeing => "sightseeing",
            Self::Food => "food",
            Self::Adventure => "adventure",
            Self::Culture => "culture",
            Self::Relaxation => "relaxation",
            Self::Shopping => "shopping",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown activity category.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown activity category '{0}'")]
pub struct UnknownCategory(String);

impl FromStr for ActivityCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == lower)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
