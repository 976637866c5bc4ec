use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Defines an opaque string identifier with a kind prefix.
///
/// Generated identifiers look like `trip-6f1c...` and are backed by a v4
/// UUID, so two identifiers created in the same millisecond never collide.
/// Any string is accepted when parsing, which keeps identifiers written by
/// older timestamp-based schemes (`trip-1717171717171`) usable.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh, process-unique identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "-{}"), Uuid::new_v4().simple()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier of a [`Trip`](crate::Trip).
    TripId,
    "trip"
);

define_id!(
    /// Unique identifier of a [`Stop`](crate::Stop).
    StopId,
    "stop"
);

define_id!(
    /// Unique identifier of an [`Activity`](crate::Activity).
    ActivityId,
    "activity"
);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_carry_kind_prefix() {
        assert!(TripId::generate().as_str().starts_with("trip-"));
        assert!(StopId::generate().as_str().starts_with("stop-"));
        assert!(ActivityId::generate().as_str().starts_with("activity-"));
    }

    #[test]
    fn rapid_generation_does_not_collide() {
        let ids: HashSet<_> = (0..1000).map(|_| TripId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn legacy_ids_round_trip_through_json() {
        let id: TripId = serde_json::from_str("\"trip-1717171717171\"").unwrap();
        assert_eq!(id.as_str(), "trip-1717171717171");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"trip-1717171717171\"");
    }
}
