use std::io;

use crate::{Trip, storage::KeyValueStore};

/// The key the trip list is stored under.
pub const TRIPS_KEY: &str = "trips";

/// Loads the trip list.
///
/// A missing, unreadable, or malformed blob yields an empty list. The
/// problem is logged rather than returned, so a corrupt file never stops
/// the planner from starting.
pub fn load_trips(store: &impl KeyValueStore) -> Vec<Trip> {
    let blob = match store.get(TRIPS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            tracing::debug!("no stored trips found");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("failed to read stored trips, starting empty: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Trip>>(&blob) {
        Ok(trips) => {
            tracing::debug!("loaded {} trips", trips.len());
            trips
        }
        Err(e) => {
            tracing::warn!("stored trips are malformed, starting empty: {e}");
            Vec::new()
        }
    }
}

/// Writes the trip list as one JSON blob.
///
/// # Errors
///
/// Returns an error if the blob cannot be written.
pub fn save_trips(store: &mut impl KeyValueStore, trips: &[Trip]) -> io::Result<()> {
    let blob = serde_json::to_string_pretty(trips).map_err(io::Error::other)?;
    store.set(TRIPS_KEY, &blob)?;
    tracing::debug!("saved {} trips", trips.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use non_empty_string::NonEmptyString;

    use super::*;
    use crate::{
        TripDetails,
        domain::{ActivityCategory, ActivityDraft, city, itinerary},
        storage::MemoryStore,
    };

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_trip() -> Trip {
        let trip = Trip::new(TripDetails::new(
            NonEmptyString::new("Hill Stations".to_string()).unwrap(),
            date("2025-06-01"),
            date("2025-06-10"),
        ));
        let trip = itinerary::add_stop(
            &trip,
            city::find("ooty").unwrap(),
            date("2025-06-01"),
            date("2025-06-05"),
        );
        let stop_id = trip.stops()[0].id().clone();
        itinerary::add_activity(
            &trip,
            &stop_id,
            ActivityDraft::new("Toy Train Ride", 600.0, 5.0, ActivityCategory::Sightseeing),
        )
        .unwrap()
    }

    #[test]
    fn missing_blob_is_empty() {
        assert!(load_trips(&MemoryStore::default()).is_empty());
    }

    #[test]
    fn saved_trips_load_back() {
        let mut store = MemoryStore::default();
        let trips = vec![sample_trip()];

        save_trips(&mut store, &trips).unwrap();

        assert_eq!(load_trips(&store), trips);
    }

    #[test]
    fn malformed_blob_falls_back_to_empty() {
        let mut store = MemoryStore::default();
        store.set(TRIPS_KEY, "{ not json").unwrap();
        assert!(load_trips(&store).is_empty());

        store.set(TRIPS_KEY, r#"[{"id": "trip-1"}]"#).unwrap();
        assert!(load_trips(&store).is_empty());
    }

    #[test]
    fn loads_blob_from_browser_storage() {
        let blob = r#"[
          {
            "id": "trip-1717000000000",
            "name": "Temple Trail",
            "description": "Madurai and Trichy",
            "startDate": "2025-06-01",
            "endDate": "2025-06-10",
            "totalBudget": 0,
            "stops": [
              {
                "id": "stop-1717000000001",
                "cityId": "madurai",
                "cityName": "Madurai",
                "country": "Tamil Nadu, India",
                "startDate": "2025-06-01",
                "endDate": "2025-06-04",
                "activities": [
                  {
                    "id": "activity-1717000000002",
                    "name": "Meenakshi Temple",
                    "cost": 500,
                    "duration": 2,
                    "category": "culture"
                  }
                ],
                "transport": { "type": "flight", "cost": 5000 },
                "accommodation": { "name": "Heritage Inn", "cost": 3000 }
              }
            ],
            "status": "planning",
            "isPublic": false,
            "createdAt": "2025-05-20"
          }
        ]"#;
        let mut store = MemoryStore::default();
        store.set(TRIPS_KEY, blob).unwrap();

        let trips = load_trips(&store);

        assert_eq!(trips.len(), 1);
        let stop = &trips[0].stops()[0];
        assert_eq!(stop.city().city_name, "Madurai");
        assert_eq!(stop.activities()[0].name(), "Meenakshi Temple");
        assert_eq!(stop.transport().map(|t| t.cost), Some(5000.0));
        assert_eq!(stop.accommodation().map(|a| a.cost), Some(3000.0));
    }
}
