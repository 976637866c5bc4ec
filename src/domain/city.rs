use std::fmt;

use serde::{Deserialize, Serialize};

/// A destination in the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Stable catalog identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Region or country label.
    pub country: &'static str,
    /// Image asset name.
    pub image: &'static str,
    /// Relative cost of visiting.
    pub cost_index: CostIndex,
    /// Short description.
    pub description: &'static str,
    /// Things visitors usually do.
    pub popular_activities: &'static [&'static str],
}

/// How expensive a destination is to visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostIndex {
    /// Cheap destination.
    Budget,
    /// Average prices.
    Moderate,
    /// Premium destination.
    Expensive,
}

impl CostIndex {
    /// The label shown when browsing destinations.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Moderate => "Moderate",
            Self::Expensive => "Luxury",
        }
    }
}

impl fmt::Display for CostIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The city fields copied into a [`Stop`](crate::Stop) when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRef {
    /// Catalog identifier of the city.
    pub city_id: String,
    /// City name at the time the stop was added.
    pub city_name: String,
    /// Region or country at the time the stop was added.
    pub country: String,
}

impl From<&City> for CityRef {
    fn from(city: &City) -> Self {
        Self {
            city_id: city.id.to_string(),
            city_name: city.name.to_string(),
            country: city.country.to_string(),
        }
    }
}

const CATALOG: &[City] = &[
    City {
        id: "chennai",
        name: "Chennai",
        country: "Tamil Nadu, India",
        image: "destination-paris.jpg",
        cost_index: CostIndex::Moderate,
        description: "The cultural capital of Tamil Nadu, known for its beaches, temples, and \
                      delicious South Indian cuisine",
        popular_activities: &[
            "Marina Beach",
            "Kapaleeshwarar Temple",
            "Local Food Tour",
            "Fort St. George",
        ],
    },
    City {
        id: "coimbatore",
        name: "Coimbatore",
        country: "Tamil Nadu, India",
        image: "destination-kyoto.jpg",
        cost_index: CostIndex::Budget,
        description: "Gateway to the Nilgiris, famous for temples, textile industry, and \
                      proximity to hill stations",
        popular_activities: &[
            "Temple Visit",
            "Textile Shopping",
            "Marudhamalai Temple",
            "Local Cuisine",
        ],
    },
    City {
        id: "madurai",
        name: "Madurai",
        country: "Tamil Nadu, India",
        image: "destination-bali.jpg",
        cost_index: CostIndex::Budget,
        description: "Ancient temple city with rich history, home to the magnificent Meenakshi \
                      Amman Temple",
        popular_activities: &[
            "Meenakshi Temple",
            "Thirumalai Nayakkar Palace",
            "Local Market",
            "Temple Festival",
        ],
    },
    City {
        id: "trichy",
        name: "Trichy",
        country: "Tamil Nadu, India",
        image: "destination-paris.jpg",
        cost_index: CostIndex::Budget,
        description: "Historic city on the banks of Kaveri, known for the iconic Rock Fort and \
                      ancient temples",
        popular_activities: &[
            "Rock Fort Temple",
            "Srirangam Temple",
            "Local Food Tour",
            "Heritage Walk",
        ],
    },
    City {
        id: "ooty",
        name: "Ooty",
        country: "Tamil Nadu, India",
        image: "destination-kyoto.jpg",
        cost_index: CostIndex::Moderate,
        description: "Queen of Hill Stations, famous for tea gardens, scenic beauty, and \
                      pleasant weather",
        popular_activities: &[
            "Tea Garden Tour",
            "Botanical Gardens",
            "Hill Station Sightseeing",
            "Toy Train Ride",
        ],
    },
];

/// Every destination in the catalog.
#[must_use]
pub const fn catalog() -> &'static [City] {
    CATALOG
}

/// Looks up a destination by its catalog id, ignoring case.
#[must_use]
pub fn find(id: &str) -> Option<&'static City> {
    CATALOG.iter().find(|city| city.id.eq_ignore_ascii_case(id.trim()))
}

/// Destinations whose name or country contains `query`, ignoring case.
///
/// An empty query matches every destination.
pub fn search(query: &str) -> impl Iterator<Item = &'static City> + use<> {
    let query = query.trim().to_lowercase();
    CATALOG.iter().filter(move |city| {
        city.name.to_lowercase().contains(&query) || city.country.to_lowercase().contains(&query)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<_> = catalog().iter().map(|city| city.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(find("OOTY").map(|city| city.name), Some("Ooty"));
        assert!(find("paris").is_none());
    }

    #[test]
    fn search_matches_name_or_country() {
        let names: Vec<_> = search("tri").map(|city| city.name).collect();
        assert_eq!(names, ["Trichy"]);

        assert_eq!(search("tamil nadu").count(), catalog().len());
        assert_eq!(search("").count(), catalog().len());
        assert_eq!(search("lisbon").count(), 0);
    }

    #[test]
    fn city_ref_copies_catalog_fields() {
        let city = find("chennai").unwrap();
        let city_ref = CityRef::from(city);
        assert_eq!(city_ref.city_id, "chennai");
        assert_eq!(city_ref.city_name, "Chennai");
        assert_eq!(city_ref.country, "Tamil Nadu, India");
    }

    #[test]
    fn cost_index_labels() {
        assert_eq!(CostIndex::Expensive.label(), "Luxury");
        assert_eq!(CostIndex::Budget.to_string(), "Budget");
    }
}
