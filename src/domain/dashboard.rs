use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{BudgetPolicy, Trip, budget};

/// Headline numbers across every trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Number of trips.
    pub trips: usize,
    /// Trips that are still being planned or are upcoming.
    pub active_trips: usize,
    /// Distinct catalog cities across all stops.
    pub cities: usize,
    /// Sum of every trip's duration in days.
    pub days_planned: i64,
    /// Sum of every trip's estimated budget.
    pub total_budget: f64,
}

impl DashboardStats {
    /// Computes the statistics for a list of trips.
    #[must_use]
    pub fn collect(trips: &[Trip], policy: &BudgetPolicy) -> Self {
        let cities: BTreeSet<&str> = trips
            .iter()
            .flat_map(Trip::stops)
            .map(|stop| stop.city().city_id.as_str())
            .collect();

        Self {
            trips: trips.len(),
            active_trips: trips
                .iter()
                .filter(|trip| trip.status().is_active())
                .count(),
            cities: cities.len(),
            days_planned: trips.iter().map(Trip::duration_days).sum(),
            total_budget: trips
                .iter()
                .map(|trip| budget::aggregate(trip.stops(), policy).total)
                .sum(),
        }
    }
}
