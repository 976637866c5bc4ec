use std::fmt;

use serde::Serialize;

use crate::domain::{Stop, StopId};

/// Estimated food spend per day of a stop, in currency units.
pub const DEFAULT_FOOD_PER_DAY: f64 = 400.0;

/// Tunable inputs to the budget estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetPolicy {
    /// Estimated food spend for each day of a stop.
    pub food_per_day: f64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            food_per_day: DEFAULT_FOOD_PER_DAY,
        }
    }
}

/// Cost of a trip or stop, broken down by category.
///
/// `total` is always the sum of the four category fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BudgetBreakdown {
    /// Accommodation costs.
    pub accommodation: f64,
    /// Transport costs.
    pub transport: f64,
    /// Activity costs.
    pub activities: f64,
    /// Estimated food costs.
    pub food: f64,
    /// Sum of every category.
    pub total: f64,
}

impl BudgetBreakdown {
    fn from_categories(accommodation: f64, transport: f64, activities: f64, food: f64) -> Self {
        Self {
            accommodation,
            transport,
            activities,
            food,
            total: accommodation + transport + activities + food,
        }
    }

    /// The amount recorded for one category.
    #[must_use]
    pub const fn get(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Transport => self.transport,
            BudgetCategory::Accommodation => self.accommodation,
            BudgetCategory::Activities => self.activities,
            BudgetCategory::Food => self.food,
        }
    }

    /// Size of a category relative to the largest category, from 0 to 100.
    ///
    /// Returns 0 when every category is 0.
    #[must_use]
    pub fn share(&self, category: BudgetCategory) -> f64 {
        let max = BudgetCategory::ALL
            .into_iter()
            .map(|category| self.get(category))
            .fold(0.0, f64::max);
        if max > 0.0 {
            self.get(category) / max * 100.0
        } else {
            0.0
        }
    }
}

/// The four budget categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    /// Getting to each stop.
    Transport,
    /// Staying at each stop.
    Accommodation,
    /// Booked activities.
    Activities,
    /// Daily food estimate.
    Food,
}

impl BudgetCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [
        Self::Transport,
        Self::Accommodation,
        Self::Activities,
        Self::Food,
    ];

    /// The key used for this category in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Activities => "activities",
            Self::Food => "food",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transport => "Transportation",
            Self::Accommodation => "Accommodation",
            Self::Activities => "Activities",
            Self::Food => "Food & Dining",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Budget of a single stop.
#[must_use]
pub fn stop_budget(stop: &Stop, policy: &BudgetPolicy) -> BudgetBreakdown {
    let transport = stop.transport().map_or(0.0, |transport| transport.cost);
    let accommodation = stop
        .accommodation()
        .map_or(0.0, |accommodation| accommodation.cost);
    let activities = stop.activities().iter().map(|activity| activity.cost()).sum();
    #[allow(clippy::cast_precision_loss)]
    let food = stop.duration_days() as f64 * policy.food_per_day;

    BudgetBreakdown::from_categories(accommodation, transport, activities, food)
}

/// Budget of a sequence of stops.
///
/// Each category is summed independently across stops, and the total is the
/// sum of the category sums. No stops gives an all-zero breakdown.
#[must_use]
pub fn aggregate(stops: &[Stop], policy: &BudgetPolicy) -> BudgetBreakdown {
    let (accommodation, transport, activities, food) = stops
        .iter()
        .map(|stop| stop_budget(stop, policy))
        .fold((0.0, 0.0, 0.0, 0.0), |(a, t, ac, f), stop| {
            (
                a + stop.accommodation,
                t + stop.transport,
                ac + stop.activities,
                f + stop.food,
            )
        });

    BudgetBreakdown::from_categories(accommodation, transport, activities, food)
}

/// Cost of a single stop as listed per destination.
///
/// Food is an estimate for the whole trip and is left out of per-stop costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopCost {
    /// The stop this cost belongs to.
    pub stop_id: StopId,
    /// Name of the visited city.
    pub city_name: String,
    /// Region or country of the visited city.
    pub country: String,
    /// Transport, accommodation and activity costs combined.
    pub cost: f64,
    /// Number of activities booked at the stop.
    pub activity_count: usize,
}

impl StopCost {
    fn of(stop: &Stop) -> Self {
        let activities: f64 = stop.activities().iter().map(|activity| activity.cost()).sum();
        let cost = stop.transport().map_or(0.0, |transport| transport.cost)
            + stop
                .accommodation()
                .map_or(0.0, |accommodation| accommodation.cost)
            + activities;

        Self {
            stop_id: stop.id().clone(),
            city_name: stop.city().city_name.clone(),
            country: stop.city().country.clone(),
            cost,
            activity_count: stop.activities().len(),
        }
    }
}

/// Everything shown on a trip's budget view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    /// Category totals across all stops.
    pub breakdown: BudgetBreakdown,
    /// Sum of every stop's duration in days.
    pub days: i64,
    /// `total / max(1, days)`.
    pub per_day_average: f64,
    /// Per-destination costs in itinerary order.
    pub stops: Vec<StopCost>,
}

/// Summarises the budget of a sequence of stops.
///
/// Returns `None` when there are no stops, which callers render as "no
/// budget data" rather than a table of zeros.
#[must_use]
pub fn summarize(stops: &[Stop], policy: &BudgetPolicy) -> Option<BudgetSummary> {
    if stops.is_empty() {
        return None;
    }

    let breakdown = aggregate(stops, policy);
    let days: i64 = stops.iter().map(Stop::duration_days).sum();
    #[allow(clippy::cast_precision_loss)]
    let per_day_average = breakdown.total / days.max(1) as f64;

    Some(BudgetSummary {
        breakdown,
        days,
        per_day_average,
        stops: stops.iter().map(StopCost::of).collect(),
    })
}
