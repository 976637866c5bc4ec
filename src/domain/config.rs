use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{BudgetPolicy, budget::DEFAULT_FOOD_PER_DAY};

/// Configuration for trip planning.
///
/// This struct holds settings that control how budgets are estimated and
/// displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Estimated food spend per day of a stop.
    ///
    /// This is a policy choice rather than something derived from data, so
    /// it can be adjusted for region or currency.
    food_per_day: f64,

    /// Symbol shown in front of amounts, for example '₹' or '$'.
    currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            food_per_day: DEFAULT_FOOD_PER_DAY,
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the estimated food spend per day.
    #[must_use]
    pub const fn food_per_day(&self) -> f64 {
        self.food_per_day
    }

    /// Sets the estimated food spend per day.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or not a number.
    pub fn set_food_per_day(&mut self, amount: f64) -> Result<(), String> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("Food per day must be a non-negative amount, got {amount}"));
        }
        self.food_per_day = amount;
        Ok(())
    }

    /// Returns the currency symbol.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Sets the currency symbol.
    pub fn set_currency(&mut self, symbol: String) {
        self.currency = symbol;
    }

    /// The budget policy described by this configuration.
    #[must_use]
    pub const fn budget_policy(&self) -> BudgetPolicy {
        BudgetPolicy {
            food_per_day: self.food_per_day,
        }
    }
}

const fn default_food_per_day() -> f64 {
    DEFAULT_FOOD_PER_DAY
}

fn default_currency() -> String {
    "₹".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// Estimated food spend per day of a stop.
        #[serde(default = "default_food_per_day")]
        food_per_day: f64,

        #[serde(default = "default_currency")]
        currency: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                food_per_day,
                currency,
            } => Self {
                food_per_day,
                currency,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            food_per_day: config.food_per_day,
            currency: config.currency,
        }
    }
}
