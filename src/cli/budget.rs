use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use globetrotter::{
    BudgetPolicy, Directory, Trip,
    domain::{BudgetCategory, BudgetSummary, budget, day_label, money},
};
use tracing::instrument;

use super::{
    find_trip,
    terminal::{Colorize, bar, is_narrow},
};

const BAR_WIDTH: usize = 24;

/// Command arguments for `trip budget`.
#[derive(Debug, Parser)]
#[command(about = "Show a trip's budget breakdown")]
pub struct Budget {
    /// The trip (id, id prefix or name)
    trip: String,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Budget {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let directory = Directory::open(root);
        self.render(&directory, &mut io::stdout().lock())
    }

    fn render(&self, directory: &Directory, out: &mut impl Write) -> anyhow::Result<()> {
        let Some(trip) = find_trip(directory, &self.trip)? else {
            writeln!(out, "Trip not found")?;
            return Ok(());
        };
        let policy = directory.budget_policy();
        let summary = budget::summarize(trip.stops(), &policy);

        match self.output {
            OutputFormat::Json => Self::output_json(out, trip, summary.as_ref(), &policy)?,
            OutputFormat::Table => match summary {
                Some(summary) => {
                    Self::output_table(out, &summary, directory.config().currency())?;
                }
                None => {
                    writeln!(out, "No budget data")?;
                    writeln!(
                        out,
                        "{}",
                        "Add stops and activities to see your budget breakdown.".dim()
                    )?;
                }
            },
        }
        Ok(())
    }

    fn output_json(
        out: &mut impl Write,
        trip: &Trip,
        summary: Option<&BudgetSummary>,
        policy: &BudgetPolicy,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let shares: Option<serde_json::Map<String, serde_json::Value>> = summary.map(|summary| {
            BudgetCategory::ALL
                .into_iter()
                .map(|category| {
                    (
                        category.as_str().to_string(),
                        json!(summary.breakdown.share(category)),
                    )
                })
                .collect()
        });

        let output = json!({
            "trip": trip.id(),
            "foodPerDay": policy.food_per_day,
            "summary": summary,
            "shares": shares,
        });

        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        Ok(())
    }

    fn output_table(
        out: &mut impl Write,
        summary: &BudgetSummary,
        currency: &str,
    ) -> io::Result<()> {
        let amount = |value: f64| money::format_with_symbol(currency, value);
        let breakdown = &summary.breakdown;

        writeln!(out, "Total budget   {}", amount(breakdown.total).strong())?;
        writeln!(
            out,
            "Per day        {} {}",
            amount(summary.per_day_average.round()),
            format!("over {}", day_label(summary.days)).dim()
        )?;
        writeln!(out)?;

        writeln!(out, "{}", "By category".strong())?;
        let narrow = is_narrow();
        for category in BudgetCategory::ALL {
            let value = breakdown.get(category);
            if narrow {
                writeln!(out, "  {:<14} {}", category.label(), amount(value))?;
            } else {
                writeln!(
                    out,
                    "  {:<14} {:>12}  {}",
                    category.label(),
                    amount(value),
                    bar(breakdown.share(category), BAR_WIDTH)
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "{}", "By destination".strong())?;
        for stop in &summary.stops {
            let activities = match stop.activity_count {
                1 => "1 activity".to_string(),
                n => format!("{n} activities"),
            };
            writeln!(
                out,
                "  {:<14} {:>12}  {}",
                stop.city_name,
                amount(stop.cost),
                activities.dim()
            )?;
        }
        writeln!(
            out,
            "{}",
            "Destination costs exclude the food estimate.".dim()
        )
    }
}
