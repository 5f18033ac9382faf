// src/charts/mod.rs

pub mod types;

pub use types::{Axis, Figure, Layout, Trace, TraceKind};

use tracing::{info, instrument};

use crate::aggregate::{self, CountTable};
use crate::config::RegistryConfig;
use crate::error::Result;

/// Build the four dashboard figures, each from a fresh registry load.
///
/// Order: cumulative installations (line), new installations per month,
/// installations per state, installations per type (bars).
#[instrument(level = "info", skip(config), fields(path = %config.path.display()))]
pub fn build_figures(config: &RegistryConfig) -> Result<Vec<Figure>> {
    let cumulative = aggregate::cumulative_monthly_counts(config)?;
    let monthly = aggregate::monthly_counts(config)?;
    let regions = aggregate::region_counts(config)?;
    let types = aggregate::type_counts(config)?;

    let figures = figures_from_tables(&cumulative, &monthly, &regions, &types);
    info!(figures = figures.len(), "assembled figures");
    Ok(figures)
}

pub fn figures_from_tables(
    cumulative: &CountTable,
    monthly: &CountTable,
    regions: &CountTable,
    types: &CountTable,
) -> Vec<Figure> {
    vec![
        Figure {
            data: vec![Trace::line(cumulative.labels(), cumulative.counts())],
            // "amout" is the published axis label
            layout: Layout::titled("Total amount of chargers installed")
                .y_title("Total amout of chargers"),
        },
        Figure {
            data: vec![Trace::bar(monthly.labels(), monthly.counts())],
            layout: Layout::titled("Newly installed chargers")
                .y_title("Amount of chargers installed"),
        },
        Figure {
            data: vec![Trace::bar(regions.labels(), regions.counts())],
            layout: Layout::titled("Amount of chargers installed per state")
                .x_title("state")
                .y_title("Total amount of chargers"),
        },
        Figure {
            data: vec![Trace::bar(types.labels(), types.counts())],
            layout: Layout::titled("Amount of chargers per type")
                .x_title("Type of charger")
                .y_title("Amount of chargers"),
        },
    ]
}
