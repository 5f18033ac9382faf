// src/aggregate/mod.rs
//! Summary tables over the cleaned registry.
//!
//! The four public operations each load the registry themselves, so every
//! call reflects the file as it is now. `count_by_month` and
//! `count_by_category` are the pure grouping steps behind them.

pub mod table;

pub use table::{CountRow, CountTable};

use arrow::array::{Array, AsArray};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::config::{CountMetric, RegistryConfig};
use crate::error::Result;
use crate::registry::{self, columns, columns::Category, date_parser, RegistryTable};

/// Newly commissioned installations per calendar month, ascending.
pub fn monthly_counts(config: &RegistryConfig) -> Result<CountTable> {
    let table = registry::load_registry(config)?;
    Ok(count_by_month(&table, config.metric))
}

/// Running total of [`monthly_counts`].
pub fn cumulative_monthly_counts(config: &RegistryConfig) -> Result<CountTable> {
    Ok(monthly_counts(config)?.cumulative())
}

/// Installations per `Bundesland`.
pub fn region_counts(config: &RegistryConfig) -> Result<CountTable> {
    let table = registry::load_registry(config)?;
    Ok(count_by_category(&table, Category::State, config.metric))
}

/// Installations per `Art der Ladeeinrichung`.
pub fn type_counts(config: &RegistryConfig) -> Result<CountTable> {
    let table = registry::load_registry(config)?;
    Ok(count_by_category(&table, Category::InstallationType, config.metric))
}

/// Weight of each row under `metric`.
fn row_weights(table: &RegistryTable, metric: CountMetric) -> Vec<u64> {
    match metric {
        CountMetric::Installations => vec![1; table.num_rows()],
        CountMetric::ChargingPoints => table
            .charging_points()
            .iter()
            .map(|v| v.map_or(0, |n| n.max(0) as u64))
            .collect(),
    }
}

/// Group by the month of `Inbetriebnahmedatum`. Rows without a date are skipped.
pub fn count_by_month(table: &RegistryTable, metric: CountMetric) -> CountTable {
    let weights = row_weights(table, metric);
    let dates = table.commissioning_dates();

    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for (row, day) in dates.iter().enumerate() {
        let Some(date) = day.and_then(date_parser::from_date32) else {
            continue;
        };
        *months.entry(date_parser::month_key(date)).or_insert(0) += weights[row];
    }
    debug!(months = months.len(), "grouped by commissioning month");

    let rows = months
        .into_iter()
        .map(|(key, count)| CountRow {
            label: date_parser::format_month(key),
            count,
        })
        .collect();
    CountTable::new(columns::COMMISSIONING_DATE, rows)
}

/// Group by a dictionary-encoded column, labels in lexicographic order.
/// Rows with a null label are skipped.
pub fn count_by_category(
    table: &RegistryTable,
    category: Category,
    metric: CountMetric,
) -> CountTable {
    let column = category.column_name();
    let weights = row_weights(table, metric);
    let dict = table.categorical(category);
    let values = dict.values().as_string::<i32>();

    // count per dictionary key first, then resolve labels once
    let mut per_key: HashMap<usize, u64> = HashMap::new();
    for (row, key) in dict.keys().iter().enumerate() {
        let Some(key) = key else { continue };
        *per_key.entry(key as usize).or_insert(0) += weights[row];
    }

    let mut groups: BTreeMap<String, u64> = BTreeMap::new();
    for (key, count) in per_key {
        if values.is_null(key) {
            continue;
        }
        *groups.entry(values.value(key).to_string()).or_insert(0) += count;
    }
    info!(column, groups = groups.len(), "grouped registry");

    let rows = groups
        .into_iter()
        .map(|(label, count)| CountRow { label, count })
        .collect();
    CountTable::new(column, rows)
}
