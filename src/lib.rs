//! Charging-station registry dashboard data.
//!
//! Loads the Bundesnetzagentur charging-station registry export, derives the
//! monthly, cumulative, per-state and per-type installation counts, and turns
//! them into Plotly-shaped figure descriptors.

pub mod aggregate;
pub mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod registry;

pub use aggregate::{
    cumulative_monthly_counts, monthly_counts, region_counts, type_counts, CountRow, CountTable,
};
pub use charts::{build_figures, Figure};
pub use config::{CountMetric, RegistryConfig};
pub use error::{ParseError, RegistryError};
pub use registry::{load_registry, RegistryTable};
