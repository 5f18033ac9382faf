// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Quantity summed per group by the aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountMetric {
    /// One per registry row, i.e. per charging installation.
    #[default]
    Installations,
    /// Sum of the `Anzahl Ladepunkte` column.
    ChargingPoints,
}

/// Where the registry lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Path of the registry CSV export
    pub path: PathBuf,
    pub delimiter: char,
    /// WHATWG encoding label, resolved with encoding_rs
    pub encoding: String,
    /// Preamble lines before the header row
    pub skip_rows: usize,
    /// chrono format of `Inbetriebnahmedatum`
    pub date_format: String,
    pub metric: CountMetric,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/Ladesaeulenregister_CSV.csv"),
            delimiter: ';',
            encoding: "iso-8859-15".to_string(),
            skip_rows: 5,
            date_format: "%d.%m.%Y".to_string(),
            metric: CountMetric::Installations,
        }
    }
}

impl RegistryConfig {
    /// Defaults for the registry export at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_metric(mut self, metric: CountMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Read a YAML config file. Missing keys keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        // an empty document deserializes to unit, not to a map
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).context("invalid registry config")
    }
}
