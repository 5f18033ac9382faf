use arrow::{
    array::{ArrayRef, StringArray, UInt64Array},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use serde::Serialize;
use std::sync::Arc;

/// One group of a summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: u64,
}

/// A `(label, count)` summary grouped by one registry column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountTable {
    /// Name of the registry column the rows are grouped by
    pub key: String,
    pub rows: Vec<CountRow>,
}

impl CountTable {
    pub fn new(key: impl Into<String>, rows: Vec<CountRow>) -> Self {
        Self {
            key: key.into(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.label.clone()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.count).collect()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.count)
    }

    /// Running total in row order.
    pub fn cumulative(&self) -> Self {
        let mut running = 0u64;
        let rows = self
            .rows
            .iter()
            .map(|r| {
                running += r.count;
                CountRow {
                    label: r.label.clone(),
                    count: running,
                }
            })
            .collect();
        Self::new(self.key.clone(), rows)
    }

    /// Two-column batch: `<key>` (Utf8) and `count` (UInt64).
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let schema = Schema::new(vec![
            Field::new(&self.key, DataType::Utf8, false),
            Field::new("count", DataType::UInt64, false),
        ]);
        let labels = Arc::new(StringArray::from_iter_values(
            self.rows.iter().map(|r| r.label.as_str()),
        )) as ArrayRef;
        let counts = Arc::new(UInt64Array::from_iter_values(self.counts())) as ArrayRef;
        RecordBatch::try_new(Arc::new(schema), vec![labels, counts])
    }
}
