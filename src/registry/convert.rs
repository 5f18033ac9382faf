use arrow::{
    array::{Array, ArrayRef, Date32Builder, DictionaryArray, Int64Builder, StringArray},
    datatypes::Int32Type,
    record_batch::RecordBatch,
};
use std::sync::Arc;
use tracing::warn;

use crate::error::{ParseError, Result};
use crate::registry::columns::{cleaned_schema, kind_of, ColumnKind};
use crate::registry::date_parser;

/// Trim whitespace + strip outer quotes. Empty cells are `None`.
pub fn clean_cell(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let unquoted = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    };
    (!unquoted.is_empty()).then_some(unquoted)
}

/// Convert the projected all-`Utf8` batch into the cleaned registry types.
pub fn convert_to_cleaned(batch: &RecordBatch, date_format: &str) -> Result<RecordBatch> {
    let schema = Arc::new(cleaned_schema());
    let mut out = Vec::with_capacity(batch.num_columns());

    for (arr, fld) in batch.columns().iter().zip(schema.fields()) {
        let Some(sarr) = arr.as_any().downcast_ref::<StringArray>() else {
            out.push(arr.clone());
            continue;
        };
        let col = match kind_of(fld.name()) {
            ColumnKind::Text => to_text(sarr),
            ColumnKind::Categorical => to_categorical(sarr),
            ColumnKind::Date => to_dates(sarr, date_format)?,
            ColumnKind::Count => to_counts(sarr, fld.name()),
        };
        out.push(col);
    }

    RecordBatch::try_new(schema, out).map_err(|e| ParseError::Csv(e).into())
}

fn to_text(sarr: &StringArray) -> ArrayRef {
    let cleaned: StringArray = sarr.iter().map(|opt| opt.and_then(clean_cell)).collect();
    Arc::new(cleaned)
}

/// Dictionary-encode a label column; the dictionary holds only observed labels.
fn to_categorical(sarr: &StringArray) -> ArrayRef {
    let dict: DictionaryArray<Int32Type> =
        sarr.iter().map(|opt| opt.and_then(clean_cell)).collect();
    Arc::new(dict)
}

fn to_dates(sarr: &StringArray, date_format: &str) -> Result<ArrayRef> {
    let mut b = Date32Builder::with_capacity(sarr.len());
    for (idx, opt) in sarr.iter().enumerate() {
        match opt.and_then(clean_cell) {
            None => b.append_null(),
            Some(raw) => {
                let date = date_parser::parse_date(raw, date_format).ok_or_else(|| {
                    ParseError::InvalidDate {
                        row: idx + 1,
                        value: raw.to_string(),
                    }
                })?;
                b.append_value(date_parser::to_date32(date));
            }
        }
    }
    Ok(Arc::new(b.finish()))
}

fn to_counts(sarr: &StringArray, column: &str) -> ArrayRef {
    let mut b = Int64Builder::with_capacity(sarr.len());
    let mut unparsed = 0usize;
    for opt in sarr.iter() {
        let v = opt.and_then(clean_cell).and_then(|s| {
            let parsed = s.parse::<i64>().ok();
            if parsed.is_none() {
                unparsed += 1;
            }
            parsed
        });
        b.append_option(v);
    }
    if unparsed > 0 {
        warn!(column, unparsed, "non-integer values stored as null");
    }
    Arc::new(b.finish())
}
