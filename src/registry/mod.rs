// src/registry/mod.rs
//! Loader for the charging-station registry export.
//!
//! The export is a `;`-separated Latin-9 file with a free-text preamble. Every
//! column is first read as `Utf8` by the Arrow CSV reader, the seven kept
//! columns are projected out, and [`convert::convert_to_cleaned`] types them.

pub mod columns;
pub mod convert;
pub mod date_parser;
pub mod decode;

#[cfg(test)]
pub(crate) mod fixture;

use arrow::{
    array::{Array, AsArray, Date32Array, DictionaryArray, Int64Array, StringArray},
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Int32Type, Schema},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use std::{io::Cursor, sync::Arc};
use tracing::{debug, info, instrument};

use crate::config::RegistryConfig;
use crate::error::{ParseError, RegistryError, Result};
use columns::{Category, KEEP_COLUMNS};

const BATCH_SIZE: usize = 8192;

/// The cleaned registry: one row per charging installation, typed as
/// described by [`columns::cleaned_schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryTable {
    batch: RecordBatch,
}

impl RegistryTable {
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    /// Only called with the `columns` constants, all of which are kept.
    fn column(&self, name: &str) -> &Arc<dyn Array> {
        let idx = KEEP_COLUMNS
            .iter()
            .position(|c| *c == name)
            .unwrap_or_else(|| panic!("`{name}` is not a registry column"));
        self.batch.column(idx)
    }

    pub fn operators(&self) -> &StringArray {
        self.column(columns::OPERATOR).as_string::<i32>()
    }

    /// A dictionary-encoded label column such as `Bundesland`.
    pub fn categorical(&self, category: Category) -> &DictionaryArray<Int32Type> {
        self.column(category.column_name())
            .as_dictionary::<Int32Type>()
    }

    pub fn commissioning_dates(&self) -> &Date32Array {
        self.column(columns::COMMISSIONING_DATE)
            .as_primitive::<arrow::datatypes::Date32Type>()
    }

    pub fn commissioning_date(&self, row: usize) -> Option<NaiveDate> {
        let dates = self.commissioning_dates();
        if dates.is_null(row) {
            return None;
        }
        date_parser::from_date32(dates.value(row))
    }

    pub fn charging_points(&self) -> &Int64Array {
        self.column(columns::CHARGING_POINTS)
            .as_primitive::<arrow::datatypes::Int64Type>()
    }
}

/// Read and clean the registry named by `config.path`.
#[instrument(level = "info", skip(config), fields(path = %config.path.display()))]
pub fn load_registry(config: &RegistryConfig) -> Result<RegistryTable> {
    let encoding = decode::resolve_encoding(&config.encoding)?;
    let bytes = decode::read_bytes(&config.path)?;
    let text = decode::decode_text(&bytes, encoding)?;
    let table = parse_registry(&text, config)?;
    info!(rows = table.num_rows(), "loaded registry");
    Ok(table)
}

/// Clean already decoded registry text. `config.path` is not consulted.
pub fn parse_registry(text: &str, config: &RegistryConfig) -> Result<RegistryTable> {
    let delimiter = delimiter_byte(config.delimiter)?;
    let body = decode::strip_preamble(text, config.skip_rows)?;

    // 1) header row → all-Utf8 schema
    let (inferred, _) = Format::default()
        .with_header(true)
        .with_delimiter(delimiter)
        .infer_schema(Cursor::new(body.as_bytes()), Some(0))
        .map_err(ParseError::Csv)?;
    let headers: Vec<String> = inferred
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    debug!(columns = headers.len(), "read header row");

    let projection = KEEP_COLUMNS
        .iter()
        .map(|want| {
            headers
                .iter()
                .position(|h| h == want)
                .ok_or_else(|| ParseError::MissingColumn(want.to_string()))
        })
        .collect::<std::result::Result<Vec<usize>, ParseError>>()?;

    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, DataType::Utf8, true))
        .collect();
    let full_schema = Arc::new(Schema::new(fields));

    // 2) full read, every cell as text
    let reader = ReaderBuilder::new(full_schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .with_quote(b'"')
        .with_delimiter(delimiter)
        // short rows load with their missing trailing cells as nulls
        .with_truncated_rows(true)
        .build(Cursor::new(body.as_bytes()))
        .map_err(ParseError::Csv)?;
    let batches = reader
        .collect::<std::result::Result<Vec<RecordBatch>, _>>()
        .map_err(ParseError::Csv)?;
    let raw = concat_batches(&full_schema, &batches).map_err(ParseError::Csv)?;

    // 3) keep the seven registry columns, in order, then type them
    let projected = raw.project(&projection).map_err(ParseError::Csv)?;
    let batch = convert::convert_to_cleaned(&projected, &config.date_format)?;
    Ok(RegistryTable { batch })
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(RegistryError::InvalidDelimiter(delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::fixture::{self, Row};
    use anyhow::Result;

    #[test]
    fn test_load_registry_fixture() -> Result<()> {
        fixture::init_test_logging();
        let rows = vec![
            Row::new(
                "EnBW",
                "70173",
                "Baden-Württemberg",
                "Stuttgart",
                "01.02.2019",
                "Normalladeeinrichtung",
                "2",
            ),
            Row::new(
                "Stadtwerke München",
                "80331",
                "Bayern",
                "Kreisfreie Stadt München",
                "15.11.2020",
                "Schnellladeeinrichtung",
                "4",
            ),
            Row::new(
                "E.ON",
                "10115",
                "Berlin",
                "Kreisfreie Stadt Berlin",
                "03.03.2021",
                "Normalladeeinrichtung",
                "1",
            ),
        ];
        let file = fixture::write_registry(&rows)?;
        let cfg = RegistryConfig::new(file.path());

        let table = load_registry(&cfg)?;
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.batch().num_columns(), 7);
        assert_eq!(table.batch().schema().as_ref(), &columns::cleaned_schema());
        assert_eq!(table.operators().value(1), "Stadtwerke München");
        assert_eq!(
            table.commissioning_date(0),
            NaiveDate::from_ymd_opt(2019, 2, 1)
        );
        assert_eq!(table.charging_points().value(1), 4);

        let districts = table.categorical(Category::District);
        assert_eq!(districts.values().len(), 3);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let cfg = RegistryConfig::new("/no/such/Ladesaeulenregister.csv");
        let err = load_registry(&cfg).unwrap_err();
        assert!(matches!(err, RegistryError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_column_fails() -> Result<()> {
        let text = fixture::registry_text_with_header(
            "Betreiber;Postleitzahl;Bundesland;Inbetriebnahmedatum;Art der Ladeeinrichung;Anzahl Ladepunkte",
            &["EnBW;70173;Baden-Württemberg;01.02.2019;Normalladeeinrichtung;2"],
        );
        let file = fixture::write_raw(&text)?;
        let err = load_registry(&RegistryConfig::new(file.path())).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Parse(ParseError::MissingColumn(ref c)) if c == "Kreis/kreisfreie Stadt"
        ));
        Ok(())
    }

    #[test]
    fn test_wrong_delimiter_is_parse_error() -> Result<()> {
        let file = fixture::write_registry(&[Row::bayern("01.01.2020")])?;
        let mut cfg = RegistryConfig::new(file.path());
        cfg.delimiter = ',';
        let err = load_registry(&cfg).unwrap_err();
        assert!(matches!(err, RegistryError::Parse(ParseError::MissingColumn(_))));
        Ok(())
    }

    #[test]
    fn test_header_only_is_empty_table() -> Result<()> {
        let file = fixture::write_registry(&[])?;
        let table = load_registry(&RegistryConfig::new(file.path()))?;
        assert!(table.is_empty());
        assert_eq!(table.batch().num_columns(), 7);
        Ok(())
    }

    #[test]
    fn test_preamble_only_is_missing_header() -> Result<()> {
        let file = fixture::write_raw("Ladesäulenregister\n\n\n")?;
        let err = load_registry(&RegistryConfig::new(file.path())).unwrap_err();
        assert!(matches!(err, RegistryError::Parse(ParseError::MissingHeader { .. })));
        Ok(())
    }

    #[test]
    fn test_quoted_cells_with_delimiter() -> Result<()> {
        let text = fixture::registry_text(&[
            "\"Müller; Söhne GmbH\";01067;Sachsen;Dresden;07.07.2018;Normalladeeinrichtung;2",
        ]);
        let file = fixture::write_raw(&text)?;
        let table = load_registry(&RegistryConfig::new(file.path()))?;
        assert_eq!(table.operators().value(0), "Müller; Söhne GmbH");
        // postal codes stay labels, leading zeros included
        let plz = table.categorical(Category::PostalCode);
        let values = plz.values().as_string::<i32>();
        assert_eq!(values.value(0), "01067");
        Ok(())
    }

    #[test]
    fn test_short_row_loads_with_null_trailing_cells() -> Result<()> {
        let text = fixture::registry_text(&[
            "EnBW;70173;Bayern;Stuttgart;01.02.2019;Normalladeeinrichtung;2",
            "EnBW;70173;Bayern;Stuttgart;01.03.2019;Normalladeeinrichtung",
        ]);
        let file = fixture::write_raw(&text)?;
        let table = load_registry(&RegistryConfig::new(file.path()))?;

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.charging_points().value(0), 2);
        assert!(table.charging_points().is_null(1));
        assert_eq!(table.commissioning_date(1), NaiveDate::from_ymd_opt(2019, 3, 1));
        Ok(())
    }

    #[test]
    fn test_every_category_is_dictionary_encoded() -> Result<()> {
        let rows = [Row::bayern("01.01.2020"), Row::bayern("02.01.2020")];
        let file = fixture::write_registry(&rows)?;
        let table = load_registry(&RegistryConfig::new(file.path()))?;
        for category in Category::ALL {
            let dict = table.categorical(category);
            assert_eq!(dict.len(), 2, "{}", category.column_name());
            assert_eq!(dict.values().len(), 1, "{}", category.column_name());
        }
        Ok(())
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let cfg = RegistryConfig {
            delimiter: '§',
            ..RegistryConfig::default()
        };
        let err = parse_registry("a\nb\n", &cfg).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDelimiter('§')));
    }
}
