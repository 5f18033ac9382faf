//! Registry files for tests, written in the export's own layout and encoding.

use anyhow::Result;
use encoding_rs::ISO_8859_15;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::registry::columns::KEEP_COLUMNS;

const PREAMBLE: [&str; 5] = [
    "Ladesäulenregister der Bundesnetzagentur;;;;;;;;;;;;;;",
    "Stand: 01.03.2021;;;;;;;;;;;;;;",
    "Die Daten werden monatlich aktualisiert.;;;;;;;;;;;;;;",
    ";;;;;;;;;;;;;;",
    ";;;;;;;;;;;;;;",
];

/// Header of the full export; only seven of these columns are kept.
const EXPORT_HEADER: &str = "Betreiber;Straße;Hausnummer;Adresszusatz;Postleitzahl;Ort;Bundesland;\
Kreis/kreisfreie Stadt;Breitengrad;Längengrad;Inbetriebnahmedatum;Anschlussleistung;\
Art der Ladeeinrichung;Anzahl Ladepunkte;Steckertypen1";

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chargeboard=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[derive(Debug, Clone)]
pub struct Row {
    pub operator: String,
    pub postal_code: String,
    pub state: String,
    pub district: String,
    pub date: String,
    pub kind: String,
    pub points: String,
}

impl Row {
    pub fn new(
        operator: &str,
        postal_code: &str,
        state: &str,
        district: &str,
        date: &str,
        kind: &str,
        points: &str,
    ) -> Self {
        Self {
            operator: operator.into(),
            postal_code: postal_code.into(),
            state: state.into(),
            district: district.into(),
            date: date.into(),
            kind: kind.into(),
            points: points.into(),
        }
    }

    pub fn bayern(date: &str) -> Self {
        Self::new(
            "Stadtwerke München",
            "80331",
            "Bayern",
            "Kreisfreie Stadt München",
            date,
            "Normalladeeinrichtung",
            "2",
        )
    }

    fn export_line(&self) -> String {
        [
            self.operator.as_str(),
            "Hauptstraße",
            "1",
            "",
            self.postal_code.as_str(),
            "Musterstadt",
            self.state.as_str(),
            self.district.as_str(),
            "48,137154",
            "11,576124",
            self.date.as_str(),
            "22",
            self.kind.as_str(),
            self.points.as_str(),
            "AC Steckdose Typ 2",
        ]
        .join(";")
    }
}

/// Preamble + `header` + `lines`, newline separated.
pub fn registry_text_with_header(header: &str, lines: &[&str]) -> String {
    let mut text = PREAMBLE.join("\n");
    text.push('\n');
    text.push_str(header);
    text.push('\n');
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Registry text whose header is exactly the seven kept columns.
pub fn registry_text(lines: &[&str]) -> String {
    registry_text_with_header(&KEEP_COLUMNS.join(";"), lines)
}

/// Write `text` as ISO-8859-15.
pub fn write_raw(text: &str) -> Result<NamedTempFile> {
    let (bytes, _, unmappable) = ISO_8859_15.encode(text);
    assert!(!unmappable, "fixture text is not representable in Latin-9");
    let mut tmp = NamedTempFile::new()?;
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    Ok(tmp)
}

/// Write a full-width registry export holding `rows`.
pub fn write_registry(rows: &[Row]) -> Result<NamedTempFile> {
    let lines: Vec<String> = rows.iter().map(Row::export_line).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    write_raw(&registry_text_with_header(EXPORT_HEADER, &refs))
}
