use arrow::datatypes::{DataType, Field, Schema};

pub const OPERATOR: &str = "Betreiber";
pub const POSTAL_CODE: &str = "Postleitzahl";
pub const STATE: &str = "Bundesland";
pub const DISTRICT: &str = "Kreis/kreisfreie Stadt";
pub const COMMISSIONING_DATE: &str = "Inbetriebnahmedatum";
/// Spelled as in the registry export header.
pub const INSTALLATION_TYPE: &str = "Art der Ladeeinrichung";
pub const CHARGING_POINTS: &str = "Anzahl Ladepunkte";

/// The columns kept from the registry, in output order.
pub const KEEP_COLUMNS: [&str; 7] = [
    OPERATOR,
    POSTAL_CODE,
    STATE,
    DISTRICT,
    COMMISSIONING_DATE,
    INSTALLATION_TYPE,
    CHARGING_POINTS,
];

/// The dictionary-encoded label columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PostalCode,
    State,
    District,
    InstallationType,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::PostalCode,
        Category::State,
        Category::District,
        Category::InstallationType,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Category::PostalCode => POSTAL_CODE,
            Category::State => STATE,
            Category::District => DISTRICT,
            Category::InstallationType => INSTALLATION_TYPE,
        }
    }
}

/// How a kept column is typed after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Categorical,
    Date,
    Count,
}

pub fn kind_of(name: &str) -> ColumnKind {
    match name {
        POSTAL_CODE | STATE | DISTRICT | INSTALLATION_TYPE => ColumnKind::Categorical,
        COMMISSIONING_DATE => ColumnKind::Date,
        CHARGING_POINTS => ColumnKind::Count,
        _ => ColumnKind::Text,
    }
}

pub fn arrow_type(kind: ColumnKind) -> DataType {
    match kind {
        ColumnKind::Text => DataType::Utf8,
        ColumnKind::Categorical => {
            DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
        }
        ColumnKind::Date => DataType::Date32,
        ColumnKind::Count => DataType::Int64,
    }
}

/// Schema of the cleaned registry table.
pub fn cleaned_schema() -> Schema {
    let fields: Vec<Field> = KEEP_COLUMNS
        .iter()
        .map(|name| Field::new(*name, arrow_type(kind_of(name)), true))
        .collect();
    Schema::new(fields)
}
