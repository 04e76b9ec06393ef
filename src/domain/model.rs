use serde::{Deserialize, Serialize};

/// Cleaned dataset written on every run.
pub const CITIES_FILENAME: &str = "cities-population.min.json";

/// Combined document consumed by the mock API server (json-server style).
pub const DATABASE_FILENAME: &str = "db.json";

/// Default location of the static continent lookup.
pub const CONTINENT_FILENAME: &str = "continent.json";

/// One entry of the GeoNames open-data export. The portal wraps the payload
/// of every record in a `fields` sub-object.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoNamesRecord {
    pub fields: GeoNamesFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoNamesFields {
    pub name: String,
    /// [latitude, longitude], already paired in the source
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub feature_code: Option<String>,
    pub country_code: String,
    #[serde(default)]
    pub population: Option<u64>,
}

/// One row of the SimpleMaps worldcities CSV. Latitude and longitude are two
/// separate columns; the population column may be empty or fractional.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleMapsRow {
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub iso2: String,
    #[serde(default)]
    pub population: Option<f64>,
}

/// Canonical city record produced by the normalizer.
///
/// `feature_code` is serialized only when the source schema carries one; the
/// key is absent from the JSON otherwise, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub city: String,
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_code: Option<String>,
    pub country: String,
    pub population: u64,
}

impl City {
    pub fn from_geonames(record: GeoNamesRecord) -> Self {
        let fields = record.fields;
        Self {
            city: fields.name,
            coordinates: fields.coordinates,
            feature_code: fields.feature_code,
            country: fields.country_code,
            population: fields.population.unwrap_or(0),
        }
    }

    pub fn from_simplemaps(row: SimpleMapsRow) -> Self {
        Self {
            city: row.city,
            coordinates: [row.lat, row.lng],
            feature_code: None,
            country: row.iso2,
            // fractional counts truncate, negatives saturate to 0
            population: row.population.map(|p| p as u64).unwrap_or(0),
        }
    }
}

/// A parsed record in whichever source schema the run was configured for.
/// The schema is fixed per invocation, never auto-detected.
#[derive(Debug, Clone)]
pub enum RawRecord {
    GeoNames(GeoNamesRecord),
    SimpleMaps(SimpleMapsRow),
}

impl RawRecord {
    pub fn normalize(self) -> City {
        match self {
            RawRecord::GeoNames(record) => City::from_geonames(record),
            RawRecord::SimpleMaps(row) => City::from_simplemaps(row),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    GeoNames,
    SimpleMaps,
}

impl SourceFormat {
    pub const SUPPORTED: [&'static str; 2] = ["geonames", "simplemaps"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "geonames" => Some(SourceFormat::GeoNames),
            "simplemaps" => Some(SourceFormat::SimpleMaps),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::GeoNames => "geonames",
            SourceFormat::SimpleMaps => "simplemaps",
        }
    }

    /// File extension the raw export of this schema ships with.
    pub fn expected_extension(&self) -> &'static str {
        match self {
            SourceFormat::GeoNames => "json",
            SourceFormat::SimpleMaps => "csv",
        }
    }
}

/// The continent lookup file is copied into the combined output without
/// inspection, so it stays an untyped JSON value.
pub type ContinentTable = serde_json::Value;

/// Combined document served by the mock API server: `cities` and `continent`
/// as two independently queryable collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub cities: Vec<City>,
    pub continent: ContinentTable,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub cities: Vec<City>,
    /// Compact JSON array, pre-serialized in input order.
    pub cities_json: String,
}
