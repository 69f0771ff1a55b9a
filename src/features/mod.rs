//! Feature encoding for penguin records.
//!
//! A record is expanded into named columns the same way the training table
//! was built: numeric measurements keep their field name and every
//! categorical field becomes a `<field>_<value>` indicator set to `1.0`.
//! [`ColumnSchema::align`] then lays those values out in training order.

mod schema;

pub use schema::{Alignment, ColumnSchema, FeatureVector};

use serde::{Deserialize, Serialize};

/// One penguin as described by a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenguinRecord {
    pub species: String,
    pub island: String,
    #[serde(deserialize_with = "deserialize_measurement")]
    pub bill_length_mm: f64,
    #[serde(deserialize_with = "deserialize_measurement")]
    pub bill_depth_mm: f64,
    #[serde(deserialize_with = "deserialize_measurement")]
    pub flipper_length_mm: f64,
    pub sex: String,
}

/// Accepts a JSON number or a string holding one, e.g. `39.1` or `"39.1"`.
fn deserialize_measurement<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct MeasurementVisitor;

    impl serde::de::Visitor<'_> for MeasurementVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number or a numeric string")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(v as f64)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            v.trim()
                .parse::<f64>()
                .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(MeasurementVisitor)
}

impl PenguinRecord {
    fn numeric_fields(&self) -> [(&'static str, f64); 3] {
        [
            ("bill_length_mm", self.bill_length_mm),
            ("bill_depth_mm", self.bill_depth_mm),
            ("flipper_length_mm", self.flipper_length_mm),
        ]
    }

    fn categorical_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("species", &self.species),
            ("island", &self.island),
            ("sex", &self.sex),
        ]
    }
}

/// Name of the indicator column for a categorical value.
pub fn indicator_column(field: &str, value: &str) -> String {
    format!("{}_{}", field, value)
}

/// One-hot expansion of a single record: numeric columns first, then one
/// indicator per categorical field.
pub fn encode(record: &PenguinRecord) -> Vec<(String, f64)> {
    let mut columns = Vec::with_capacity(6);

    for (name, value) in record.numeric_fields() {
        columns.push((name.to_string(), value));
    }
    for (field, value) in record.categorical_fields() {
        columns.push((indicator_column(field, value), 1.0));
    }

    columns
}
