use crate::{Error, Result};
use std::collections::HashMap;

/// Ordered training-time column names.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

/// A single row laid out in [`ColumnSchema`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

/// Result of aligning an encoded record to a schema.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub features: FeatureVector,
    /// Encoded columns the schema does not know about. They are dropped.
    pub dropped: Vec<String>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::schema("column list is empty"));
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(Error::schema(format!("empty column name at position {}", position)));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(Error::schema(format!("duplicate column '{}'", name)));
            }
        }

        Ok(Self { columns, index })
    }

    /// Parses a JSON array of column names.
    pub fn from_json(json: &str) -> Result<Self> {
        let columns: Vec<String> = serde_json::from_str(json)?;
        Self::new(columns)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Builds a zero-filled row over the schema and overlays the encoded
    /// values onto matching columns.
    pub fn align(&self, encoded: &[(String, f64)]) -> Alignment {
        let mut values = vec![0.0; self.columns.len()];
        let mut dropped = Vec::new();

        for (name, value) in encoded {
            match self.position(name) {
                Some(position) => values[position] = *value,
                None => dropped.push(name.clone()),
            }
        }

        Alignment {
            features: FeatureVector { values },
            dropped,
        }
    }
}

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema() -> ColumnSchema {
        ColumnSchema::new(
            ["bill_length_mm", "species_Adelie", "species_Gentoo", "sex_Male"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_align_zero_fills_missing_columns() {
        let encoded = vec![
            ("bill_length_mm".to_string(), 42.0),
            ("species_Gentoo".to_string(), 1.0),
        ];

        let alignment = schema().align(&encoded);

        assert_eq!(alignment.features.values(), &[42.0, 0.0, 1.0, 0.0]);
        assert!(alignment.dropped.is_empty());
    }

    #[test]
    fn test_align_drops_unknown_columns() {
        let encoded = vec![
            ("species_Emperor".to_string(), 1.0),
            ("sex_Male".to_string(), 1.0),
        ];

        let alignment = schema().align(&encoded);

        assert_eq!(alignment.features.values(), &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(alignment.dropped, vec!["species_Emperor".to_string()]);
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let err = ColumnSchema::new(vec!["a".to_string(), "a".to_string()]).unwrap_err();
        assert!(err.to_string().contains("duplicate column 'a'"));
    }

    #[test]
    fn test_rejects_empty_schema() {
        assert!(ColumnSchema::new(Vec::new()).is_err());
        assert!(ColumnSchema::from_json("[]").is_err());
    }

    #[test]
    fn test_from_json_keeps_order() {
        let schema = ColumnSchema::from_json(r#"["b", "a", "c"]"#).unwrap();
        assert_eq!(schema.columns(), &["b", "a", "c"]);
        assert_eq!(schema.position("a"), Some(1));
        assert_eq!(schema.position("z"), None);
    }
}
