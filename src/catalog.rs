//! The ordered set of property keys an index tracks.

use ahash::AHashMap;

use crate::error::{InsightError, Result};

/// Fixed, ordered list of unique field keys.
///
/// Order matters: query terms bind to fields by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl FieldCatalog {
    /// Build a catalog, rejecting empty, blank or duplicate field keys.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut positions = AHashMap::new();

        for field in fields {
            let field = field.into();
            if field.trim().is_empty() {
                return Err(InsightError::invalid_config(
                    "field catalog contains an empty field key",
                ));
            }
            if positions.contains_key(&field) {
                return Err(InsightError::invalid_config(format!(
                    "field '{field}' appears more than once in the field catalog"
                )));
            }
            positions.insert(field.clone(), ordered.len());
            ordered.push(field);
        }

        if ordered.is_empty() {
            return Err(InsightError::invalid_config(
                "field catalog must contain at least one field",
            ));
        }

        Ok(Self {
            fields: ordered,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.positions.contains_key(field)
    }

    /// Position of a field in the catalog.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.positions.get(field).copied()
    }

    /// Field bound to query position `index`.
    pub fn field_at(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|s| s.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_declaration_order() {
        let catalog = FieldCatalog::new(["prop", "prop2"]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position("prop"), Some(0));
        assert_eq!(catalog.position("prop2"), Some(1));
        assert_eq!(catalog.field_at(1), Some("prop2"));
        assert_eq!(catalog.field_at(2), None);
        assert!(!catalog.contains("other"));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = FieldCatalog::new(["prop", "prop"]).unwrap_err();
        assert!(matches!(err, InsightError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_catalog_and_blank_keys() {
        assert!(FieldCatalog::new(Vec::<String>::new()).is_err());
        assert!(FieldCatalog::new(["prop", " "]).is_err());
    }
}
