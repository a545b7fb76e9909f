use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of one entity (graph node) in the host store.
pub type EntityId = u64;

/// The indexed representation of one entity.
///
/// A document maps each currently indexed field of the entity to its text.
/// Only non-empty fields are kept; a document without fields is never stored
/// by an engine and is equivalent to the entity being absent from the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The entity this document describes.
    pub id: EntityId,

    /// Field data.
    pub fields: HashMap<String, String>,
}

impl Document {
    /// Create a new empty document for an entity.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            fields: HashMap::new(),
        }
    }

    /// Add a text field. Empty text is not stored.
    pub fn add_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_text(name, text);
        self
    }

    /// Set a text field in place. Setting empty text removes the field.
    pub fn set_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        if text.is_empty() {
            self.fields.remove(&name);
        } else {
            self.fields.insert(name, text);
        }
    }

    /// Remove a field, returning its previous text.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Get the text of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no indexed fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_not_stored() {
        let doc = Document::new(7).add_text("prop", "").add_text("prop2", "karl");
        assert_eq!(doc.len(), 1);
        assert!(!doc.has_field("prop"));
        assert_eq!(doc.get("prop2"), Some("karl"));
    }

    #[test]
    fn test_set_text_empty_removes_field() {
        let mut doc = Document::new(1).add_text("prop", "hello");
        doc.set_text("prop", "");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_field_names_sorted() {
        let doc = Document::new(1).add_text("b", "x").add_text("a", "y");
        assert_eq!(doc.field_names(), vec!["a", "b"]);
    }
}
