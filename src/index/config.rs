use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerKind;
use crate::catalog::FieldCatalog;
use crate::error::Result;

/// Configuration of an [`InsightIndex`](crate::InsightIndex).
///
/// ```json
/// { "fields": ["prop", "prop2"], "analyzer": "standard" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Tracked property keys. Query terms bind to them in this order.
    pub fields: Vec<String>,

    /// Analyzer for field text and query terms.
    #[serde(default)]
    pub analyzer: AnalyzerKind,
}

impl IndexConfig {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            analyzer: AnalyzerKind::default(),
        }
    }

    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the fields form a valid catalog.
    pub fn validate(&self) -> Result<()> {
        self.catalog().map(|_| ())
    }

    /// Build the field catalog described by this config.
    pub fn catalog(&self) -> Result<FieldCatalog> {
        FieldCatalog::new(self.fields.iter().cloned())
    }
}

#[derive(Debug, Default)]
pub struct IndexConfigBuilder {
    fields: Vec<String>,
    analyzer: AnalyzerKind,
}

impl IndexConfigBuilder {
    pub fn add_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    pub fn analyzer(mut self, analyzer: AnalyzerKind) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn build(self) -> IndexConfig {
        IndexConfig {
            fields: self.fields,
            analyzer: self.analyzer,
        }
    }
}
