//! Text analysis for the bundled engine.
//!
//! An analyzer turns field text into the terms stored in the postings and
//! normalizes query terms the same way, so `hello` finds `"Hello. Hello again."`.
//!
//! ```
//! use insight::analysis::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! assert_eq!(analyzer.analyze("Hah! potato!"), vec!["hah", "potato"]);
//! ```

pub mod keyword;
pub mod standard;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use keyword::KeywordAnalyzer;
pub use standard::StandardAnalyzer;

/// Converts text into index terms.
pub trait Analyzer: Send + Sync + std::fmt::Debug {
    /// Analyzer name, used in logs.
    fn name(&self) -> &'static str;

    /// Split field text into terms, in order of appearance. Duplicates are kept.
    fn analyze(&self, text: &str) -> Vec<String>;

    /// Normalize a single query term.
    ///
    /// Returns `None` when the term does not reduce to exactly one index term,
    /// in which case it cannot match anything.
    fn normalize_term(&self, term: &str) -> Option<String> {
        let mut terms = self.analyze(term).into_iter();
        match (terms.next(), terms.next()) {
            (Some(term), None) => Some(term),
            _ => None,
        }
    }
}

/// Analyzer selection in [`IndexConfig`](crate::IndexConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    #[default]
    Standard,
    Keyword,
}

impl AnalyzerKind {
    pub fn build(self) -> Arc<dyn Analyzer> {
        match self {
            AnalyzerKind::Standard => Arc::new(StandardAnalyzer::new()),
            AnalyzerKind::Keyword => Arc::new(KeywordAnalyzer::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_builds_matching_analyzer() {
        assert_eq!(AnalyzerKind::Standard.build().name(), "standard");
        assert_eq!(AnalyzerKind::Keyword.build().name(), "keyword");
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let kind: AnalyzerKind = serde_json::from_str("\"keyword\"").unwrap();
        assert_eq!(kind, AnalyzerKind::Keyword);
        assert_eq!(
            serde_json::to_string(&AnalyzerKind::Standard).unwrap(),
            "\"standard\""
        );
    }
}
