//! Keyword analyzer: the whole value is one term.

use unicode_normalization::UnicodeNormalization;

use super::Analyzer;

/// Indexes the complete field value as a single lowercased term.
#[derive(Debug, Clone, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        KeywordAnalyzer
    }
}

impl Analyzer for KeywordAnalyzer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        let term: String = text.nfkc().collect::<String>().to_lowercase();
        if term.is_empty() {
            Vec::new()
        } else {
            vec![term]
        }
    }
}
