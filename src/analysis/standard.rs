//! Standard analyzer: Unicode word segmentation, NFKC, lowercase.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use super::Analyzer;

/// Splits text on Unicode word boundaries (UAX #29), normalizes to NFKC and
/// lowercases every word. Punctuation and whitespace never become terms.
#[derive(Debug, Clone, Default)]
pub struct StandardAnalyzer;

impl StandardAnalyzer {
    pub fn new() -> Self {
        StandardAnalyzer
    }
}

impl Analyzer for StandardAnalyzer {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        let normalized: String = text.nfkc().collect();
        normalized
            .unicode_words()
            .map(|word| word.to_lowercase())
            .collect()
    }
}
