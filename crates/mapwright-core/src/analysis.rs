//! Analysis settings: named analyzers and token filters.
//!
//! These types serialize to the engine's `settings.analysis` block:
//!
//! ```json
//! {
//!   "analyzer": { "my_analyzer": { "type": "custom", "tokenizer": "standard", "filter": ["lowercase"] } },
//!   "filter": { "english_stop": { "type": "stop", "stop_words": "_english_" } }
//! }
//! ```
//!
//! Well-known tokenizer and filter names are provided as enums so call sites
//! don't scatter string literals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named analyzer definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerDef {
    /// Analyzer type; custom analyzers use `"custom"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Tokenizer name.
    pub tokenizer: String,
    /// Token filter chain, applied in order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub filter: Vec<String>,
}

impl AnalyzerDef {
    /// A custom analyzer over the given tokenizer and filter chain.
    pub fn custom<I, S>(tokenizer: Tokenizer, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: Some("custom".to_string()),
            tokenizer: tokenizer.as_str().to_string(),
            filter: filters.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named token filter definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFilterDef {
    /// Filter type, e.g. `"stop"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stop-word set name for stop filters, e.g. `"_english_"`.
    #[serde(rename = "stop_words", skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<String>,
}

impl TokenFilterDef {
    /// A stop filter over a named stop-word set.
    pub fn stop<S: Into<String>>(stop_words: S) -> Self {
        Self {
            kind: "stop".to_string(),
            stop_words: Some(stop_words.into()),
        }
    }
}

/// The global analysis block attached to a synthesized schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Named analyzers available to fields of the index.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub analyzer: BTreeMap<String, AnalyzerDef>,
    /// Named token filters referenced by the analyzers.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub filter: BTreeMap<String, TokenFilterDef>,
}

impl AnalysisSettings {
    /// Creates an empty analysis block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named analyzer.
    pub fn with_analyzer<N: Into<String>>(mut self, name: N, def: AnalyzerDef) -> Self {
        self.analyzer.insert(name.into(), def);
        self
    }

    /// Adds a named token filter.
    pub fn with_filter<N: Into<String>>(mut self, name: N, def: TokenFilterDef) -> Self {
        self.filter.insert(name.into(), def);
        self
    }

    /// Whether an analyzer name resolves in this block.
    pub fn contains_analyzer(&self, name: &str) -> bool {
        self.analyzer.contains_key(name)
    }
}

/// Well-known tokenizer names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    /// Grammar-based tokenization.
    Standard,
    /// Splits on non-letters.
    Letter,
    /// Splits on non-letters and lowercases.
    Lowercase,
    /// Splits on whitespace.
    Whitespace,
    /// Classic English-grammar tokenization.
    Classic,
}

impl Tokenizer {
    /// The engine-side name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Tokenizer::Standard => "standard",
            Tokenizer::Letter => "letter",
            Tokenizer::Lowercase => "lowercase",
            Tokenizer::Whitespace => "whitespace",
            Tokenizer::Classic => "classic",
        }
    }
}

/// Well-known token filter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFilter {
    /// Lowercases tokens.
    Lowercase,
    /// English stop-word removal.
    EnglishStop,
    /// Folds non-ASCII characters to ASCII equivalents.
    AsciiFolding,
}

impl TokenFilter {
    /// The engine-side name.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenFilter::Lowercase => "lowercase",
            TokenFilter::EnglishStop => "english_stop",
            TokenFilter::AsciiFolding => "asciifolding",
        }
    }
}

/// Well-known character filter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharFilter {
    /// Strips HTML elements.
    HtmlStrip,
    /// Character mapping replacement.
    Mapping,
    /// Regex-based replacement.
    PatternReplace,
}

impl CharFilter {
    /// The engine-side name.
    pub const fn as_str(self) -> &'static str {
        match self {
            CharFilter::HtmlStrip => "html_strip",
            CharFilter::Mapping => "mapping",
            CharFilter::PatternReplace => "pattern_replace",
        }
    }
}
