//! The searchable-field registry.
//!
//! Populated exactly once per record type while the shape is walked, then
//! treated as immutable: query construction only ever reads it. Entries are
//! kept sorted by path so every query body derived from the registry is
//! deterministic.

use std::collections::BTreeMap;

use crate::descriptor::FieldAnalysis;
use crate::error::{Error, Result};

/// Dotted text-field paths mapped to their analyzer assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchableFields {
    entries: BTreeMap<String, FieldAnalysis>,
}

impl SearchableFields {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a text-bearing path. Called only by the shape walker; a
    /// repeated path overwrites the prior entry (last write wins).
    pub(crate) fn register(&mut self, path: &str, analysis: FieldAnalysis) -> Result<()> {
        if path.is_empty() {
            return Err(Error::EmptyFieldPath);
        }
        self.entries.insert(path.to_string(), analysis);
        Ok(())
    }

    /// Iterates entries in path order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldAnalysis)> {
        self.entries.iter().map(|(path, a)| (path.as_str(), a))
    }

    /// All registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Looks up the analysis recorded for a path.
    pub fn get(&self, path: &str) -> Option<&FieldAnalysis> {
        self.entries.get(path)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no text field was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SearchableFields::new();
        registry
            .register("f_name", FieldAnalysis::new("my_analyzer", "my_analyzer"))
            .unwrap();

        let analysis = registry.get("f_name").unwrap();
        assert_eq!(analysis.analyzer.as_deref(), Some("my_analyzer"));
        assert_eq!(analysis.search_analyzer.as_deref(), Some("my_analyzer"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut registry = SearchableFields::new();
        let err = registry.register("", FieldAnalysis::none()).unwrap_err();
        assert!(matches!(err, Error::EmptyFieldPath));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = SearchableFields::new();
        registry
            .register("city", FieldAnalysis::new("a", "a"))
            .unwrap();
        registry
            .register("city", FieldAnalysis::new("b", "b"))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("city").unwrap().analyzer.as_deref(),
            Some("b")
        );
    }

    #[test]
    fn test_iteration_is_sorted_by_path() {
        let mut registry = SearchableFields::new();
        for path in ["l_name", "identities.key", "f_name", "identities.value"] {
            registry.register(path, FieldAnalysis::none()).unwrap();
        }
        assert_eq!(
            registry.paths(),
            vec!["f_name", "identities.key", "identities.value", "l_name"]
        );
    }
}
