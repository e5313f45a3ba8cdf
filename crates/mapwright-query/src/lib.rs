#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Query synthesis for Mapwright.
//!
//! Pure functions that turn a [`SearchableFields`] registry and caller
//! arguments into engine query bodies (`serde_json::Value`). Nothing here
//! performs I/O or holds state; every function is safe for unbounded
//! concurrent use.
//!
//! Query families:
//!
//! - [`term`] — unanalyzed single-field equality, for id/keyword lookups.
//! - [`terms`] — unanalyzed membership over a value list.
//! - [`range`] — inclusive `gte`/`lte` bounds on one field.
//! - [`filter_all`] — non-scoring boolean filter of term clauses.
//! - [`text_search`] — relevance search: four complementary multi-match
//!   strategies over every registered text field, combined with boolean
//!   `should`. Recall is favored over precision here; ranking is left to
//!   the engine.
//!
//! For a fixed registry and fixed inputs, every body is byte-for-byte
//! reproducible: registry iteration is sorted, and clause order is fixed.

use serde_json::{json, Map, Value};

use mapwright_core::SearchableFields;

/// The four multi-match strategies issued together by [`text_search`],
/// in emission order.
pub const MULTI_MATCH_TYPES: [&str; 4] = ["cross_fields", "best_fields", "phrase", "phrase_prefix"];

/// Single-field exact-match query. No analyzer is applied.
pub fn term<V: Into<Value>>(field: &str, value: V) -> Value {
    json!({ "query": { "term": keyed(field, value.into()) } })
}

/// Membership query over a list of exact values. No analyzer is applied.
pub fn terms<I, V>(field: &str, values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    json!({ "query": { "terms": keyed(field, Value::Array(values)) } })
}

/// Inclusive range query on a single numeric or date-like field.
pub fn range<L, U>(field: &str, lower: L, upper: U) -> Value
where
    L: Into<Value>,
    U: Into<Value>,
{
    let bounds = json!({ "gte": lower.into(), "lte": upper.into() });
    json!({ "query": { "range": keyed(field, bounds) } })
}

/// Non-scoring boolean filter: one term clause per `(field, value)` pair,
/// in iteration order. Pass an ordered map when deterministic bodies
/// matter. Only fields usable as unanalyzed filters belong here.
pub fn filter_all<I, K, V>(params: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let clauses: Vec<Value> = params
        .into_iter()
        .map(|(field, value)| json!({ "term": keyed(&field.into(), value.into()) }))
        .collect();
    json!({ "query": { "bool": { "filter": clauses } } })
}

/// A one-entry object `{field: value}`.
fn keyed(field: &str, value: Value) -> Value {
    let mut obj = Map::new();
    obj.insert(field.to_string(), value);
    Value::Object(obj)
}

/// Multi-field relevance search over every registered text field.
///
/// Emits one multi-match clause per strategy in [`MULTI_MATCH_TYPES`], each
/// listing all registered paths in sorted order, combined under a boolean
/// `should`. A clause carries an `analyzer` override only when every
/// registered field that records an analyzer records the same one;
/// otherwise the override is omitted and per-field index-time analyzers
/// apply.
pub fn text_search(registry: &SearchableFields, value: &str) -> Value {
    let fields = registry.paths();
    let analyzer = shared_analyzer(registry);

    let should: Vec<Value> = MULTI_MATCH_TYPES
        .iter()
        .map(|strategy| multi_match(strategy, value, &fields, analyzer))
        .collect();

    json!({ "query": { "bool": { "should": should } } })
}

/// The single analyzer shared by all registered fields, if they agree.
fn shared_analyzer(registry: &SearchableFields) -> Option<&str> {
    let mut found: Option<&str> = None;
    for (_, analysis) in registry.fields() {
        if let Some(name) = analysis.analyzer.as_deref() {
            match found {
                None => found = Some(name),
                Some(prev) if prev == name => {}
                Some(_) => return None,
            }
        }
    }
    found
}

fn multi_match(strategy: &str, value: &str, fields: &[&str], analyzer: Option<&str>) -> Value {
    let mut clause = Map::new();
    clause.insert("query".to_string(), Value::String(value.to_string()));
    clause.insert("type".to_string(), Value::String(strategy.to_string()));
    clause.insert(
        "fields".to_string(),
        Value::Array(fields.iter().map(|f| Value::String((*f).to_string())).collect()),
    );
    if let Some(name) = analyzer {
        clause.insert("analyzer".to_string(), Value::String(name.to_string()));
    }
    json!({ "multi_match": Value::Object(clause) })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use mapwright_core::{RecordShape, SearchableFields};

    use super::*;

    /// Registry with paths f_name, l_name, identities.key, identities.value,
    /// all recording `my_analyzer`.
    fn chetan_registry() -> SearchableFields {
        let shape = RecordShape::builder()
            .text_analyzed("f_name", "my_analyzer", "my_analyzer")
            .text_analyzed("l_name", "my_analyzer", "my_analyzer")
            .nested_array(
                "identities",
                RecordShape::builder()
                    .text_analyzed("key", "my_analyzer", "my_analyzer")
                    .text_analyzed("value", "my_analyzer", "my_analyzer")
                    .build(),
            )
            .build();
        let mut registry = SearchableFields::new();
        mapwright_core::walk(&shape, &mut registry).unwrap();
        registry
    }

    #[test]
    fn test_term_body() {
        assert_eq!(term("id", 42), json!({"query": {"term": {"id": 42}}}));
        assert_eq!(
            term("external_id", "abc-1"),
            json!({"query": {"term": {"external_id": "abc-1"}}})
        );
    }

    #[test]
    fn test_terms_body() {
        assert_eq!(
            terms("_id", ["a", "b"]),
            json!({"query": {"terms": {"_id": ["a", "b"]}}})
        );
    }

    #[test]
    fn test_range_body_is_inclusive() {
        assert_eq!(
            range("age", 18, 30),
            json!({"query": {"range": {"age": {"gte": 18, "lte": 30}}}})
        );
    }

    #[test]
    fn test_filter_all_one_clause_per_pair() {
        let body = filter_all([("city", "bangalore"), ("status", "active")]);
        assert_eq!(
            body,
            json!({"query": {"bool": {"filter": [
                {"term": {"city": "bangalore"}},
                {"term": {"status": "active"}},
            ]}}})
        );
    }

    #[test]
    fn test_text_search_emits_four_multi_match_clauses() {
        let body = text_search(&chetan_registry(), "chetan");
        let should = body["query"]["bool"]["should"].as_array().unwrap();
        assert_eq!(should.len(), 4);

        let expected_fields =
            json!(["f_name", "identities.key", "identities.value", "l_name"]);
        for (clause, strategy) in should.iter().zip(MULTI_MATCH_TYPES) {
            let mm = &clause["multi_match"];
            assert_eq!(mm["type"], json!(strategy));
            assert_eq!(mm["query"], json!("chetan"));
            assert_eq!(mm["fields"], expected_fields);
            assert_eq!(mm["analyzer"], json!("my_analyzer"));
        }
    }

    #[test]
    fn test_text_search_is_deterministic() {
        let registry = chetan_registry();
        let a = serde_json::to_string(&text_search(&registry, "chetan")).unwrap();
        let b = serde_json::to_string(&text_search(&registry, "chetan")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_divergent_analyzers_omit_override() {
        let shape = RecordShape::builder()
            .text_analyzed("title", "a_one", "a_one")
            .text_analyzed("body", "a_two", "a_two")
            .build();
        let mut registry = SearchableFields::new();
        mapwright_core::walk(&shape, &mut registry).unwrap();

        let body = text_search(&registry, "chetan");
        for clause in body["query"]["bool"]["should"].as_array().unwrap() {
            assert!(clause["multi_match"].get("analyzer").is_none());
        }
    }

    #[test]
    fn test_unanalyzed_fields_omit_override() {
        let shape = RecordShape::builder().text("city").build();
        let mut registry = SearchableFields::new();
        mapwright_core::walk(&shape, &mut registry).unwrap();

        let body = text_search(&registry, "bangalore");
        let first = &body["query"]["bool"]["should"][0]["multi_match"];
        assert_eq!(first["fields"], json!(["city"]));
        assert!(first.get("analyzer").is_none());
    }
}
