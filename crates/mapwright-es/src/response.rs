//! The engine's search response envelope.
//!
//! Hit sources are carried as raw JSON and decoded into the caller's record
//! type by the repository; a source that fails to decode is an error, never
//! a silently dropped hit.

use serde::Deserialize;
use serde_json::Value;

/// Top-level search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Engine-side execution time in milliseconds.
    pub took: u64,
    /// Whether the search timed out engine-side.
    pub timed_out: bool,
    /// Shard participation summary.
    #[serde(rename = "_shards")]
    pub shards: Shards,
    /// The matched documents.
    pub hits: Hits,
}

/// Shard participation summary.
#[derive(Debug, Clone, Deserialize)]
pub struct Shards {
    /// Shards the request spanned.
    pub total: u32,
    /// Shards that answered.
    pub successful: u32,
    /// Shards skipped by the engine.
    #[serde(default)]
    pub skipped: u32,
    /// Shards that failed.
    pub failed: u32,
}

/// The hit collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    /// Total match count and its relation.
    pub total: TotalHits,
    /// Best relevance score, absent for non-scoring queries.
    #[serde(default)]
    pub max_score: Option<f64>,
    /// The returned page of hits.
    pub hits: Vec<Hit>,
}

/// Total match count with its counting relation.
#[derive(Debug, Clone, Deserialize)]
pub struct TotalHits {
    /// Number of matches.
    pub value: u64,
    /// `"eq"` for exact counts, `"gte"` for lower bounds.
    pub relation: String,
}

/// One matched document.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    /// Index the hit came from.
    #[serde(rename = "_index")]
    pub index: String,
    /// Legacy mapping type, absent on modern engines.
    #[serde(rename = "_type", default)]
    pub doc_type: Option<String>,
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score, absent for non-scoring queries.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// The stored document, decoded downstream into the record type.
    #[serde(rename = "_source")]
    pub source: Value,
}
