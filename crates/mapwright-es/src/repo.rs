//! The generic repository facade.
//!
//! [`EsRepo`] is instantiated per record type. Construction walks the
//! record's declared shape, freezes the searchable-field registry, and
//! synthesizes the index schema; any classification or consistency error
//! fails construction, so a repository that exists is always ready.
//! After that, the registry and schema are immutable and every operation
//! is an independent request with no shared mutable state.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use mapwright_core::{
    synthesize, walk, AnalysisSettings, RecordShape, SchemaDocument, SearchableFields,
};
use mapwright_query as query;

use crate::client::EsClient;
use crate::config::EsConfig;
use crate::error::{Error, Result};
use crate::health::ClusterHealth;
use crate::response::SearchResponse;

/// A domain record type the repository can index and search.
///
/// The shape is the statically declared field table that drives schema and
/// query derivation; the external id is the engine-side document id.
pub trait SearchRecord: Serialize + DeserializeOwned + Send + Sync {
    /// The declared field table of this record type.
    fn shape() -> RecordShape;

    /// The engine-side document id of this instance.
    fn external_id(&self) -> String;
}

/// Elasticsearch-backed repository for one record type.
#[derive(Debug)]
pub struct EsRepo<R: SearchRecord> {
    client: EsClient,
    index: String,
    registry: SearchableFields,
    schema: SchemaDocument,
    _record: PhantomData<fn() -> R>,
}

impl<R: SearchRecord> EsRepo<R> {
    /// Builds a repository, deriving registry and schema from `R::shape()`.
    pub fn new(config: EsConfig, settings: AnalysisSettings) -> Result<Self> {
        let client = EsClient::new(&config)?;
        Self::build(client, config.index, settings)
    }

    /// Like [`EsRepo::new`] but over an externally configured HTTP client.
    pub fn with_http_client(
        config: EsConfig,
        http: reqwest::Client,
        settings: AnalysisSettings,
    ) -> Result<Self> {
        let client = EsClient::with_http(http, &config.endpoint);
        Self::build(client, config.index, settings)
    }

    fn build(client: EsClient, index: String, settings: AnalysisSettings) -> Result<Self> {
        let mut registry = SearchableFields::new();
        let tree = walk(&R::shape(), &mut registry)?;
        let schema = synthesize(&tree, settings)?;
        log::debug!(
            "derived schema for index `{index}`: {} searchable fields",
            registry.len()
        );
        Ok(Self {
            client,
            index,
            registry,
            schema,
            _record: PhantomData,
        })
    }

    /// The index this repository operates on.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The frozen searchable-field registry.
    pub fn registry(&self) -> &SearchableFields {
        &self.registry
    }

    /// The synthesized index schema.
    pub fn schema(&self) -> &SchemaDocument {
        &self.schema
    }

    /// Submits the index schema. Safe to repeat with an unchanged schema.
    pub async fn ensure_index(&self) -> Result<()> {
        log::info!("submitting index schema for `{}`", self.index);
        let ack = self.client.put_index(&self.index, &self.schema).await?;
        log::debug!("schema accepted for `{}`: {ack}", self.index);
        Ok(())
    }

    /// Looks up one record by its numeric id. Zero hits is [`Error::NotFound`].
    pub async fn get_by_id(&self, id: u64) -> Result<R> {
        let records = self.search_records(query::term("id", id)).await?;
        single(records, "id", id.to_string())
    }

    /// Looks up one record by external id. Zero hits is [`Error::NotFound`].
    pub async fn get_by_external_id(&self, external_id: &str) -> Result<R> {
        let records = self
            .search_records(query::term("external_id", external_id))
            .await?;
        single(records, "external_id", external_id)
    }

    /// Fetches the records whose document ids are in `external_ids`.
    pub async fn multi_get_by_external_id(&self, external_ids: &[String]) -> Result<Vec<R>> {
        let body = query::terms("_id", external_ids.iter().map(String::as_str));
        self.search_records(body).await
    }

    /// Unanalyzed single-field equality search. An empty result is a
    /// success for list searches.
    pub async fn exact_search<V: Into<Value>>(&self, field: &str, value: V) -> Result<Vec<R>> {
        self.search_records(query::term(field, value)).await
    }

    /// Inclusive range search on one field.
    pub async fn range_search<L, U>(&self, field: &str, lower: L, upper: U) -> Result<Vec<R>>
    where
        L: Into<Value>,
        U: Into<Value>,
    {
        self.search_records(query::range(field, lower, upper)).await
    }

    /// Relevance search across every registered text field.
    pub async fn text_search(&self, value: &str) -> Result<Vec<R>> {
        self.search_records(query::text_search(&self.registry, value))
            .await
    }

    /// Non-scoring filter search; one exact clause per parameter.
    pub async fn filter_search(&self, params: &BTreeMap<String, String>) -> Result<Vec<R>> {
        let body = query::filter_all(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        self.search_records(body).await
    }

    /// Indexes one record under its external id, refreshing immediately.
    pub async fn create(&self, record: &R) -> Result<()> {
        let id = record.external_id();
        let document = serde_json::to_value(record)?;
        let ack = self.client.put_document(&self.index, &id, &document).await?;
        log::debug!("indexed `{id}` into `{}`: {ack}", self.index);
        Ok(())
    }

    /// Re-indexes the full document at the given external id.
    pub async fn update(&self, external_id: &str, record: &R) -> Result<()> {
        let document = serde_json::to_value(record)?;
        self.client
            .put_document(&self.index, external_id, &document)
            .await?;
        Ok(())
    }

    /// Fetches cluster health.
    pub async fn health(&self) -> Result<ClusterHealth> {
        self.client.health().await
    }

    /// Whether the cluster currently passes the health predicate. An
    /// unreachable cluster is unhealthy.
    pub async fn is_healthy(&self) -> bool {
        match self.client.health().await {
            Ok(health) => health.is_healthy(),
            Err(err) => {
                log::debug!("health check failed: {err}");
                false
            }
        }
    }

    async fn search_records(&self, body: Value) -> Result<Vec<R>> {
        let response = self.client.search(&self.index, &body).await?;
        decode_records(response)
    }
}

/// Decodes every hit source into the record type. A hit that fails to
/// decode is an error, never dropped.
fn decode_records<R: DeserializeOwned>(response: SearchResponse) -> Result<Vec<R>> {
    let mut records = Vec::with_capacity(response.hits.hits.len());
    for hit in response.hits.hits {
        records.push(serde_json::from_value(hit.source)?);
    }
    Ok(records)
}

/// First record of a single-result lookup; zero hits is `NotFound`.
fn single<R, V: Into<String>>(records: Vec<R>, field: &str, value: V) -> Result<R> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| Error::not_found(field, value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use mapwright_core::{AnalyzerDef, DeclaredType, TokenFilter, Tokenizer};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Student {
        external_id: String,
        f_name: String,
        age: u32,
        courses: Vec<String>,
    }

    impl SearchRecord for Student {
        fn shape() -> RecordShape {
            RecordShape::builder()
                .text("external_id")
                .text_analyzed("f_name", "my_analyzer", "my_analyzer")
                .scalar("age", DeclaredType::U32)
                .text_array("courses")
                .build()
        }

        fn external_id(&self) -> String {
            self.external_id.clone()
        }
    }

    fn settings() -> AnalysisSettings {
        AnalysisSettings::new().with_analyzer(
            "my_analyzer",
            AnalyzerDef::custom(Tokenizer::Standard, [TokenFilter::Lowercase.as_str()]),
        )
    }

    fn repo() -> EsRepo<Student> {
        EsRepo::new(EsConfig::for_index("students"), settings()).unwrap()
    }

    #[test]
    fn test_construction_freezes_registry_and_schema() {
        let repo = repo();
        assert_eq!(repo.index(), "students");
        assert_eq!(
            repo.registry().paths(),
            vec!["courses", "external_id", "f_name"]
        );
        assert!(repo.schema().properties().contains_key("age"));
    }

    #[test]
    fn test_construction_fails_on_unsupported_field() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Broken {
            id: String,
        }
        impl SearchRecord for Broken {
            fn shape() -> RecordShape {
                RecordShape::builder()
                    .scalar("handle", DeclaredType::Opaque("Channel"))
                    .build()
            }
            fn external_id(&self) -> String {
                self.id.clone()
            }
        }

        let err = EsRepo::<Broken>::new(EsConfig::for_index("broken"), AnalysisSettings::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(mapwright_core::Error::UnsupportedFieldType { .. })
        ));
    }

    #[test]
    fn test_construction_fails_on_dangling_analyzer() {
        // `my_analyzer` is referenced by the shape but absent from settings.
        let err =
            EsRepo::<Student>::new(EsConfig::for_index("students"), AnalysisSettings::new())
                .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(mapwright_core::Error::SchemaInconsistency { .. })
        ));
    }

    #[test]
    fn test_zero_hits_single_lookup_is_not_found() {
        let response: SearchResponse = serde_json::from_value(json!({
            "took": 1,
            "timed_out": false,
            "_shards": {"total": 1, "successful": 1, "failed": 0},
            "hits": {"total": {"value": 0, "relation": "eq"}, "hits": []}
        }))
        .unwrap();

        let records: Vec<Student> = decode_records(response).unwrap();
        let err = single(records, "external_id", "missing-1").unwrap_err();
        let Error::NotFound { field, value } = err else {
            panic!("expected NotFound, got {err:?}");
        };
        assert_eq!(field, "external_id");
        assert_eq!(value, "missing-1");
    }

    #[test]
    fn test_hits_decode_into_records() {
        let response: SearchResponse = serde_json::from_value(json!({
            "took": 2,
            "timed_out": false,
            "_shards": {"total": 1, "successful": 1, "failed": 0},
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{
                    "_index": "students",
                    "_id": "s-1",
                    "_score": 1.0,
                    "_source": {
                        "external_id": "s-1",
                        "f_name": "chetan",
                        "age": 27,
                        "courses": ["mathematics-1"]
                    }
                }]
            }
        }))
        .unwrap();

        let records: Vec<Student> = decode_records(response).unwrap();
        assert_eq!(
            records,
            vec![Student {
                external_id: "s-1".to_string(),
                f_name: "chetan".to_string(),
                age: 27,
                courses: vec!["mathematics-1".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_transport_error() {
        let config = EsConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            index: "students".to_string(),
            timeout_secs: 2,
        };
        let repo = EsRepo::<Student>::new(config, settings()).unwrap();

        let err = repo.get_by_external_id("s-1").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.is_retryable());

        assert!(!repo.is_healthy().await);
    }

    #[test]
    fn test_undecodable_hit_is_an_error() {
        let response: SearchResponse = serde_json::from_value(json!({
            "took": 1,
            "timed_out": false,
            "_shards": {"total": 1, "successful": 1, "failed": 0},
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{
                    "_index": "students",
                    "_id": "s-1",
                    "_source": {"f_name": 42}
                }]
            }
        }))
        .unwrap();

        let result: Result<Vec<Student>> = decode_records(response);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
