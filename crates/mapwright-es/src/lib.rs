#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Elasticsearch repository facade for Mapwright.
//!
//! Ties the derived schema machinery together into a per-record-type
//! repository:
//!
//! 1. A type implementing [`SearchRecord`] declares its shape once.
//! 2. [`EsRepo`] construction walks the shape, freezes the searchable-field
//!    registry, and synthesizes the index schema — classification errors
//!    fail construction, so a repository that exists is always ready.
//! 3. [`EsRepo::ensure_index`] submits the schema; the query operations
//!    build bodies through `mapwright-query` and issue one HTTP round trip
//!    each, with responses classified into the error taxonomy (2xx decoded,
//!    4xx client error, 5xx server error, zero-hit single lookups
//!    [`Error::NotFound`]).
//!
//! No retries, no cancellation, no shared mutable state: each call is an
//! independent request/response awaiting its own reply.
//!
//! # Example
//!
//! ```rust,ignore
//! use mapwright_core::{AnalysisSettings, AnalyzerDef, RecordShape, Tokenizer};
//! use mapwright_es::{EsConfig, EsRepo, SearchRecord};
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Student {
//!     external_id: String,
//!     f_name: String,
//! }
//!
//! impl SearchRecord for Student {
//!     fn shape() -> RecordShape {
//!         RecordShape::builder()
//!             .text("external_id")
//!             .text_analyzed("f_name", "my_analyzer", "my_analyzer")
//!             .build()
//!     }
//!     fn external_id(&self) -> String {
//!         self.external_id.clone()
//!     }
//! }
//!
//! # async fn run() -> mapwright_es::Result<()> {
//! let settings = AnalysisSettings::new()
//!     .with_analyzer("my_analyzer", AnalyzerDef::custom(Tokenizer::Standard, ["lowercase"]));
//! let repo = EsRepo::<Student>::new(EsConfig::for_index("students"), settings)?;
//! repo.ensure_index().await?;
//! let hits = repo.text_search("chetan").await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod repo;
pub mod response;

pub use config::EsConfig;
pub use error::{Error, Result};
pub use health::{ClusterHealth, HealthStatus};
pub use repo::{EsRepo, SearchRecord};
pub use response::{Hit, Hits, SearchResponse, Shards, TotalHits};
