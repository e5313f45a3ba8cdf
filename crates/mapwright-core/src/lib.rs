#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Core schema derivation for Mapwright.
//!
//! This crate turns a statically declared record shape into everything the
//! search engine needs to know about it:
//!
//! 1. [`RecordShape`] declares the fields of one record type (names, value
//!    types, analyzers) through a builder.
//! 2. [`walk`] classifies every field, producing an ordered
//!    [`FieldDescriptor`] tree and registering each text-bearing path in a
//!    [`SearchableFields`] registry.
//! 3. [`synthesize`] renders the tree and a set of [`AnalysisSettings`] into
//!    a [`SchemaDocument`] ready to be submitted as an index mapping.
//!
//! The registry produced by the walk is the input for query construction
//! (see the `mapwright-query` crate).

pub mod analysis;
pub mod descriptor;
pub mod error;
pub mod mapping;
pub mod registry;
pub mod walk;

pub use analysis::{AnalysisSettings, AnalyzerDef, CharFilter, TokenFilter, TokenFilterDef, Tokenizer};
pub use descriptor::{
    Classification, DeclaredType, FieldAnalysis, FieldDecl, FieldDescriptor, FieldKind, RecordShape,
    RecordShapeBuilder,
};
pub use error::{Error, Result};
pub use mapping::{synthesize, SchemaDocument};
pub use registry::SearchableFields;
pub use walk::{snake_case, walk};
