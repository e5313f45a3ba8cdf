//! Error types for mapwright-core.

/// Errors raised while deriving a schema from a record shape.
///
/// All of these are fatal to schema synthesis: a repository built over a
/// shape that produces one of them must never become ready.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A field's declared type has no engine type mapping.
    #[error("unsupported field type at `{field}`: {declared}")]
    UnsupportedFieldType {
        /// Dotted path of the offending field.
        field: String,
        /// The declared type name that could not be mapped.
        declared: String,
    },

    /// A field references an analyzer that is absent from the analysis
    /// settings the schema is being rendered with.
    #[error("field `{field}` references unknown analyzer `{analyzer}`")]
    SchemaInconsistency {
        /// Dotted path of the field carrying the reference.
        field: String,
        /// The analyzer name that failed to resolve.
        analyzer: String,
    },

    /// A searchable field was registered without a path.
    #[error("cannot register a searchable field with an empty path")]
    EmptyFieldPath,
}

/// Convenience `Result` type alias for schema derivation.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an `UnsupportedFieldType` error.
    pub fn unsupported<F, D>(field: F, declared: D) -> Self
    where
        F: Into<String>,
        D: Into<String>,
    {
        Error::UnsupportedFieldType {
            field: field.into(),
            declared: declared.into(),
        }
    }

    /// Creates a `SchemaInconsistency` error.
    pub fn inconsistency<F, A>(field: F, analyzer: A) -> Self
    where
        F: Into<String>,
        A: Into<String>,
    {
        Error::SchemaInconsistency {
            field: field.into(),
            analyzer: analyzer.into(),
        }
    }
}
