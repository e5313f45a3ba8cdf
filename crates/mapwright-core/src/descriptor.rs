//! Record shape declarations and field classification.
//!
//! A [`RecordShape`] is the statically declared stand-in for runtime type
//! introspection: one ordered table of [`FieldDecl`]s per record type,
//! assembled through [`RecordShapeBuilder`]. Classification then maps each
//! declaration onto a [`FieldKind`] and an engine type name, following a
//! fixed priority:
//!
//! 1. Records (and arrays of records) become nested sub-schemas.
//! 2. An explicit engine-type override wins over the primitive table.
//! 3. Textual fields become `text` (with the dual `keyword` sub-field
//!    rendered by the mapping synthesizer).
//! 4. Everything else goes through the primitive table; a declared type
//!    with no table entry is an [`Error::UnsupportedFieldType`].
//!
//! Optional wrappers classify as their inner type — classification works on
//! declared types only, never on runtime values.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The declared value type of one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    /// A character-string type.
    Text,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    /// Boolean.
    Bool,
    /// An ordered collection of the inner type.
    Array(Box<DeclaredType>),
    /// A nested record with its own shape.
    Record(RecordShape),
    /// An optional wrapper; classifies as the inner type.
    Optional(Box<DeclaredType>),
    /// A declared type with no engine mapping. Classifying it fails with
    /// [`Error::UnsupportedFieldType`] naming the carried type name.
    Opaque(&'static str),
}

/// Index-time / query-time analyzer assignment for a text field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAnalysis {
    /// Analyzer applied at index time.
    pub analyzer: Option<String>,
    /// Analyzer applied at query time.
    pub search_analyzer: Option<String>,
}

impl FieldAnalysis {
    /// Analysis with both analyzers named.
    pub fn new<A, S>(analyzer: A, search_analyzer: S) -> Self
    where
        A: Into<String>,
        S: Into<String>,
    {
        Self {
            analyzer: Some(analyzer.into()),
            search_analyzer: Some(search_analyzer.into()),
        }
    }

    /// No analyzer assignment; the engine's defaults apply.
    pub fn none() -> Self {
        Self::default()
    }
}

/// One declared field of a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    name: String,
    declared: DeclaredType,
    type_override: Option<String>,
    analysis: FieldAnalysis,
}

impl FieldDecl {
    /// Declares a field with no override and no analysis.
    pub fn new<N: Into<String>>(name: N, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared,
            type_override: None,
            analysis: FieldAnalysis::none(),
        }
    }

    /// Sets an explicit engine type, bypassing the primitive table.
    pub fn with_override<T: Into<String>>(mut self, engine_type: T) -> Self {
        self.type_override = Some(engine_type.into());
        self
    }

    /// Sets the analyzer assignment for a textual field.
    pub fn with_analysis(mut self, analysis: FieldAnalysis) -> Self {
        self.analysis = analysis;
        self
    }

    /// The declared (source) field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value type.
    pub fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    /// The analyzer assignment attached to the declaration.
    pub fn analysis(&self) -> &FieldAnalysis {
        &self.analysis
    }

    /// The nested shape, if this field declares a record or record array.
    pub fn nested_shape(&self) -> Option<&RecordShape> {
        match peel(&self.declared) {
            (Base::Record(shape), _) => Some(shape),
            _ => None,
        }
    }

    /// Classifies the declaration. `path` is only used to label errors.
    pub fn classify(&self, path: &str) -> Result<Classification> {
        let (base, is_array) = peel(&self.declared);

        // Rule 1: records nest; an override cannot flatten a record.
        if let Base::Record(_) = base {
            return Ok(Classification {
                kind: if is_array {
                    FieldKind::NestedArray
                } else {
                    FieldKind::Nested
                },
                engine_type: None,
            });
        }

        // Rule 2: explicit engine type override.
        if let Some(engine) = &self.type_override {
            return Ok(Classification {
                kind: if is_array {
                    FieldKind::ScalarArray
                } else {
                    FieldKind::Scalar
                },
                engine_type: Some(engine.clone()),
            });
        }

        // Rule 3: textual fields.
        if let Base::Text = base {
            return Ok(Classification {
                kind: if is_array {
                    FieldKind::TextArray
                } else {
                    FieldKind::Text
                },
                engine_type: Some("text".to_string()),
            });
        }

        // Rule 4: the primitive table.
        let engine = match base {
            Base::I64 | Base::U64 => "long",
            Base::I32 | Base::U32 => "integer",
            Base::F32 | Base::F64 => "float",
            Base::Bool => "bool",
            Base::Opaque(declared) => return Err(Error::unsupported(path, declared)),
            Base::Text | Base::Record(_) => unreachable!("handled above"),
        };
        Ok(Classification {
            kind: if is_array {
                FieldKind::ScalarArray
            } else {
                FieldKind::Scalar
            },
            engine_type: Some(engine.to_string()),
        })
    }
}

/// The classification of one field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Discriminated field kind.
    pub kind: FieldKind,
    /// Rendered engine type name; `None` for nested kinds, which render a
    /// sub-schema instead.
    pub engine_type: Option<String>,
}

/// Discriminated kind of a classified field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A non-textual leaf value.
    Scalar,
    /// A textual leaf value.
    Text,
    /// An array of textual values.
    TextArray,
    /// An array of non-textual leaf values.
    ScalarArray,
    /// A nested record.
    Nested,
    /// An array of nested records.
    NestedArray,
}

impl FieldKind {
    /// Whether this kind carries text analysis and appears in the
    /// searchable-field registry.
    pub fn is_text(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::TextArray)
    }

    /// Whether this kind renders a nested sub-schema.
    pub fn is_nested(self) -> bool {
        matches!(self, FieldKind::Nested | FieldKind::NestedArray)
    }
}

/// One classified field in the walked tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Dotted path uniquely identifying the field from the record root.
    pub path: String,
    /// The snake_case leaf name used as the mapping key.
    pub name: String,
    /// Discriminated field kind.
    pub kind: FieldKind,
    /// Rendered engine type; `None` iff the kind is nested.
    pub engine_type: Option<String>,
    /// Analyzer assignment; populated only for text kinds.
    pub analysis: FieldAnalysis,
    /// Child descriptors; non-empty only for nested kinds.
    pub children: Vec<FieldDescriptor>,
}

/// The ordered field table of one record type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordShape {
    fields: Vec<FieldDecl>,
}

impl RecordShape {
    /// Starts building a shape.
    pub fn builder() -> RecordShapeBuilder {
        RecordShapeBuilder { fields: Vec::new() }
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

/// Builder for [`RecordShape`]; fields keep their declaration order.
#[derive(Debug, Default)]
pub struct RecordShapeBuilder {
    fields: Vec<FieldDecl>,
}

impl RecordShapeBuilder {
    /// Adds a textual field with no analyzer assignment.
    pub fn text<N: Into<String>>(self, name: N) -> Self {
        self.declare(FieldDecl::new(name, DeclaredType::Text))
    }

    /// Adds a textual field with index/search analyzers.
    pub fn text_analyzed<N, A, S>(self, name: N, analyzer: A, search_analyzer: S) -> Self
    where
        N: Into<String>,
        A: Into<String>,
        S: Into<String>,
    {
        self.declare(
            FieldDecl::new(name, DeclaredType::Text)
                .with_analysis(FieldAnalysis::new(analyzer, search_analyzer)),
        )
    }

    /// Adds an array-of-text field with no analyzer assignment.
    pub fn text_array<N: Into<String>>(self, name: N) -> Self {
        self.declare(FieldDecl::new(
            name,
            DeclaredType::Array(Box::new(DeclaredType::Text)),
        ))
    }

    /// Adds an array-of-text field with index/search analyzers.
    pub fn text_array_analyzed<N, A, S>(self, name: N, analyzer: A, search_analyzer: S) -> Self
    where
        N: Into<String>,
        A: Into<String>,
        S: Into<String>,
    {
        self.declare(
            FieldDecl::new(name, DeclaredType::Array(Box::new(DeclaredType::Text)))
                .with_analysis(FieldAnalysis::new(analyzer, search_analyzer)),
        )
    }

    /// Adds a scalar field classified through the primitive table.
    pub fn scalar<N: Into<String>>(self, name: N, declared: DeclaredType) -> Self {
        self.declare(FieldDecl::new(name, declared))
    }

    /// Adds an array of scalars.
    pub fn scalar_array<N: Into<String>>(self, name: N, element: DeclaredType) -> Self {
        self.declare(FieldDecl::new(
            name,
            DeclaredType::Array(Box::new(element)),
        ))
    }

    /// Adds a field with an explicit engine type, bypassing the table.
    pub fn overridden<N, T>(self, name: N, declared: DeclaredType, engine_type: T) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        self.declare(FieldDecl::new(name, declared).with_override(engine_type))
    }

    /// Adds a nested record field.
    pub fn nested<N: Into<String>>(self, name: N, shape: RecordShape) -> Self {
        self.declare(FieldDecl::new(name, DeclaredType::Record(shape)))
    }

    /// Adds an array-of-records field.
    pub fn nested_array<N: Into<String>>(self, name: N, shape: RecordShape) -> Self {
        self.declare(FieldDecl::new(
            name,
            DeclaredType::Array(Box::new(DeclaredType::Record(shape))),
        ))
    }

    /// Adds a fully spelled-out declaration.
    pub fn declare(mut self, decl: FieldDecl) -> Self {
        self.fields.push(decl);
        self
    }

    /// Finishes the shape.
    pub fn build(self) -> RecordShape {
        RecordShape {
            fields: self.fields,
        }
    }
}

/// A declared type with wrappers peeled off.
enum Base<'a> {
    Text,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Record(&'a RecordShape),
    Opaque(&'a str),
}

/// Strips `Optional` wrappers and flattens `Array` nesting, reporting
/// whether any array wrapper was seen.
fn peel(ty: &DeclaredType) -> (Base<'_>, bool) {
    match ty {
        DeclaredType::Optional(inner) => peel(inner),
        DeclaredType::Array(inner) => {
            let (base, _) = peel(inner);
            (base, true)
        }
        DeclaredType::Text => (Base::Text, false),
        DeclaredType::I32 => (Base::I32, false),
        DeclaredType::I64 => (Base::I64, false),
        DeclaredType::U32 => (Base::U32, false),
        DeclaredType::U64 => (Base::U64, false),
        DeclaredType::F32 => (Base::F32, false),
        DeclaredType::F64 => (Base::F64, false),
        DeclaredType::Bool => (Base::Bool, false),
        DeclaredType::Record(shape) => (Base::Record(shape), false),
        DeclaredType::Opaque(name) => (Base::Opaque(name), false),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn classify(decl: FieldDecl) -> Classification {
        decl.classify("test_field").unwrap()
    }

    #[test]
    fn test_primitive_table() {
        let cases = [
            (DeclaredType::I64, "long"),
            (DeclaredType::U64, "long"),
            (DeclaredType::I32, "integer"),
            (DeclaredType::U32, "integer"),
            (DeclaredType::F32, "float"),
            (DeclaredType::F64, "float"),
            (DeclaredType::Bool, "bool"),
        ];
        for (declared, expected) in cases {
            let c = classify(FieldDecl::new("x", declared));
            assert_eq!(c.kind, FieldKind::Scalar);
            assert_eq!(c.engine_type.as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_text_classifies_as_text() {
        let c = classify(FieldDecl::new("city", DeclaredType::Text));
        assert_eq!(c.kind, FieldKind::Text);
        assert_eq!(c.engine_type.as_deref(), Some("text"));
    }

    #[test]
    fn test_text_array() {
        let c = classify(FieldDecl::new(
            "courses",
            DeclaredType::Array(Box::new(DeclaredType::Text)),
        ));
        assert_eq!(c.kind, FieldKind::TextArray);
        assert_eq!(c.engine_type.as_deref(), Some("text"));
    }

    #[test]
    fn test_scalar_array() {
        let c = classify(FieldDecl::new(
            "scores",
            DeclaredType::Array(Box::new(DeclaredType::I32)),
        ));
        assert_eq!(c.kind, FieldKind::ScalarArray);
        assert_eq!(c.engine_type.as_deref(), Some("integer"));
    }

    #[test]
    fn test_override_wins_over_table() {
        let c = classify(FieldDecl::new("created_on", DeclaredType::I64).with_override("date"));
        assert_eq!(c.kind, FieldKind::Scalar);
        assert_eq!(c.engine_type.as_deref(), Some("date"));
    }

    #[test]
    fn test_override_wins_over_opaque() {
        let c = classify(
            FieldDecl::new("created_on", DeclaredType::Opaque("DateTime<Utc>"))
                .with_override("date"),
        );
        assert_eq!(c.kind, FieldKind::Scalar);
        assert_eq!(c.engine_type.as_deref(), Some("date"));
    }

    #[test]
    fn test_record_wins_over_override() {
        let shape = RecordShape::builder().text("name").build();
        let c = classify(
            FieldDecl::new("university", DeclaredType::Record(shape)).with_override("keyword"),
        );
        assert_eq!(c.kind, FieldKind::Nested);
        assert_eq!(c.engine_type, None);
    }

    #[test]
    fn test_array_of_records() {
        let shape = RecordShape::builder().text("key").build();
        let c = classify(FieldDecl::new(
            "identities",
            DeclaredType::Array(Box::new(DeclaredType::Record(shape))),
        ));
        assert_eq!(c.kind, FieldKind::NestedArray);
    }

    #[test]
    fn test_optional_classifies_as_inner() {
        let c = classify(FieldDecl::new(
            "age",
            DeclaredType::Optional(Box::new(DeclaredType::U32)),
        ));
        assert_eq!(c.kind, FieldKind::Scalar);
        assert_eq!(c.engine_type.as_deref(), Some("integer"));

        let c = classify(FieldDecl::new(
            "tags",
            DeclaredType::Optional(Box::new(DeclaredType::Array(Box::new(DeclaredType::Text)))),
        ));
        assert_eq!(c.kind, FieldKind::TextArray);
    }

    #[test]
    fn test_opaque_is_unsupported() {
        let err = FieldDecl::new("handle", DeclaredType::Opaque("Channel"))
            .classify("handle")
            .unwrap_err();
        let Error::UnsupportedFieldType { field, declared } = err else {
            panic!("expected UnsupportedFieldType, got {err:?}");
        };
        assert_eq!(field, "handle");
        assert_eq!(declared, "Channel");
    }
}
