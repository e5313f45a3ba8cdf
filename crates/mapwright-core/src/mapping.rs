//! The mapping synthesizer.
//!
//! Renders a walked [`FieldDescriptor`] tree into the engine's index-schema
//! document: leaves become `{"type": …}` properties (text leaves with the
//! parallel `keyword` sub-field), nested kinds become `{"properties": …}`
//! sub-schemas, and the whole tree is wrapped as
//! `{"mappings": {"properties": …}, "settings": {"analysis": …}}`.
//!
//! Before anything is emitted, every analyzer name referenced by the tree
//! must resolve in the supplied [`AnalysisSettings`]; a dangling reference
//! is a [`Error::SchemaInconsistency`] and nothing partial is produced.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::analysis::AnalysisSettings;
use crate::descriptor::FieldDescriptor;
use crate::error::{Error, Result};

/// A validated, renderable index schema.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocument {
    mappings: MappingsBlock,
    settings: SettingsBlock,
}

#[derive(Debug, Clone, Serialize)]
struct MappingsBlock {
    properties: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
struct SettingsBlock {
    analysis: AnalysisSettings,
}

impl SchemaDocument {
    /// The rendered `mappings.properties` object.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.mappings.properties
    }

    /// The analysis block attached under `settings`.
    pub fn analysis(&self) -> &AnalysisSettings {
        &self.settings.analysis
    }
}

/// Renders a descriptor tree and analysis settings into a schema document.
pub fn synthesize(
    descriptors: &[FieldDescriptor],
    settings: AnalysisSettings,
) -> Result<SchemaDocument> {
    validate_analyzers(descriptors, &settings)?;
    Ok(SchemaDocument {
        mappings: MappingsBlock {
            properties: render_properties(descriptors),
        },
        settings: SettingsBlock { analysis: settings },
    })
}

fn validate_analyzers(descriptors: &[FieldDescriptor], settings: &AnalysisSettings) -> Result<()> {
    for d in descriptors {
        for name in [&d.analysis.analyzer, &d.analysis.search_analyzer]
            .into_iter()
            .flatten()
        {
            if !settings.contains_analyzer(name) {
                return Err(Error::inconsistency(&d.path, name));
            }
        }
        validate_analyzers(&d.children, settings)?;
    }
    Ok(())
}

fn render_properties(descriptors: &[FieldDescriptor]) -> Map<String, Value> {
    let mut properties = Map::new();
    for d in descriptors {
        properties.insert(d.name.clone(), render_field(d));
    }
    properties
}

fn render_field(d: &FieldDescriptor) -> Value {
    if d.kind.is_nested() {
        return json!({ "properties": render_properties(&d.children) });
    }

    let mut obj = Map::new();
    if let Some(engine) = &d.engine_type {
        obj.insert("type".to_string(), Value::String(engine.clone()));
    }
    if d.kind.is_text() {
        // Dual-field convention: full-text and exact match under one name.
        obj.insert(
            "fields".to_string(),
            json!({ "keyword": { "type": "keyword" } }),
        );
    }
    Value::Object(obj)
}
