//! The type-tree walker.
//!
//! [`walk`] applies the field classifier across a [`RecordShape`] depth-first
//! in declaration order, producing the [`FieldDescriptor`] tree the mapping
//! synthesizer renders and registering every text-bearing path in the
//! [`SearchableFields`] registry as a side effect.
//!
//! Paths are dotted and snake_case regardless of the source naming
//! convention; the root parent path is empty, so depth-1 fields get bare
//! leaf names. A classification failure aborts the walk — partial registry
//! state is not valid and callers must discard it.

use crate::descriptor::{FieldDescriptor, RecordShape};
use crate::error::Result;
use crate::registry::SearchableFields;

/// Walks a record shape into a descriptor tree, registering text fields.
pub fn walk(shape: &RecordShape, registry: &mut SearchableFields) -> Result<Vec<FieldDescriptor>> {
    walk_level(shape, "", registry)
}

fn walk_level(
    shape: &RecordShape,
    parent: &str,
    registry: &mut SearchableFields,
) -> Result<Vec<FieldDescriptor>> {
    let mut descriptors = Vec::with_capacity(shape.fields().len());

    for decl in shape.fields() {
        let name = snake_case(decl.name());
        let path = join_path(parent, &name);
        let classification = decl.classify(&path)?;

        let children = match decl.nested_shape() {
            Some(nested) if classification.kind.is_nested() => {
                walk_level(nested, &path, registry)?
            }
            _ => Vec::new(),
        };

        let analysis = if classification.kind.is_text() {
            registry.register(&path, decl.analysis().clone())?;
            decl.analysis().clone()
        } else {
            Default::default()
        };

        descriptors.push(FieldDescriptor {
            path,
            name,
            kind: classification.kind,
            engine_type: classification.engine_type,
            analysis,
            children,
        });
    }

    Ok(descriptors)
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Converts a field name to snake_case.
///
/// Word boundaries are case transitions and any existing `-`, `_`, or
/// whitespace separators. Names already in snake_case pass through
/// unchanged, so explicitly chosen engine identifiers are stable.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1).copied();
            let after_lower = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            let before_lower =
                prev.is_some_and(char::is_uppercase) && next.is_some_and(char::is_lowercase);
            if (after_lower || before_lower) && !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
