//! TopoJSON geometry extraction.
//!
//! Walks a key path (normally `objects.<collection>.geometries`) and reads
//! the identifier and name keys out of each geometry's `properties`.
//! Geometries without `properties` are skipped; a missing key inside
//! `properties` is collected as null.

use serde_json::Value;

use crate::config::HierarchyConfig;
use crate::error::ReconError;
use crate::model::{FieldValue, HierarchyGeometry};

pub fn load_hierarchy(
    json_data: &str,
    config: &HierarchyConfig,
) -> Result<Vec<HierarchyGeometry>, ReconError> {
    let doc: Value =
        serde_json::from_str(json_data).map_err(|e| ReconError::JsonParse(e.to_string()))?;

    let path = config.geometries_path();
    let geometries = resolve_array(&doc, &path)?;

    let mut out = Vec::with_capacity(geometries.len());
    let mut skipped = 0usize;

    for (index, geometry) in geometries.iter().enumerate() {
        let obj = geometry.as_object().ok_or_else(|| ReconError::InvalidGeometry {
            index,
            reason: format!("expected an object, found {}", json_type(geometry)),
        })?;

        let props = match obj.get("properties") {
            None | Some(Value::Null) => {
                skipped += 1;
                continue;
            }
            Some(Value::Object(props)) => props,
            Some(other) => {
                return Err(ReconError::InvalidGeometry {
                    index,
                    reason: format!("'properties' is {}, expected an object", json_type(other)),
                })
            }
        };

        let read = |key: &str| {
            props
                .get(key)
                .map(FieldValue::from_json)
                .unwrap_or(FieldValue::Null)
        };

        out.push(HierarchyGeometry {
            id: read(&config.id_key),
            name: read(&config.name_key),
        });
    }

    if geometries.is_empty() {
        log::warn!("geometries array at '{}' is empty", path.join("."));
    }
    log::debug!(
        "loaded {} geometr(ies) from '{}', skipped {} without properties",
        out.len(),
        path.join("."),
        skipped
    );

    Ok(out)
}

/// Follow `path` through nested objects and return the array it ends on.
fn resolve_array<'a>(doc: &'a Value, path: &[String]) -> Result<&'a Vec<Value>, ReconError> {
    let mut node = doc;
    for (depth, key) in path.iter().enumerate() {
        node = node.get(key.as_str()).ok_or_else(|| ReconError::MissingPath {
            path: path[..=depth].join("."),
        })?;
    }
    node.as_array().ok_or_else(|| ReconError::NotAnArray { path: path.join(".") })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
