//! Power BI semantic model description, loaded once at startup

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

use crate::models::errors::{AppError, AppResult, ErrorCode};

/// Immutable schema document: `{ tables: [{ name, .. }], relationships: [..] }`
///
/// Kept as raw JSON so `/api/powerbi/local-schema` can return exactly what
/// was on disk; accessors validate only the parts they read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Default for Schema {
    fn default() -> Self {
        Self::empty()
    }
}

impl Schema {
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Read and parse the schema file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorCode::SchemaReadFailed,
                format!("Failed to read {}: {}", path.display(), e),
                e,
            )
        })?;

        let value: Value = serde_json::from_str(&raw)?;
        let schema = Self(value);
        info!(
            path = %path.display(),
            tables = schema.table_names().map(|t| t.len()).unwrap_or(0),
            "📐 PBI schema loaded"
        );
        Ok(schema)
    }

    /// True for null and for empty objects/arrays
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Table `name` values; a missing `tables` key means none
    ///
    /// The root must be an object. Each table must be an object carrying a
    /// `name` key, whatever its value. An empty `tables` string or object
    /// has nothing to walk, so it yields no names.
    pub fn table_names(&self) -> AppResult<Vec<&Value>> {
        let root = self
            .0
            .as_object()
            .ok_or_else(|| AppError::invalid_schema("schema root must be an object"))?;

        let tables = match root.get("tables") {
            None => return Ok(Vec::new()),
            Some(Value::Array(tables)) => tables,
            Some(Value::String(s)) if s.is_empty() => return Ok(Vec::new()),
            Some(Value::Object(map)) if map.is_empty() => return Ok(Vec::new()),
            Some(Value::String(_)) | Some(Value::Object(_)) => {
                return Err(AppError::invalid_schema("'tables' entries must be objects"))
            }
            Some(_) => return Err(AppError::invalid_schema("'tables' is not iterable")),
        };

        tables
            .iter()
            .enumerate()
            .map(|(idx, table)| {
                table.get("name").ok_or_else(|| {
                    AppError::invalid_schema(format!("table #{} has no 'name'", idx))
                })
            })
            .collect()
    }

    /// Declared relationships, passed through untouched
    pub fn relationships(&self) -> &[Value] {
        self.0
            .get("relationships")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
