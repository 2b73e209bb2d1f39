//! Core data types for the DAX template renderer

use serde::Serialize;

/// Dimension column a question is grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Region,
    City,
}

impl GroupColumn {
    /// Fully qualified DAX column reference, e.g. `'Geography'[Region]`
    pub fn dax_ref(&self) -> String {
        use crate::utils::constants::{CITY_COLUMN, GEOGRAPHY_TABLE, REGION_COLUMN};
        let column = match self {
            Self::Region => REGION_COLUMN,
            Self::City => CITY_COLUMN,
        };
        format!("'{}'[{}]", GEOGRAPHY_TABLE, column)
    }
}

/// What the question asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryIntent {
    /// Some(n) for a ranked top-n subset
    pub top_n: Option<usize>,
    pub group_by: GroupColumn,
}

impl QueryIntent {
    pub fn is_top_n(&self) -> bool {
        self.top_n.is_some()
    }
}

/// A rendered DAX query and its answer sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaxQuery {
    pub intent: QueryIntent,
    pub dax: String,
    pub answer: String,
}

/// Outcome of `render`, in the shape returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub success: bool,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dax_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
