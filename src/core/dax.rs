//! DAX Template Renderer
//!
//! Turns a classified question into one of two fixed query shapes:
//!
//! ```text
//! EVALUATE                         EVALUATE
//! SUMMARIZECOLUMNS(                TOPN(
//!     <group>,                         5,
//!     "Total Sales", <measure>         SUMMARIZECOLUMNS(
//! )                                    <group>,
//!                                      "Total Sales", <measure>
//!                                  ),
//!                                      [Total Sales],
//!                                      DESC
//!                                  )
//! ```
//!
//! The SUMMARIZECOLUMNS block is spliced into TOPN as-is, so only its first
//! line is indented. Consumers compare these strings literally.
//!
//! Table and column identifiers are fixed. The schema's table list is read
//! (and must be well-formed) but does not influence the output.

use serde_json::Value;
use tracing::{debug, warn};

use super::intent::classify;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::schema::Schema;
use crate::models::types::{DaxQuery, GroupColumn, QueryIntent, RenderResult};
use crate::utils::constants::{DAX_FAILURE_ANSWER, SALES_TABLE, TOTAL_SALES_LABEL, VALUE_COLUMN};

/// `SUM('Sales'[SalesAmount])`
pub fn measure_expr() -> String {
    format!("SUM('{}'[{}])", SALES_TABLE, VALUE_COLUMN)
}

fn summarize_columns(group_by: GroupColumn) -> String {
    format!(
        "SUMMARIZECOLUMNS(\n    {group},\n    \"{label}\", {measure}\n)",
        group = group_by.dax_ref(),
        label = TOTAL_SALES_LABEL,
        measure = measure_expr(),
    )
}

/// Render the DAX text for an intent
pub fn render_dax(intent: &QueryIntent) -> String {
    let summarize = summarize_columns(intent.group_by);

    match intent.top_n {
        Some(n) => format!(
            "EVALUATE\nTOPN(\n    {n},\n    {summarize},\n    [{label}],\n    DESC\n)",
            label = TOTAL_SALES_LABEL,
        ),
        None => format!("EVALUATE\n{summarize}"),
    }
}

/// Human-readable sentence; the question is echoed verbatim
pub fn answer_text(intent: &QueryIntent, question: &str) -> String {
    match intent.top_n {
        Some(n) => format!(
            "Showing top {} groups based on total sales for your question: '{}'",
            n, question
        ),
        None => format!(
            "Showing total sales grouped by location for your question: '{}'",
            question
        ),
    }
}

/// Classify and render, surfacing schema access errors
pub fn generate(question: &str, schema: &Schema) -> AppResult<DaxQuery> {
    let tables = schema.table_names()?;

    let intent = classify(question);
    debug!(
        top_n = ?intent.top_n,
        group_by = ?intent.group_by,
        schema_tables = tables.len(),
        schema_relationships = schema.relationships().len(),
        "Classified question"
    );

    Ok(DaxQuery {
        dax: render_dax(&intent),
        answer: answer_text(&intent, question),
        intent,
    })
}

/// Total variant of [`generate`]: failures become a `success = false` result
pub fn render(question: &str, schema: &Schema) -> RenderResult {
    into_result(generate(question, schema))
}

/// [`render`] for a question taken straight from a JSON body.
/// Anything but a string is a generation failure, not a client error.
pub fn render_json(question: &Value, schema: &Schema) -> RenderResult {
    match question.as_str() {
        Some(text) => render(text, schema),
        None => into_result(Err(AppError::new(
            ErrorCode::DaxInvalidQuestion,
            format!("question must be a string, got {}", json_type_name(question)),
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn into_result(generated: AppResult<DaxQuery>) -> RenderResult {
    match generated {
        Ok(query) => RenderResult {
            success: true,
            answer: query.answer,
            dax_query: Some(query.dax),
            error: None,
        },
        Err(e) => {
            warn!(code = e.code_str(), "DAX generation failed: {}", e.message);
            RenderResult {
                success: false,
                answer: DAX_FAILURE_ANSWER.to_string(),
                dax_query: None,
                error: Some(e.message),
            }
        }
    }
}
