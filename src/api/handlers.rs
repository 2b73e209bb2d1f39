//! API Request Handlers

use axum::extract::{rejection::JsonRejection, Json, State};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::types::*;
use crate::core::dax;
use crate::models::config::{AppConfig, GroqConfig};
use crate::models::errors::{AppError, AppResult};
use crate::models::schema::Schema;
use crate::providers::groq::{error_reply, GroqService};
use crate::utils::constants::{API_TITLE, APP_VERSION};

/// Optional features resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub groq_available: bool,
    pub schema_loaded: bool,
}

/// Shared application state. Nothing in here is mutated after startup.
pub struct AppState {
    pub config: AppConfig,
    pub schema: Schema,
    pub groq: Option<Arc<GroqService>>,
    pub capabilities: Capabilities,
    pub api_key_exists: bool,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, schema: Schema, groq: Option<GroqService>) -> Self {
        let capabilities = Capabilities {
            groq_available: groq.is_some(),
            schema_loaded: !schema.is_empty(),
        };

        Self {
            config,
            schema,
            groq: groq.map(Arc::new),
            capabilities,
            api_key_exists: GroqConfig::api_key_exists(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

/// Missing, null, false, zero and empty values all count as "not given"
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

// ============================================
// Status
// ============================================

pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootData> {
    Json(RootData {
        message: API_TITLE.to_string(),
        status: "running".to_string(),
        version: APP_VERSION.to_string(),
        groq_available: state.capabilities.groq_available,
    })
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        groq_available: state.capabilities.groq_available,
        uptime_seconds: state.uptime_seconds(),
    })
}

pub async fn check_config(State(state): State<Arc<AppState>>) -> Json<ConfigData> {
    let groq_loaded = state.capabilities.groq_available;

    Json(ConfigData {
        groq_configured: state.api_key_exists && groq_loaded,
        api_key_exists: state.api_key_exists,
        groq_service_loaded: groq_loaded,
        app_name: state.config.app_name.clone(),
    })
}

// ============================================
// Power BI schema
// ============================================

pub async fn local_schema(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LocalSchemaData>, AppError> {
    if !state.capabilities.schema_loaded {
        return Err(AppError::not_found("PBI schema not loaded"));
    }

    Ok(Json(LocalSchemaData {
        success: true,
        schema: state.schema.clone(),
    }))
}

// ============================================
// Natural language -> DAX
// ============================================

pub async fn query_natural(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NaturalQueryRequest>, JsonRejection>,
) -> Result<Json<NaturalQueryResponse>, AppError> {
    let req = json_body(payload)?;

    let question = match req.question {
        Some(q) if !is_blank(&q) => q,
        _ => return Err(AppError::bad_request("question is required")),
    };

    let result = dax::render_json(&question, &state.schema);
    info!(success = result.success, "📊 Natural language query rendered");

    Ok(Json(NaturalQueryResponse {
        response: result.answer,
        dax_query: result.dax_query,
        success: result.success,
    }))
}

// ============================================
// Chat proxy
// ============================================

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    // A disabled proxy answers 503 whatever the body looks like
    let groq = match (&state.groq, state.capabilities.groq_available) {
        (Some(groq), true) => groq.clone(),
        _ => return Err(AppError::service_unavailable("groq service not available")),
    };

    let req = json_body(payload)?;
    let message = match req.message {
        Some(m) if !m.is_empty() => m,
        _ => return Err(AppError::bad_request("message is required")),
    };

    let response = match groq.try_complete(&message, req.context.as_deref()).await {
        Ok(reply) => ChatResponse {
            response: reply,
            success: true,
        },
        Err(e) => ChatResponse {
            response: error_reply(&e),
            success: false,
        },
    };

    Ok(Json(response))
}
