//! API Request/Response Types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::schema::Schema;

// ============================================
// Natural language -> DAX
// ============================================

#[derive(Debug, Deserialize)]
pub struct NaturalQueryRequest {
    /// Any JSON value; non-text questions fail generation rather than the request
    #[serde(default)]
    pub question: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct NaturalQueryResponse {
    /// Answer sentence (or the failure message)
    pub response: String,
    /// Always serialized; null when generation failed
    pub dax_query: Option<String>,
    pub success: bool,
}

// ============================================
// Chat proxy
// ============================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Model reply, or "Error: ..." when the upstream call failed
    pub response: String,
    pub success: bool,
}

// ============================================
// Schema
// ============================================

#[derive(Debug, Serialize)]
pub struct LocalSchemaData {
    pub success: bool,
    pub schema: Schema,
}

// ============================================
// Status
// ============================================

#[derive(Debug, Serialize)]
pub struct RootData {
    pub message: String,
    pub status: String,
    pub version: String,
    pub groq_available: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub groq_available: bool,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct ConfigData {
    pub groq_configured: bool,
    pub api_key_exists: bool,
    pub groq_service_loaded: bool,
    pub app_name: String,
}
