//! Constants Module - Single Source of Truth
//!
//! Every default, endpoint and DAX identifier used across the service is
//! defined here.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Title reported by the root endpoint
pub const API_TITLE: &str = "Chat with Data API";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default display name (overridable with APP_NAME)
pub const DEFAULT_APP_NAME: &str = "Chat with Data";

/// User-Agent for outbound HTTP requests
pub const USER_AGENT: &str = concat!("chat-with-data/", env!("CARGO_PKG_VERSION"));

// ============================================
// SERVER DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Power BI schema file read once at startup
pub const DEFAULT_SCHEMA_PATH: &str = "pbi_schema.json";

/// Frontend origin allowed by CORS
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

// ============================================
// GROQ CHAT COMPLETION
// ============================================

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "whisper-large-v3-turbo";
pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 1000;

/// Prefix of every proxy failure string
pub const CHAT_ERROR_PREFIX: &str = "Error: ";

// ============================================
// DAX TEMPLATE IDENTIFIERS
// ============================================

/// Aggregation source table
pub const SALES_TABLE: &str = "Sales";
/// Dimension table holding the grouping columns
pub const GEOGRAPHY_TABLE: &str = "Geography";
pub const REGION_COLUMN: &str = "Region";
pub const CITY_COLUMN: &str = "City";
/// Aggregated measure column
pub const VALUE_COLUMN: &str = "SalesAmount";
/// Name of the computed measure column in SUMMARIZECOLUMNS
pub const TOTAL_SALES_LABEL: &str = "Total Sales";

/// Rows kept by TOPN, never derived from the question
pub const DEFAULT_TOP_N: usize = 5;

/// Any of these (case-insensitive) asks for a ranked subset
pub const TOP_N_KEYWORDS: [&str; 3] = ["top", "highest", "most"];

/// Groups by region when present, otherwise by city
pub const REGION_KEYWORD: &str = "region";

/// Answer used when the DAX template could not be built
pub const DAX_FAILURE_ANSWER: &str = "Could not generate DAX query";
