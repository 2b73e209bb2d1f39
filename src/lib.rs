//! Chat with Data
//!
//! Small backend for a Power BI chat assistant:
//! - Natural-language questions rendered into canned DAX queries
//!   (group by one dimension, optionally top-N by total sales)
//! - A proxy to Groq's OpenAI-compatible chat-completion API
//!
//! The binary in `src/bin/chat_api.rs` wires both behind an axum router.

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{classify, generate, render, render_json};
pub use models::{
    AppConfig, AppError, AppResult, DaxQuery, ErrorCode, GroqConfig, GroupColumn, QueryIntent,
    RenderResult, Schema,
};
pub use providers::GroqService;
