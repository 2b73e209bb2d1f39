//! Chat with Data API Module
//! REST API for natural-language DAX generation and the Groq chat proxy

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::{AppState, Capabilities};
pub use routes::create_router;
pub use types::*;
