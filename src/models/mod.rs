//! Models Module - Data Structures & Configuration

pub mod config;
pub mod errors;
pub mod schema;
pub mod types;

pub use config::*;
pub use errors::*;
pub use schema::*;
pub use types::*;
