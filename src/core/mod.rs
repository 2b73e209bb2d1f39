//! Core Module - Question classification & DAX rendering

pub mod dax;
pub mod intent;

pub use dax::{generate, render, render_json};
pub use intent::classify;
