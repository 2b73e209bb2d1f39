//! Providers Module - External services

pub mod groq;

pub use groq::*;
