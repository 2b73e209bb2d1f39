//! Configuration module for the Chat with Data API
//!
//! All values come from the process environment (optionally seeded from a
//! `.env` file by the binary). Defaults live in `utils/constants.rs`.
//! The Groq API key is NEVER logged.

use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_APP_NAME, DEFAULT_CORS_ORIGIN, DEFAULT_GROQ_MODEL, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_SCHEMA_PATH, GROQ_API_URL,
};

/// Read a variable, treating empty values as unset
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Path of the Power BI schema JSON
    pub schema_path: String,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
    /// Display name reported by /api/config
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            schema_path: DEFAULT_SCHEMA_PATH.to_string(),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        // PORT wins so hosting platforms can inject it
        let port = non_empty(&lookup, "PORT").or_else(|| non_empty(&lookup, "CHAT_API_PORT"));
        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::invalid_config("PORT", &raw))?,
            None => defaults.port,
        };

        let cors_origins = match non_empty(&lookup, "CORS_ALLOW_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            host: non_empty(&lookup, "CHAT_API_HOST").unwrap_or(defaults.host),
            port,
            schema_path: non_empty(&lookup, "PBI_SCHEMA_PATH").unwrap_or(defaults.schema_path),
            cors_origins,
            app_name: non_empty(&lookup, "APP_NAME").unwrap_or(defaults.app_name),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Groq chat-completion configuration
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    /// None waits indefinitely for the upstream
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<hidden>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GroqConfig {
    /// Build a config for the given key with all defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: GROQ_API_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            timeout: None,
        }
    }

    /// Load from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Load from an arbitrary key lookup. Fails fast when GROQ_API_KEY is absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_key = non_empty(&lookup, "GROQ_API_KEY")
            .ok_or_else(|| AppError::missing_api_key("GROQ_API_KEY"))?;
        info!("🔑 GROQ_API_KEY configured (key hidden for security)");

        let mut config = Self::new(api_key);

        if let Some(model) = non_empty(&lookup, "GROQ_MODEL") {
            config.model = model;
        }
        if let Some(url) = non_empty(&lookup, "GROQ_API_URL") {
            config.api_url = url;
        }
        if let Some(raw) = non_empty(&lookup, "GROQ_TIMEOUT_SECS") {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| AppError::invalid_config("GROQ_TIMEOUT_SECS", &raw))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Whether an API key is present in the process environment
    pub fn api_key_exists() -> bool {
        non_empty(&env_lookup, "GROQ_API_KEY").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.schema_path, "pbi_schema.json");
        assert_eq!(config.cors_origins, vec!["http://localhost:3000".to_string()]);
        assert_eq!(config.app_name, "Chat with Data");
    }

    #[test]
    fn test_port_precedence() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("CHAT_API_PORT", "9100"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);

        let config = AppConfig::from_lookup(lookup_from(&[("CHAT_API_PORT", "9100")])).unwrap();
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn test_cors_origins_split() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "CORS_ALLOW_ORIGINS",
            "http://a.test, http://b.test,,",
        )]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_groq_missing_key_fails_fast() {
        let err = GroqConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissingApiKey);

        let err = GroqConfig::from_lookup(lookup_from(&[("GROQ_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissingApiKey);
    }

    #[test]
    fn test_groq_defaults_and_overrides() {
        let config = GroqConfig::from_lookup(lookup_from(&[("GROQ_API_KEY", "gsk_test")])).unwrap();
        assert_eq!(config.model, "whisper-large-v3-turbo");
        assert_eq!(config.api_url, "https://api.groq.com/openai/v1/chat/completions");
        assert!(config.timeout.is_none());

        let config = GroqConfig::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("GROQ_MODEL", "llama-3.1-8b-instant"),
            ("GROQ_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_groq_debug_hides_key() {
        let config = GroqConfig::new("gsk_secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("gsk_secret"));
    }
}
