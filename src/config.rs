use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for the remote call timeout, whatever the environment says.
const MAX_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host the HTTP server binds to
    pub host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// JSON file holding the stored ideas
    pub ideas_path: PathBuf,
    /// Verbose logging
    pub debug: bool,
    /// Settings for the ranking call, updatable at runtime
    pub matcher: MatcherConfig,
}

/// Settings consumed by the ranking service on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Bearer token for the chat-completion API. `None` means fallback only.
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
    /// Base URL of the OpenAI-compatible API (immutable at runtime)
    pub base_url: String,
    /// Use seeded scores when the remote call is unavailable or fails
    pub use_fallback: bool,
    /// Seed for the fallback generator
    pub random_seed: u64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key must not be empty")]
    EmptyApiKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            ideas_path: PathBuf::from("ideas.json"),
            debug: false,
            matcher: MatcherConfig::default(),
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "mistral-medium".to_string(),
            base_url: "https://api.mistral.ai".to_string(),
            use_fallback: true,
            random_seed: 42,
            timeout_secs: 30,
            temperature: 0.1,
            max_tokens: 1000,
        }
    }
}

impl MatcherConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.min(MAX_TIMEOUT_SECS))
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Unparseable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("IDEA_MATCH_HOST") {
            config.host = host;
        }
        if let Some(val) = lookup("IDEA_MATCH_PORT") {
            if let Ok(v) = val.parse() {
                config.port = v;
            }
        }
        if let Some(path) = lookup("IDEA_MATCH_IDEAS_PATH") {
            config.ideas_path = PathBuf::from(path);
        }
        if let Some(val) = lookup("IDEA_MATCH_DEBUG") {
            if let Some(v) = parse_flag(&val) {
                config.debug = v;
            }
        }

        // Matcher settings
        if let Some(key) = lookup("MISTRAL_API_KEY") {
            config.matcher.api_key = validate_api_key(&key).ok();
        }
        if let Some(model) = lookup("MISTRAL_MODEL") {
            config.matcher.model = model;
        }
        if let Some(url) = lookup("MISTRAL_BASE_URL") {
            config.matcher.base_url = url;
        }
        if let Some(val) = lookup("IDEA_MATCH_USE_FALLBACK") {
            if let Some(v) = parse_flag(&val) {
                config.matcher.use_fallback = v;
            }
        }
        if let Some(val) = lookup("IDEA_MATCH_RANDOM_SEED") {
            if let Ok(v) = val.parse() {
                config.matcher.random_seed = v;
            }
        }
        if let Some(val) = lookup("IDEA_MATCH_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.matcher.timeout_secs = v.min(MAX_TIMEOUT_SECS);
            }
        }
        if let Some(val) = lookup("IDEA_MATCH_TEMPERATURE") {
            if let Ok(v) = val.parse() {
                config.matcher.temperature = v;
            }
        }
        if let Some(val) = lookup("IDEA_MATCH_MAX_TOKENS") {
            if let Ok(v) = val.parse() {
                config.matcher.max_tokens = v;
            }
        }

        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accepts a credential and returns it trimmed, rejecting blank values.
pub fn validate_api_key(key: &str) -> Result<String, ConfigError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::EmptyApiKey);
    }
    Ok(key.to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.ideas_path, PathBuf::from("ideas.json"));
        assert!(!config.debug);
        assert!(config.matcher.api_key.is_none());
        assert_eq!(config.matcher.model, "mistral-medium");
        assert!(config.matcher.use_fallback);
        assert_eq!(config.matcher.random_seed, 42);
        assert_eq!(config.matcher.max_tokens, 1000);
    }

    #[test]
    fn test_overrides_from_env() {
        let config = config_from(&[
            ("IDEA_MATCH_HOST", "0.0.0.0"),
            ("IDEA_MATCH_PORT", "8088"),
            ("IDEA_MATCH_DEBUG", "true"),
            ("MISTRAL_API_KEY", "  secret  "),
            ("MISTRAL_MODEL", "mistral-small"),
            ("IDEA_MATCH_USE_FALLBACK", "off"),
            ("IDEA_MATCH_RANDOM_SEED", "7"),
        ]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8088");
        assert!(config.debug);
        assert_eq!(config.matcher.api_key.as_deref(), Some("secret"));
        assert_eq!(config.matcher.model, "mistral-small");
        assert!(!config.matcher.use_fallback);
        assert_eq!(config.matcher.random_seed, 7);
    }

    #[test]
    fn test_unparseable_values_keep_defaults() {
        let config = config_from(&[
            ("IDEA_MATCH_PORT", "not-a-port"),
            ("IDEA_MATCH_USE_FALLBACK", "maybe"),
            ("IDEA_MATCH_TIMEOUT_SECS", "-1"),
        ]);
        assert_eq!(config.port, 5000);
        assert!(config.matcher.use_fallback);
        assert_eq!(config.matcher.timeout_secs, 30);
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = config_from(&[("MISTRAL_API_KEY", "   ")]);
        assert!(config.matcher.api_key.is_none());
        assert!(!config.matcher.has_api_key());
    }

    #[test]
    fn test_timeout_is_capped() {
        let config = config_from(&[("IDEA_MATCH_TIMEOUT_SECS", "9000")]);
        assert_eq!(config.matcher.timeout(), Duration::from_secs(MAX_TIMEOUT_SECS));
    }

    #[test]
    fn test_validate_api_key() {
        assert_eq!(validate_api_key(""), Err(ConfigError::EmptyApiKey));
        assert_eq!(validate_api_key(" \t"), Err(ConfigError::EmptyApiKey));
        assert_eq!(validate_api_key(" abc ").as_deref(), Ok("abc"));
    }
}
