use crate::models::DEFAULT_IMAGE_MODEL;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_STYLIZE_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub default_model: String,
    pub stylize_model: String,
    pub predict_timeout: Duration,
    pub content_timeout: Duration,
    pub test_generate_timeout: Duration,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        GoogleConfig {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            default_model: DEFAULT_IMAGE_MODEL.to_string(),
            stylize_model: DEFAULT_STYLIZE_MODEL.to_string(),
            predict_timeout: Duration::from_secs(90),
            content_timeout: Duration::from_secs(120),
            test_generate_timeout: Duration::from_secs(30),
        }
    }
}

impl GoogleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let api_base = env::var("GOOGLE_API_BASE").unwrap_or(defaults.api_base);
        let default_model = env::var("DEFAULT_IMAGE_MODEL").unwrap_or(defaults.default_model);
        let stylize_model = env::var("STYLIZE_MODEL").unwrap_or(defaults.stylize_model);

        GoogleConfig {
            api_key,
            api_base,
            default_model,
            stylize_model,
            predict_timeout: secs_from_env("PREDICT_TIMEOUT_SECS").unwrap_or(defaults.predict_timeout),
            content_timeout: secs_from_env("CONTENT_TIMEOUT_SECS").unwrap_or(defaults.content_timeout),
            test_generate_timeout: secs_from_env("TEST_GENERATE_TIMEOUT_SECS").unwrap_or(defaults.test_generate_timeout),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_stylize_model(mut self, model: impl Into<String>) -> Self {
        self.stylize_model = model.into();
        self
    }

    pub fn with_timeouts(mut self, predict: Duration, content: Duration, test_generate: Duration) -> Self {
        self.predict_timeout = predict;
        self.content_timeout = content;
        self.test_generate_timeout = test_generate;
        self
    }

    /// `abcd...wxyz` style preview, never the full key.
    pub fn masked_key(&self) -> String {
        match &self.api_key {
            None => "not set".to_string(),
            Some(key) => mask_api_key(key, 4),
        }
    }
}

pub fn mask_api_key(key: &str, show_chars: usize) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= show_chars * 2 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..show_chars].iter().collect();
    let tail: String = chars[chars.len() - show_chars..].iter().collect();
    format!("{}...{}", head, tail)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub google: GoogleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_upload_bytes: 20 * 1024 * 1024,
            allowed_origins: Vec::new(),
            environment: "development".to_string(),
            google: GoogleConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults.port);
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_upload_bytes);
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();
        let environment = env::var("DEPLOY_ENV").unwrap_or(defaults.environment);

        Config {
            host,
            port,
            max_upload_bytes,
            allowed_origins,
            environment,
            google: GoogleConfig::from_env(),
        }
    }

    pub fn with_google(mut self, config: GoogleConfig) -> Self {
        self.google = config;
        self
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn secs_from_env(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.google.api_base, DEFAULT_API_BASE);
        assert_eq!(config.google.predict_timeout, Duration::from_secs(90));
        assert_eq!(config.google.content_timeout, Duration::from_secs(120));
        assert_eq!(config.google.test_generate_timeout, Duration::from_secs(30));
        assert!(config.google.api_key.is_none());
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("AIzaSyExampleKey1234", 4), "AIza...1234");
        assert_eq!(mask_api_key("short", 4), "*****");
        assert_eq!(GoogleConfig::new().masked_key(), "not set");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://localhost:5173, ,https://app.example.com "),
            vec!["http://localhost:5173", "https://app.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }
}
