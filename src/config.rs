use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as number: {source}")]
    ParseFloat {
        name: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Input / output documents
    pub posts_path: PathBuf,
    pub articles_path: PathBuf,

    // Generation service
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub generation_max_tokens: u32,
    pub generation_temperature: f32,
    pub generation_timeout: Duration,

    // Pipeline
    pub default_num_posts: usize,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Input / output documents
            posts_path: PathBuf::from(env_or_default("POSTS_PATH", "./data/posts.json")),
            articles_path: PathBuf::from(env_or_default("ARTICLES_PATH", "./data/articles.json")),

            // Generation service
            openai_api_key: required_env("OPENAI_API_KEY")?,
            openai_base_url: env_or_default("OPENAI_BASE_URL", "https://api.openai.com"),
            openai_model: env_or_default("OPENAI_MODEL", "gpt-4o-mini"),
            generation_max_tokens: parse_env_u32("GENERATION_MAX_TOKENS", 2000)?,
            generation_temperature: parse_env_f32("GENERATION_TEMPERATURE", 0.7)?,
            generation_timeout: Duration::from_secs(parse_env_u64(
                "GENERATION_TIMEOUT_SECS",
                120,
            )?),

            // Pipeline
            default_num_posts: parse_env_usize("DEFAULT_NUM_POSTS", 3)?,

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai_api_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "OPENAI_API_KEY".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.default_num_posts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_NUM_POSTS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.generation_max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                name: "GENERATION_MAX_TOKENS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.generation_temperature) {
            return Err(ConfigError::InvalidValue {
                name: "GENERATION_TEMPERATURE".to_string(),
                message: format!(
                    "must be between 0.0 and 2.0, got {}",
                    self.generation_temperature
                ),
            });
        }
        Ok(())
    }

    /// A configuration suitable for tests: no environment access, dummy key.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            posts_path: PathBuf::from("./data/posts.json"),
            articles_path: PathBuf::from("./data/articles.json"),
            openai_api_key: "test-key".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            generation_max_tokens: 2000,
            generation_temperature: 0.7,
            generation_timeout: Duration::from_secs(5),
            default_num_posts: 3,
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
        }
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_f32(name: &str, default: f32) -> Result<f32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseFloat {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_testing_validates() {
        Config::for_testing().validate().unwrap();
    }

    #[test]
    fn test_parse_u64_default() {
        assert_eq!(parse_env_u64("NONEXISTENT_VAR", 42).unwrap(), 42);
    }

    #[test]
    fn test_parse_f32_default() {
        assert!((parse_env_f32("NONEXISTENT_VAR", 0.7).unwrap() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_temperature_bounds() {
        let mut config = Config::for_testing();
        config.generation_temperature = 2.5;
        assert!(config.validate().is_err());
        config.generation_temperature = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = Config::for_testing();
        config.openai_api_key = String::new();
        assert!(config.validate().is_err());
    }
}
