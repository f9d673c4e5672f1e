//! Record store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RECORD_STORE_ENDPOINT` - Base URL of the record store service
//! - `RECORD_STORE_API_KEY` - API key for the record store (validated for
//!   placeholder patterns and entropy)
//!
//! ## Optional
//! - `RECORD_STORE_API_VERSION` - API version path segment (default: v1)
//! - `RECORD_STORE_EMPTY_SEARCH` - Policy for empty product searches:
//!   `forward`, `match-all`, or `match-none` (default: forward)

use std::collections::HashMap;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Policy applied when a product search is issued with empty text.
///
/// The store's own semantics for an empty `Contains` filter are undefined,
/// so the behavior is an explicit deployment choice rather than an
/// assumption baked into the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySearchPolicy {
    /// Issue the query as-is and let the store decide.
    #[default]
    Forward,
    /// Treat an empty search as a request for the full catalog.
    MatchAll,
    /// Return no results without a round trip to the store.
    MatchNone,
}

impl FromStr for EmptySearchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "match-all" => Ok(Self::MatchAll),
            "match-none" => Ok(Self::MatchNone),
            _ => Err(format!("invalid empty-search policy: {s}")),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the record store service
    pub endpoint: Url,
    /// API version path segment (e.g. v1)
    pub api_version: String,
    /// API key sent with every request
    pub api_key: SecretString,
    /// Policy for empty product searches
    pub empty_search: EmptySearchPolicy,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let endpoint = get_required_env("RECORD_STORE_ENDPOINT")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("RECORD_STORE_ENDPOINT".to_string(), e.to_string())
            })?;
        let api_version = get_env_or_default("RECORD_STORE_API_VERSION", "v1");
        let api_key = get_validated_secret("RECORD_STORE_API_KEY")?;
        let empty_search = match get_optional_env("RECORD_STORE_EMPTY_SEARCH") {
            Some(value) => value.parse().map_err(|e: String| {
                ConfigError::InvalidEnvVar("RECORD_STORE_EMPTY_SEARCH".to_string(), e)
            })?,
            None => EmptySearchPolicy::default(),
        };

        Ok(Self {
            endpoint,
            api_version,
            api_key,
            empty_search,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the record store."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
