//! Scanner configuration loaded from environment variables.
//!
//! Configuration is read once at startup into an immutable [`ScannerConfig`]
//! which is handed to the Shopify client and the HTTP gateway.
//!
//! # Environment Variables
//!
//! ## Shopify (missing values only produce startup warnings)
//! - `SHOPIFY_STORE_DOMAIN` - Store domain (e.g., your-store.myshopify.com).
//!   An explicit `http://` or `https://` scheme is honored.
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API access token
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - Admin API version (default: 2024-10)
//! - `SHOPIFY_RETRY_ATTEMPTS` - Total attempts per remote call (default: 3)
//! - `SHOPIFY_RETRY_DELAY_MS` - Fixed pause between attempts (default: 800)
//! - `SHOPIFY_TIMEOUT_SECS` - HTTP client timeout (default: 30)
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3100)
//! - `TAG_NAME` - Tag applied to stocked products (default: STOCKED)
//! - `PUBLIC_DIR` - Static asset directory for the scanning client
//!   (default: crates/server/public, relative to the workspace root)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_API_VERSION: &str = "2024-10";
const DEFAULT_TAG_NAME: &str = "STOCKED";
/// Relative to the workspace root, where the binary is launched from.
const DEFAULT_PUBLIC_DIR: &str = "crates/server/public";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Scanner proxy configuration.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Tag added to a product by the stock endpoint
    pub tag_name: String,
    /// Directory holding the scanning client's static assets
    pub public_dir: PathBuf,
    /// Shopify Admin API configuration
    pub shopify: ShopifyConfig,
    /// Emit JSON log lines instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Shopify Admin API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Store domain, optionally with scheme
    pub store_domain: Option<String>,
    /// Admin API access token
    pub access_token: Option<SecretString>,
    /// Admin API version (e.g., 2024-10)
    pub api_version: String,
    /// Total attempts per GraphQL call
    pub retry_attempts: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
    /// HTTP client timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("store_domain", &self.store_domain)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_version", &self.api_version)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay", &self.retry_delay)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ScannerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed. Missing
    /// Shopify credentials are not errors; see [`ScannerConfig::warnings`].
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or_default::<IpAddr>(&env, "HOST", "0.0.0.0")?;
        let port = parse_or_default::<u16>(&env, "PORT", "3100")?;
        let tag_name = get_non_empty(&env, "TAG_NAME").unwrap_or_else(|| DEFAULT_TAG_NAME.into());
        let public_dir = PathBuf::from(get_env_or_default(&env, "PUBLIC_DIR", DEFAULT_PUBLIC_DIR));
        let log_json = get_optional_env(&env, "LOG_FORMAT")
            .is_some_and(|v| v.eq_ignore_ascii_case("json"));

        let shopify = ShopifyConfig::from_lookup(&env)?;

        let sentry_dsn = get_non_empty(&env, "SENTRY_DSN");
        let sentry_environment = get_non_empty(&env, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env(&env, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env(&env, "SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            tag_name,
            public_dir,
            shopify,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Non-fatal configuration problems to report at startup.
    ///
    /// Requests that reach Shopify will fail while any of these remain.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        match &self.shopify.store_domain {
            None => warnings.push("Missing SHOPIFY_STORE_DOMAIN".to_string()),
            Some(domain) if self.shopify.graphql_endpoint().is_none() => {
                warnings.push(format!("SHOPIFY_STORE_DOMAIN is not a valid host: {domain}"));
            }
            Some(_) => {}
        }

        match &self.shopify.access_token {
            None => warnings.push("Missing SHOPIFY_ADMIN_TOKEN".to_string()),
            Some(token) => {
                if let Err(reason) = check_secret_strength(token.expose_secret()) {
                    warnings.push(format!("SHOPIFY_ADMIN_TOKEN {reason}"));
                }
            }
        }

        warnings
    }
}

impl ShopifyConfig {
    fn from_lookup(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let retry_attempts = parse_or_default::<u32>(env, "SHOPIFY_RETRY_ATTEMPTS", "3")?;
        if retry_attempts == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPIFY_RETRY_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let retry_delay_ms = parse_or_default::<u64>(env, "SHOPIFY_RETRY_DELAY_MS", "800")?;
        let timeout_secs = parse_or_default::<u64>(env, "SHOPIFY_TIMEOUT_SECS", "30")?;

        Ok(Self {
            store_domain: get_non_empty(env, "SHOPIFY_STORE_DOMAIN"),
            access_token: get_non_empty(env, "SHOPIFY_ADMIN_TOKEN").map(SecretString::from),
            api_version: get_non_empty(env, "SHOPIFY_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            retry_attempts,
            retry_delay: Duration::from_millis(retry_delay_ms),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The Admin GraphQL endpoint, e.g.
    /// `https://store.myshopify.com/admin/api/2024-10/graphql.json`.
    ///
    /// Returns `None` when no store domain is configured or it does not
    /// form a valid URL.
    #[must_use]
    pub fn graphql_endpoint(&self) -> Option<Url> {
        let domain = self.store_domain.as_deref()?.trim().trim_end_matches('/');
        let base = if domain.contains("://") {
            format!("{domain}/")
        } else {
            format!("https://{domain}/")
        };

        let base = Url::parse(&base).ok()?;
        base.host_str()?;
        base.join(&format!("admin/api/{}/graphql.json", self.api_version))
            .ok()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key)
}

/// Get an optional environment variable, treating blank values as unset.
fn get_non_empty(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_non_empty(env, key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_or_default<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(env, key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
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
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check that a secret is not a placeholder and has sufficient entropy.
fn check_secret_strength(secret: &str) -> Result<(), String> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(format!("appears to be a placeholder (contains '{pattern}')"));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(format!(
            "has low entropy ({entropy:.2} bits/char, expected >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
        ));
    }

    Ok(())
}
