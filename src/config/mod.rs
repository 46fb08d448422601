//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then environment variables
//! (a `.env` file is honored) override individual fields.

use crate::core::Currency;
use crate::core::error::{CheckoutResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const ENV_HOST: &str = "CHECKOUT_HOST";
pub const ENV_PORT: &str = "CHECKOUT_PORT";
pub const ENV_BASE_URL: &str = "CHECKOUT_BASE_URL";
pub const ENV_API_BASE: &str = "STRIPE_API_BASE";
pub const ENV_PUBLIC_KEY_USD: &str = "STRIPE_PUBLIC_KEY_USD";
pub const ENV_SECRET_KEY_USD: &str = "STRIPE_SECRET_KEY_USD";
pub const ENV_PUBLIC_KEY_EUR: &str = "STRIPE_PUBLIC_KEY_EUR";
pub const ENV_SECRET_KEY_EUR: &str = "STRIPE_SECRET_KEY_EUR";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Public/secret key pair of one merchant account
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyPair {
    #[serde(default)]
    pub public_key: String,

    #[serde(default)]
    pub secret_key: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("secret_key", &if self.secret_key.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// One merchant account per supported currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyKeys {
    #[serde(default)]
    pub usd: KeyPair,

    #[serde(default)]
    pub eur: KeyPair,
}

impl CurrencyKeys {
    pub fn for_currency(&self, currency: Currency) -> &KeyPair {
        match currency {
            Currency::Usd => &self.usd,
            Currency::Eur => &self.eur,
        }
    }
}

/// Payment gateway settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default)]
    pub keys: CurrencyKeys,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            keys: CurrencyKeys::default(),
        }
    }
}

/// Complete configuration of the checkout server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Public URL of this service, used for checkout redirect URLs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            base_url: default_base_url(),
            gateway: GatewayConfig::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_api_base() -> String {
    "https://api.stripe.com/v1".to_string()
}

impl CheckoutConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> CheckoutResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> CheckoutResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the file if given (defaults otherwise), then apply the
    /// process environment
    pub fn load(path: Option<&str>) -> CheckoutResult<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = %env_file.display(), "Loaded .env file");
        }

        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from an environment lookup; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F) -> CheckoutResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_PORT.to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(api_base) = get(ENV_API_BASE) {
            self.gateway.api_base = api_base;
        }

        let keys = &mut self.gateway.keys;
        for (key, slot) in [
            (ENV_PUBLIC_KEY_USD, &mut keys.usd.public_key),
            (ENV_SECRET_KEY_USD, &mut keys.usd.secret_key),
            (ENV_PUBLIC_KEY_EUR, &mut keys.eur.public_key),
            (ENV_SECRET_KEY_EUR, &mut keys.eur.secret_key),
        ] {
            if let Some(value) = get(key) {
                *slot = value;
            }
        }

        Ok(())
    }

    /// Key pair of the merchant account for `currency`
    pub fn keys_for(&self, currency: Currency) -> &KeyPair {
        self.gateway.keys.for_currency(currency)
    }

    /// Absolute URL for a path served by this service
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
