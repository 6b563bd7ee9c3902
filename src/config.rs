//! Client configuration
//!
//! Values come from `serde` (for embedding in a host application's config
//! file) or from the environment (`.env` supported), following the same
//! defaults in both paths.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::redact::Redacted;

/// Default TronGrid endpoint (Shasta testnet)
pub const DEFAULT_TRON_API_URL: &str = "https://api.shasta.trongrid.io";

/// IPN address registry endpoint
pub const DEFAULT_IPN_API_URL: &str = "http://94.198.218.9:8100/upd_addr";

/// Gas for a plain value transfer
pub const DEFAULT_EVM_NATIVE_GAS_LIMIT: u64 = 21_000;

/// Gas for an ERC-20 `transfer`; fixed rather than estimated
pub const DEFAULT_EVM_TOKEN_GAS_LIMIT: u64 = 1_000_000;

/// Fee ceiling for a TRX transfer, in SUN
pub const DEFAULT_TRON_NATIVE_FEE_LIMIT: u64 = 10_000_000;

/// Fee ceiling for a TRC-20 `transfer`, in SUN
pub const DEFAULT_TRON_TOKEN_FEE_LIMIT: u64 = 30_000_000;

/// Default HTTP timeout for TronGrid and the IPN registry
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fixed fee limits per transfer kind.
///
/// Gas units on EVM chains, SUN on Tron. These are deliberately constants
/// and not estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeeLimits {
    pub native: u64,
    pub token: u64,
}

impl FeeLimits {
    pub const EVM: FeeLimits = FeeLimits {
        native: DEFAULT_EVM_NATIVE_GAS_LIMIT,
        token: DEFAULT_EVM_TOKEN_GAS_LIMIT,
    };

    pub const TRON: FeeLimits = FeeLimits {
        native: DEFAULT_TRON_NATIVE_FEE_LIMIT,
        token: DEFAULT_TRON_TOKEN_FEE_LIMIT,
    };
}

fn default_evm_fee_limits() -> FeeLimits {
    FeeLimits::EVM
}

fn default_tron_fee_limits() -> FeeLimits {
    FeeLimits::TRON
}

fn default_tron_api_url() -> String {
    DEFAULT_TRON_API_URL.to_string()
}

fn default_ipn_api_url() -> String {
    DEFAULT_IPN_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub evm: EvmConfig,
    #[serde(default)]
    pub tron: TronConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// EVM configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EvmConfig {
    /// JSON-RPC URL; `None` until set
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default = "default_evm_fee_limits")]
    pub gas_limits: FeeLimits,
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            gas_limits: FeeLimits::EVM,
        }
    }
}

impl EvmConfig {
    pub fn rpc_url(&self) -> Result<&str> {
        self.rpc_url
            .as_deref()
            .ok_or_else(|| ClientError::Config("EVM_RPC_URL is not set".to_string()))
    }
}

/// Tron configuration
#[derive(Clone, Deserialize)]
pub struct TronConfig {
    #[serde(default = "default_tron_api_url")]
    pub api_url: String,
    /// TronGrid API key, sent as `TRON-PRO-API-KEY`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_tron_fee_limits")]
    pub fee_limits: FeeLimits,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for TronConfig {
    fn default() -> Self {
        Self {
            api_url: default_tron_api_url(),
            api_key: None,
            fee_limits: FeeLimits::TRON,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl TronConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Custom Debug that redacts the API key.
impl fmt::Debug for TronConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TronConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(Redacted))
            .field("fee_limits", &self.fee_limits)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// IPN registry configuration
#[derive(Clone, Deserialize)]
pub struct NotifierConfig {
    #[serde(default = "default_ipn_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_url: default_ipn_api_url(),
            secret_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl NotifierConfig {
    pub fn secret_key(&self) -> Result<&str> {
        self.secret_key
            .as_deref()
            .ok_or_else(|| ClientError::Config("IPN_SECRET_KEY is not set".to_string()))
    }
}

/// Custom Debug that redacts the shared secret.
impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("api_url", &self.api_url)
            .field("secret_key", &self.secret_key.as_ref().map(Redacted))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded .env from {:?}", path);
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str, default: u64| -> Result<u64> {
            match lookup(key) {
                Some(value) => parse_value(key, &value),
                None => Ok(default),
            }
        };

        let evm = EvmConfig {
            rpc_url: lookup("EVM_RPC_URL"),
            gas_limits: FeeLimits {
                native: parse("EVM_NATIVE_GAS_LIMIT", DEFAULT_EVM_NATIVE_GAS_LIMIT)?,
                token: parse("EVM_TOKEN_GAS_LIMIT", DEFAULT_EVM_TOKEN_GAS_LIMIT)?,
            },
        };

        let tron = TronConfig {
            api_url: lookup("TRON_API_URL").unwrap_or_else(default_tron_api_url),
            api_key: lookup("TRON_API_KEY"),
            fee_limits: FeeLimits {
                native: parse("TRON_NATIVE_FEE_LIMIT", DEFAULT_TRON_NATIVE_FEE_LIMIT)?,
                token: parse("TRON_TOKEN_FEE_LIMIT", DEFAULT_TRON_TOKEN_FEE_LIMIT)?,
            },
            request_timeout_secs: parse("TRON_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        };

        let notifier = NotifierConfig {
            api_url: lookup("IPN_API_URL").unwrap_or_else(default_ipn_api_url),
            secret_key: lookup("IPN_SECRET_KEY"),
            request_timeout_secs: parse("IPN_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        };

        Ok(Self {
            evm,
            tron,
            notifier,
        })
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .replace('_', "")
        .parse()
        .map_err(|e| ClientError::Config(format!("{} has invalid value {:?}: {}", key, value, e)))
}
