//! Well-known public RPC endpoints
//!
//! Purely a convenience: every client accepts any compatible URL string.

use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Named public endpoints per chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcUrl {
    Ultron,
    Harmony,
    Gnosis,
    Fantom,
    Polygon,
    Matic,
    Ethereum,
    Binance,
    Tron,
}

impl RpcUrl {
    pub const ALL: [RpcUrl; 9] = [
        RpcUrl::Ultron,
        RpcUrl::Harmony,
        RpcUrl::Gnosis,
        RpcUrl::Fantom,
        RpcUrl::Polygon,
        RpcUrl::Matic,
        RpcUrl::Ethereum,
        RpcUrl::Binance,
        RpcUrl::Tron,
    ];

    pub fn url(&self) -> &'static str {
        match self {
            RpcUrl::Ultron => "https://ultron-rpc.net",
            RpcUrl::Harmony => "https://harmony.api.onfinality.io/public",
            RpcUrl::Gnosis => "https://gnosis.blockpi.network/v1/rpc/public",
            RpcUrl::Fantom => "https://fantom.publicnode.com",
            RpcUrl::Polygon => "https://avalanche-c-chain.publicnode.com",
            RpcUrl::Matic => "https://poly-rpc.gateway.pokt.network",
            RpcUrl::Ethereum => "https://rpc.mevblocker.io",
            RpcUrl::Binance => "https://bsc-dataseed.binance.org/",
            RpcUrl::Tron => "https://api.trongrid.io/",
        }
    }

    /// True for endpoints that speak EVM JSON-RPC
    pub fn is_evm(&self) -> bool {
        !matches!(self, RpcUrl::Tron)
    }

    fn name(&self) -> &'static str {
        match self {
            RpcUrl::Ultron => "ultron",
            RpcUrl::Harmony => "harmony",
            RpcUrl::Gnosis => "gnosis",
            RpcUrl::Fantom => "fantom",
            RpcUrl::Polygon => "polygon",
            RpcUrl::Matic => "matic",
            RpcUrl::Ethereum => "ethereum",
            RpcUrl::Binance => "binance",
            RpcUrl::Tron => "tron",
        }
    }
}

impl fmt::Display for RpcUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

impl AsRef<str> for RpcUrl {
    fn as_ref(&self) -> &str {
        self.url()
    }
}

impl FromStr for RpcUrl {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RpcUrl::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == wanted)
            .ok_or_else(|| ClientError::Config(format!("unknown endpoint name: {}", s)))
    }
}

/// Resolve a CLI/config value that is either an endpoint name or a URL
pub fn resolve(name_or_url: &str) -> String {
    name_or_url
        .parse::<RpcUrl>()
        .map(|endpoint| endpoint.url().to_string())
        .unwrap_or_else(|_| name_or_url.to_string())
}

/// Like [`resolve`], but refuses named endpoints that do not speak EVM JSON-RPC
pub fn resolve_evm(name_or_url: &str) -> Result<String, ClientError> {
    match name_or_url.parse::<RpcUrl>() {
        Ok(endpoint) if !endpoint.is_evm() => Err(ClientError::Config(format!(
            "{} is not an EVM endpoint",
            name_or_url
        ))),
        Ok(endpoint) => Ok(endpoint.url().to_string()),
        Err(_) => Ok(name_or_url.to_string()),
    }
}
