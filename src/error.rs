//! Client error type
//!
//! One error enum is shared by both chain families and the IPN registry so
//! that callers can match on the failure kind without caring which backend
//! produced it. Nothing in the crate retries; every variant reaches the caller.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors returned by the chain clients and the IPN registry
#[derive(Debug, Error)]
pub enum ClientError {
    /// Remote endpoint unreachable, probe failed, or a remote read/broadcast failed
    #[error("connection error: {0}")]
    Connection(String),

    /// Field-scoped rejection of a request payload
    #[error("In field {field} error: {message}")]
    Validation { field: String, message: String },

    /// Request rejected by the server
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Address could not be parsed or normalized for its chain family
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Private key could not be decoded into a signing key
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Local signing failed
    #[error("signing error: {0}")]
    Signing(String),

    /// Contract call reverted, was rejected, or returned undecodable data
    #[error("contract error: {0}")]
    Contract(String),

    /// Amount cannot be represented in the chain's base unit
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Account does not exist on chain
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Configuration value missing or malformed
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Shorthand for wrapping transport failures
    pub fn connection(err: impl std::fmt::Display) -> Self {
        ClientError::Connection(err.to_string())
    }

    /// True for failures that happened on the wire rather than locally
    pub fn is_connection(&self) -> bool {
        matches!(self, ClientError::Connection(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Connection(err.to_string())
    }
}
