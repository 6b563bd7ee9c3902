//! Incoming webhook payloads
//!
//! The notification service POSTs one of these to the host application for
//! every observed transaction touching a registered address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// What kind of event triggered the webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "NT")]
    Native,
    #[serde(rename = "AP")]
    Approval,
    #[serde(rename = "TR")]
    Transfer,
    #[serde(rename = "DP")]
    Deposit,
    #[serde(rename = "WD")]
    Withdrawal,
    #[serde(rename = "CU")]
    Custom,
}

impl WebhookEventType {
    pub const ALL: [WebhookEventType; 6] = [
        WebhookEventType::Native,
        WebhookEventType::Approval,
        WebhookEventType::Transfer,
        WebhookEventType::Deposit,
        WebhookEventType::Withdrawal,
        WebhookEventType::Custom,
    ];

    /// Two-letter wire code
    pub fn code(&self) -> &'static str {
        match self {
            WebhookEventType::Native => "NT",
            WebhookEventType::Approval => "AP",
            WebhookEventType::Transfer => "TR",
            WebhookEventType::Deposit => "DP",
            WebhookEventType::Withdrawal => "WD",
            WebhookEventType::Custom => "CU",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for WebhookEventType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| ClientError::Validation {
                field: "type".to_string(),
                message: format!("unknown event type {:?}", s),
            })
    }
}

/// Rule metadata attached to a webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookInfo {
    pub project: String,
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    pub rule: String,
    pub amount: i64,
    /// Unix timestamp, seconds
    pub date: f64,
    pub on_site: bool,
    pub telegram: bool,
}

/// One transfer log inside the observed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebhookLog {
    /// Token event, emitted by `address`
    Token {
        from: String,
        to: String,
        value: String,
        address: String,
        topic: String,
    },
    /// Plain native-currency movement
    Native {
        from: String,
        to: String,
        value: String,
    },
}

impl WebhookLog {
    pub fn from_address(&self) -> &str {
        match self {
            WebhookLog::Token { from, .. } | WebhookLog::Native { from, .. } => from,
        }
    }

    pub fn to_address(&self) -> &str {
        match self {
            WebhookLog::Token { to, .. } | WebhookLog::Native { to, .. } => to,
        }
    }

    /// Raw amount as sent; not scaled
    pub fn value(&self) -> &str {
        match self {
            WebhookLog::Token { value, .. } | WebhookLog::Native { value, .. } => value,
        }
    }

    /// Emitting contract for token logs
    pub fn contract_address(&self) -> Option<&str> {
        match self {
            WebhookLog::Token { address, .. } => Some(address),
            WebhookLog::Native { .. } => None,
        }
    }
}

/// Full webhook body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookData {
    pub hash: String,
    pub network: String,
    pub info: WebhookInfo,
    pub logs: Vec<WebhookLog>,
}

impl WebhookData {
    /// Parse a webhook body; malformed payloads are validation errors
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| ClientError::Validation {
            field: "payload".to_string(),
            message: e.to_string(),
        })
    }
}
