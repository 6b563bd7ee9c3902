//! IPN address registry client
//!
//! The registry holds the list of addresses the notification service watches
//! for one project. Every request carries the project's shared secret.

use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::config::{NotifierConfig, DEFAULT_IPN_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::{ClientError, Result};
use crate::redact::Redacted;

/// Watched addresses of one project after a registry update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressList {
    pub name: String,
    pub addresses: Vec<String>,
}

#[derive(Serialize)]
struct AddressRequest<'a> {
    address: &'a str,
    secret_key: &'a str,
}

#[derive(Serialize)]
struct ReplaceRequest<'a> {
    addresses: &'a [String],
    secret_key: &'a str,
}

#[derive(Deserialize)]
struct AddressListResponse {
    name: String,
    body: Vec<String>,
}

/// Client for the IPN registry endpoint
#[derive(Debug)]
pub struct IpnRegistry {
    client: Client,
    api_url: String,
    secret_key: Redacted<String>,
}

impl IpnRegistry {
    /// Registry at the default endpoint
    pub fn new(secret_key: impl Into<String>) -> Result<Self> {
        Self::with_api_url(DEFAULT_IPN_API_URL, secret_key)
    }

    pub fn with_api_url(api_url: &str, secret_key: impl Into<String>) -> Result<Self> {
        Self::build(
            api_url,
            secret_key.into(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        Self::build(
            &config.api_url,
            config.secret_key()?.to_string(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn build(api_url: &str, secret_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            secret_key: Redacted(secret_key),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Add `address` to the watched list
    pub async fn add_address(&self, address: &str) -> Result<AddressList> {
        info!(address = %address, "Registering address");
        let body = AddressRequest {
            address,
            secret_key: self.secret_key.expose(),
        };
        self.send(Method::PUT, &body).await
    }

    /// Remove `address` from the watched list
    pub async fn delete_address(&self, address: &str) -> Result<AddressList> {
        info!(address = %address, "Removing address");
        let body = AddressRequest {
            address,
            secret_key: self.secret_key.expose(),
        };
        self.send(Method::DELETE, &body).await
    }

    /// Replace the whole watched list with `addresses`
    pub async fn replace_addresses(&self, addresses: &[String]) -> Result<AddressList> {
        info!(count = addresses.len(), "Replacing address list");
        let body = ReplaceRequest {
            addresses,
            secret_key: self.secret_key.expose(),
        };
        self.send(Method::POST, &body).await
    }

    async fn send<B: Serialize>(&self, method: Method, body: &B) -> Result<AddressList> {
        let response = self
            .client
            .request(method, &self.api_url)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        parse_response(status, &text)
    }
}

/// Map a registry response onto the crate's error kinds
fn parse_response(status: StatusCode, body: &str) -> Result<AddressList> {
    if status.is_success() {
        let list: AddressListResponse = serde_json::from_str(body).map_err(|e| {
            ClientError::Connection(format!("Unexpected registry response: {}", e))
        })?;
        return Ok(AddressList {
            name: list.name,
            addresses: list.body,
        });
    }

    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
            let message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| body.to_string());
            Err(ClientError::BadRequest(message))
        }
        StatusCode::UNPROCESSABLE_ENTITY => Err(validation_error(body)),
        other => Err(ClientError::Connection(
            other
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        )),
    }
}

/// `{"detail": [{"loc": ["body", "<field>"], "msg": "..."}]}`
fn validation_error(body: &str) -> ClientError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.get(0)).cloned());

    let field = detail
        .as_ref()
        .and_then(|d| d.get("loc"))
        .and_then(|loc| loc.get(1))
        .map(|f| f.as_str().map(str::to_string).unwrap_or_else(|| f.to_string()))
        .unwrap_or_else(|| "unknown".to_string());

    let message = detail
        .as_ref()
        .and_then(|d| d.get("msg"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());

    ClientError::Validation { field, message }
}
