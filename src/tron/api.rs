//! TronGrid HTTP API types
//!
//! Request and response bodies for the `/wallet/*` endpoints. All requests
//! are sent with `visible: true`, so addresses travel in base58 form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::tron::address::TronAddress;

/// A node-built transaction, signed or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TronTransaction {
    #[serde(rename = "txID")]
    pub tx_id: String,
    /// Contract body exactly as the node returned it; it is sent back verbatim
    pub raw_data: Value,
    pub raw_data_hex: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signature: Vec<String>,
}

// =========================================================================
// Requests
// =========================================================================

#[derive(Debug, Serialize)]
pub struct AccountRequest<'a> {
    pub address: &'a TronAddress,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
pub struct TransferRequest<'a> {
    pub owner_address: &'a TronAddress,
    pub to_address: &'a TronAddress,
    /// SUN
    pub amount: u64,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
pub struct TriggerRequest<'a> {
    pub owner_address: &'a TronAddress,
    pub contract_address: &'a TronAddress,
    pub function_selector: &'a str,
    /// Hex ABI-encoded arguments, selector excluded
    pub parameter: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_limit: Option<u64>,
    pub call_value: u64,
    pub visible: bool,
}

// =========================================================================
// Responses
// =========================================================================

/// `/wallet/getnowblock`
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    #[serde(rename = "blockID")]
    pub block_id: String,
    pub block_header: BlockHeader,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    pub raw_data: BlockRawData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockRawData {
    /// Absent on the genesis block
    #[serde(default)]
    pub number: u64,
}

/// `/wallet/getaccount`. An unknown account comes back as `{}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountResponse {
    pub address: Option<String>,
    /// SUN; omitted by the node when zero
    #[serde(default)]
    pub balance: u64,
}

/// Status block of contract trigger responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnStatus {
    #[serde(default)]
    pub result: bool,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ReturnStatus {
    /// Map a rejected status to a contract error
    pub fn check(&self, context: &str) -> Result<()> {
        if self.result {
            return Ok(());
        }
        Err(ClientError::Contract(format!(
            "{} rejected: {} {}",
            context,
            self.code.as_deref().unwrap_or("UNKNOWN"),
            self.message.as_deref().map(decode_message).unwrap_or_default()
        )))
    }
}

/// `/wallet/triggersmartcontract` and `/wallet/triggerconstantcontract`
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub result: ReturnStatus,
    pub transaction: Option<TronTransaction>,
    #[serde(default)]
    pub constant_result: Vec<String>,
}

/// `/wallet/broadcasttransaction`
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastResponse {
    #[serde(default)]
    pub result: bool,
    pub txid: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Node error messages are usually hex-encoded UTF-8; fall back to the
/// original text when they are not.
pub fn decode_message(message: &str) -> String {
    hex::decode(message)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| message.to_string())
}

/// Reject the `{"Error": "..."}` envelope some endpoints use instead of a
/// non-2xx status.
///
/// Transaction builds and contract calls are rejected by the node's
/// contract validation; any other endpoint failing is a failed remote read
/// or broadcast.
pub fn check_node_error(body: &Value, endpoint: &str) -> Result<()> {
    let error = match body.get("Error") {
        Some(error) => error,
        None => return Ok(()),
    };

    let message = format!(
        "{} failed: {}",
        endpoint,
        error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string())
    );

    match endpoint {
        "createtransaction" | "triggersmartcontract" | "triggerconstantcontract" => {
            Err(ClientError::Contract(message))
        }
        _ => Err(ClientError::Connection(message)),
    }
}
