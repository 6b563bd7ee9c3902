//! TronGrid HTTP connection
//!
//! Every call is a POST to a `/wallet/*` endpoint of one full node. As on
//! the EVM side, construction probes the node and nothing is cached or
//! retried afterwards.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::{TronConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::{ClientError, Result};
use crate::normalize::{normalize, TRON_NATIVE_DECIMALS};
use crate::redact::Redacted;
use crate::tron::address::TronAddress;
use crate::tron::api::{
    check_node_error, decode_message, AccountRequest, AccountResponse, BlockResponse,
    BroadcastResponse, TransferRequest, TriggerRequest, TriggerResponse, TronTransaction,
};

/// Header TronGrid reads the API key from
pub const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";

/// A health-checked connection to one Tron HTTP endpoint
pub struct TronConnection {
    client: Client,
    api_url: String,
    api_key: Option<Redacted<String>>,
}

impl TronConnection {
    /// Connect to `api_url` without an API key
    pub async fn connect(api_url: &str) -> Result<Self> {
        Self::open(
            api_url,
            None,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
        .await
    }

    /// Connect using the endpoint, API key and timeout in `config`
    pub async fn from_config(config: &TronConfig) -> Result<Self> {
        Self::open(
            &config.api_url,
            config.api_key.clone(),
            config.request_timeout(),
        )
        .await
    }

    async fn open(api_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Url::parse(api_url)
            .map_err(|e| ClientError::Connection(format!("Invalid API URL {}: {}", api_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        let connection = Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(Redacted),
        };

        let block = connection
            .latest_block()
            .await
            .map_err(|e| ClientError::Connection(format!("Error connecting to {}: {}", api_url, e)))?;

        info!(
            api_url = %connection.api_url,
            block = block,
            api_key = connection.api_key.is_some(),
            "Connected to Tron node"
        );

        Ok(connection)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Re-run the liveness probe
    pub async fn is_connected(&self) -> bool {
        self.latest_block().await.is_ok()
    }

    /// Number of the node's current block
    pub async fn latest_block(&self) -> Result<u64> {
        let block: BlockResponse = self.post("getnowblock", &serde_json::json!({})).await?;
        debug!(block_id = %block.block_id, number = block.block_header.raw_data.number, "Fetched latest block");
        Ok(block.block_header.raw_data.number)
    }

    /// Account balance in SUN
    pub async fn account_balance_sun(&self, address: &TronAddress) -> Result<u64> {
        let account: AccountResponse = self
            .post(
                "getaccount",
                &AccountRequest {
                    address,
                    visible: true,
                },
            )
            .await?;

        if account.address.is_none() {
            return Err(ClientError::AccountNotFound(address.to_string()));
        }
        Ok(account.balance)
    }

    /// Account balance in TRX
    pub async fn account_balance(&self, address: &TronAddress) -> Result<BigDecimal> {
        let sun = self.account_balance_sun(address).await?;
        Ok(normalize(U256::from(sun), TRON_NATIVE_DECIMALS))
    }

    /// Have the node build an unsigned TRX transfer of `amount` SUN
    pub async fn create_transfer(
        &self,
        from: &TronAddress,
        to: &TronAddress,
        amount: u64,
    ) -> Result<TronTransaction> {
        self.post(
            "createtransaction",
            &TransferRequest {
                owner_address: from,
                to_address: to,
                amount,
                visible: true,
            },
        )
        .await
    }

    /// Have the node build an unsigned contract invocation
    pub async fn trigger_contract(
        &self,
        owner: &TronAddress,
        contract: &TronAddress,
        function_selector: &str,
        parameter: &str,
        fee_limit: u64,
    ) -> Result<TronTransaction> {
        let response: TriggerResponse = self
            .post(
                "triggersmartcontract",
                &TriggerRequest {
                    owner_address: owner,
                    contract_address: contract,
                    function_selector,
                    parameter,
                    fee_limit: Some(fee_limit),
                    call_value: 0,
                    visible: true,
                },
            )
            .await?;

        response.result.check(function_selector)?;
        response.transaction.ok_or_else(|| {
            ClientError::Contract(format!("{} returned no transaction", function_selector))
        })
    }

    /// Read-only contract call; returns the ABI-encoded output
    pub async fn call_constant(
        &self,
        owner: &TronAddress,
        contract: &TronAddress,
        function_selector: &str,
        parameter: &str,
    ) -> Result<Vec<u8>> {
        let response: TriggerResponse = self
            .post(
                "triggerconstantcontract",
                &TriggerRequest {
                    owner_address: owner,
                    contract_address: contract,
                    function_selector,
                    parameter,
                    fee_limit: None,
                    call_value: 0,
                    visible: true,
                },
            )
            .await?;

        response.result.check(function_selector)?;

        let output = response.constant_result.first().ok_or_else(|| {
            ClientError::Contract(format!(
                "{} on {} returned no result",
                function_selector, contract
            ))
        })?;

        hex::decode(output).map_err(|e| {
            ClientError::Contract(format!("{} returned invalid hex: {}", function_selector, e))
        })
    }

    /// Submit a signed transaction; returns the node-assigned txid
    pub async fn broadcast(&self, transaction: &TronTransaction) -> Result<String> {
        let response: BroadcastResponse = self.post("broadcasttransaction", transaction).await?;

        if !response.result {
            return Err(ClientError::Connection(format!(
                "broadcast of {} rejected: {} {}",
                transaction.tx_id,
                response.code.as_deref().unwrap_or("UNKNOWN"),
                response.message.as_deref().map(decode_message).unwrap_or_default()
            )));
        }

        Ok(response.txid.unwrap_or_else(|| transaction.tx_id.clone()))
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/wallet/{}", self.api_url, endpoint);

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.expose().as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Connection(format!(
                "{} failed: {} - {}",
                endpoint, status, body
            )));
        }

        let data: Value = response.json().await?;
        check_node_error(&data, endpoint)?;

        serde_json::from_value(data).map_err(|e| {
            ClientError::Connection(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }
}
