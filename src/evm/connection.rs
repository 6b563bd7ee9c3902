//! EVM JSON-RPC connection
//!
//! Thin wrapper around an alloy HTTP provider. Construction probes the node
//! and every accessor is a live read: nothing is cached, nothing is retried.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
    transports::{
        http::{Client, Http},
        RpcError, TransportError,
    },
};
use tracing::{debug, info};
use url::Url;

use crate::error::{ClientError, Result};

/// A health-checked connection to one EVM RPC endpoint
pub struct EvmConnection {
    /// The alloy provider
    provider: RootProvider<Http<Client>>,
    /// Endpoint URL, fixed for the lifetime of the connection
    endpoint: String,
}

impl EvmConnection {
    /// Connect to `rpc_url` and verify the node answers `eth_chainId`.
    ///
    /// Fails with [`ClientError::Connection`] if the URL is malformed or the
    /// probe fails; no connection object is returned in that case.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let url = Url::parse(rpc_url)
            .map_err(|e| ClientError::Connection(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;
        let provider = ProviderBuilder::new().on_http(url);

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| ClientError::Connection(format!("Error connecting to {}: {}", rpc_url, e)))?;

        info!(rpc_url = %rpc_url, chain_id = chain_id, "Connected to EVM node");

        Ok(Self {
            provider,
            endpoint: rpc_url.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Re-run the liveness probe
    pub async fn is_connected(&self) -> bool {
        self.provider.get_chain_id().await.is_ok()
    }

    /// Chain ID reported by the node
    pub async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(ClientError::connection)
    }

    /// Current gas price quote in wei
    pub async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(ClientError::connection)
    }

    /// Transaction count including pending transactions
    pub async fn pending_nonce(&self, address: Address) -> Result<u64> {
        let nonce = self
            .provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(ClientError::connection)?;
        debug!(address = %address, nonce = nonce, "Fetched pending nonce");
        Ok(nonce)
    }

    /// Native balance in wei
    pub async fn balance(&self, address: Address) -> Result<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(ClientError::connection)
    }

    /// Read-only `eth_call` against `to`
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        self.provider
            .call(&tx)
            .await
            .map_err(|e| call_error(to, e))
    }

    /// Submit an EIP-2718 encoded signed transaction
    pub async fn send_raw_transaction(&self, encoded: &[u8]) -> Result<TxHash> {
        let pending = self
            .provider
            .send_raw_transaction(encoded)
            .await
            .map_err(ClientError::connection)?;
        Ok(*pending.tx_hash())
    }
}

/// A node-side error response means the call itself failed; anything else
/// never reached the contract.
fn call_error(to: Address, err: TransportError) -> ClientError {
    match err {
        RpcError::ErrorResp(payload) => {
            ClientError::Contract(format!("eth_call to {} failed: {}", to, payload))
        }
        other => ClientError::connection(other),
    }
}
