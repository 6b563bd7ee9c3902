//! EVM client
//!
//! Public entry point for one EVM chain: native and ERC-20 balances and
//! transfers. Each token operation binds the contract afresh.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use tracing::info;

use crate::config::{EvmConfig, FeeLimits};
use crate::error::Result;
use crate::evm::address::{checksummed, parse_address};
use crate::evm::builder::EvmTransactionBuilder;
use crate::evm::connection::EvmConnection;
use crate::evm::signer::{execute, EvmSigner};
use crate::evm::tokens::Erc20Binding;
use crate::normalize::{normalize, raw_value, EVM_NATIVE_DECIMALS};
use crate::token::TokenBinding;
use crate::types::TransferReceipt;

/// Client for one EVM chain
pub struct EvmClient {
    connection: EvmConnection,
    gas_limits: FeeLimits,
}

impl EvmClient {
    /// Connect with default gas limits
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        Ok(Self {
            connection: EvmConnection::connect(rpc_url).await?,
            gas_limits: FeeLimits::EVM,
        })
    }

    /// Connect using `config.rpc_url` and its gas limits
    pub async fn from_config(config: &EvmConfig) -> Result<Self> {
        Ok(Self {
            connection: EvmConnection::connect(config.rpc_url()?).await?,
            gas_limits: config.gas_limits,
        })
    }

    /// Replace the fixed gas limits
    pub fn with_gas_limits(mut self, gas_limits: FeeLimits) -> Self {
        self.gas_limits = gas_limits;
        self
    }

    pub fn connection(&self) -> &EvmConnection {
        &self.connection
    }

    pub fn gas_limits(&self) -> FeeLimits {
        self.gas_limits
    }

    pub fn builder(&self) -> EvmTransactionBuilder<'_> {
        EvmTransactionBuilder::new(&self.connection, self.gas_limits)
    }

    /// Bind an ERC-20 contract on this chain
    pub fn token(&self, contract_address: &str) -> Result<Erc20Binding<'_>> {
        Erc20Binding::new(&self.connection, contract_address)
    }

    /// Native balance in ether units, or in wei with `raw`
    pub async fn get_native_balance(&self, address: &str, raw: bool) -> Result<BigDecimal> {
        let address = parse_address(address)?;
        let balance = self.connection.balance(address).await?;

        if raw {
            Ok(raw_value(balance))
        } else {
            Ok(normalize(balance, EVM_NATIVE_DECIMALS))
        }
    }

    /// ERC-20 balance scaled by the token's decimals, or raw with `raw`
    pub async fn get_token_balance(
        &self,
        address: &str,
        contract_address: &str,
        raw: bool,
    ) -> Result<BigDecimal> {
        let owner = parse_address(address)?;
        let token = self.token(contract_address)?;
        token.balance(&owner, raw).await
    }

    /// Send `amount` of the native currency, given in ether units
    pub async fn send_native(
        &self,
        private_key: &str,
        from_address: &str,
        to_address: &str,
        amount: &BigDecimal,
    ) -> Result<TransferReceipt> {
        let signer = EvmSigner::from_hex(private_key)?;
        let from = parse_address(from_address)?;
        let to = parse_address(to_address)?;

        info!(
            from = %checksummed(&from),
            to = %checksummed(&to),
            amount = %amount,
            "Sending native EVM transfer"
        );

        let tx = self.builder().native_transfer(from, to, amount).await?;
        execute(&self.connection, tx, &signer).await
    }

    /// Send `amount` raw token units of the ERC-20 at `contract_address`
    pub async fn send_token(
        &self,
        private_key: &str,
        from_address: &str,
        to_address: &str,
        amount: U256,
        contract_address: &str,
    ) -> Result<TransferReceipt> {
        let signer = EvmSigner::from_hex(private_key)?;
        let from = parse_address(from_address)?;
        let to = parse_address(to_address)?;
        let token = self.token(contract_address)?;

        info!(
            from = %checksummed(&from),
            to = %checksummed(&to),
            amount = %amount,
            token = %checksummed(token.contract_address()),
            "Sending ERC-20 transfer"
        );

        let tx = self.builder().token_transfer(from, &token, to, amount).await?;
        execute(&self.connection, tx, &signer).await
    }
}
