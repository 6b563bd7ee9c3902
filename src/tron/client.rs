//! Tron client
//!
//! Public entry point for Tron: TRX and TRC-20 balances and transfers.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use tracing::info;

use crate::config::{FeeLimits, TronConfig};
use crate::error::Result;
use crate::normalize::{denormalize, TRON_NATIVE_DECIMALS};
use crate::token::TokenBinding;
use crate::tron::address::parse_address;
use crate::tron::builder::TronTransactionBuilder;
use crate::tron::connection::TronConnection;
use crate::tron::signer::{execute, TronSigner};
use crate::tron::tokens::Trc20Binding;
use crate::types::TransferReceipt;

/// Client for one Tron node
pub struct TronClient {
    connection: TronConnection,
    fee_limits: FeeLimits,
}

impl TronClient {
    /// Connect with default fee limits and no API key
    pub async fn connect(api_url: &str) -> Result<Self> {
        Ok(Self {
            connection: TronConnection::connect(api_url).await?,
            fee_limits: FeeLimits::TRON,
        })
    }

    pub async fn from_config(config: &TronConfig) -> Result<Self> {
        Ok(Self {
            connection: TronConnection::from_config(config).await?,
            fee_limits: config.fee_limits,
        })
    }

    /// Replace the fixed fee limits
    pub fn with_fee_limits(mut self, fee_limits: FeeLimits) -> Self {
        self.fee_limits = fee_limits;
        self
    }

    pub fn connection(&self) -> &TronConnection {
        &self.connection
    }

    pub fn fee_limits(&self) -> FeeLimits {
        self.fee_limits
    }

    pub fn builder(&self) -> TronTransactionBuilder<'_> {
        TronTransactionBuilder::new(&self.connection, self.fee_limits)
    }

    /// Bind a TRC-20 contract
    pub fn token(&self, contract_address: &str) -> Result<Trc20Binding<'_>> {
        Trc20Binding::new(&self.connection, contract_address)
    }

    /// TRX balance, or SUN with `raw`.
    ///
    /// The node read is already scaled to TRX; `raw` multiplies it back up.
    pub async fn get_native_balance(&self, address: &str, raw: bool) -> Result<BigDecimal> {
        let address = parse_address(address)?;
        let balance = self.connection.account_balance(&address).await?;

        if raw {
            Ok(denormalize(&balance, TRON_NATIVE_DECIMALS))
        } else {
            Ok(balance)
        }
    }

    /// TRC-20 balance scaled by the token's decimals, or raw with `raw`
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

    /// Send `amount` SUN
    pub async fn send_native(
        &self,
        private_key: &str,
        from_address: &str,
        to_address: &str,
        amount: u64,
    ) -> Result<TransferReceipt> {
        let signer = TronSigner::from_hex(private_key)?;
        let from = parse_address(from_address)?;
        let to = parse_address(to_address)?;

        info!(
            from = %from,
            to = %to,
            amount = amount,
            "Sending TRX transfer"
        );

        let tx = self.builder().native_transfer(from, to, amount).await?;
        execute(&self.connection, tx, &signer).await
    }

    /// Send `amount` raw token units of the TRC-20 at `contract_address`
    pub async fn send_token(
        &self,
        private_key: &str,
        from_address: &str,
        to_address: &str,
        amount: U256,
        contract_address: &str,
    ) -> Result<TransferReceipt> {
        let signer = TronSigner::from_hex(private_key)?;
        let from = parse_address(from_address)?;
        let to = parse_address(to_address)?;
        let token = self.token(contract_address)?;

        info!(
            from = %from,
            to = %to,
            amount = %amount,
            token = %token.contract_address(),
            "Sending TRC-20 transfer"
        );

        let tx = self.builder().token_transfer(from, &token, to, amount).await?;
        execute(&self.connection, tx, &signer).await
    }
}
