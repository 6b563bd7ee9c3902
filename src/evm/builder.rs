//! EVM transaction building
//!
//! Every build re-reads chain ID, pending nonce and gas price from the node,
//! so a transaction is never assembled from stale values. Gas limits are the
//! configured constants: there is no `eth_estimateGas` round trip.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    rpc::types::TransactionRequest,
};
use bigdecimal::BigDecimal;
use tracing::debug;

use crate::config::FeeLimits;
use crate::error::Result;
use crate::evm::connection::EvmConnection;
use crate::evm::tokens::Erc20Binding;
use crate::normalize::{to_base_units, EVM_NATIVE_DECIMALS};
use crate::token::TokenBinding;
use crate::types::TransferKind;

/// Fields needed to sign and broadcast a legacy (EIP-155) transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmUnsignedTransaction {
    pub kind: TransferKind,
    pub chain_id: u64,
    pub from: Address,
    /// Recipient for native transfers, token contract for token transfers
    pub to: Address,
    /// Wei attached to the transaction; zero for token transfers
    pub value: U256,
    /// ABI call-data; empty for native transfers
    pub input: Bytes,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
}

impl EvmUnsignedTransaction {
    /// Convert into an alloy request ready for a wallet to sign
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.to)
            .with_value(self.value)
            .with_input(self.input.clone())
            .with_nonce(self.nonce)
            .with_chain_id(self.chain_id)
            .with_gas_price(self.gas_price)
            .with_gas_limit(self.gas_limit)
    }
}

/// Builds unsigned transfers against one connection
pub struct EvmTransactionBuilder<'a> {
    connection: &'a EvmConnection,
    gas_limits: FeeLimits,
}

impl<'a> EvmTransactionBuilder<'a> {
    pub fn new(connection: &'a EvmConnection, gas_limits: FeeLimits) -> Self {
        Self {
            connection,
            gas_limits,
        }
    }

    /// Native transfer of a human-scale `amount` (ether units, converted to wei)
    pub async fn native_transfer(
        &self,
        from: Address,
        to: Address,
        amount: &BigDecimal,
    ) -> Result<EvmUnsignedTransaction> {
        let value = to_base_units(amount, EVM_NATIVE_DECIMALS)?;

        self.envelope(
            TransferKind::Native,
            from,
            to,
            value,
            Bytes::new(),
            self.gas_limits.native,
        )
        .await
    }

    /// Token transfer of `amount` raw token units to `to`
    pub async fn token_transfer(
        &self,
        from: Address,
        token: &Erc20Binding<'_>,
        to: Address,
        amount: U256,
    ) -> Result<EvmUnsignedTransaction> {
        let input = token.build_transfer_call(&to, amount);

        self.envelope(
            TransferKind::Token,
            from,
            *token.contract_address(),
            U256::ZERO,
            input,
            self.gas_limits.token,
        )
        .await
    }

    async fn envelope(
        &self,
        kind: TransferKind,
        from: Address,
        to: Address,
        value: U256,
        input: Bytes,
        gas_limit: u64,
    ) -> Result<EvmUnsignedTransaction> {
        let chain_id = self.connection.chain_id().await?;
        let nonce = self.connection.pending_nonce(from).await?;
        let gas_price = self.connection.gas_price().await?;

        let tx = EvmUnsignedTransaction {
            kind,
            chain_id,
            from,
            to,
            value,
            input,
            nonce,
            gas_price,
            gas_limit,
        };

        debug!(
            kind = %tx.kind,
            chain_id = tx.chain_id,
            from = %tx.from,
            to = %tx.to,
            value = %tx.value,
            nonce = tx.nonce,
            gas_price = tx.gas_price,
            gas_limit = tx.gas_limit,
            "Built EVM transaction"
        );

        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_to_request_is_legacy_with_all_fields() {
        let tx = EvmUnsignedTransaction {
            kind: TransferKind::Native,
            chain_id: 56,
            from: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            value: U256::from(10u64),
            input: Bytes::new(),
            nonce: 7,
            gas_price: 3_000_000_000,
            gas_limit: 21_000,
        };

        let request = tx.to_request();
        assert_eq!(request.from, Some(tx.from));
        assert_eq!(request.nonce, Some(7));
        assert_eq!(request.chain_id, Some(56));
        assert_eq!(request.gas_price, Some(3_000_000_000));
        assert_eq!(request.gas, Some(21_000));
        assert_eq!(request.value, Some(U256::from(10u64)));
        assert!(request.max_fee_per_gas.is_none());
    }
}
