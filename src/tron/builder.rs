//! Tron transaction building
//!
//! Tron nodes assemble transactions themselves: the builder sends the
//! transfer parameters and receives `raw_data` plus the `txID` to sign.
//! Reference block and expiration are therefore always the node's current
//! ones, never reused between builds.

use alloy::primitives::U256;
use tracing::debug;

use crate::config::FeeLimits;
use crate::error::Result;
use crate::token::TokenBinding;
use crate::tron::address::TronAddress;
use crate::tron::api::TronTransaction;
use crate::tron::connection::TronConnection;
use crate::tron::tokens::Trc20Binding;
use crate::types::TransferKind;

/// A node-built transaction awaiting a signature
#[derive(Debug, Clone, PartialEq)]
pub struct TronUnsignedTransaction {
    pub kind: TransferKind,
    pub from: TronAddress,
    /// Recipient for native transfers, token contract for token transfers
    pub to: TronAddress,
    /// SUN for native transfers, raw token units for token transfers
    pub amount: U256,
    /// SUN. `createtransaction` takes no fee limit, so for native transfers
    /// this records the configured ceiling without being part of `raw_data`.
    pub fee_limit: u64,
    pub transaction: TronTransaction,
}

/// Builds unsigned transfers against one connection
pub struct TronTransactionBuilder<'a> {
    connection: &'a TronConnection,
    fee_limits: FeeLimits,
}

impl<'a> TronTransactionBuilder<'a> {
    pub fn new(connection: &'a TronConnection, fee_limits: FeeLimits) -> Self {
        Self {
            connection,
            fee_limits,
        }
    }

    /// TRX transfer of `amount` SUN
    pub async fn native_transfer(
        &self,
        from: TronAddress,
        to: TronAddress,
        amount: u64,
    ) -> Result<TronUnsignedTransaction> {
        let transaction = self.connection.create_transfer(&from, &to, amount).await?;

        Ok(logged(TronUnsignedTransaction {
            kind: TransferKind::Native,
            from,
            to,
            amount: U256::from(amount),
            fee_limit: self.fee_limits.native,
            transaction,
        }))
    }

    /// TRC-20 transfer of `amount` raw token units to `to`
    pub async fn token_transfer(
        &self,
        from: TronAddress,
        token: &Trc20Binding<'_>,
        to: TronAddress,
        amount: U256,
    ) -> Result<TronUnsignedTransaction> {
        let call = token.build_transfer_call(&to, amount);
        let transaction = self
            .connection
            .trigger_contract(
                &from,
                token.contract_address(),
                call.function_selector,
                &call.parameter,
                self.fee_limits.token,
            )
            .await?;

        Ok(logged(TronUnsignedTransaction {
            kind: TransferKind::Token,
            from,
            to: *token.contract_address(),
            amount,
            fee_limit: self.fee_limits.token,
            transaction,
        }))
    }
}

fn logged(tx: TronUnsignedTransaction) -> TronUnsignedTransaction {
    debug!(
        kind = %tx.kind,
        from = %tx.from,
        to = %tx.to,
        amount = %tx.amount,
        fee_limit = tx.fee_limit,
        tx_id = %tx.transaction.tx_id,
        "Built Tron transaction"
    );
    tx
}
