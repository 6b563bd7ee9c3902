//! TRC-20 token binding
//!
//! TRC-20 follows the ERC-20 ABI, so arguments are encoded and results
//! decoded with the same `sol!` descriptor as on EVM chains. The node wants
//! the function signature and the arguments separately, without selector.

use alloy::{primitives::U256, sol_types::SolCall};
use async_trait::async_trait;

use crate::contracts::{encode_arguments, ERC20};
use crate::error::{ClientError, Result};
use crate::token::{TokenBinding, TokenDescriptor};
use crate::tron::address::{parse_address, TronAddress};
use crate::tron::connection::TronConnection;

/// A contract invocation in the shape `triggersmartcontract` expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TronCallData {
    /// e.g. `transfer(address,uint256)`
    pub function_selector: &'static str,
    /// Hex ABI-encoded arguments
    pub parameter: String,
}

impl TronCallData {
    pub fn new<C: SolCall>(call: &C) -> Self {
        Self {
            function_selector: C::SIGNATURE,
            parameter: hex::encode(encode_arguments(call)),
        }
    }
}

/// A TRC-20 contract on one Tron connection
pub struct Trc20Binding<'a> {
    connection: &'a TronConnection,
    descriptor: TokenDescriptor<TronAddress>,
}

impl<'a> Trc20Binding<'a> {
    /// Bind `contract_address`; the address is validated here
    pub fn new(connection: &'a TronConnection, contract_address: &str) -> Result<Self> {
        Ok(Self::at(connection, parse_address(contract_address)?))
    }

    pub fn at(connection: &'a TronConnection, contract_address: TronAddress) -> Self {
        Self {
            connection,
            descriptor: TokenDescriptor::new(contract_address),
        }
    }

    async fn read<C>(&self, call: C) -> Result<C::Return>
    where
        C: SolCall + Send,
    {
        let data = TronCallData::new(&call);
        let output = self
            .connection
            .call_constant(
                &TronAddress::ZERO,
                self.contract_address(),
                data.function_selector,
                &data.parameter,
            )
            .await?;

        C::abi_decode_returns(&output, true).map_err(|e| {
            ClientError::Contract(format!(
                "{} on {} returned undecodable data: {}",
                C::SIGNATURE,
                self.contract_address(),
                e
            ))
        })
    }
}

#[async_trait]
impl<'a> TokenBinding for Trc20Binding<'a> {
    type Address = TronAddress;
    type CallData = TronCallData;

    fn descriptor(&self) -> &TokenDescriptor<TronAddress> {
        &self.descriptor
    }

    async fn fetch_decimals(&self) -> Result<u8> {
        Ok(self.read(ERC20::decimalsCall {}).await?._0)
    }

    async fn balance_of(&self, owner: &TronAddress) -> Result<U256> {
        let account = owner.evm_address();
        Ok(self.read(ERC20::balanceOfCall { account }).await?._0)
    }

    fn build_transfer_call(&self, to: &TronAddress, amount: U256) -> TronCallData {
        TronCallData::new(&ERC20::transferCall {
            recipient: to.evm_address(),
            amount,
        })
    }
}
