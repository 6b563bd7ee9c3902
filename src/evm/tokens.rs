//! ERC-20 token binding
//!
//! Reads go through `eth_call` on the connection and are decoded with the
//! `sol!` descriptor; `transfer` call-data is encoded locally.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use async_trait::async_trait;

use crate::error::{ClientError, Result};
use crate::evm::address::parse_address;
use crate::evm::connection::EvmConnection;
use crate::contracts::ERC20;
use crate::token::{TokenBinding, TokenDescriptor};

/// An ERC-20 contract on one EVM connection
pub struct Erc20Binding<'a> {
    connection: &'a EvmConnection,
    descriptor: TokenDescriptor<Address>,
}

impl<'a> Erc20Binding<'a> {
    /// Bind `contract_address`; the address is validated here, not at call time
    pub fn new(connection: &'a EvmConnection, contract_address: &str) -> Result<Self> {
        Ok(Self::at(connection, parse_address(contract_address)?))
    }

    pub fn at(connection: &'a EvmConnection, contract_address: Address) -> Self {
        Self {
            connection,
            descriptor: TokenDescriptor::new(contract_address),
        }
    }

    async fn read<C>(&self, call: C) -> Result<C::Return>
    where
        C: SolCall + Send,
    {
        let output = self
            .connection
            .call(*self.contract_address(), call.abi_encode().into())
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
impl<'a> TokenBinding for Erc20Binding<'a> {
    type Address = Address;
    type CallData = Bytes;

    fn descriptor(&self) -> &TokenDescriptor<Address> {
        &self.descriptor
    }

    async fn fetch_decimals(&self) -> Result<u8> {
        Ok(self.read(ERC20::decimalsCall {}).await?._0)
    }

    async fn balance_of(&self, owner: &Address) -> Result<U256> {
        Ok(self.read(ERC20::balanceOfCall { account: *owner }).await?._0)
    }

    fn build_transfer_call(&self, to: &Address, amount: U256) -> Bytes {
        encode_transfer(*to, amount)
    }
}

/// `transfer(to, amount)` call-data without a binding
pub fn encode_transfer(to: Address, amount: U256) -> Bytes {
    ERC20::transferCall {
        recipient: to,
        amount,
    }
    .abi_encode()
    .into()
}
