//! Chain-independent token binding
//!
//! [`TokenBinding`] is the single interface over ERC-20 and TRC-20 contracts.
//! The two implementations differ only in how addresses are normalized and
//! how a call is encoded for their node; decimals caching and balance
//! scaling live here once.

use std::fmt;
use std::future::Future;

use alloy::primitives::U256;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use tokio::sync::OnceCell;

use crate::error::Result;
use crate::normalize::{normalize, raw_value};

/// A token contract address plus its lazily fetched precision.
///
/// `decimals` is read from the contract the first time it is needed and is
/// fixed for the lifetime of this descriptor. Descriptors are not shared
/// between bindings, so a new binding always asks the contract again.
pub struct TokenDescriptor<A> {
    contract_address: A,
    decimals: OnceCell<u8>,
}

impl<A> TokenDescriptor<A> {
    pub fn new(contract_address: A) -> Self {
        Self {
            contract_address,
            decimals: OnceCell::new(),
        }
    }

    pub fn contract_address(&self) -> &A {
        &self.contract_address
    }

    /// Decimals, if they have been fetched already
    pub fn cached_decimals(&self) -> Option<u8> {
        self.decimals.get().copied()
    }

    /// Return the cached decimals or run `fetch` once to obtain them.
    /// A failed fetch leaves the cell empty.
    pub async fn decimals_or_fetch<F, Fut>(&self, fetch: F) -> Result<u8>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<u8>>,
    {
        self.decimals.get_or_try_init(fetch).await.copied()
    }
}

impl<A: fmt::Display> fmt::Debug for TokenDescriptor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenDescriptor")
            .field("contract_address", &self.contract_address.to_string())
            .field("decimals", &self.cached_decimals())
            .finish()
    }
}

/// A fungible-token contract bound to one connection.
#[async_trait]
pub trait TokenBinding: Send + Sync {
    /// Normalized address type of the chain family
    type Address: fmt::Display + Send + Sync;
    /// Encoded `transfer(to, amount)` invocation
    type CallData: Send;

    fn descriptor(&self) -> &TokenDescriptor<Self::Address>;

    /// Read `decimals()` from the contract, bypassing the descriptor
    async fn fetch_decimals(&self) -> Result<u8>;

    /// Read `balanceOf(owner)` in raw units
    async fn balance_of(&self, owner: &Self::Address) -> Result<U256>;

    /// Encode `transfer(to, amount)`; does not sign or submit
    fn build_transfer_call(&self, to: &Self::Address, amount: U256) -> Self::CallData;

    fn contract_address(&self) -> &Self::Address {
        self.descriptor().contract_address()
    }

    /// Token precision, fetched on first use
    async fn decimals(&self) -> Result<u8> {
        self.descriptor()
            .decimals_or_fetch(|| self.fetch_decimals())
            .await
    }

    /// Balance of `owner`, raw or scaled by the token's decimals.
    ///
    /// With `raw` set the decimals are never fetched.
    async fn balance(&self, owner: &Self::Address, raw: bool) -> Result<BigDecimal> {
        let balance = self.balance_of(owner).await?;
        if raw {
            return Ok(raw_value(balance));
        }

        let decimals = self.decimals().await?;
        Ok(normalize(balance, decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedToken {
        descriptor: TokenDescriptor<String>,
        decimals: u8,
        balance: U256,
        decimals_reads: AtomicUsize,
    }

    impl FixedToken {
        fn new(decimals: u8, balance: u64) -> Self {
            Self {
                descriptor: TokenDescriptor::new("token".to_string()),
                decimals,
                balance: U256::from(balance),
                decimals_reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TokenBinding for FixedToken {
        type Address = String;
        type CallData = (String, U256);

        fn descriptor(&self) -> &TokenDescriptor<String> {
            &self.descriptor
        }

        async fn fetch_decimals(&self) -> Result<u8> {
            self.decimals_reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.decimals)
        }

        async fn balance_of(&self, _owner: &String) -> Result<U256> {
            Ok(self.balance)
        }

        fn build_transfer_call(&self, to: &String, amount: U256) -> (String, U256) {
            (to.clone(), amount)
        }
    }

    #[tokio::test]
    async fn test_scaled_and_raw_balance() {
        let token = FixedToken::new(6, 1_500_000);
        let owner = "owner".to_string();

        let scaled = token.balance(&owner, false).await.unwrap();
        assert_eq!(scaled, BigDecimal::from_str("1.5").unwrap());

        let raw = token.balance(&owner, true).await.unwrap();
        assert_eq!(raw, BigDecimal::from(1_500_000));
    }

    #[tokio::test]
    async fn test_raw_balance_skips_decimals() {
        let token = FixedToken::new(6, 1);
        token.balance(&"owner".to_string(), true).await.unwrap();
        assert_eq!(token.decimals_reads.load(Ordering::SeqCst), 0);
        assert_eq!(token.descriptor().cached_decimals(), None);
    }

    #[tokio::test]
    async fn test_decimals_fetched_once_per_binding() {
        let token = FixedToken::new(18, 1);
        assert_eq!(token.decimals().await.unwrap(), 18);
        assert_eq!(token.decimals().await.unwrap(), 18);
        assert_eq!(token.decimals_reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_fetch_is_not_cached() {
        let descriptor = TokenDescriptor::new("token".to_string());
        let err = tokio_test::block_on(
            descriptor.decimals_or_fetch(|| async { Err(ClientError::connection("timeout")) }),
        );
        assert!(err.is_err());
        assert_eq!(descriptor.cached_decimals(), None);

        let decimals = tokio_test::block_on(descriptor.decimals_or_fetch(|| async { Ok(8) }));
        assert_eq!(decimals.unwrap(), 8);
    }
}
