//! EVM transaction signing and submission
//!
//! Signing is local: a bad key or a key that does not control the sender
//! fails here without touching the network. Submission returns as soon as
//! the node accepts the raw transaction; receipts are not polled.

use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, TxHash},
    signers::local::PrivateKeySigner,
};
use std::fmt;
use tracing::info;

use crate::error::{ClientError, Result};
use crate::evm::builder::EvmUnsignedTransaction;
use crate::evm::connection::EvmConnection;
use crate::types::TransferReceipt;

/// Local signer for hex-encoded secp256k1 keys
#[derive(Clone)]
pub struct EvmSigner {
    signer: PrivateKeySigner,
}

/// Custom Debug that only shows the address.
impl fmt::Debug for EvmSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmSigner")
            .field("address", &self.address())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl EvmSigner {
    /// Parse a hex private key, with or without `0x`
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign `tx`, consuming it
    pub async fn sign(&self, tx: EvmUnsignedTransaction) -> Result<SignedEvmTransaction> {
        if tx.from != self.address() {
            return Err(ClientError::Signing(format!(
                "private key controls {}, not sender {}",
                self.address(),
                tx.from
            )));
        }

        let wallet = EthereumWallet::from(self.signer.clone());
        let envelope = tx
            .to_request()
            .build(&wallet)
            .await
            .map_err(|e| ClientError::Signing(e.to_string()))?;

        Ok(SignedEvmTransaction {
            hash: *envelope.tx_hash(),
            encoded: envelope.encoded_2718(),
        })
    }
}

/// A signed, encoded transaction. Submitting it consumes it.
#[derive(Debug)]
pub struct SignedEvmTransaction {
    hash: TxHash,
    encoded: Vec<u8>,
}

impl SignedEvmTransaction {
    /// Hash the network will assign
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Broadcast and return the transaction hash
    pub async fn submit(self, connection: &EvmConnection) -> Result<TransferReceipt> {
        let hash = connection.send_raw_transaction(&self.encoded).await?;
        info!(tx_hash = %hash, "Broadcast EVM transaction");
        Ok(TransferReceipt::new(format!("{:#x}", hash)))
    }
}

/// Sign `tx` with `signer` and broadcast it through `connection`
pub async fn execute(
    connection: &EvmConnection,
    tx: EvmUnsignedTransaction,
    signer: &EvmSigner,
) -> Result<TransferReceipt> {
    let signed = signer.sign(tx).await?;
    signed.submit(connection).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransferKind;
    use alloy::primitives::{address, Bytes, U256};

    // Well-known development key (anvil account 0)
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn native_tx(from: Address) -> EvmUnsignedTransaction {
        EvmUnsignedTransaction {
            kind: TransferKind::Native,
            chain_id: 31337,
            from,
            to: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            value: U256::from(1_000_000_000_000_000_000u128),
            input: Bytes::new(),
            nonce: 0,
            gas_price: 1_000_000_000,
            gas_limit: 21_000,
        }
    }

    #[test]
    fn test_from_hex_with_and_without_prefix() {
        let with = EvmSigner::from_hex(DEV_KEY).unwrap();
        let without = EvmSigner::from_hex(DEV_KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(with.address(), without.address());
        assert_eq!(
            with.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_malformed_key_rejected() {
        for bad in ["", "0x1234", "not-a-key", "0xzz0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"] {
            assert!(matches!(
                EvmSigner::from_hex(bad),
                Err(ClientError::InvalidPrivateKey(_))
            ));
        }
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = EvmSigner::from_hex(DEV_KEY).unwrap();
        let printed = format!("{:?}", signer);
        assert!(!printed.contains("ac0974bec"));
    }

    #[tokio::test]
    async fn test_sign_produces_legacy_eip155_envelope() {
        let signer = EvmSigner::from_hex(DEV_KEY).unwrap();
        let signed = signer.sign(native_tx(signer.address())).await.unwrap();

        // Legacy transactions are plain RLP lists: first byte is a list prefix
        assert!(signed.encoded()[0] >= 0xc0);
        assert_ne!(signed.hash(), TxHash::ZERO);
    }

    #[tokio::test]
    async fn test_sign_is_deterministic() {
        let signer = EvmSigner::from_hex(DEV_KEY).unwrap();
        let a = signer.sign(native_tx(signer.address())).await.unwrap();
        let b = signer.sign(native_tx(signer.address())).await.unwrap();
        assert_eq!(a.hash(), b.hash());
    }

    #[tokio::test]
    async fn test_sign_rejects_foreign_sender() {
        let signer = EvmSigner::from_hex(DEV_KEY).unwrap();
        let other = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let result = signer.sign(native_tx(other)).await;
        assert!(matches!(result, Err(ClientError::Signing(_))));
    }
}
