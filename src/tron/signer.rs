//! Tron transaction signing and submission
//!
//! Tron uses the same secp256k1 keys as EVM chains. The signature covers
//! the 32-byte `txID`, which must itself be `sha256(raw_data)`: the node
//! built the transaction, so that relation is checked before signing.

use alloy::primitives::{keccak256, Address};
use k256::ecdsa::SigningKey;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::info;

use crate::error::{ClientError, Result};
use crate::tron::address::TronAddress;
use crate::tron::api::TronTransaction;
use crate::tron::builder::TronUnsignedTransaction;
use crate::tron::connection::TronConnection;
use crate::types::TransferReceipt;

/// Local signer for hex-encoded secp256k1 keys
#[derive(Clone)]
pub struct TronSigner {
    key: SigningKey,
    address: TronAddress,
}

/// Custom Debug that only shows the address.
impl fmt::Debug for TronSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TronSigner")
            .field("address", &self.address)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl TronSigner {
    /// Parse a hex private key, with or without `0x`
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let trimmed = private_key.trim();
        let hex_key = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let bytes = hex::decode(hex_key)
            .map_err(|e| ClientError::InvalidPrivateKey(format!("not hex: {}", e)))?;
        if bytes.len() != 32 {
            return Err(ClientError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let key = SigningKey::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidPrivateKey(e.to_string()))?;
        let address = derive_address(&key);

        Ok(Self { key, address })
    }

    pub fn address(&self) -> TronAddress {
        self.address
    }

    /// Sign `tx`, consuming it
    pub fn sign(&self, tx: TronUnsignedTransaction) -> Result<SignedTronTransaction> {
        if tx.from != self.address {
            return Err(ClientError::Signing(format!(
                "private key controls {}, not sender {}",
                self.address, tx.from
            )));
        }

        let mut transaction = tx.transaction;
        let digest = verify_tx_id(&transaction)?;

        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| ClientError::Signing(e.to_string()))?;

        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(recovery_id.to_byte());
        transaction.signature.push(hex::encode(bytes));

        Ok(SignedTronTransaction { transaction })
    }
}

/// keccak256 of the uncompressed public key, last 20 bytes, `0x41` prefix
fn derive_address(key: &SigningKey) -> TronAddress {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    TronAddress::from_evm(Address::from_slice(&hash[12..]))
}

/// Check `txID == sha256(raw_data_hex)` and return the digest to sign
fn verify_tx_id(transaction: &TronTransaction) -> Result<[u8; 32]> {
    let raw = hex::decode(&transaction.raw_data_hex)
        .map_err(|e| ClientError::Signing(format!("raw_data_hex is not hex: {}", e)))?;
    let digest: [u8; 32] = Sha256::digest(&raw).into();

    if hex::encode(digest) != transaction.tx_id.to_lowercase() {
        return Err(ClientError::Signing(format!(
            "txID {} does not match raw_data",
            transaction.tx_id
        )));
    }
    Ok(digest)
}

/// A signed transaction. Submitting it consumes it.
#[derive(Debug, Clone)]
pub struct SignedTronTransaction {
    transaction: TronTransaction,
}

impl SignedTronTransaction {
    pub fn tx_id(&self) -> &str {
        &self.transaction.tx_id
    }

    pub fn transaction(&self) -> &TronTransaction {
        &self.transaction
    }

    /// Broadcast and return the node-assigned txid
    pub async fn submit(self, connection: &TronConnection) -> Result<TransferReceipt> {
        let txid = connection.broadcast(&self.transaction).await?;
        info!(txid = %txid, "Broadcast Tron transaction");
        Ok(TransferReceipt::new(txid))
    }
}

/// Sign `tx` with `signer` and broadcast it through `connection`
pub async fn execute(
    connection: &TronConnection,
    tx: TronUnsignedTransaction,
    signer: &TronSigner,
) -> Result<TransferReceipt> {
    let signed = signer.sign(tx)?;
    signed.submit(connection).await
}
