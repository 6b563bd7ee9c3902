//! Types shared by both chain families

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a transaction moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// The chain's own currency (ETH/BNB/..., TRX)
    Native,
    /// A fungible token contract (ERC-20, TRC-20)
    Token,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferKind::Native => write!(f, "native"),
            TransferKind::Token => write!(f, "token"),
        }
    }
}

/// Result of a successful broadcast.
///
/// The identifier is opaque: a `0x`-prefixed transaction hash on EVM chains,
/// the node-assigned `txid` on Tron. No confirmation has been observed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub transaction_id: String,
}

impl TransferReceipt {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
        }
    }
}

impl fmt::Display for TransferReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.transaction_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_display_is_bare_id() {
        let receipt = TransferReceipt::new("0xabc");
        assert_eq!(receipt.to_string(), "0xabc");
    }

    #[test]
    fn test_transfer_kind_serde() {
        let json = serde_json::to_string(&TransferKind::Token).unwrap();
        assert_eq!(json, "\"token\"");
    }
}
