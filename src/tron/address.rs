//! Tron address codec
//!
//! A Tron address is 21 bytes: the `0x41` network prefix followed by the
//! same 20 bytes an EVM address would carry. Its canonical text form is
//! base58check (`T...`); the 42-character hex form (`41...`) is accepted
//! on input and normalized.

use alloy::primitives::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Mainnet/testnet address prefix byte
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Normalized Tron address
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TronAddress([u8; 21]);

impl TronAddress {
    /// The all-zero account, used as caller for constant contract calls
    pub const ZERO: TronAddress = TronAddress([
        ADDRESS_PREFIX, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);

    /// Wrap the 20 account bytes shared with the EVM representation
    pub fn from_evm(address: Address) -> Self {
        let mut bytes = [0u8; 21];
        bytes[0] = ADDRESS_PREFIX;
        bytes[1..].copy_from_slice(address.as_slice());
        TronAddress(bytes)
    }

    /// The 20 account bytes, for ABI encoding
    pub fn evm_address(&self) -> Address {
        Address::from_slice(&self.0[1..])
    }

    pub fn as_bytes(&self) -> &[u8; 21] {
        &self.0
    }

    /// `41...` hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Canonical `T...` form
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).with_check().into_string()
    }

    fn from_raw(input: &str, raw: &[u8]) -> Result<Self> {
        let bytes: [u8; 21] = raw.try_into().map_err(|_| invalid(input, "expected 21 bytes"))?;
        if bytes[0] != ADDRESS_PREFIX {
            return Err(invalid(input, "missing 0x41 prefix"));
        }
        Ok(TronAddress(bytes))
    }
}

fn invalid(address: &str, reason: impl fmt::Display) -> ClientError {
    ClientError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for TronAddress {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if trimmed.len() == 42 && trimmed.starts_with("41") {
            let raw = hex::decode(trimmed).map_err(|e| invalid(s, e))?;
            return Self::from_raw(s, &raw);
        }

        let raw = bs58::decode(trimmed)
            .with_check(None)
            .into_vec()
            .map_err(|e| invalid(s, e))?;
        Self::from_raw(s, &raw)
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TronAddress({})", self.to_base58())
    }
}

impl Serialize for TronAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for TronAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse and normalize a Tron address
pub fn parse_address(address: &str) -> Result<TronAddress> {
    address.parse()
}
