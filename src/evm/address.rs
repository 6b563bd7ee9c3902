//! EVM address normalization

use alloy::primitives::Address;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Parse a 20-byte hex address in any letter case.
///
/// Mixed-case input is not checksum-verified; it is accepted the same way
/// lowercase input is and re-rendered with [`checksummed`].
pub fn parse_address(address: &str) -> Result<Address> {
    Address::from_str(address.trim()).map_err(|e| ClientError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// EIP-55 checksummed rendering
pub fn checksummed(address: &Address) -> String {
    address.to_checksum(None)
}
