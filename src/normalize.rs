//! Balance normalization
//!
//! Converts raw on-chain integers into human-scale decimals and back.
//! Scaling is done on `BigDecimal` by moving the decimal point, so it is
//! exact for every `U256` and every precision: no rounding ever happens
//! on the way down. The way up (`denormalize`) truncates toward zero any
//! digits finer than the base unit.

use alloy::primitives::U256;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;

use crate::error::{ClientError, Result};

/// Fixed precision of the EVM native currency (wei per ether = 10^18)
pub const EVM_NATIVE_DECIMALS: u8 = 18;

/// Fixed precision of TRX (SUN per TRX = 10^6)
pub const TRON_NATIVE_DECIMALS: u8 = 6;

/// Convert a `U256` into an arbitrary precision integer
pub fn u256_to_bigint(raw: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &raw.to_be_bytes::<32>())
}

/// `raw / 10^decimals`, exact
pub fn normalize(raw: U256, decimals: u8) -> BigDecimal {
    BigDecimal::new(u256_to_bigint(raw), decimals as i64)
}

/// The raw value itself as an integer-valued decimal
pub fn raw_value(raw: U256) -> BigDecimal {
    BigDecimal::new(u256_to_bigint(raw), 0)
}

/// `value * 10^decimals`, truncated toward zero to an integer
pub fn denormalize(value: &BigDecimal, decimals: u8) -> BigDecimal {
    let factor = BigDecimal::new(BigInt::from(1), -(decimals as i64));
    (value.clone() * factor).with_scale(0)
}

/// Convert a human-scale amount into base units for embedding in a transaction.
///
/// Negative amounts and amounts above `U256::MAX` have no base-unit encoding.
pub fn to_base_units(amount: &BigDecimal, decimals: u8) -> Result<U256> {
    if amount.sign() == Sign::Minus {
        return Err(ClientError::InvalidAmount(format!(
            "{} is negative",
            amount
        )));
    }

    let (digits, _) = denormalize(amount, decimals).into_bigint_and_exponent();
    let (_, bytes) = digits.to_bytes_be();

    U256::try_from_be_slice(&bytes)
        .ok_or_else(|| ClientError::InvalidAmount(format!("{} overflows uint256", amount)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_token_units() {
        assert_eq!(normalize(U256::from(1_500_000u64), 6), dec("1.5"));
        assert_eq!(normalize(U256::from(100_000_000u64), 6), dec("100"));
        assert_eq!(normalize(U256::from(1u64), 6), dec("0.000001"));
    }

    #[test]
    fn test_normalize_one_ether() {
        let wei = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(normalize(wei, EVM_NATIVE_DECIMALS), dec("1.0"));
    }

    #[test]
    fn test_normalize_zero_decimals_is_identity() {
        assert_eq!(normalize(U256::from(42u64), 0), dec("42"));
    }

    #[test]
    fn test_normalize_is_exact_for_every_precision() {
        let raw = U256::from(123_456_789_012_345_678u128);
        for decimals in 0..=18u8 {
            let scaled = normalize(raw, decimals);
            assert_eq!(denormalize(&scaled, decimals), raw_value(raw));
        }
    }

    #[test]
    fn test_normalize_max_u256_does_not_overflow() {
        let scaled = normalize(U256::MAX, 18);
        assert_eq!(to_base_units(&scaled, 18).unwrap(), U256::MAX);
    }

    #[test]
    fn test_denormalize_tron_balance() {
        assert_eq!(denormalize(&dec("12.345678"), 6), dec("12345678"));
        assert_eq!(denormalize(&dec("0"), 6), dec("0"));
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(
            to_base_units(&dec("1.5"), 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(to_base_units(&dec("0"), 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_to_base_units_truncates_sub_unit_digits() {
        assert_eq!(to_base_units(&dec("1.0000019"), 6).unwrap(), U256::from(1_000_001u64));
    }

    #[test]
    fn test_to_base_units_rejects_negative() {
        assert!(matches!(
            to_base_units(&dec("-1"), 18),
            Err(ClientError::InvalidAmount(_))
        ));
    }
}
