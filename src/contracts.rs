//! Fungible token interface descriptor
//!
//! Generated at compile time with alloy's `sol!` macro. The same ABI encodes
//! TRC-20 parameters on Tron, which follows the ERC-20 calling convention.
//! Only `decimals`, `balanceOf` and `transfer` are used by the clients; the
//! rest of the interface is declared for completeness.

use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// ERC-20 / TRC-20 token interface
    interface ERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function decreaseAllowance(address spender, uint256 subtractedValue) external returns (bool);
        function increaseAllowance(address spender, uint256 addedValue) external returns (bool);
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint256);
        function transfer(address recipient, uint256 amount) external returns (bool);
        function transferFrom(address sender, address recipient, uint256 amount) external returns (bool);
    }
}

/// Canonical signatures of every function in the descriptor
pub const TOKEN_INTERFACE: [&str; 11] = [
    ERC20::allowanceCall::SIGNATURE,
    ERC20::approveCall::SIGNATURE,
    ERC20::balanceOfCall::SIGNATURE,
    ERC20::decimalsCall::SIGNATURE,
    ERC20::decreaseAllowanceCall::SIGNATURE,
    ERC20::increaseAllowanceCall::SIGNATURE,
    ERC20::nameCall::SIGNATURE,
    ERC20::symbolCall::SIGNATURE,
    ERC20::totalSupplyCall::SIGNATURE,
    ERC20::transferCall::SIGNATURE,
    ERC20::transferFromCall::SIGNATURE,
];

/// ABI-encode a call's arguments without the 4-byte selector
pub fn encode_arguments<C: SolCall>(call: &C) -> Vec<u8> {
    call.abi_encode()[4..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};

    #[test]
    fn test_selectors() {
        assert_eq!(hex::encode(ERC20::transferCall::SELECTOR), "a9059cbb");
        assert_eq!(hex::encode(ERC20::balanceOfCall::SELECTOR), "70a08231");
        assert_eq!(hex::encode(ERC20::decimalsCall::SELECTOR), "313ce567");
    }

    #[test]
    fn test_interface_lists_used_functions() {
        assert!(TOKEN_INTERFACE.contains(&"decimals()"));
        assert!(TOKEN_INTERFACE.contains(&"balanceOf(address)"));
        assert!(TOKEN_INTERFACE.contains(&"transfer(address,uint256)"));
    }

    #[test]
    fn test_encode_arguments_strips_selector() {
        let call = ERC20::transferCall {
            recipient: address!("00000000000000000000000000000000000000ff"),
            amount: U256::from(1u64),
        };
        let args = encode_arguments(&call);
        assert_eq!(args.len(), 64);
        assert_eq!(args[31], 0xff);
        assert_eq!(args[63], 0x01);
    }
}
