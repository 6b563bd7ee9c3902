//! EVM Chain Support Module
//!
//! Native-currency and ERC-20 operations on EVM-compatible chains
//! (Ethereum, BSC, Polygon, Gnosis, ...).
//!
//! ## Submodules
//!
//! - `address` - hex address parsing and EIP-55 rendering
//! - `builder` - unsigned legacy transaction assembly
//! - `client` - public balance / transfer operations
//! - `connection` - alloy JSON-RPC wrapper with liveness probe
//! - `signer` - local signing and raw broadcast
//! - `tokens` - ERC-20 `TokenBinding`

pub mod address;
pub mod builder;
pub mod client;
pub mod connection;
pub mod signer;
pub mod tokens;

// Re-export commonly used items
pub use address::{checksummed, parse_address};
pub use builder::{EvmTransactionBuilder, EvmUnsignedTransaction};
pub use client::EvmClient;
pub use connection::EvmConnection;
pub use crate::contracts::ERC20;
pub use signer::{EvmSigner, SignedEvmTransaction};
pub use tokens::Erc20Binding;
