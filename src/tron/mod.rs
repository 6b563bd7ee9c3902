//! Tron Chain Support Module
//!
//! TRX and TRC-20 operations over the TronGrid HTTP API, with local signing.
//!
//! ## Submodules
//!
//! - `address` - base58check / `41`-hex address codec
//! - `api` - `/wallet/*` request and response bodies
//! - `builder` - node-built unsigned transactions
//! - `client` - public balance / transfer operations
//! - `connection` - HTTP wrapper with liveness probe
//! - `signer` - txID verification, signing and broadcast
//! - `tokens` - TRC-20 `TokenBinding`

pub mod address;
pub mod api;
pub mod builder;
pub mod client;
pub mod connection;
pub mod signer;
pub mod tokens;

// Re-export commonly used items
pub use address::{parse_address, TronAddress};
pub use api::TronTransaction;
pub use builder::{TronTransactionBuilder, TronUnsignedTransaction};
pub use client::TronClient;
pub use connection::TronConnection;
pub use signer::{SignedTronTransaction, TronSigner};
pub use tokens::{Trc20Binding, TronCallData};
