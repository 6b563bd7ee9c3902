//! IPN-RS: Unified EVM / Tron Transfer Client
//!
//! One interface for native-currency and fungible-token operations across
//! EVM-compatible chains and Tron:
//!
//! - **Balances** - native and token balances, raw or scaled to human units
//! - **Transfers** - build, sign locally and broadcast native and token transfers
//! - **Token Bindings** - ERC-20 / TRC-20 contracts behind one `TokenBinding` trait
//! - **Normalization** - exact decimal scaling between base units and display units
//! - **IPN Registry** - manage the addresses watched by the notification service
//! - **Webhooks** - typed model of notification payloads
//!
//! ## Feature Flags
//!
//! - `evm` - Enable EVM chain support (default)
//! - `tron` - Enable Tron support (default)
//! - `full` - Enable all features

// Core modules (always available)
pub mod config;
pub mod contracts;
pub mod endpoints;
pub mod error;
pub mod normalize;
pub mod notify;
pub mod redact;
pub mod token;
pub mod types;

// Chain-specific modules (feature-gated)
#[cfg(feature = "evm")]
pub mod evm;

#[cfg(feature = "tron")]
pub mod tron;

// Re-export commonly used items at the crate root
pub use config::{ClientConfig, EvmConfig, FeeLimits, NotifierConfig, TronConfig};
pub use endpoints::RpcUrl;
pub use error::{ClientError, Result};
pub use normalize::{denormalize, normalize, to_base_units};
pub use notify::{AddressList, IpnRegistry, WebhookData, WebhookEventType};
pub use token::{TokenBinding, TokenDescriptor};
pub use types::{TransferKind, TransferReceipt};

#[cfg(feature = "evm")]
pub use evm::EvmClient;

#[cfg(feature = "tron")]
pub use tron::TronClient;
