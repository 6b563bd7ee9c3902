//! IPN notification service integration
//!
//! - `registry` - manage the list of watched addresses
//! - `webhook` - typed model of the callbacks the service delivers

pub mod registry;
pub mod webhook;

pub use registry::{AddressList, IpnRegistry};
pub use webhook::{WebhookData, WebhookEventType, WebhookInfo, WebhookLog};
