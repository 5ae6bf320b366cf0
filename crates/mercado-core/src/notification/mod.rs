//! Push notification domain module.
//!
//! Builds gateway payloads and defines the gateway seam. Delivery over the
//! wire is handled by `mercado-infrastructure`.

mod gateway;
mod payload;

pub use gateway::{PushGateway, PushResponse};
pub use payload::{CLICK_ACTION, DEFAULT_ICON, PushMessage, PushTarget, build_payload};
