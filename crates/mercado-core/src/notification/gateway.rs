use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Raw answer of the push gateway.
///
/// Non-2xx statuses are not errors at this level; the gateway reports
/// per-recipient failures inside a 200 body anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResponse {
    pub status: u16,
    pub body: String,
}

impl PushResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one prepared payload to a push gateway.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Issues a single request; transport failures are `Err`.
    async fn send(&self, payload: &Value) -> Result<PushResponse>;
}
