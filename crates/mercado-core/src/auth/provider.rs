//! Identity provider trait.

use async_trait::async_trait;

/// User record as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
}

/// Failure reported by the identity provider, identified by its error code
/// (e.g. `auth/wrong-password`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub code: String,
}

impl ProviderError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "identity provider error: {}", self.code)
    }
}

impl std::error::Error for ProviderError {}

/// An abstract identity provider (hosted auth service, test double, ...).
///
/// Implementations report sign-in state changes by calling
/// `AuthService::handle_provider_user` in the application layer.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, ProviderError>;

    async fn create_user(&self, email: &str, password: &str)
    -> Result<ProviderUser, ProviderError>;

    /// Sets the display name of a freshly created account.
    async fn update_display_name(
        &self,
        uid: &str,
        display_name: &str,
    ) -> Result<ProviderUser, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;
}
