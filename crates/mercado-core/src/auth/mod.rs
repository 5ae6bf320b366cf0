//! Authentication domain module.
//!
//! The identity provider itself is an external service; this module only
//! describes what the application sees of it.
//!
//! # Module Structure
//!
//! - `model`: user, state and credential shapes
//! - `provider`: `IdentityProvider` trait implemented by provider adapters
//! - `messages`: provider error codes mapped to pt-BR messages

mod messages;
mod model;
mod provider;

pub use messages::{DEFAULT_AUTH_ERROR, auth_error_message};
pub use model::{AuthState, AuthUser, LoginCredentials, RegisterCredentials};
pub use provider::{IdentityProvider, ProviderError, ProviderUser};
