use serde::{Deserialize, Serialize};

use super::provider::ProviderUser;

/// Normalized signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub email_verified: bool,
}

impl AuthUser {
    /// Admin accounts live under an `@admin.` mail domain.
    pub fn is_admin(&self) -> bool {
        self.email
            .as_deref()
            .is_some_and(|email| email.contains("@admin."))
    }
}

impl From<ProviderUser> for AuthUser {
    fn from(user: ProviderUser) -> Self {
        Self {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            photo_url: user.photo_url,
            email_verified: user.email_verified,
        }
    }
}

/// Snapshot handed to every auth-state subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    /// Nothing is known until the provider reports its first state.
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCredentials {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
