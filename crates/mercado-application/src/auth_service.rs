//! Auth state tracking on top of an injected identity provider.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use mercado_core::auth::{
    AuthState, AuthUser, IdentityProvider, LoginCredentials, ProviderError, ProviderUser,
    RegisterCredentials, auth_error_message,
};
use mercado_core::error::{MercadoError, Result};

/// Callback invoked with the full state after every change.
pub type AuthListener = Arc<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, AuthListener)>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by [`AuthService::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    /// Removes exactly the listener this handle was created for.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Tracks the signed-in user and fans state changes out to subscribers.
///
/// Listeners are called outside of any internal lock, so a listener may
/// query the service (or subscribe another listener) while handling a
/// change.
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    state: Mutex<AuthState>,
    listeners: Arc<Mutex<ListenerRegistry>>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(AuthState::default()),
            listeners: Arc::new(Mutex::new(ListenerRegistry::default())),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.listeners);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    /// Provider hook for sign-in state changes.
    pub fn handle_provider_user(&self, user: Option<ProviderUser>) {
        self.update(|state| {
            state.user = user.map(AuthUser::from);
            state.loading = false;
            state.error = None;
        });
    }

    pub fn current_state(&self) -> AuthState {
        lock(&self.state).clone()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        lock(&self.state).user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.state).user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn clear_error(&self) {
        self.update(|state| state.error = None);
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`MercadoError::Auth`] carrying the localized message, which
    /// is also stored as the state's `error`.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthUser> {
        self.begin();
        match self
            .provider
            .sign_in(&credentials.email, &credentials.password)
            .await
        {
            Ok(user) => Ok(self.signed_in(user)),
            Err(e) => Err(self.fail("Login", e)),
        }
    }

    /// Creates an account, then applies the display name when one is given.
    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthUser> {
        self.begin();

        let created = self
            .provider
            .create_user(&credentials.email, &credentials.password)
            .await;
        let mut user = match created {
            Ok(user) => user,
            Err(e) => return Err(self.fail("Register", e)),
        };

        if let Some(name) = credentials.display_name.as_deref() {
            user = match self.provider.update_display_name(&user.uid, name).await {
                Ok(updated) => updated,
                Err(e) => return Err(self.fail("Register", e)),
            };
        }

        Ok(self.signed_in(user))
    }

    pub async fn logout(&self) -> Result<()> {
        self.begin();
        match self.provider.sign_out().await {
            Ok(()) => {
                self.handle_provider_user(None);
                Ok(())
            }
            Err(e) => Err(self.fail("Logout", e)),
        }
    }

    /// Runs `callback` only when somebody is signed in.
    pub fn require_auth<F: FnOnce()>(&self, callback: F) -> bool {
        if self.is_authenticated() {
            callback();
            true
        } else {
            tracing::warn!("[Auth] Authentication required");
            false
        }
    }

    /// Runs `callback` only when the signed-in user is an admin.
    pub fn require_admin<F: FnOnce()>(&self, callback: F) -> bool {
        let is_admin = self.current_user().is_some_and(|user| user.is_admin());
        if is_admin {
            callback();
            true
        } else {
            tracing::warn!("[Auth] Admin access required");
            false
        }
    }

    fn begin(&self) {
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn signed_in(&self, user: ProviderUser) -> AuthUser {
        let user = AuthUser::from(user);
        let snapshot = user.clone();
        self.update(move |state| {
            state.user = Some(snapshot);
            state.loading = false;
            state.error = None;
        });
        user
    }

    fn fail(&self, operation: &str, error: ProviderError) -> MercadoError {
        let message = auth_error_message(&error.code);
        tracing::error!("[Auth] {} failed: {}", operation, error);
        self.update(|state| {
            state.error = Some(message.to_string());
            state.loading = false;
        });
        MercadoError::auth(message)
    }

    fn update<F: FnOnce(&mut AuthState)>(&self, change: F) {
        let snapshot = {
            let mut state = lock(&self.state);
            change(&mut state);
            state.clone()
        };
        let listeners: Vec<AuthListener> = lock(&self.listeners)
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&snapshot);
        }
    }
}
