//! Session context: who is signed in and what they may do.
//!
//! [`SessionStore`] is provided once by the `App` component and read by many
//! components. Only `refresh`, `login` and `logout` write to it.
use std::future::Future;

use leptos::logging::{log, warn};
use leptos::*;

use crate::api::ApiClient;
use crate::browser::Browser;
use crate::error::ApiError;
use crate::models::user::{AuthStatus, LoginRole, Role, User};

/// Grants owner-portal access beyond the backend's role claim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminPolicy {
    /// Addresses matched exactly.
    pub emails: Vec<String>,
    /// Any address ending in `@{domain}`.
    pub domain: Option<String>,
}

impl AdminPolicy {
    pub fn allows(&self, user: &User) -> bool {
        if user.role == Role::Admin {
            return true;
        }
        let Some(email) = user.email.as_deref() else {
            return false;
        };
        self.emails.iter().any(|allowed| allowed == email)
            || self
                .domain
                .as_deref()
                .is_some_and(|domain| email.ends_with(&format!("@{domain}")))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionStore {
    user: RwSignal<Option<User>>,
    loading: RwSignal<bool>,
    policy: StoredValue<AdminPolicy>,
}

impl SessionStore {
    /// Starts in the loading state until the first `refresh` completes.
    pub fn new(policy: AdminPolicy) -> Self {
        Self {
            user: create_rw_signal(None),
            loading: create_rw_signal(true),
            policy: store_value(policy),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn is_admin(&self) -> bool {
        self.user.with(|user| {
            user.as_ref()
                .is_some_and(|u| self.policy.with_value(|policy| policy.allows(u)))
        })
    }

    pub async fn refresh(&self, api: &ApiClient) {
        self.refresh_with(api.auth_status(), || api.current_user()).await
    }

    /// Asks whether the cookie is authenticated and, if so, loads the user.
    /// Any failure leaves the session signed out.
    pub async fn refresh_with<S, F, U>(&self, status: S, fetch_user: F)
    where
        S: Future<Output = Result<AuthStatus, ApiError>>,
        F: FnOnce() -> U,
        U: Future<Output = Result<User, ApiError>>,
    {
        self.loading.set(true);
        let user = match status.await {
            Ok(AuthStatus { authenticated: true }) => match fetch_user().await {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("[SESSION] Could not load current user: {}", e);
                    None
                }
            },
            Ok(_) => None,
            Err(e) => {
                warn!("[SESSION] Auth status check failed: {}", e);
                None
            }
        };
        log!("[SESSION] Signed in: {}", user.is_some());
        self.user.set(user);
        self.loading.set(false);
    }

    pub fn login(&self, api: &ApiClient, role: LoginRole, browser: &impl Browser) {
        log!("[SESSION] Starting login as {}", role.as_query());
        browser.navigate(&api.login_url(role));
    }

    pub async fn logout(&self, api: &ApiClient, browser: &impl Browser) {
        self.logout_with(api.logout(), browser).await
    }

    /// Clears the session, cached storage and returns to `/` whatever the backend says.
    pub async fn logout_with<F>(&self, backend: F, browser: &impl Browser)
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        if let Err(e) = backend.await {
            warn!("[SESSION] Backend logout failed, clearing locally: {}", e);
        }
        self.user.set(None);
        browser.clear_storage();
        browser.navigate("/");
    }
}
