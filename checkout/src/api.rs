//! Remote procedure and side-channel interfaces consumed by the core.
//!
//! The ordering and authentication services are opaque to this crate: only
//! their signatures matter here, transport is somebody else's problem. The
//! traits use explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
//! so they stay dyn-compatible (`Arc<dyn OrderApi>` inside effects).

use crate::types::{
    Credentials, IngredientId, OrderRecord, Profile, ProfileUpdate, Registration,
};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Name under which the short-lived access token is persisted
pub const ACCESS_TOKEN: &str = "accessToken";

/// Name under which the refresh token is persisted
pub const REFRESH_TOKEN: &str = "refreshToken";

/// Failure of a remote call, transport-level or reported by the service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The request never completed (connectivity, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The service rejected the request
    #[error("{0}")]
    Service(String),
}

/// Boxed future returned by the remote-procedure traits
pub type ApiFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RequestError>> + Send + 'a>>;

/// The ordering service
pub trait OrderApi: Send + Sync {
    /// Submit an assembled ingredient sequence and receive a confirmation
    /// record.
    ///
    /// The sequence must already be in protocol order: the bun identifier
    /// first and last, fillings in between.
    fn submit_order(&self, ingredients: Vec<IngredientId>) -> ApiFuture<'_, OrderRecord>;
}

/// Tokens and profile returned by a successful login or registration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    /// The authenticated user's profile
    pub user: Profile,
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
}

/// The authentication and account service
pub trait AuthApi: Send + Sync {
    /// Authenticate with email and password
    fn login(&self, credentials: Credentials) -> ApiFuture<'_, AuthSession>;

    /// Create an account, then authenticate
    fn register(&self, registration: Registration) -> ApiFuture<'_, AuthSession>;

    /// Invalidate the current session server-side
    fn logout(&self) -> ApiFuture<'_, ()>;

    /// Fetch the profile for the persisted token, validating the session
    fn fetch_profile(&self) -> ApiFuture<'_, Profile>;

    /// Apply a partial profile update, returning the updated profile
    fn update_profile(&self, update: ProfileUpdate) -> ApiFuture<'_, Profile>;

    /// Fetch the user's past orders, newest first
    fn order_history(&self) -> ApiFuture<'_, Vec<OrderRecord>>;
}

/// Write-mostly persistence side channel for auth tokens
///
/// Tokens are written on successful login/registration and cleared on
/// logout; this core never reads them back.
pub trait TokenStore: Send + Sync {
    /// Persist a token under the given name, replacing any previous value
    fn set_token(&self, name: &str, value: &str);

    /// Remove the token with the given name, if present
    fn clear_token(&self, name: &str);
}

/// Destinations the orchestrator can route to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// The composition view
    Constructor,
    /// The login flow
    Login,
}

/// Routing collaborator the orchestrator signals into
///
/// Redirecting an unauthenticated user to the login flow is a routing
/// decision, not an error; this trait is how that decision leaves the core.
pub trait Navigator: Send + Sync {
    /// Request navigation to the given route
    fn navigate(&self, route: Route);
}
