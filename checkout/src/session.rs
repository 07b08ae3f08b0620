//! Session container: authentication, profile, and order history.
//!
//! Every remote operation follows the same command/event pair shape: the
//! command raises its pending flag, clears the shared last error, and emits
//! one remote-call effect; the completion event lowers the flag and applies
//! the outcome. Logout is the exception, applied optimistically before the
//! service confirms.

use crate::api::{ACCESS_TOKEN, REFRESH_TOKEN};
use crate::environment::CheckoutEnvironment;
use crate::types::{Credentials, OrderRecord, Profile, ProfileUpdate, Registration};
use burger_checkout_core::{Effect, Reducer, SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Authentication and account state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether a session is currently established
    pub authenticated: bool,
    /// Profile of the authenticated user, when known
    pub user: Option<Profile>,
    /// The user's past orders, newest first
    pub orders: Vec<OrderRecord>,
    /// A login request is in flight
    pub login_pending: bool,
    /// A session restore (profile fetch) is in flight
    pub restore_pending: bool,
    /// A registration request is in flight
    pub register_pending: bool,
    /// A profile update is in flight
    pub update_pending: bool,
    /// An order history fetch is in flight
    pub orders_pending: bool,
    /// Error reported by the most recent failed operation
    pub last_error: Option<String>,
}

impl SessionState {
    /// Creates an empty, unauthenticated session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is currently established
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether a session restore is still in flight
    ///
    /// Consumers gate route decisions on this to avoid flashing the login
    /// screen while a persisted token is being validated.
    #[must_use]
    pub const fn is_restoring(&self) -> bool {
        self.restore_pending
    }
}

/// Commands and completion events of the session lifecycle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SessionAction {
    /// Command: authenticate with credentials
    Login {
        /// Email and password
        credentials: Credentials,
    },
    /// Event: login succeeded
    LoggedIn {
        /// The authenticated profile
        user: Profile,
    },
    /// Event: login failed
    LoginFailed {
        /// Error description
        error: String,
    },

    /// Command: create an account and authenticate
    Register {
        /// Account data
        registration: Registration,
    },
    /// Event: registration succeeded
    Registered {
        /// The newly authenticated profile
        user: Profile,
    },
    /// Event: registration failed
    RegisterFailed {
        /// Error description
        error: String,
    },

    /// Command: end the session, applied optimistically
    Logout,

    /// Command: validate the persisted token and restore the session
    FetchProfile,
    /// Event: the persisted token is valid
    ProfileFetched {
        /// The restored profile
        user: Profile,
    },
    /// Event: the persisted token is invalid or the fetch failed
    ProfileFetchFailed {
        /// Error description
        error: String,
    },

    /// Command: apply a partial profile update
    UpdateProfile {
        /// Fields to change
        update: ProfileUpdate,
    },
    /// Event: the update was applied
    ProfileUpdated {
        /// The updated profile
        user: Profile,
    },
    /// Event: the update failed
    ProfileUpdateFailed {
        /// Error description
        error: String,
    },

    /// Command: fetch the user's order history
    FetchOrderHistory,
    /// Event: history arrived
    OrderHistoryFetched {
        /// Past orders, newest first
        orders: Vec<OrderRecord>,
    },
    /// Event: the history fetch failed
    OrderHistoryFailed {
        /// Error description
        error: String,
    },

    /// Command: drop the stored error
    ClearError,
}

/// Reducer for the session container
#[derive(Clone, Debug, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Creates a new `SessionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = CheckoutEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SessionAction::Login { credentials } => {
                state.login_pending = true;
                state.last_error = None;

                let auth = Arc::clone(&env.auth);
                let tokens = Arc::clone(&env.tokens);
                smallvec![Effect::Future(Box::pin(async move {
                    match auth.login(credentials).await {
                        Ok(session) => {
                            tokens.set_token(ACCESS_TOKEN, &session.access_token);
                            tokens.set_token(REFRESH_TOKEN, &session.refresh_token);
                            Some(SessionAction::LoggedIn { user: session.user })
                        },
                        Err(error) => Some(SessionAction::LoginFailed {
                            error: error.to_string(),
                        }),
                    }
                }))]
            },

            SessionAction::LoggedIn { user } => {
                state.login_pending = false;
                state.authenticated = true;
                state.user = Some(user);
                SmallVec::new()
            },

            SessionAction::LoginFailed { error } => {
                tracing::warn!(%error, "login failed");
                state.login_pending = false;
                state.last_error = Some(error);
                SmallVec::new()
            },

            SessionAction::Register { registration } => {
                state.register_pending = true;
                state.last_error = None;

                let auth = Arc::clone(&env.auth);
                let tokens = Arc::clone(&env.tokens);
                smallvec![Effect::Future(Box::pin(async move {
                    match auth.register(registration).await {
                        Ok(session) => {
                            tokens.set_token(ACCESS_TOKEN, &session.access_token);
                            tokens.set_token(REFRESH_TOKEN, &session.refresh_token);
                            Some(SessionAction::Registered { user: session.user })
                        },
                        Err(error) => Some(SessionAction::RegisterFailed {
                            error: error.to_string(),
                        }),
                    }
                }))]
            },

            SessionAction::Registered { user } => {
                state.register_pending = false;
                state.authenticated = true;
                state.user = Some(user);
                SmallVec::new()
            },

            SessionAction::RegisterFailed { error } => {
                tracing::warn!(%error, "registration failed");
                state.register_pending = false;
                state.last_error = Some(error);
                SmallVec::new()
            },

            // Optimistic: local state is cleared immediately, the remote
            // invalidation is fire-and-forget and never feeds back.
            SessionAction::Logout => {
                state.authenticated = false;
                state.user = None;
                state.last_error = None;

                let auth = Arc::clone(&env.auth);
                let tokens = Arc::clone(&env.tokens);
                smallvec![Effect::Future(Box::pin(async move {
                    match auth.logout().await {
                        Ok(()) => {
                            tokens.clear_token(ACCESS_TOKEN);
                            tokens.clear_token(REFRESH_TOKEN);
                        },
                        Err(error) => {
                            tracing::warn!(%error, "remote logout failed");
                        },
                    }
                    None
                }))]
            },

            SessionAction::FetchProfile => {
                state.restore_pending = true;
                state.last_error = None;

                let auth = Arc::clone(&env.auth);
                smallvec![Effect::Future(Box::pin(async move {
                    match auth.fetch_profile().await {
                        Ok(user) => Some(SessionAction::ProfileFetched { user }),
                        Err(error) => Some(SessionAction::ProfileFetchFailed {
                            error: error.to_string(),
                        }),
                    }
                }))]
            },

            SessionAction::ProfileFetched { user } => {
                state.restore_pending = false;
                state.authenticated = true;
                state.user = Some(user);
                SmallVec::new()
            },

            SessionAction::ProfileFetchFailed { error } => {
                tracing::debug!(%error, "session restore failed");
                state.restore_pending = false;
                state.authenticated = false;
                state.user = None;
                state.last_error = Some(error);
                SmallVec::new()
            },

            SessionAction::UpdateProfile { update } => {
                state.update_pending = true;
                state.last_error = None;

                let auth = Arc::clone(&env.auth);
                smallvec![Effect::Future(Box::pin(async move {
                    match auth.update_profile(update).await {
                        Ok(user) => Some(SessionAction::ProfileUpdated { user }),
                        Err(error) => Some(SessionAction::ProfileUpdateFailed {
                            error: error.to_string(),
                        }),
                    }
                }))]
            },

            // Replaces the stored profile without touching the
            // authentication flag.
            SessionAction::ProfileUpdated { user } => {
                state.update_pending = false;
                state.user = Some(user);
                SmallVec::new()
            },

            SessionAction::ProfileUpdateFailed { error } => {
                tracing::warn!(%error, "profile update failed");
                state.update_pending = false;
                state.last_error = Some(error);
                SmallVec::new()
            },

            SessionAction::FetchOrderHistory => {
                state.orders_pending = true;
                state.last_error = None;

                let auth = Arc::clone(&env.auth);
                smallvec![Effect::Future(Box::pin(async move {
                    match auth.order_history().await {
                        Ok(orders) => Some(SessionAction::OrderHistoryFetched { orders }),
                        Err(error) => Some(SessionAction::OrderHistoryFailed {
                            error: error.to_string(),
                        }),
                    }
                }))]
            },

            // Wholesale replacement, never a merge
            SessionAction::OrderHistoryFetched { orders } => {
                state.orders_pending = false;
                state.orders = orders;
                SmallVec::new()
            },

            SessionAction::OrderHistoryFailed { error } => {
                tracing::warn!(%error, "order history fetch failed");
                state.orders_pending = false;
                state.last_error = Some(error);
                SmallVec::new()
            },

            SessionAction::ClearError => {
                state.last_error = None;
                SmallVec::new()
            },
        }
    }
}
