//! Injected dependencies shared by the checkout reducers.

use crate::api::{AuthApi, Navigator, OrderApi, TokenStore};
use burger_checkout_core::environment::IdGenerator;
use std::sync::Arc;

/// Environment dependencies for the checkout reducers
///
/// One environment serves all three state containers and the orchestrator;
/// each reducer only touches the dependencies it needs.
#[derive(Clone)]
pub struct CheckoutEnvironment {
    /// Generator for composition entry identifiers
    pub ids: Arc<dyn IdGenerator>,
    /// The ordering service
    pub orders: Arc<dyn OrderApi>,
    /// The authentication and account service
    pub auth: Arc<dyn AuthApi>,
    /// Opaque token persistence side channel
    pub tokens: Arc<dyn TokenStore>,
    /// Routing collaborator
    pub navigator: Arc<dyn Navigator>,
}

impl CheckoutEnvironment {
    /// Creates a new `CheckoutEnvironment`
    #[must_use]
    pub fn new(
        ids: Arc<dyn IdGenerator>,
        orders: Arc<dyn OrderApi>,
        auth: Arc<dyn AuthApi>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            ids,
            orders,
            auth,
            tokens,
            navigator,
        }
    }
}
