//! In-memory mock collaborators for tests and demos.
//!
//! Each mock records the calls it receives and can be steered through
//! interior mutability, so one instance can be shared between the
//! environment under test and the assertions inspecting it.

use crate::api::{
    ApiFuture, AuthApi, AuthSession, Navigator, OrderApi, RequestError, Route, TokenStore,
};
use crate::environment::CheckoutEnvironment;
use crate::types::{
    Credentials, IngredientId, OrderRecord, OrderStatus, Profile, ProfileUpdate, Registration,
};
use burger_checkout_core::environment::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ordering service mock recording every submission it receives
pub struct MockOrderApi {
    calls: Mutex<Vec<Vec<IngredientId>>>,
    next_number: AtomicU32,
    delay: Mutex<Option<Duration>>,
    failure: Mutex<Option<RequestError>>,
    clock: Box<dyn Clock>,
}

impl Default for MockOrderApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOrderApi {
    /// Creates a mock that fulfils every submission
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Creates a mock stamping confirmation records with the given clock
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_number: AtomicU32::new(1),
            delay: Mutex::new(None),
            failure: Mutex::new(None),
            clock,
        }
    }

    /// Confirmation number the next fulfilment will carry
    pub fn set_next_number(&self, number: u32) {
        self.next_number.store(number, Ordering::SeqCst);
    }

    /// Hold every submission for `delay` before resolving
    pub fn set_delay(&self, delay: Duration) {
        *locked(&self.delay) = Some(delay);
    }

    /// Reject every subsequent submission with `error`
    pub fn fail_with(&self, error: RequestError) {
        *locked(&self.failure) = Some(error);
    }

    /// Every payload received so far, in arrival order
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<IngredientId>> {
        locked(&self.calls).clone()
    }
}

impl OrderApi for MockOrderApi {
    fn submit_order(&self, ingredients: Vec<IngredientId>) -> ApiFuture<'_, OrderRecord> {
        locked(&self.calls).push(ingredients.clone());

        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        let delay = *locked(&self.delay);
        let failure = locked(&self.failure).clone();
        let created_at = self.clock.now();

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(error) = failure {
                return Err(error);
            }
            Ok(OrderRecord {
                number,
                ingredients,
                status: OrderStatus::Created,
                created_at,
            })
        })
    }
}

/// Authentication service mock with a single configurable account
#[derive(Debug)]
pub struct MockAuthApi {
    profile: Mutex<Profile>,
    history: Mutex<Vec<OrderRecord>>,
    failure: Mutex<Option<RequestError>>,
    logout_calls: AtomicUsize,
}

impl Default for MockAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuthApi {
    /// Creates a mock that accepts every operation
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: Mutex::new(Profile {
                name: "Mock User".to_owned(),
                email: "mock@example.com".to_owned(),
            }),
            history: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            logout_calls: AtomicUsize::new(0),
        }
    }

    /// Replace the stored account profile
    pub fn set_profile(&self, profile: Profile) {
        *locked(&self.profile) = profile;
    }

    /// History returned by `order_history`
    pub fn set_history(&self, orders: Vec<OrderRecord>) {
        *locked(&self.history) = orders;
    }

    /// Reject every subsequent operation with `error`
    pub fn fail_with(&self, error: RequestError) {
        *locked(&self.failure) = Some(error);
    }

    /// How many times `logout` has been called
    #[must_use]
    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    fn outcome<T>(&self, value: T) -> Result<T, RequestError> {
        match locked(&self.failure).clone() {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }

    fn session(&self) -> AuthSession {
        AuthSession {
            user: locked(&self.profile).clone(),
            access_token: "access-token".to_owned(),
            refresh_token: "refresh-token".to_owned(),
        }
    }
}

impl AuthApi for MockAuthApi {
    fn login(&self, _credentials: Credentials) -> ApiFuture<'_, AuthSession> {
        let outcome = self.outcome(self.session());
        Box::pin(async move { outcome })
    }

    fn register(&self, registration: Registration) -> ApiFuture<'_, AuthSession> {
        self.set_profile(Profile {
            name: registration.name,
            email: registration.email,
        });
        let outcome = self.outcome(self.session());
        Box::pin(async move { outcome })
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome(());
        Box::pin(async move { outcome })
    }

    fn fetch_profile(&self) -> ApiFuture<'_, Profile> {
        let outcome = self.outcome(locked(&self.profile).clone());
        Box::pin(async move { outcome })
    }

    fn update_profile(&self, update: ProfileUpdate) -> ApiFuture<'_, Profile> {
        {
            let mut profile = locked(&self.profile);
            if let Some(name) = update.name {
                profile.name = name;
            }
            if let Some(email) = update.email {
                profile.email = email;
            }
        }
        let outcome = self.outcome(locked(&self.profile).clone());
        Box::pin(async move { outcome })
    }

    fn order_history(&self) -> ApiFuture<'_, Vec<OrderRecord>> {
        let outcome = self.outcome(locked(&self.history).clone());
        Box::pin(async move { outcome })
    }
}

/// Token store backed by a map, readable for assertions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored under `name`, if any
    #[must_use]
    pub fn token(&self, name: &str) -> Option<String> {
        locked(&self.tokens).get(name).cloned()
    }
}

impl TokenStore for MemoryTokenStore {
    fn set_token(&self, name: &str, value: &str) {
        locked(&self.tokens).insert(name.to_owned(), value.to_owned());
    }

    fn clear_token(&self, name: &str) {
        locked(&self.tokens).remove(name);
    }
}

/// Navigator recording every requested route
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Creates a navigator with an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route requested so far, in order
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        locked(&self.routes).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        locked(&self.routes).push(route);
    }
}

/// A full environment wired to mocks, with handles kept for assertions
pub struct MockEnvironment {
    /// The environment to hand to reducers and stores
    pub env: CheckoutEnvironment,
    /// The ordering service behind `env`
    pub orders: Arc<MockOrderApi>,
    /// The authentication service behind `env`
    pub auth: Arc<MockAuthApi>,
    /// The token store behind `env`
    pub tokens: Arc<MemoryTokenStore>,
    /// The navigator behind `env`
    pub navigator: Arc<RecordingNavigator>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    /// Creates a fully mocked environment with random entry identifiers
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(Arc::new(RandomIdGenerator))
    }

    /// Creates a fully mocked environment with the given identifier
    /// generator, for tests that assert on entry identifiers
    #[must_use]
    pub fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        let orders = Arc::new(MockOrderApi::new());
        let auth = Arc::new(MockAuthApi::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let navigator = Arc::new(RecordingNavigator::new());

        let env = CheckoutEnvironment::new(
            ids,
            Arc::clone(&orders) as Arc<dyn OrderApi>,
            Arc::clone(&auth) as Arc<dyn AuthApi>,
            Arc::clone(&tokens) as Arc<dyn TokenStore>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
        );

        Self {
            env,
            orders,
            auth,
            tokens,
            navigator,
        }
    }
}
