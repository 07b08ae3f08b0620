//! # Burger Checkout Testing
//!
//! Testing utilities and helpers for the burger checkout state architecture.
//!
//! This crate provides:
//! - Mock implementations of the core Environment traits
//! - The fluent [`ReducerTest`] harness for Given-When-Then reducer tests
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use burger_checkout_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(OrderReducer)
//!     .with_env(test_environment())
//!     .given_state(OrderState::Idle)
//!     .when_action(OrderAction::Dismiss)
//!     .then_state(|state| assert!(matches!(state, OrderState::Idle)))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use burger_checkout_core::environment::{Clock, IdGenerator};
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use burger_checkout_testing::mocks::FixedClock;
    /// use burger_checkout_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Identifier generator producing a predictable sequence
    ///
    /// Generated identifiers embed a monotonic counter, so tests can rely on
    /// both uniqueness and ordering.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting from zero
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> Uuid {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            Uuid::from_u128(u128::from(n))
        }
    }
}
