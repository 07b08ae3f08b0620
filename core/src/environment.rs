//! Environment module - Dependency injection traits
//!
//! All external dependencies are abstracted behind traits and injected
//! via the Environment parameter of a reducer. Production implementations
//! live next to the traits; deterministic test doubles live in the testing
//! crate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use burger_checkout_core::environment::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generator for locally-unique instance identifiers
///
/// State containers that hand out per-entry identifiers (as opposed to
/// catalog identifiers, which arrive from outside) obtain them here, so
/// tests can substitute a predictable sequence.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier, distinct from every previous one
    fn generate(&self) -> Uuid;
}

/// Production identifier generator backed by random UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        let ids = RandomIdGenerator;
        assert_ne!(ids.generate(), ids.generate());
    }
}
