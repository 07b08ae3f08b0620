//! # Burger Checkout Core
//!
//! Core traits and types for the burger checkout state architecture.
//!
//! This crate provides the fundamental abstractions the checkout state
//! containers are built on: the Reducer pattern with explicit effects and
//! injected dependencies.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for one container (composition, submission, session)
//! - **Action**: All possible inputs to a reducer (commands and completion events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use burger_checkout_core::{Effect, Reducer, SmallVec};
//!
//! impl Reducer for OrderReducer {
//!     type State = OrderState;
//!     type Action = OrderAction;
//!     type Environment = OrderEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut OrderState,
//!         action: OrderAction,
//!         env: &OrderEnvironment,
//!     ) -> SmallVec<[Effect<OrderAction>; 4]> {
//!         // Business logic goes here
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

pub mod effect;
pub mod environment;
pub mod reducer;

pub use effect::Effect;
pub use reducer::Reducer;
