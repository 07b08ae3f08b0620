//! Client-side state core for a burger ordering checkout flow.
//!
//! Three state containers and one orchestrator, all expressed as reducers:
//!
//! - [`constructor`]: the in-progress composition (one bun slot, ordered
//!   fillings)
//! - [`order`]: the lifecycle of a single submission
//! - [`session`]: authentication, profile, and order history
//! - [`checkout`]: composes the three and owns the cross-container rules
//!   (auth gate, clear-on-fulfilment, routing)
//!
//! Reducers are pure state transitions; every remote call leaves through an
//! [`Effect`](burger_checkout_core::Effect) and comes back as an action.
//! External collaborators are injected via
//! [`CheckoutEnvironment`](environment::CheckoutEnvironment).

pub mod api;
pub mod checkout;
pub mod constructor;
pub mod environment;
pub mod mocks;
pub mod order;
pub mod session;
pub mod types;

pub use checkout::{CheckoutAction, CheckoutReducer, CheckoutState};
pub use constructor::{ConstructorAction, ConstructorReducer, ConstructorState, MoveDirection};
pub use environment::CheckoutEnvironment;
pub use order::{OrderAction, OrderReducer, OrderState};
pub use session::{SessionAction, SessionReducer, SessionState};
