//! Submission container: the lifecycle of one in-flight order request.
//!
//! `Idle → Pending → Fulfilled | Rejected`, back to `Idle` only through an
//! explicit dismiss. At most one submission is in flight at a time; a
//! `Submit` arriving while `Pending` is refused without a transition.

use crate::environment::CheckoutEnvironment;
use crate::types::{IngredientId, OrderRecord};
use burger_checkout_core::{Effect, Reducer, SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// State machine of the current submission
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// No submission in progress and no confirmation on display
    #[default]
    Idle,
    /// A submission is in flight
    Pending,
    /// The service accepted the order
    Fulfilled {
        /// Confirmation record returned by the service
        record: OrderRecord,
    },
    /// The submission failed
    Rejected {
        /// Error description for display
        error: String,
    },
}

impl OrderState {
    /// Whether a submission is currently in flight
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The confirmation record, when fulfilled
    #[must_use]
    pub const fn record(&self) -> Option<&OrderRecord> {
        match self {
            Self::Fulfilled { record } => Some(record),
            _ => None,
        }
    }

    /// The recorded submission error, when rejected
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected { error } => Some(error),
            _ => None,
        }
    }
}

/// Commands and completion events of the submission lifecycle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum OrderAction {
    /// Command: submit an assembled payload to the ordering service
    Submit {
        /// Ingredient identifiers in protocol order (bun first and last)
        ingredients: Vec<IngredientId>,
    },

    /// Event: the service accepted the order
    Submitted {
        /// Confirmation record returned by the service
        record: OrderRecord,
    },

    /// Event: the submission failed
    Failed {
        /// Error description
        error: String,
    },

    /// Command: drop the stored confirmation and return to `Idle`
    Dismiss,
}

/// Reducer for the submission container
#[derive(Clone, Debug, Default)]
pub struct OrderReducer;

impl OrderReducer {
    /// Creates a new `OrderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for OrderReducer {
    type State = OrderState;
    type Action = OrderAction;
    type Environment = CheckoutEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OrderAction::Submit { ingredients } => {
                if state.is_pending() {
                    // Concurrent submissions are not permitted
                    tracing::debug!("submission refused: another one is in flight");
                    return SmallVec::new();
                }

                *state = OrderState::Pending;

                let orders = Arc::clone(&env.orders);
                smallvec![Effect::Future(Box::pin(async move {
                    match orders.submit_order(ingredients).await {
                        Ok(record) => Some(OrderAction::Submitted { record }),
                        Err(error) => Some(OrderAction::Failed {
                            error: error.to_string(),
                        }),
                    }
                }))]
            },

            // Applied whatever the current phase: the most recently resolved
            // outcome determines final state
            OrderAction::Submitted { record } => {
                *state = OrderState::Fulfilled { record };
                SmallVec::new()
            },

            OrderAction::Failed { error } => {
                *state = OrderState::Rejected { error };
                SmallVec::new()
            },

            OrderAction::Dismiss => {
                *state = OrderState::Idle;
                SmallVec::new()
            },
        }
    }
}
