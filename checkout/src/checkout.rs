//! Checkout orchestrator: composes the three containers and owns the
//! cross-container rules none of them can express alone.
//!
//! Child actions are delegated verbatim; child effects are lifted back into
//! the orchestrator's action space with [`Effect::map`]. The orchestrator
//! itself adds exactly three rules: the authentication gate in front of
//! submission, clearing the composition once a submission succeeds, and
//! routing back to the composition view on dismissal.

use crate::api::Route;
use crate::constructor::{ConstructorAction, ConstructorReducer, ConstructorState};
use crate::environment::CheckoutEnvironment;
use crate::order::{OrderAction, OrderReducer, OrderState};
use crate::session::{SessionAction, SessionReducer, SessionState};
use burger_checkout_core::{Effect, Reducer, SmallVec};
use serde::{Deserialize, Serialize};

/// Combined state of the checkout feature
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// The in-progress composition
    pub constructor: ConstructorState,
    /// The current submission
    pub order: OrderState,
    /// Authentication and account state
    pub session: SessionState,
}

impl CheckoutState {
    /// Creates the initial checkout state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Actions handled by the checkout orchestrator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CheckoutAction {
    /// Delegate to the composition container
    Constructor(ConstructorAction),
    /// Delegate to the submission container
    Order(OrderAction),
    /// Delegate to the session container
    Session(SessionAction),

    /// Submit the current composition, subject to the gating rules
    PlaceOrder,
    /// Dismiss the confirmation and return to the composition view
    DismissOrder,
}

/// Reducer composing the three containers
#[derive(Clone, Debug, Default)]
pub struct CheckoutReducer {
    constructor: ConstructorReducer,
    order: OrderReducer,
    session: SessionReducer,
}

impl CheckoutReducer {
    /// Creates a new `CheckoutReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            constructor: ConstructorReducer::new(),
            order: OrderReducer::new(),
            session: SessionReducer::new(),
        }
    }
}

fn lift<A, B>(
    effects: SmallVec<[Effect<A>; 4]>,
    wrap: fn(A) -> B,
) -> SmallVec<[Effect<B>; 4]>
where
    A: Send + 'static,
    B: Send + 'static,
{
    effects.into_iter().map(|effect| effect.map(wrap)).collect()
}

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::Constructor(action) => lift(
                self.constructor.reduce(&mut state.constructor, action, env),
                CheckoutAction::Constructor,
            ),

            CheckoutAction::Order(action) => {
                let was_submission_outcome = matches!(action, OrderAction::Submitted { .. });
                let effects = lift(
                    self.order.reduce(&mut state.order, action, env),
                    CheckoutAction::Order,
                );

                // A confirmed submission consumes the composition. Only a
                // clean fulfilment clears it; rejected or superseded
                // submissions leave the user's work intact.
                if was_submission_outcome
                    && !state.order.is_pending()
                    && state.order.error().is_none()
                {
                    state.constructor = ConstructorState::new();
                }

                effects
            },

            CheckoutAction::Session(action) => lift(
                self.session.reduce(&mut state.session, action, env),
                CheckoutAction::Session,
            ),

            CheckoutAction::PlaceOrder => {
                if !state.session.is_authenticated() {
                    // A routing decision, not an error
                    tracing::info!("submission requires a session, routing to login");
                    env.navigator.navigate(Route::Login);
                    return SmallVec::new();
                }

                if state.order.is_pending() {
                    tracing::debug!("submission refused: another one is in flight");
                    return SmallVec::new();
                }

                let Some(ingredients) = state.constructor.order_payload() else {
                    tracing::debug!("submission refused: no bun selected");
                    return SmallVec::new();
                };

                lift(
                    self.order.reduce(
                        &mut state.order,
                        OrderAction::Submit { ingredients },
                        env,
                    ),
                    CheckoutAction::Order,
                )
            },

            CheckoutAction::DismissOrder => {
                env.navigator.navigate(Route::Constructor);
                lift(
                    self.order.reduce(&mut state.order, OrderAction::Dismiss, env),
                    CheckoutAction::Order,
                )
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockEnvironment;
    use crate::types::{
        Ingredient, IngredientId, IngredientKind, OrderRecord, OrderStatus, Profile,
    };
    use burger_checkout_testing::{ReducerTest, assertions};
    use chrono::Utc;

    fn bun() -> Ingredient {
        Ingredient {
            id: IngredientId::from("bun-1"),
            kind: IngredientKind::Base,
            name: "Brioche".to_owned(),
            price: 50,
            image: None,
        }
    }

    fn cheese() -> Ingredient {
        Ingredient {
            id: IngredientId::from("cheese-1"),
            kind: IngredientKind::Filling,
            name: "Cheddar".to_owned(),
            price: 10,
            image: None,
        }
    }

    fn authenticated_session() -> SessionState {
        let mut session = SessionState::new();
        session.authenticated = true;
        session.user = Some(Profile {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
        });
        session
    }

    fn composed_state(session: SessionState) -> CheckoutState {
        let mocks = MockEnvironment::new();
        let reducer = CheckoutReducer::new();
        let mut state = CheckoutState::new();
        for ingredient in [bun(), cheese()] {
            let _ = reducer.reduce(
                &mut state,
                CheckoutAction::Constructor(ConstructorAction::Add { ingredient }),
                &mocks.env,
            );
        }
        state.session = session;
        state
    }

    fn record(number: u32) -> OrderRecord {
        OrderRecord {
            number,
            ingredients: vec![IngredientId::from("bun-1"), IngredientId::from("bun-1")],
            status: OrderStatus::Created,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn place_order_without_a_session_routes_to_login() {
        let mocks = MockEnvironment::new();
        let state = composed_state(SessionState::new());

        ReducerTest::new(CheckoutReducer::new())
            .with_env(mocks.env.clone())
            .given_state(state)
            .when_action(CheckoutAction::PlaceOrder)
            .then_state(|state| {
                assert_eq!(state.order, OrderState::Idle);
                assert!(!state.constructor.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(mocks.navigator.routes(), vec![Route::Login]);
        assert_eq!(mocks.orders.calls().len(), 0);
    }

    #[test]
    fn place_order_without_a_bun_is_refused_silently() {
        let mocks = MockEnvironment::new();
        let reducer = CheckoutReducer::new();
        let mut state = CheckoutState::new();
        state.session = authenticated_session();
        let _ = reducer.reduce(
            &mut state,
            CheckoutAction::Constructor(ConstructorAction::Add { ingredient: cheese() }),
            &mocks.env,
        );

        let effects = reducer.reduce(&mut state, CheckoutAction::PlaceOrder, &mocks.env);

        assertions::assert_no_effects(&effects);
        assert_eq!(state.order, OrderState::Idle);
        assert!(mocks.navigator.routes().is_empty());
    }

    #[test]
    fn place_order_while_pending_is_refused_silently() {
        let mocks = MockEnvironment::new();
        let reducer = CheckoutReducer::new();
        let mut state = composed_state(authenticated_session());
        state.order = OrderState::Pending;

        let effects = reducer.reduce(&mut state, CheckoutAction::PlaceOrder, &mocks.env);

        assertions::assert_no_effects(&effects);
        assert!(state.order.is_pending());
        assert!(mocks.navigator.routes().is_empty());
    }

    #[test]
    fn place_order_dispatches_the_protocol_payload() {
        let mocks = MockEnvironment::new();
        let state = composed_state(authenticated_session());

        ReducerTest::new(CheckoutReducer::new())
            .with_env(mocks.env.clone())
            .given_state(state)
            .when_action(CheckoutAction::PlaceOrder)
            .then_state(|state| {
                assert!(state.order.is_pending());
                // The composition survives until the outcome arrives
                assert!(!state.constructor.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn fulfilment_clears_the_composition() {
        let mocks = MockEnvironment::new();
        let reducer = CheckoutReducer::new();
        let mut state = composed_state(authenticated_session());
        state.order = OrderState::Pending;

        let effects = reducer.reduce(
            &mut state,
            CheckoutAction::Order(OrderAction::Submitted { record: record(42) }),
            &mocks.env,
        );

        assertions::assert_no_effects(&effects);
        assert_eq!(state.order.record().map(|r| r.number), Some(42));
        assert!(state.constructor.is_empty());
    }

    #[test]
    fn rejection_leaves_the_composition_intact() {
        let mocks = MockEnvironment::new();
        let reducer = CheckoutReducer::new();
        let mut state = composed_state(authenticated_session());
        state.order = OrderState::Pending;

        let effects = reducer.reduce(
            &mut state,
            CheckoutAction::Order(OrderAction::Failed {
                error: "out of stock".to_owned(),
            }),
            &mocks.env,
        );

        assertions::assert_no_effects(&effects);
        assert_eq!(state.order.error(), Some("out of stock"));
        assert!(!state.constructor.is_empty());
    }

    #[test]
    fn dismiss_resets_the_order_and_routes_home() {
        let mocks = MockEnvironment::new();
        let reducer = CheckoutReducer::new();
        let mut state = CheckoutState::new();
        state.session = authenticated_session();
        state.order = OrderState::Fulfilled { record: record(42) };

        let effects = reducer.reduce(&mut state, CheckoutAction::DismissOrder, &mocks.env);

        assertions::assert_no_effects(&effects);
        assert_eq!(state.order, OrderState::Idle);
        assert_eq!(mocks.navigator.routes(), vec![Route::Constructor]);
    }

    #[test]
    fn delegated_session_actions_flow_through() {
        let mocks = MockEnvironment::new();
        let state = CheckoutState::new();

        ReducerTest::new(CheckoutReducer::new())
            .with_env(mocks.env.clone())
            .given_state(state)
            .when_action(CheckoutAction::Session(SessionAction::FetchProfile))
            .then_state(|state| assert!(state.session.is_restoring()))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }
}
