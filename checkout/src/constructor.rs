//! Composition container: the in-progress item a user is assembling.
//!
//! One exclusive bun slot plus an ordered filling sequence. Every operation
//! is a synchronous state transition; this reducer never produces effects.

use crate::environment::CheckoutEnvironment;
use crate::types::{ConstructorEntry, EntryId, Ingredient, IngredientId};
use burger_checkout_core::{Effect, Reducer, SmallVec};
use serde::{Deserialize, Serialize};

/// The in-progress composition
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorState {
    /// The exclusive bun slot
    pub bun: Option<ConstructorEntry>,
    /// Ordered filling sequence; order is user-significant
    pub fillings: Vec<ConstructorEntry>,
}

impl ConstructorState {
    /// Creates a new empty composition
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bun: None,
            fillings: Vec::new(),
        }
    }

    /// Whether nothing has been placed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bun.is_none() && self.fillings.is_empty()
    }

    /// Total price of the composition
    ///
    /// The bun is charged twice, once for each side of the assembled item;
    /// without a bun the composition has no price at all, whatever fillings
    /// are present. Domain pricing convention, preserved exactly.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        match &self.bun {
            Some(bun) => {
                bun.ingredient.price * 2
                    + self
                        .fillings
                        .iter()
                        .map(|entry| entry.ingredient.price)
                        .sum::<u64>()
            },
            None => 0,
        }
    }

    /// Build the submission payload: `[bun, fillings…, bun]`
    ///
    /// The bun identifier appears first and last; this ordering is a
    /// protocol requirement of the ordering service. Returns `None` while no
    /// bun is set, since an incomplete composition cannot be submitted.
    ///
    /// The payload is a derived, disposable value; it is never stored.
    #[must_use]
    pub fn order_payload(&self) -> Option<Vec<IngredientId>> {
        let bun = self.bun.as_ref()?;

        let mut ids = Vec::with_capacity(self.fillings.len() + 2);
        ids.push(bun.ingredient.id.clone());
        ids.extend(self.fillings.iter().map(|entry| entry.ingredient.id.clone()));
        ids.push(bun.ingredient.id.clone());
        Some(ids)
    }
}

/// Direction for reordering a filling entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    /// Towards the start of the sequence
    Up,
    /// Towards the end of the sequence
    Down,
}

/// Operations on the composition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ConstructorAction {
    /// Place an ingredient: a bun replaces the current bun (last write
    /// wins), anything else appends to the filling sequence
    Add {
        /// The catalog ingredient to place
        ingredient: Ingredient,
    },

    /// Remove the filling entry with the given instance identifier;
    /// silent no-op when absent
    Remove {
        /// Instance identifier of the entry to remove
        entry_id: EntryId,
    },

    /// Swap the filling at `index` with its immediate neighbour;
    /// silent no-op when the neighbour is out of bounds
    Move {
        /// Position of the entry to move
        index: usize,
        /// Which neighbour to swap with
        direction: MoveDirection,
    },

    /// Reset to the empty composition; idempotent
    Clear,
}

/// Reducer for the composition container
#[derive(Clone, Debug, Default)]
pub struct ConstructorReducer;

impl ConstructorReducer {
    /// Creates a new `ConstructorReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ConstructorReducer {
    type State = ConstructorState;
    type Action = ConstructorAction;
    type Environment = CheckoutEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ConstructorAction::Add { ingredient } => {
                let entry = ConstructorEntry {
                    entry_id: EntryId::from_uuid(env.ids.generate()),
                    ingredient,
                };

                if entry.ingredient.kind.is_base() {
                    state.bun = Some(entry);
                } else {
                    state.fillings.push(entry);
                }
            },

            ConstructorAction::Remove { entry_id } => {
                state.fillings.retain(|entry| entry.entry_id != entry_id);
            },

            ConstructorAction::Move { index, direction } => {
                let neighbour = match direction {
                    MoveDirection::Up => index.checked_sub(1),
                    MoveDirection::Down => index.checked_add(1),
                };

                if let Some(neighbour) = neighbour {
                    if index < state.fillings.len() && neighbour < state.fillings.len() {
                        state.fillings.swap(index, neighbour);
                    }
                }
            },

            ConstructorAction::Clear => {
                state.bun = None;
                state.fillings.clear();
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests panic on failures

    use super::*;
    use crate::mocks::MockEnvironment;
    use crate::types::IngredientKind;
    use burger_checkout_testing::{ReducerTest, assertions};
    use proptest::prelude::*;

    fn ingredient(id: &str, kind: IngredientKind, price: u64) -> Ingredient {
        Ingredient {
            id: IngredientId::from(id),
            kind,
            name: id.to_owned(),
            price,
            image: None,
        }
    }

    fn bun(id: &str, price: u64) -> Ingredient {
        ingredient(id, IngredientKind::Base, price)
    }

    fn filling(id: &str, price: u64) -> Ingredient {
        ingredient(id, IngredientKind::Filling, price)
    }

    fn env() -> CheckoutEnvironment {
        MockEnvironment::new().env
    }

    fn reduce(state: &mut ConstructorState, action: ConstructorAction) {
        let effects = ConstructorReducer::new().reduce(state, action, &env());
        assertions::assert_no_effects(&effects);
    }

    #[test]
    fn adding_a_bun_fills_the_exclusive_slot() {
        ReducerTest::new(ConstructorReducer::new())
            .with_env(env())
            .given_state(ConstructorState::new())
            .when_action(ConstructorAction::Add {
                ingredient: bun("bun-1", 50),
            })
            .then_state(|state| {
                assert_eq!(
                    state.bun.as_ref().map(|b| b.ingredient.id.as_str()),
                    Some("bun-1")
                );
                assert!(state.fillings.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn a_second_bun_replaces_the_first() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: bun("bun-1", 50) });
        reduce(&mut state, ConstructorAction::Add { ingredient: bun("bun-2", 60) });

        assert_eq!(
            state.bun.as_ref().map(|b| b.ingredient.id.as_str()),
            Some("bun-2")
        );
        assert!(state.fillings.is_empty());
    }

    #[test]
    fn fillings_append_in_order_with_distinct_entry_ids() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });

        assert_eq!(state.fillings.len(), 2);
        assert_ne!(state.fillings[0].entry_id, state.fillings[1].entry_id);
        assert_eq!(state.fillings[0].ingredient, state.fillings[1].ingredient);
    }

    #[test]
    fn entry_ids_follow_the_injected_generator() {
        use burger_checkout_testing::SequentialIdGenerator;
        use std::sync::Arc;

        let env = MockEnvironment::with_ids(Arc::new(SequentialIdGenerator::new())).env;
        let reducer = ConstructorReducer::new();
        let mut state = ConstructorState::new();

        for id in ["cheese-1", "patty-1"] {
            let _ = reducer.reduce(
                &mut state,
                ConstructorAction::Add { ingredient: filling(id, 1) },
                &env,
            );
        }

        let ids: Vec<EntryId> = state.fillings.iter().map(|e| e.entry_id).collect();
        assert_eq!(
            ids,
            [
                EntryId::from_uuid(uuid::Uuid::from_u128(0)),
                EntryId::from_uuid(uuid::Uuid::from_u128(1)),
            ]
        );
    }

    #[test]
    fn remove_of_an_absent_entry_is_a_noop() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });
        let before = state.clone();

        reduce(
            &mut state,
            ConstructorAction::Remove {
                entry_id: EntryId::from_uuid(uuid::Uuid::new_v4()),
            },
        );

        assert_eq!(state, before);
    }

    #[test]
    fn remove_drops_exactly_the_matching_entry() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("patty-1", 30) });

        let target = state.fillings[0].entry_id;
        reduce(&mut state, ConstructorAction::Remove { entry_id: target });

        assert_eq!(state.fillings.len(), 1);
        assert_eq!(state.fillings[0].ingredient.id.as_str(), "patty-1");
    }

    #[test]
    fn move_swaps_adjacent_entries_only() {
        let mut state = ConstructorState::new();
        for id in ["a", "b", "c"] {
            reduce(&mut state, ConstructorAction::Add { ingredient: filling(id, 1) });
        }

        reduce(
            &mut state,
            ConstructorAction::Move { index: 1, direction: MoveDirection::Up },
        );

        let order: Vec<&str> = state
            .fillings
            .iter()
            .map(|e| e.ingredient.id.as_str())
            .collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn move_at_the_edges_is_a_noop() {
        let mut state = ConstructorState::new();
        for id in ["a", "b"] {
            reduce(&mut state, ConstructorAction::Add { ingredient: filling(id, 1) });
        }
        let before = state.clone();

        reduce(
            &mut state,
            ConstructorAction::Move { index: 0, direction: MoveDirection::Up },
        );
        assert_eq!(state, before);

        reduce(
            &mut state,
            ConstructorAction::Move { index: 1, direction: MoveDirection::Down },
        );
        assert_eq!(state, before);

        reduce(
            &mut state,
            ConstructorAction::Move { index: 7, direction: MoveDirection::Up },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: bun("bun-1", 50) });
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });

        reduce(&mut state, ConstructorAction::Clear);
        assert!(state.is_empty());

        reduce(&mut state, ConstructorAction::Clear);
        assert!(state.is_empty());
    }

    #[test]
    fn total_price_charges_the_bun_twice() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: bun("bun-1", 50) });
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("patty-1", 30) });

        assert_eq!(state.total_price(), 2 * 50 + 10 + 30);
    }

    #[test]
    fn total_price_is_zero_without_a_bun() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });

        assert_eq!(state.total_price(), 0);
    }

    #[test]
    fn payload_wraps_fillings_with_the_bun() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: bun("bun-1", 50) });
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });

        let payload = state.order_payload().unwrap();
        let ids: Vec<&str> = payload.iter().map(IngredientId::as_str).collect();
        assert_eq!(ids, ["bun-1", "cheese-1", "bun-1"]);
    }

    #[test]
    fn payload_is_absent_without_a_bun() {
        let mut state = ConstructorState::new();
        reduce(&mut state, ConstructorAction::Add { ingredient: filling("cheese-1", 10) });

        assert!(state.order_payload().is_none());
    }

    fn arb_ingredient() -> impl Strategy<Value = Ingredient> {
        (
            "[a-z]{1,8}",
            prop_oneof![
                Just(IngredientKind::Base),
                Just(IngredientKind::Filling),
                Just(IngredientKind::Finish),
            ],
            0u64..1_000,
        )
            .prop_map(|(id, kind, price)| Ingredient {
                id: IngredientId::new(id.clone()),
                kind,
                name: id,
                price,
                image: None,
            })
    }

    proptest! {
        #[test]
        fn any_add_sequence_keeps_the_bun_slot_exclusive(
            ingredients in proptest::collection::vec(arb_ingredient(), 0..20)
        ) {
            let mut state = ConstructorState::new();
            let reducer = ConstructorReducer::new();
            let env = env();

            let last_bun = ingredients
                .iter()
                .filter(|i| i.kind.is_base())
                .next_back()
                .cloned();

            for ingredient in ingredients {
                let _ = reducer.reduce(
                    &mut state,
                    ConstructorAction::Add { ingredient },
                    &env,
                );
            }

            // The bun is always the most recently added base ingredient
            prop_assert_eq!(
                state.bun.as_ref().map(|b| b.ingredient.clone()),
                last_bun
            );
            // No base ingredient ever lands in the filling sequence
            prop_assert!(state.fillings.iter().all(|e| !e.ingredient.kind.is_base()));
        }

        #[test]
        fn moves_never_lose_or_duplicate_entries(
            count in 1usize..8,
            moves in proptest::collection::vec((0usize..10, any::<bool>()), 0..20)
        ) {
            let mut state = ConstructorState::new();
            let reducer = ConstructorReducer::new();
            let env = env();

            for i in 0..count {
                let _ = reducer.reduce(
                    &mut state,
                    ConstructorAction::Add {
                        ingredient: filling(&format!("f{i}"), i as u64),
                    },
                    &env,
                );
            }

            let mut expected: Vec<EntryId> =
                state.fillings.iter().map(|e| e.entry_id).collect();

            for (index, up) in moves {
                let direction = if up { MoveDirection::Up } else { MoveDirection::Down };
                let _ = reducer.reduce(
                    &mut state,
                    ConstructorAction::Move { index, direction },
                    &env,
                );

                // Mirror the swap on the model when it is in bounds
                let neighbour = if up { index.checked_sub(1) } else { index.checked_add(1) };
                if let Some(neighbour) = neighbour {
                    if index < expected.len() && neighbour < expected.len() {
                        expected.swap(index, neighbour);
                    }
                }
            }

            let actual: Vec<EntryId> =
                state.fillings.iter().map(|e| e.entry_id).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
