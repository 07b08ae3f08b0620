//! Checkout demo binary
//!
//! Runs the full checkout flow against in-memory mocks: compose a burger,
//! hit the authentication gate, log in, place the order, dismiss the
//! confirmation.

use burger_checkout::mocks::MockEnvironment;
use burger_checkout::types::{Credentials, Ingredient, IngredientId, IngredientKind};
use burger_checkout::{
    CheckoutAction, CheckoutReducer, CheckoutState, ConstructorAction, SessionAction,
};
use burger_checkout_runtime::{Store, StoreError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn ingredient(id: &str, kind: IngredientKind, name: &str, price: u64) -> Ingredient {
    Ingredient {
        id: IngredientId::from(id),
        kind,
        name: name.to_owned(),
        price,
        image: None,
    }
}

#[tokio::main]
async fn main() -> Result<(), StoreError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "burger_checkout=debug,burger_checkout_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mocks = MockEnvironment::new();
    mocks.orders.set_next_number(1042);

    let store = Store::new(CheckoutState::new(), CheckoutReducer::new(), mocks.env.clone());

    // Compose a burger
    for (id, kind, name, price) in [
        ("bun-1", IngredientKind::Base, "Brioche bun", 50),
        ("patty-1", IngredientKind::Filling, "Smash patty", 120),
        ("cheese-1", IngredientKind::Filling, "Cheddar", 30),
        ("sauce-1", IngredientKind::Finish, "House sauce", 15),
    ] {
        store
            .send(CheckoutAction::Constructor(ConstructorAction::Add {
                ingredient: ingredient(id, kind, name, price),
            }))
            .await?;
    }

    let total = store.state(|s| s.constructor.total_price()).await;
    tracing::info!(total, "burger composed");

    // Not logged in yet: the gate routes to login instead of submitting
    store.send(CheckoutAction::PlaceOrder).await?;
    tracing::info!(routes = ?mocks.navigator.routes(), "submission gated");

    // Log in, then retry
    let mut handle = store
        .send(CheckoutAction::Session(SessionAction::Login {
            credentials: Credentials {
                email: "ada@example.com".to_owned(),
                password: "hunter2".to_owned(),
            },
        }))
        .await?;
    handle.wait().await;

    let mut handle = store.send(CheckoutAction::PlaceOrder).await?;
    handle.wait().await;

    let confirmation = store.state(|s| s.order.record().map(|r| r.number)).await;
    let cleared = store.state(|s| s.constructor.is_empty()).await;
    tracing::info!(?confirmation, cleared, "order placed");

    store.send(CheckoutAction::DismissOrder).await?;
    tracing::info!(routes = ?mocks.navigator.routes(), "confirmation dismissed");

    store.shutdown(std::time::Duration::from_secs(5)).await?;
    Ok(())
}
