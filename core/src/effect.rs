//! Effect module - Side effect descriptions
//!
//! Effects describe side effects to be performed by the runtime.
//! They are values (not execution) and are composable.
//!
//! Reducers return effects; the Store executes them and feeds any actions
//! they produce back into the reducer. This keeps reducers pure and makes
//! every asynchronous boundary (a remote call, a delayed retry) visible in
//! the reducer's return value.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Effect type - describes a side effect to be executed
///
/// Effects are NOT executed immediately. They are descriptions of what should
/// happen, returned from reducers and executed by the Store runtime.
///
/// # Type Parameters
///
/// - `Action`: The action type that effects can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects in parallel
    Parallel(Vec<Effect<Action>>),

    /// Run effects sequentially
    Sequential(Vec<Effect<Action>>),

    /// Delayed action (for timeouts, retries)
    Delay {
        /// How long to wait
        duration: Duration,
        /// Action to dispatch after delay
        action: Box<Action>,
    },

    /// Arbitrary async computation
    ///
    /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => {
                f.debug_tuple("Effect::Parallel").field(effects).finish()
            },
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            },
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}

impl<Action> Effect<Action> {
    /// Re-wrap the actions an effect produces into another action type
    ///
    /// This is how a parent reducer delegates to a child reducer: the child's
    /// effects are mapped into the parent's action space so that feedback
    /// actions route back through the parent.
    ///
    /// ```ignore
    /// let effects = child.reduce(&mut state.order, action, env);
    /// effects.into_iter().map(|e| e.map(ParentAction::Order)).collect()
    /// ```
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        Action: Send + 'static,
        B: Send + 'static,
        F: Fn(Action) -> B + Send + Sync + Clone + 'static,
    {
        match self {
            Effect::None => Effect::None,
            Effect::Parallel(effects) => {
                Effect::Parallel(effects.into_iter().map(|e| e.map(f.clone())).collect())
            },
            Effect::Sequential(effects) => {
                Effect::Sequential(effects.into_iter().map(|e| e.map(f.clone())).collect())
            },
            Effect::Delay { duration, action } => Effect::Delay {
                duration,
                action: Box::new(f(*action)),
            },
            Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
        }
    }
}
