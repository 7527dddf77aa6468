//! Effects - asynchronous reactions to dispatched actions
//!
//! ```text
//! dispatch → action stream → effect (kind filter) → async call → dispatch
//! ```
//!
//! Each registered effect runs on its own tokio task, reading the store's
//! action stream. When a run settles, the effect applies its follow-up
//! actions to the store in one serialized batch.
//!
//! Concurrency is exhaust-style: a matching action dispatched while a run is
//! in flight, up to and including the moment its follow-ups are applied, is
//! ignored. Dispatch order decides, not the order in which the effect task
//! happens to observe the run finishing.
//!
//! A separate pump task drains the [`Dispatcher`](crate::Dispatcher) queue
//! into [`Store::dispatch`].

use crate::action::Action;
use crate::error::StoreError;
use crate::store::{SequencedStream, Store};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

/// An effect reacting to one or more action kinds
///
/// `run` must not fail: service errors are converted into follow-up actions
/// by the effect itself.
#[async_trait]
pub trait Effect<A: Action>: Send + Sync + 'static {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Action kinds this effect reacts to
    fn kinds(&self) -> &'static [&'static str];

    /// Whether the actions returned by `run` are dispatched.
    /// Dispatch-free effects only perform side effects (e.g. navigation).
    fn feeds_back(&self) -> bool {
        true
    }

    async fn run(&self, action: A) -> Vec<A>;
}

/// Registration table of effects, started against one store
pub struct EffectRunner<A: Action> {
    effects: Vec<Arc<dyn Effect<A>>>,
}

impl<A: Action> EffectRunner<A> {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Register an effect
    pub fn register<E: Effect<A>>(mut self, effect: E) -> Self {
        log::debug!(
            "Registering effect {} for {:?} (feeds back: {})",
            effect.name(),
            effect.kinds(),
            effect.feeds_back()
        );
        self.effects.push(Arc::new(effect));
        self
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Spawn the dispatch pump and one task per effect
    ///
    /// Effects are subscribed before this returns, so every action
    /// dispatched afterwards is observed. Must be called inside a tokio
    /// runtime.
    pub fn start(self, store: &Store<A>) -> Result<EffectsHandle, StoreError> {
        let queue = store.take_dispatch_queue()?;
        let mut tasks = Vec::with_capacity(self.effects.len() + 1);

        tasks.push(tokio::spawn(pump(store.clone(), queue)));
        for effect in self.effects {
            let actions = store.sequenced_actions();
            tasks.push(tokio::spawn(run_effect(effect, actions, store.clone())));
        }

        log::info!("Started {} effects", tasks.len() - 1);
        Ok(EffectsHandle { tasks })
    }
}

impl<A: Action> Default for EffectRunner<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the running effect tasks
///
/// Dropping the handle does not stop the tasks; call
/// [`shutdown`](EffectsHandle::shutdown).
pub struct EffectsHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl EffectsHandle {
    /// Abort the dispatch pump and every effect task
    pub fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        log::info!("Stopped {} effect tasks", self.tasks.len());
    }
}

/// Drain the dispatch queue into the store, one action at a time
async fn pump<A: Action>(store: Store<A>, mut queue: mpsc::UnboundedReceiver<A>) {
    while let Some(action) = queue.recv().await {
        store.dispatch(action);
    }
    log::debug!("Dispatch queue closed");
}

async fn settle<T>(in_flight: &mut Option<JoinHandle<T>>) -> Result<T, JoinError> {
    match in_flight {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

async fn run_effect<A: Action>(
    effect: Arc<dyn Effect<A>>,
    mut actions: SequencedStream<A>,
    store: Store<A>,
) {
    let mut in_flight: Option<JoinHandle<Vec<A>>> = None;
    // Sequence number at which the last run settled
    let mut settled_at = 0;

    loop {
        tokio::select! {
            biased;

            received = actions.recv() => {
                let Some((sequence, action)) = received else {
                    log::debug!("Effect {}: action stream closed", effect.name());
                    break;
                };
                if !effect.kinds().contains(&action.kind()) {
                    continue;
                }
                if in_flight.is_some() || sequence <= settled_at {
                    log::debug!(
                        "Effect {}: ignoring {} dispatched while a run was in flight",
                        effect.name(),
                        action.kind()
                    );
                    continue;
                }

                log::debug!("Effect {}: handling {}", effect.name(), action.kind());
                let effect = Arc::clone(&effect);
                in_flight = Some(tokio::spawn(async move { effect.run(action).await }));
            }
            settled = settle(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                let outputs = match settled {
                    Ok(outputs) => outputs,
                    Err(e) => {
                        log::error!("Effect {}: run failed: {}", effect.name(), e);
                        Vec::new()
                    }
                };
                settled_at = apply_outputs(effect.as_ref(), outputs, &store);
            }
        }
    }
}

/// Dispatch a settled run's follow-ups; returns the sequence number the run
/// settled at
fn apply_outputs<A: Action>(
    effect: &dyn Effect<A>,
    mut outputs: Vec<A>,
    store: &Store<A>,
) -> u64 {
    if !effect.feeds_back() && !outputs.is_empty() {
        log::warn!(
            "Effect {}: dispatch-free effect produced {} actions, discarding",
            effect.name(),
            outputs.len()
        );
        outputs.clear();
    }

    for action in &outputs {
        log::debug!("Effect {}: dispatching {}", effect.name(), action.kind());
    }
    store.dispatch_all(outputs)
}
