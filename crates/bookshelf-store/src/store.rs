use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::meta_reducer::{FreezeGuard, LoggingMetaReducer, MetaReducer, ReducerChain};
use crate::reducer::{CombinedReducer, SliceReducer};
use crate::selector::{RefEq, Selector};
use crate::state_tree::StateTree;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, watch};

/// Receiver side of the action stream
pub type ActionStream<A> = mpsc::UnboundedReceiver<A>;

/// Action stream tagged with each action's dispatch sequence number
pub(crate) type SequencedStream<A> = mpsc::UnboundedReceiver<(u64, A)>;

/// Store - holds the state tree and runs the dispatch loop
///
/// The store follows the Redux pattern:
/// - Single source of truth: one immutable [`StateTree`]
/// - Actions are dispatched to produce a new tree
/// - Pure reducers handle state transitions, wrapped by meta-reducers
/// - The tree is replaced on each dispatch, never mutated
///
/// `Store` is a cheap handle; clone it and pass it to every component that
/// dispatches or subscribes.
pub struct Store<A: Action> {
    inner: Arc<Shared<A>>,
}

struct Shared<A: Action> {
    reducer: ReducerChain<A>,
    /// Serializes dispatches; holds the sequence number of the last one
    dispatch_lock: Mutex<u64>,
    state_tx: watch::Sender<StateTree>,
    action_subscribers: Mutex<Vec<mpsc::UnboundedSender<A>>>,
    sequenced_subscribers: Mutex<Vec<mpsc::UnboundedSender<(u64, A)>>>,
    queue_tx: mpsc::UnboundedSender<A>,
    queue_rx: Mutex<Option<mpsc::UnboundedReceiver<A>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: Action> Clone for Store<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Action> Store<A> {
    /// Start building a store around the root reducer
    pub fn builder(root: CombinedReducer<A>) -> StoreBuilder<A> {
        StoreBuilder::new(root)
    }

    fn from_chain(reducer: ReducerChain<A>) -> Self {
        let (state_tx, _) = watch::channel(reducer.initial_tree());
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();

        Self {
            inner: Arc::new(Shared {
                reducer,
                dispatch_lock: Mutex::new(0),
                state_tx,
                action_subscribers: Mutex::new(Vec::new()),
                sequenced_subscribers: Mutex::new(Vec::new()),
                queue_tx,
                queue_rx: Mutex::new(Some(queue_rx)),
            }),
        }
    }

    /// Apply an action and publish the result
    ///
    /// Runs the meta-reducer chain and root reducer against the current
    /// tree, stores the result, notifies state subscribers if the tree
    /// changed and finally hands the action to every action subscriber.
    /// Actions no reducer recognizes leave the tree untouched but are still
    /// published to the action stream.
    pub fn dispatch(&self, action: A) {
        let mut sequence = lock(&self.inner.dispatch_lock);
        self.apply(&mut *sequence, action);
    }

    /// Dispatch `actions` back to back, with no other dispatch in between
    ///
    /// Returns the sequence number of the last dispatch applied, which is the
    /// current one when `actions` is empty.
    pub(crate) fn dispatch_all(&self, actions: Vec<A>) -> u64 {
        let mut sequence = lock(&self.inner.dispatch_lock);
        for action in actions {
            self.apply(&mut *sequence, action);
        }
        *sequence
    }

    fn apply(&self, sequence: &mut u64, action: A) {
        *sequence += 1;

        let current = self.inner.state_tx.borrow().clone();
        let next = self.inner.reducer.reduce(&current, &action);
        if !next.ptr_eq(&current) {
            self.inner.state_tx.send_replace(next);
        }

        lock(&self.inner.sequenced_subscribers)
            .retain(|tx| tx.send((*sequence, action.clone())).is_ok());
        lock(&self.inner.action_subscribers).retain(|tx| tx.send(action.clone()).is_ok());
    }

    /// Get the current state snapshot
    pub fn state(&self) -> StateTree {
        self.inner.state_tx.borrow().clone()
    }

    /// Subscribe to every new state snapshot
    pub fn subscribe(&self) -> watch::Receiver<StateTree> {
        self.inner.state_tx.subscribe()
    }

    /// Subscribe to every action dispatched from now on
    pub fn actions(&self) -> ActionStream<A> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.inner.action_subscribers).push(tx);
        rx
    }

    /// Like [`actions`](Store::actions), with the dispatch sequence number
    /// of every action
    pub(crate) fn sequenced_actions(&self) -> SequencedStream<A> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.inner.sequenced_subscribers).push(tx);
        rx
    }

    /// Subscribe to a selector's output
    pub fn select<T: Selector>(&self, selector: T) -> Selection<T> {
        Selection::new(self.subscribe(), selector)
    }

    /// Evaluate a selector against the current state
    pub fn select_now<T: Selector + ?Sized>(&self, selector: &T) -> T::Output {
        selector.select(&self.state())
    }

    /// Get a dispatcher feeding this store's dispatch queue
    pub fn dispatcher(&self) -> Dispatcher<A> {
        Dispatcher::new(self.inner.queue_tx.clone())
    }

    /// Take the receiving end of the dispatch queue
    ///
    /// Exactly one pump may drain the queue; see
    /// [`EffectRunner::start`](crate::EffectRunner::start).
    pub fn take_dispatch_queue(&self) -> Result<mpsc::UnboundedReceiver<A>, StoreError> {
        lock(&self.inner.queue_rx)
            .take()
            .ok_or(StoreError::DispatchQueueTaken)
    }
}

/// Builder wiring slice reducers and meta-reducers into a [`Store`]
///
/// Built-in meta-reducers wrap custom ones: logging is outermost, then the
/// freeze guard, then custom meta-reducers in registration order.
pub struct StoreBuilder<A: Action> {
    root: CombinedReducer<A>,
    error: Option<StoreError>,
    meta: Vec<Box<dyn MetaReducer<A>>>,
    logging: bool,
    runtime_checks: bool,
}

impl<A: Action> StoreBuilder<A> {
    pub fn new(root: CombinedReducer<A>) -> Self {
        Self {
            root,
            error: None,
            meta: Vec::new(),
            logging: false,
            runtime_checks: cfg!(debug_assertions),
        }
    }

    /// Register an additional top-level slice
    pub fn slice<R>(mut self, name: &'static str, reducer: R) -> Self
    where
        R: SliceReducer<A> + 'static,
    {
        if let Err(e) = self.root.insert(name, reducer) {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
        self
    }

    /// Register a feature: a group of slices nested under one name
    pub fn feature(self, name: &'static str, reducers: CombinedReducer<A>) -> Self {
        log::debug!("Registering feature {} with slices {:?}", name, reducers);
        self.slice(name, reducers)
    }

    /// Add a custom meta-reducer
    pub fn meta_reducer<M: MetaReducer<A> + 'static>(mut self, meta: M) -> Self {
        self.meta.push(Box::new(meta));
        self
    }

    /// Log every action and the state it is applied to
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Install the immutability guard (on by default in debug builds)
    pub fn runtime_checks(mut self, enabled: bool) -> Self {
        self.runtime_checks = enabled;
        self
    }

    pub fn build(self) -> Result<Store<A>, StoreError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if self.root.is_empty() {
            return Err(StoreError::EmptyRegistry);
        }

        let mut meta: Vec<Box<dyn MetaReducer<A>>> = Vec::new();
        if self.logging {
            meta.push(Box::new(LoggingMetaReducer::new()));
        }
        if self.runtime_checks {
            meta.push(Box::new(FreezeGuard::new()));
        }
        meta.extend(self.meta);

        log::info!(
            "Store created with slices {:?} (logging: {}, runtime checks: {})",
            self.root.slice_names(),
            self.logging,
            self.runtime_checks
        );

        Ok(Store::from_chain(ReducerChain::new(meta, self.root)))
    }
}

/// Live view of a selector's output
///
/// The first call to [`next`](Selection::next) yields the current value.
/// Later calls wait for a state change that alters the output; state
/// changes the selector collapses (same output by [`RefEq`]) are skipped.
pub struct Selection<T: Selector> {
    state_rx: watch::Receiver<StateTree>,
    selector: T,
    last: Option<T::Output>,
}

impl<T: Selector> Selection<T> {
    fn new(state_rx: watch::Receiver<StateTree>, selector: T) -> Self {
        Self {
            state_rx,
            selector,
            last: None,
        }
    }

    /// Current output, without waiting
    pub fn current(&self) -> T::Output {
        let state = self.state_rx.borrow().clone();
        self.selector.select(&state)
    }

    /// Next distinct output; `None` once the store is gone
    pub async fn next(&mut self) -> Option<T::Output> {
        loop {
            if self.last.is_some() && self.state_rx.changed().await.is_err() {
                return None;
            }

            let state = self.state_rx.borrow_and_update().clone();
            let output = self.selector.select(&state);
            if let Some(last) = &self.last {
                if last.ref_eq(&output) {
                    continue;
                }
            }
            self.last = Some(output.clone());
            return Some(output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{create_selector, feature_selector};
    use crate::test_support::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time::timeout;

    fn store() -> Store<TestAction> {
        Store::builder(root()).build().unwrap()
    }

    #[test]
    fn test_dispatch_replaces_state() {
        let store = store();
        let before = store.state();

        store.dispatch(TestAction::Increment);

        let after = store.state();
        assert!(!after.ptr_eq(&before));
        assert_eq!(after.expect_slice::<Counter>("counter").value, 1);
        assert_eq!(before.expect_slice::<Counter>("counter").value, 0);
    }

    #[test]
    fn test_state_equals_fold_of_dispatched_actions() {
        let store = store();
        let actions = vec![
            TestAction::Increment,
            TestAction::Ping,
            TestAction::Rename("books".to_string()),
            TestAction::Increment,
            TestAction::Unknown,
        ];
        for action in &actions {
            store.dispatch(action.clone());
        }

        let reference = root();
        let folded = actions.iter().fold(reference.initial_tree(), |state, action| {
            reference.reduce_tree(&state, action)
        });
        assert_eq!(format!("{:?}", store.state()), format!("{folded:?}"));
    }

    #[test]
    fn test_unknown_action_is_a_silent_no_op() {
        let store = store();
        let mut state_rx = store.subscribe();
        let mut actions = store.actions();
        let before = store.state();

        store.dispatch(TestAction::Unknown);

        assert!(store.state().ptr_eq(&before));
        assert!(!state_rx.has_changed().unwrap());
        assert_eq!(actions.try_recv().ok(), Some(TestAction::Unknown));
    }

    #[test]
    fn test_action_stream_sees_actions_in_order() {
        let store = store();
        let mut actions = store.actions();

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Ping);

        assert_eq!(actions.try_recv().ok(), Some(TestAction::Increment));
        assert_eq!(actions.try_recv().ok(), Some(TestAction::Ping));
        assert!(actions.try_recv().is_err());
    }

    #[test]
    fn test_closed_action_subscribers_are_pruned() {
        let store = store();
        drop(store.actions());
        let mut live = store.actions();

        store.dispatch(TestAction::Ping);

        assert_eq!(lock(&store.inner.action_subscribers).len(), 1);
        assert_eq!(live.try_recv().ok(), Some(TestAction::Ping));
    }

    #[test]
    fn test_dispatch_sequence_numbers() {
        let store = store();
        let mut sequenced = store.sequenced_actions();

        store.dispatch(TestAction::Ping);
        let last = store.dispatch_all(vec![TestAction::Increment, TestAction::Unknown]);

        assert_eq!(last, 3);
        assert_eq!(store.dispatch_all(Vec::new()), 3);
        assert_eq!(sequenced.try_recv().ok(), Some((1, TestAction::Ping)));
        assert_eq!(sequenced.try_recv().ok(), Some((2, TestAction::Increment)));
        assert_eq!(sequenced.try_recv().ok(), Some((3, TestAction::Unknown)));
        assert_eq!(store.state().expect_slice::<Counter>("counter").value, 1);
    }

    #[test]
    fn test_build_errors() {
        let empty = Store::<TestAction>::builder(CombinedReducer::new()).build();
        assert_eq!(empty.err(), Some(StoreError::EmptyRegistry));

        let duplicate = Store::builder(root())
            .slice("label", label_reducer())
            .build();
        assert_eq!(duplicate.err(), Some(StoreError::DuplicateSlice("label")));
    }

    #[test]
    fn test_feature_is_nested_under_its_name() {
        let feature = CombinedReducer::new()
            .slice("inner", counter_reducer())
            .unwrap();
        let store = Store::builder(root()).feature("feature", feature).build().unwrap();

        store.dispatch(TestAction::Increment);

        let feature_state = store.state().expect_slice::<StateTree>("feature");
        assert_eq!(feature_state.expect_slice::<Counter>("inner").value, 1);
    }

    #[test]
    fn test_dispatch_queue_can_be_taken_once() {
        let store = store();
        assert!(store.take_dispatch_queue().is_ok());
        assert_eq!(
            store.take_dispatch_queue().err(),
            Some(StoreError::DispatchQueueTaken)
        );
    }

    #[test]
    fn test_logging_and_checks_do_not_change_results() {
        let plain = Store::builder(root())
            .runtime_checks(false)
            .build()
            .unwrap();
        let checked = Store::builder(root())
            .logging(true)
            .runtime_checks(true)
            .build()
            .unwrap();

        for action in [TestAction::Increment, TestAction::Rename("a".to_string())] {
            plain.dispatch(action.clone());
            checked.dispatch(action);
        }
        assert_eq!(format!("{:?}", plain.state()), format!("{:?}", checked.state()));
    }

    #[tokio::test]
    async fn test_selection_emits_only_distinct_outputs() {
        let store = store();
        let value = create_selector((feature_selector::<Counter>("counter"),), |(counter,)| {
            counter.value
        });
        let mut selection = store.select(value);

        assert_eq!(selection.next().await, Some(0));

        // Changes the tree but not the selected value
        store.dispatch(TestAction::Rename("other".to_string()));
        store.dispatch(TestAction::Increment);

        let next = timeout(Duration::from_secs(1), selection.next()).await.unwrap();
        assert_eq!(next, Some(1));
        assert_eq!(selection.current(), 1);
    }

    #[tokio::test]
    async fn test_selection_ends_when_store_is_dropped() {
        let store = store();
        let mut selection = store.select(feature_selector::<Label>("label"));
        assert!(selection.next().await.is_some());

        drop(store);

        assert!(selection.next().await.is_none());
    }

    #[test]
    fn test_select_now_reads_current_state() {
        let store = store();
        store.dispatch(TestAction::Increment);
        let counter = store.select_now(&feature_selector::<Counter>("counter"));
        assert_eq!(counter.value, 1);
    }
}
