//! Meta-reducers wrap the root reducer for cross-cutting concerns
//!
//! ```text
//! dispatch → meta[0] → meta[1] → ... → root reducer
//! ```
//!
//! The first registered meta-reducer is the outermost: it runs first and its
//! post-processing runs last. Meta-reducers observe or guard a reduction but
//! never change what the root reducer computes.

use crate::action::Action;
use crate::reducer::CombinedReducer;
use crate::state_tree::StateTree;
use std::sync::{Mutex, PoisonError};

/// The rest of the chain, as seen from one meta-reducer
pub type Next<'a, A> = &'a dyn Fn(&StateTree, &A) -> StateTree;

/// Wrapper around the root reducer
pub trait MetaReducer<A>: Send + Sync {
    /// Reduce `action` against `state`, delegating to `next` for the result
    fn reduce(&self, state: &StateTree, action: &A, next: Next<'_, A>) -> StateTree;
}

/// The root reducer wrapped by its meta-reducers
pub(crate) struct ReducerChain<A> {
    meta: Vec<Box<dyn MetaReducer<A>>>,
    root: CombinedReducer<A>,
}

impl<A: 'static> ReducerChain<A> {
    pub(crate) fn new(meta: Vec<Box<dyn MetaReducer<A>>>, root: CombinedReducer<A>) -> Self {
        Self { meta, root }
    }

    pub(crate) fn initial_tree(&self) -> StateTree {
        self.root.initial_tree()
    }

    pub(crate) fn reduce(&self, state: &StateTree, action: &A) -> StateTree {
        self.reduce_from(0, state, action)
    }

    fn reduce_from(&self, index: usize, state: &StateTree, action: &A) -> StateTree {
        match self.meta.get(index) {
            Some(meta) => meta.reduce(state, action, &|state: &StateTree, action: &A| {
                self.reduce_from(index + 1, state, action)
            }),
            None => self.root.reduce_tree(state, action),
        }
    }
}

/// LoggingMetaReducer - logs the state and every action applied to it
pub struct LoggingMetaReducer;

impl LoggingMetaReducer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMetaReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> MetaReducer<A> for LoggingMetaReducer {
    fn reduce(&self, state: &StateTree, action: &A, next: Next<'_, A>) -> StateTree {
        log::debug!("state: {:?}", state);
        log::debug!("action: {:?}", action);
        next(state, action)
    }
}

/// Immutability guard for development builds
///
/// Fingerprints the incoming tree, runs the rest of the chain and panics if
/// the input was altered in place (possible through interior mutability).
/// It also remembers the tree it handed back and panics if that tree has
/// changed by the time the next action arrives.
pub struct FreezeGuard {
    last_output: Mutex<Option<String>>,
}

impl FreezeGuard {
    pub fn new() -> Self {
        Self {
            last_output: Mutex::new(None),
        }
    }
}

impl Default for FreezeGuard {
    fn default() -> Self {
        Self::new()
    }
}

fn fingerprint(state: &StateTree) -> String {
    format!("{state:?}")
}

impl<A: Action> MetaReducer<A> for FreezeGuard {
    fn reduce(&self, state: &StateTree, action: &A, next: Next<'_, A>) -> StateTree {
        let before = fingerprint(state);

        let expected = self
            .last_output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if expected.is_some_and(|expected| expected != before) {
            panic!(
                "state was mutated outside of a reducer before `{}` was dispatched",
                action.kind()
            );
        }

        let next_state = next(state, action);

        if fingerprint(state) != before {
            panic!(
                "a reducer mutated its input state while handling `{}`",
                action.kind()
            );
        }

        *self
            .last_output
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(fingerprint(&next_state));
        next_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer_fn;
    use crate::test_support::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    struct Recording {
        name: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MetaReducer<TestAction> for Recording {
        fn reduce(
            &self,
            state: &StateTree,
            action: &TestAction,
            next: Next<'_, TestAction>,
        ) -> StateTree {
            self.calls.lock().unwrap().push(format!("{} before", self.name));
            let next_state = next(state, action);
            self.calls.lock().unwrap().push(format!("{} after", self.name));
            next_state
        }
    }

    #[test]
    fn test_first_meta_reducer_is_outermost() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = ReducerChain::new(
            vec![
                Box::new(Recording {
                    name: "outer",
                    calls: Arc::clone(&calls),
                }),
                Box::new(Recording {
                    name: "inner",
                    calls: Arc::clone(&calls),
                }),
            ],
            root(),
        );

        let next = chain.reduce(&chain.initial_tree(), &TestAction::Increment);

        assert_eq!(next.expect_slice::<Counter>("counter").value, 1);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["outer before", "inner before", "inner after", "outer after"]
        );
    }

    #[test]
    fn test_logging_forwards_unchanged() {
        let plain = root();
        let chain = ReducerChain::new(vec![Box::new(LoggingMetaReducer::new())], root());
        let tree = chain.initial_tree();

        let logged = chain.reduce(&tree, &TestAction::Increment);
        let direct = plain.reduce_tree(&tree, &TestAction::Increment);
        assert_eq!(format!("{logged:?}"), format!("{direct:?}"));

        assert!(chain.reduce(&tree, &TestAction::Unknown).ptr_eq(&tree));
    }

    #[test]
    fn test_freeze_guard_accepts_pure_reducers() {
        let chain = ReducerChain::new(vec![Box::new(FreezeGuard::new())], root());
        let mut state = chain.initial_tree();
        for action in [TestAction::Increment, TestAction::Ping, TestAction::Increment] {
            state = chain.reduce(&state, &action);
        }
        assert_eq!(state.expect_slice::<Counter>("counter").value, 2);
    }

    #[derive(Debug, Default)]
    struct Cell {
        hits: Mutex<u32>,
    }

    fn sneaky_root() -> CombinedReducer<TestAction> {
        CombinedReducer::new()
            .slice(
                "cell",
                reducer_fn(Arc::new(Cell::default()), |state: &Arc<Arc<Cell>>, action: &TestAction| {
                    if *action == TestAction::Ping {
                        *state.hits.lock().unwrap() += 1;
                    }
                    Arc::clone(state)
                }),
            )
            .unwrap()
    }

    #[test]
    #[should_panic(expected = "a reducer mutated its input state while handling `[Test] Ping`")]
    fn test_freeze_guard_detects_mutating_reducer() {
        let chain = ReducerChain::new(vec![Box::new(FreezeGuard::new())], sneaky_root());
        let state = chain.initial_tree();
        chain.reduce(&state, &TestAction::Ping);
    }

    #[test]
    #[should_panic(expected = "state was mutated outside of a reducer")]
    fn test_freeze_guard_detects_mutation_between_dispatches() {
        let chain = ReducerChain::new(vec![Box::new(FreezeGuard::new())], sneaky_root());
        let state = chain.reduce(&chain.initial_tree(), &TestAction::Unknown);

        let cell = state.expect_slice::<Arc<Cell>>("cell");
        *cell.hits.lock().unwrap() = 42;

        chain.reduce(&state, &TestAction::Unknown);
    }

    #[test]
    fn test_mutation_goes_unnoticed_without_guard() {
        let chain = ReducerChain::new(Vec::new(), sneaky_root());
        let state = chain.initial_tree();
        let next = chain.reduce(&state, &TestAction::Ping);
        assert!(next.ptr_eq(&state));
        assert_eq!(*next.expect_slice::<Arc<Cell>>("cell").hits.lock().unwrap(), 1);
    }
}
