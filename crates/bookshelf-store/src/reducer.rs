//! Slice reducers and their composition
//!
//! A slice reducer owns one named partition of the state tree. The
//! [`CombinedReducer`] fans every action out to all registered slices and
//! assembles the next tree:
//!
//! ```text
//! root(state, action) = { name_i: slice_i(state[name_i], action) }
//! ```
//!
//! Every slice sees the pre-dispatch tree; slices never read each other.

use crate::error::StoreError;
use crate::state_tree::{SliceRef, SliceState, StateTree};
use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Pure reducer for one slice of state
///
/// `reduce` must return `Arc::clone(state)` for actions it does not handle so
/// that unchanged slices keep their identity.
pub trait SliceReducer<A>: Send + Sync {
    type State: SliceState;

    /// Value of the slice when the store is created
    fn initial_state(&self) -> Self::State;

    fn reduce(&self, state: &Arc<Self::State>, action: &A) -> Arc<Self::State>;
}

/// Slice reducer backed by an initial value and a function
pub struct FnReducer<S, F> {
    initial: S,
    reduce: F,
}

/// Build a slice reducer from its initial state and a reduce function
pub fn reducer_fn<S, A, F>(initial: S, reduce: F) -> FnReducer<S, F>
where
    S: SliceState + Clone,
    F: Fn(&Arc<S>, &A) -> Arc<S> + Send + Sync,
{
    FnReducer { initial, reduce }
}

impl<A, S, F> SliceReducer<A> for FnReducer<S, F>
where
    S: SliceState + Clone,
    F: Fn(&Arc<S>, &A) -> Arc<S> + Send + Sync,
{
    type State = S;

    fn initial_state(&self) -> S {
        self.initial.clone()
    }

    fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S> {
        (self.reduce)(state, action)
    }
}

/// Object-safe view of a slice reducer working on type-erased slices
trait ErasedReducer<A>: Send + Sync {
    fn initial(&self) -> SliceRef;
    fn reduce(&self, name: &str, state: &SliceRef, action: &A) -> SliceRef;
}

struct Typed<R>(R);

impl<A, R> ErasedReducer<A> for Typed<R>
where
    R: SliceReducer<A>,
{
    fn initial(&self) -> SliceRef {
        Arc::new(self.0.initial_state())
    }

    fn reduce(&self, name: &str, state: &SliceRef, action: &A) -> SliceRef {
        let Ok(typed) = Arc::clone(state).into_any().downcast::<R::State>() else {
            panic!(
                "slice `{}` does not hold a {}",
                name,
                type_name::<R::State>()
            );
        };
        let next = self.0.reduce(&typed, action);
        if Arc::ptr_eq(&next, &typed) {
            Arc::clone(state)
        } else {
            next
        }
    }
}

/// Ordered registry of named slice reducers acting as one root reducer
///
/// Names are fixed once the store is built. A `CombinedReducer` is itself a
/// [`SliceReducer`] whose state is a nested [`StateTree`], which is how a
/// feature groups several slices under one name.
pub struct CombinedReducer<A> {
    reducers: Vec<(&'static str, Box<dyn ErasedReducer<A>>)>,
}

impl<A: 'static> CombinedReducer<A> {
    pub fn new() -> Self {
        Self {
            reducers: Vec::new(),
        }
    }

    /// Register a slice reducer under `name` (builder style)
    pub fn slice<R>(mut self, name: &'static str, reducer: R) -> Result<Self, StoreError>
    where
        R: SliceReducer<A> + 'static,
    {
        self.insert(name, reducer)?;
        Ok(self)
    }

    /// Register a slice reducer under `name`
    pub fn insert<R>(&mut self, name: &'static str, reducer: R) -> Result<(), StoreError>
    where
        R: SliceReducer<A> + 'static,
    {
        if self.contains(name) {
            return Err(StoreError::DuplicateSlice(name));
        }
        self.reducers.push((name, Box::new(Typed(reducer))));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reducers.iter().any(|(existing, _)| *existing == name)
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    /// Registered slice names in registration order
    pub fn slice_names(&self) -> Vec<&'static str> {
        self.reducers.iter().map(|(name, _)| *name).collect()
    }

    /// Tree holding every slice's declared initial value
    pub fn initial_tree(&self) -> StateTree {
        StateTree::from_slices(
            self.reducers
                .iter()
                .map(|(name, reducer)| (*name, reducer.initial()))
                .collect(),
        )
    }

    /// Apply `action` to every slice of `state`
    ///
    /// Returns the same tree (by reference) when no slice changed.
    pub fn reduce_tree(&self, state: &StateTree, action: &A) -> StateTree {
        let mut changed = state.len() != self.reducers.len();
        let mut next: BTreeMap<&'static str, SliceRef> = BTreeMap::new();

        for (name, reducer) in &self.reducers {
            let slice = match state.raw_slice(name) {
                Some(previous) => {
                    let slice = reducer.reduce(name, previous, action);
                    changed |= !Arc::ptr_eq(&slice, previous);
                    slice
                }
                // Slice absent from the tree: bootstrap it, whatever the action
                None => {
                    changed = true;
                    reducer.initial()
                }
            };
            next.insert(*name, slice);
        }

        if changed {
            StateTree::from_slices(next)
        } else {
            state.clone()
        }
    }
}

impl<A: 'static> Default for CombinedReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for CombinedReducer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.reducers.iter().map(|(name, _)| name))
            .finish()
    }
}

impl<A: 'static> SliceReducer<A> for CombinedReducer<A> {
    type State = StateTree;

    fn initial_state(&self) -> StateTree {
        self.initial_tree()
    }

    fn reduce(&self, state: &Arc<StateTree>, action: &A) -> Arc<StateTree> {
        let next = self.reduce_tree(state, action);
        if next.ptr_eq(state) {
            Arc::clone(state)
        } else {
            Arc::new(next)
        }
    }
}
