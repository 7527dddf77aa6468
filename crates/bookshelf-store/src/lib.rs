//! Bookshelf Store - a single-source-of-truth state container
//!
//! ```text
//! ┌────────────┐  reduce  ┌──────────────────────────────┐ new tree ┌───────────┐
//! │  dispatch  ├─────────►│ meta-reducers → root reducer ├─────────►│ watch<T>  │
//! └─────▲──────┘          └──────────────┬───────────────┘          └─────┬─────┘
//!       │                                │ action stream                  │
//!       │ follow-up actions        ┌─────▼─────┐                  ┌───────▼───────┐
//!       └──────────────────────────┤  effects  │                  │  selections   │
//!                                  └───────────┘                  └───────────────┘
//! ```
//!
//! State is an immutable tree of named slices. Each dispatch folds one action
//! through the reducer chain; unchanged slices keep their `Arc`, so change
//! detection is a pointer comparison all the way down.

pub mod action;
pub mod dispatcher;
pub mod effect;
pub mod error;
pub mod meta_reducer;
pub mod reducer;
pub mod selector;
pub mod state_tree;
pub mod store;

#[cfg(test)]
mod test_support;

pub use action::Action;
pub use dispatcher::Dispatcher;
pub use effect::{Effect, EffectRunner, EffectsHandle};
pub use error::StoreError;
pub use meta_reducer::{FreezeGuard, LoggingMetaReducer, MetaReducer, Next};
pub use reducer::{reducer_fn, CombinedReducer, FnReducer, SliceReducer};
pub use selector::{
    create_selector, feature_selector, selector_fn, slice_selector, FeatureSelector, FnSelector,
    MemoizedSelector, RefEq, Selector, SelectorInputs, SliceSelector,
};
pub use state_tree::{SliceRef, SliceState, StateTree};
pub use store::{ActionStream, Selection, Store, StoreBuilder};
