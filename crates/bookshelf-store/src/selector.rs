//! Selectors derive views from the state tree
//!
//! A selector is a pure function of a [`StateTree`]. Composed selectors built
//! with [`create_selector`] keep a memo cell holding their last inputs and
//! output, and only re-run the combiner when an input changed identity.
//!
//! Identity is the shallow check expressed by [`RefEq`]: shared values compare
//! by pointer, plain values (flags, numbers, strings) by value.

use crate::state_tree::StateTree;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

/// Shallow identity comparison used for memoization and change detection
pub trait RefEq {
    fn ref_eq(&self, other: &Self) -> bool;
}

impl<T: ?Sized> RefEq for Arc<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl RefEq for StateTree {
    fn ref_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: RefEq> RefEq for Option<T> {
    fn ref_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.ref_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! value_ref_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl RefEq for $ty {
                fn ref_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )+
    };
}

value_ref_eq!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
    String,
    &'static str,
);

macro_rules! tuple_ref_eq {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: RefEq),+> RefEq for ($($name,)+) {
            fn ref_eq(&self, other: &Self) -> bool {
                true $(&& self.$idx.ref_eq(&other.$idx))+
            }
        }
    };
}

tuple_ref_eq!(A: 0);
tuple_ref_eq!(A: 0, B: 1);
tuple_ref_eq!(A: 0, B: 1, C: 2);
tuple_ref_eq!(A: 0, B: 1, C: 2, D: 3);

/// Pure derivation over the state tree
pub trait Selector: Send + Sync {
    type Output: Clone + RefEq + Send + Sync + 'static;

    fn select(&self, state: &StateTree) -> Self::Output;
}

impl<T: Selector + ?Sized> Selector for Arc<T> {
    type Output = T::Output;

    fn select(&self, state: &StateTree) -> Self::Output {
        (**self).select(state)
    }
}

impl<T: Selector + ?Sized> Selector for Box<T> {
    type Output = T::Output;

    fn select(&self, state: &StateTree) -> Self::Output {
        (**self).select(state)
    }
}

/// Root selector of a feature: the top-level slice registered under `name`
pub struct FeatureSelector<T> {
    name: &'static str,
    _slice: PhantomData<fn() -> T>,
}

pub fn feature_selector<T>(name: &'static str) -> FeatureSelector<T> {
    FeatureSelector {
        name,
        _slice: PhantomData,
    }
}

impl<T> FeatureSelector<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Any + Send + Sync> Selector for FeatureSelector<T> {
    type Output = Arc<T>;

    fn select(&self, state: &StateTree) -> Arc<T> {
        state.expect_slice(self.name)
    }
}

/// A slice nested inside a feature tree
pub struct SliceSelector<P, T> {
    parent: P,
    name: &'static str,
    _slice: PhantomData<fn() -> T>,
}

pub fn slice_selector<P, T>(parent: P, name: &'static str) -> SliceSelector<P, T>
where
    P: Selector<Output = Arc<StateTree>>,
{
    SliceSelector {
        parent,
        name,
        _slice: PhantomData,
    }
}

impl<P, T> Selector for SliceSelector<P, T>
where
    P: Selector<Output = Arc<StateTree>>,
    T: Any + Send + Sync,
{
    type Output = Arc<T>;

    fn select(&self, state: &StateTree) -> Arc<T> {
        self.parent.select(state).expect_slice(self.name)
    }
}

/// Unmemoized projection
pub struct FnSelector<F>(F);

pub fn selector_fn<F, O>(f: F) -> FnSelector<F>
where
    F: Fn(&StateTree) -> O + Send + Sync,
    O: Clone + RefEq + Send + Sync + 'static,
{
    FnSelector(f)
}

impl<F, O> Selector for FnSelector<F>
where
    F: Fn(&StateTree) -> O + Send + Sync,
    O: Clone + RefEq + Send + Sync + 'static,
{
    type Output = O;

    fn select(&self, state: &StateTree) -> O {
        (self.0)(state)
    }
}

/// A tuple of input selectors evaluated together
pub trait SelectorInputs: Send + Sync {
    type Values: Clone + RefEq + Send + Sync + 'static;

    fn select_all(&self, state: &StateTree) -> Self::Values;
}

macro_rules! tuple_inputs {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Selector),+> SelectorInputs for ($($name,)+) {
            type Values = ($($name::Output,)+);

            fn select_all(&self, state: &StateTree) -> Self::Values {
                ($(self.$idx.select(state),)+)
            }
        }
    };
}

tuple_inputs!(A: 0);
tuple_inputs!(A: 0, B: 1);
tuple_inputs!(A: 0, B: 1, C: 2);
tuple_inputs!(A: 0, B: 1, C: 2, D: 3);

/// Selector composed from input selectors and a combiner, memoized on the
/// identity of its inputs
pub struct MemoizedSelector<I: SelectorInputs, F, O> {
    inputs: I,
    combiner: F,
    memo: Mutex<Option<(I::Values, O)>>,
}

/// Compose `inputs` (a tuple of one to four selectors) with `combiner`
///
/// ```rust,ignore
/// let show_sidenav = create_selector((feature_selector::<LayoutState>("layout"),), |(layout,)| {
///     layout.show_sidenav
/// });
/// ```
pub fn create_selector<I, F, O>(inputs: I, combiner: F) -> MemoizedSelector<I, F, O>
where
    I: SelectorInputs,
    F: Fn(&I::Values) -> O + Send + Sync,
    O: Clone + RefEq + Send + Sync + 'static,
{
    MemoizedSelector {
        inputs,
        combiner,
        memo: Mutex::new(None),
    }
}

impl<I, F, O> MemoizedSelector<I, F, O>
where
    I: SelectorInputs,
{
    /// Forget the memoized result
    pub fn reset(&self) {
        *self.memo.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl<I, F, O> Selector for MemoizedSelector<I, F, O>
where
    I: SelectorInputs,
    F: Fn(&I::Values) -> O + Send + Sync,
    O: Clone + RefEq + Send + Sync + 'static,
{
    type Output = O;

    fn select(&self, state: &StateTree) -> O {
        let values = self.inputs.select_all(state);
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((last_values, last_output)) = memo.as_ref() {
            if last_values.ref_eq(&values) {
                return last_output.clone();
            }
        }

        let output = (self.combiner)(&values);
        *memo = Some((values, output.clone()));
        output
    }
}
