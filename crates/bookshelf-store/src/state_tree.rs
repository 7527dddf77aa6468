//! Immutable state tree
//!
//! The tree maps slice names to type-erased slice values. Both the map and
//! every slice sit behind `Arc`, so replacing one slice shares all others with
//! the previous tree and change detection is a pointer comparison.

use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A value that can live in the state tree
///
/// Blanket-implemented for every `Debug + Send + Sync + 'static` type.
pub trait SliceState: Any + fmt::Debug + Send + Sync {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + fmt::Debug + Send + Sync> SliceState for T {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Shared handle to one slice of the tree
pub type SliceRef = Arc<dyn SliceState>;

/// Snapshot of the whole application state
///
/// Cloning is cheap and yields the same snapshot (`ptr_eq` holds).
#[derive(Clone)]
pub struct StateTree {
    slices: Arc<BTreeMap<&'static str, SliceRef>>,
}

impl StateTree {
    pub(crate) fn from_slices(slices: BTreeMap<&'static str, SliceRef>) -> Self {
        Self {
            slices: Arc::new(slices),
        }
    }

    /// Typed access to a slice; `None` if missing or of another type
    pub fn slice<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let slice = self.slices.get(name)?;
        Arc::clone(slice).into_any().downcast::<T>().ok()
    }

    /// Typed access to a slice that must exist
    ///
    /// # Panics
    ///
    /// Panics if the slice is missing or holds another type. Selectors run
    /// against a tree built from a fixed registry, so this is a wiring bug.
    pub fn expect_slice<T: Any + Send + Sync>(&self, name: &str) -> Arc<T> {
        self.slice(name).unwrap_or_else(|| {
            panic!(
                "state tree has no slice `{}` of type {} (slices: {:?})",
                name,
                type_name::<T>(),
                self.names().collect::<Vec<_>>()
            )
        })
    }

    pub(crate) fn raw_slice(&self, name: &str) -> Option<&SliceRef> {
        self.slices.get(name)
    }

    /// Slice names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slices.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Reference equality: both handles point at the same snapshot
    pub fn ptr_eq(&self, other: &StateTree) -> bool {
        Arc::ptr_eq(&self.slices, &other.slices)
    }
}

impl fmt::Debug for StateTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.slices.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter(u32);

    fn tree() -> StateTree {
        let mut slices: BTreeMap<&'static str, SliceRef> = BTreeMap::new();
        slices.insert("counter", Arc::new(Counter(3)));
        slices.insert("label", Arc::new(String::from("books")));
        StateTree::from_slices(slices)
    }

    #[test]
    fn test_typed_slice_access() {
        let tree = tree();
        assert_eq!(*tree.expect_slice::<Counter>("counter"), Counter(3));
        assert_eq!(tree.expect_slice::<String>("label").as_str(), "books");
        assert_eq!(tree.names().collect::<Vec<_>>(), vec!["counter", "label"]);
    }

    #[test]
    fn test_mistyped_or_missing_slice_is_none() {
        let tree = tree();
        assert!(tree.slice::<String>("counter").is_none());
        assert!(tree.slice::<Counter>("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "state tree has no slice `missing`")]
    fn test_expect_missing_slice_panics() {
        tree().expect_slice::<Counter>("missing");
    }

    #[test]
    fn test_clone_shares_snapshot() {
        let tree = tree();
        let copy = tree.clone();
        assert!(tree.ptr_eq(&copy));
        assert!(!tree.ptr_eq(&self::tree()));
        assert!(Arc::ptr_eq(
            &tree.expect_slice::<Counter>("counter"),
            &copy.expect_slice::<Counter>("counter")
        ));
    }

    #[test]
    fn test_debug_lists_slices() {
        let rendered = format!("{:?}", tree());
        assert_eq!(rendered, r#"{"counter": Counter(3), "label": "books"}"#);
    }
}
