//! Action trait

use std::fmt::Debug;

/// An immutable record describing something that happened.
///
/// Implemented by the application's root action enum. Reducers match on the
/// enum variants; the kind tag exists for effect filters and logs.
pub trait Action: Debug + Clone + Send + Sync + 'static {
    /// Unique tag of the logical event, e.g. `"[Auth] Login"`
    fn kind(&self) -> &'static str;
}
