use thiserror::Error;

/// Errors raised while wiring a store together
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("slice `{0}` is registered more than once")]
    DuplicateSlice(&'static str),

    #[error("no slice reducers registered")]
    EmptyRegistry,

    #[error("dispatch queue is already consumed by a running effect runner")]
    DispatchQueueTaken,
}
