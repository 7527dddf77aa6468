//! Shared fixtures for the unit tests of this crate

use crate::{reducer_fn, Action, CombinedReducer, SliceReducer};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum TestAction {
    Increment,
    Rename(String),
    Ping,
    Unknown,
}

impl Action for TestAction {
    fn kind(&self) -> &'static str {
        match self {
            TestAction::Increment => "[Test] Increment",
            TestAction::Rename(_) => "[Test] Rename",
            TestAction::Ping => "[Test] Ping",
            TestAction::Unknown => "[Test] Unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counter {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
}

pub fn counter_reducer() -> impl SliceReducer<TestAction, State = Counter> {
    reducer_fn(Counter::default(), |state: &Arc<Counter>, action: &TestAction| {
        match action {
            TestAction::Increment => Arc::new(Counter {
                value: state.value + 1,
            }),
            _ => Arc::clone(state),
        }
    })
}

pub fn label_reducer() -> impl SliceReducer<TestAction, State = Label> {
    reducer_fn(
        Label {
            text: "shelf".to_string(),
        },
        |state: &Arc<Label>, action: &TestAction| match action {
            TestAction::Rename(text) => Arc::new(Label { text: text.clone() }),
            _ => Arc::clone(state),
        },
    )
}

pub fn root() -> CombinedReducer<TestAction> {
    CombinedReducer::new()
        .slice("counter", counter_reducer())
        .and_then(|root| root.slice("label", label_reducer()))
        .expect("fixture slices are unique")
}
