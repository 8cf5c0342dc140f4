//! Test registry.
//!
//! The registry is an owned value. The host creates it, runs its bootstrap
//! functions against it, and then lends it to the [`Driver`](crate::Driver).
//! Borrowing rules keep it read-only for the duration of a run.

use std::fmt;

use crate::case::{FnTest, TestCase, TestOutcome};

/// Ordered, append-only collection of test cases.
#[derive(Default)]
pub struct Registry {
    cases: Vec<Box<dyn TestCase>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a test case. Registration order is execution order.
    ///
    /// Duplicate names are accepted and show up as separate report entries.
    pub fn register(&mut self, case: impl TestCase + 'static) {
        self.register_boxed(Box::new(case));
    }

    /// Append an already boxed test case.
    pub fn register_boxed(&mut self, case: Box<dyn TestCase>) {
        let name = case.name();
        if self.cases.iter().any(|existing| existing.name() == name) {
            tracing::warn!(test = name, "duplicate test name registered");
        }
        tracing::debug!(
            test = name,
            position = self.cases.len() + 1,
            "registered test"
        );
        self.cases.push(case);
    }

    /// Append a closure-backed test case.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, body: F)
    where
        F: Fn() -> TestOutcome + 'static,
    {
        self.register(FnTest::new(name, body));
    }

    /// All registered cases in registration order.
    pub fn all(&self) -> &[Box<dyn TestCase>] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|case| case.name()).collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("cases", &self.names())
            .finish()
    }
}
