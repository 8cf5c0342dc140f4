//! The test case contract.

use std::fmt;

use crate::failure::FailureRecord;

/// Outcome of running one test body.
pub type TestOutcome = Result<(), FailureRecord>;

/// One independently runnable unit of verification.
///
/// `run` is called exactly once per driver run. Returning `Ok(())` means the
/// test passed; returning a [`FailureRecord`] means it failed. A panic is an
/// anomalous failure and is reported separately by the driver.
///
/// Implementations must not leak state into other test cases.
pub trait TestCase {
    /// Stable name used in reports.
    fn name(&self) -> &str;

    /// Execute the test body.
    fn run(&self) -> TestOutcome;
}

impl<T: TestCase + ?Sized> TestCase for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self) -> TestOutcome {
        (**self).run()
    }
}

/// A test case backed by a closure.
pub struct FnTest<F> {
    name: String,
    body: F,
}

impl<F> FnTest<F>
where
    F: Fn() -> TestOutcome,
{
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

impl<F> TestCase for FnTest<F>
where
    F: Fn() -> TestOutcome,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> TestOutcome {
        (self.body)()
    }
}

impl<F> fmt::Debug for FnTest<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTest").field("name", &self.name).finish()
    }
}

/// Declare test cases together with the bootstrap function that registers
/// them.
///
/// Every body becomes a closure-backed [`FnTest`] named after its label; the
/// generated bootstrap function hands them to the registry in declaration
/// order, so adding a body here is all it takes for it to run. Labels are
/// only used as names and never enter scope, so a body may freely bind a
/// local of the same name.
///
/// ```
/// use stest::{check_eq, define_tests, Registry};
///
/// define_tests! {
///     /// Registers the arithmetic checks.
///     pub fn register_arithmetic;
///
///     addition_commutes {
///         check_eq!(2 + 3, 3 + 2);
///     }
/// }
///
/// let mut registry = Registry::new();
/// register_arithmetic(&mut registry);
/// assert_eq!(registry.names(), vec!["addition_commutes"]);
/// ```
#[macro_export]
macro_rules! define_tests {
    (
        $(#[$meta:meta])*
        $vis:vis fn $register:ident;
        $( $name:ident $body:block )*
    ) => {
        $(#[$meta])*
        $vis fn $register(registry: &mut $crate::Registry) {
            $(
                registry.register_fn(
                    stringify!($name),
                    || -> $crate::TestOutcome {
                        $body;
                        Ok(())
                    },
                );
            )*
        }
    };
}
