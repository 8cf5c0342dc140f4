//! stest - a minimal self-registering unit-test harness
//!
//! Test cases are collected into a [`Registry`] during a bootstrap phase the
//! host controls, then executed once, sequentially, by a [`Driver`] that
//! prints a progress line per case and a summary at the end.
//!
//! # Failure tiers
//!
//! | Tier | Produced by | Reported as |
//! |------|-------------|-------------|
//! | Assertion | `check_*!` macros, [`fail!`] | [`FailureKind::Assertion`] |
//! | Anomalous | any other panic inside a test | [`FailureKind::Anomalous`] |
//!
//! Neither tier stops the run; the driver always prints a summary.
//!
//! # Quick Start
//!
//! ```rust
//! use stest::{check_eq, check_near, define_tests, Driver, DriverConfig, Registry};
//!
//! define_tests! {
//!     pub fn register_math;
//!
//!     addition {
//!         check_eq!(2 + 2, 4);
//!     }
//!
//!     rounding {
//!         check_near!(1.0, 1.05, 0.1);
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! register_math(&mut registry);
//!
//! let mut out = Vec::new();
//! let report = Driver::new(DriverConfig::default())
//!     .run_with_output(&registry, &mut out)
//!     .unwrap();
//! assert!(report.all_passed());
//! ```

pub mod assert;
pub mod case;
pub mod config;
pub mod driver;
pub mod error;
pub mod failure;
pub mod registry;
pub mod report;

// Re-export key types at crate root.
pub use case::{FnTest, TestCase, TestOutcome};
pub use config::{verbose_requested, DriverConfig};
pub use driver::{run_all, Driver, DriverState};
pub use error::{HarnessError, HarnessResult};
pub use failure::{FailureRecord, Location, Operand};
pub use registry::Registry;
pub use report::{Failure, FailureKind, RunReport};
