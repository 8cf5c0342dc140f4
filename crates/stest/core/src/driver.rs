//! Sequential test driver.
//!
//! Runs every registered case once, in registration order, printing a
//! progress line per case and a summary at the end. A failing or panicking
//! case never stops the run.

use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::case::TestCase;
use crate::config::DriverConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::failure::FailureRecord;
use crate::registry::Registry;
use crate::report::{format_progress, FailureKind, RunReport, NO_TESTS};

/// Driver lifecycle. A driver runs once and is then `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    /// Not started
    Idle,
    /// Executing test cases
    Running,
    /// Printing the summary
    Reporting,
    /// Finished
    Done,
}

/// Executes the cases of a [`Registry`] and reports on them.
///
/// Panics are caught per case, but the process panic hook runs before the
/// driver sees them. Left at the default, it prints every anomalous panic and
/// every [`FailureRecord::raise`] to stderr, with a backtrace when
/// `RUST_BACKTRACE` is set. The stdout report is unaffected. Hosts wanting a
/// clean stderr install their own hook first (see [`run_all`]).
#[derive(Debug)]
pub struct Driver {
    config: DriverConfig,
    state: DriverState,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            state: DriverState::Idle,
        }
    }

    /// Toggle the per-failure detail block.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Run every case, reporting to stdout.
    pub fn run(&mut self, registry: &Registry) -> HarnessResult<RunReport> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(registry, &mut out)
    }

    /// Run every case, reporting to `out`.
    pub fn run_with_output<W: Write>(
        &mut self,
        registry: &Registry,
        out: &mut W,
    ) -> HarnessResult<RunReport> {
        if self.state != DriverState::Idle {
            return Err(HarnessError::InvalidState(self.state));
        }

        let mut report = RunReport::start();

        if registry.is_empty() {
            tracing::info!("no tests registered");
            writeln!(out, "{}", NO_TESTS)?;
            out.flush()?;
            report.finish();
            self.state = DriverState::Done;
            return Ok(report);
        }

        self.state = DriverState::Running;
        let total = registry.len();
        tracing::info!(total, "running tests");
        writeln!(out, "Run {} tests", total)?;

        for (index, case) in registry.all().iter().enumerate() {
            let name = case.name();
            write!(out, "{}", format_progress(index + 1, total, name))?;
            out.flush()?;

            match execute(case.as_ref()) {
                Ok(()) => {
                    tracing::debug!(test = name, "passed");
                    writeln!(out, "done")?;
                    report.record_pass();
                }
                Err((kind, record)) => {
                    tracing::warn!(test = name, %kind, failure = %record, "failed");
                    writeln!(out, "Fail!")?;
                    report.record_failure(name, kind, record);
                }
            }
        }

        report.finish();
        self.state = DriverState::Reporting;
        report.write_summary(out)?;
        if self.config.verbose {
            report.write_details(out)?;
        }
        out.flush()?;
        self.state = DriverState::Done;

        tracing::info!(
            total = report.total(),
            failed = report.failed_count(),
            duration_ms = report.duration_ms(),
            "test run complete"
        );

        Ok(report)
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}

/// Run all registered tests once with `config`, reporting to stdout.
///
/// The driver leaves the panic hook alone. A host that does not want panic
/// messages on stderr installs a quiet one before the run:
///
/// ```
/// use stest::{run_all, DriverConfig, FailureKind, FailureRecord, Registry};
///
/// std::panic::set_hook(Box::new(|_| {}));
///
/// let mut registry = Registry::new();
/// registry.register_fn("raises", || FailureRecord::new("bad input").raise());
/// registry.register_fn("explodes", || panic!("boom"));
///
/// let report = run_all(&registry, DriverConfig::default()).unwrap();
/// assert_eq!(report.failures()[0].kind, FailureKind::Assertion);
/// assert_eq!(report.failures()[1].kind, FailureKind::Anomalous);
///
/// drop(std::panic::take_hook());
/// ```
pub fn run_all(registry: &Registry, config: DriverConfig) -> HarnessResult<RunReport> {
    Driver::new(config).run(registry)
}

/// Run one case, turning a panic into a failure.
///
/// A [`FailureRecord`] used as the panic payload (see
/// [`FailureRecord::raise`]) counts as an assertion failure; any other
/// payload is anomalous.
fn execute(case: &dyn TestCase) -> Result<(), (FailureKind, FailureRecord)> {
    match catch_unwind(AssertUnwindSafe(|| case.run())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(record)) => Err((FailureKind::Assertion, record)),
        Err(payload) => match payload.downcast::<FailureRecord>() {
            Ok(record) => Err((FailureKind::Assertion, *record)),
            Err(payload) => Err((
                FailureKind::Anomalous,
                FailureRecord::anomalous(payload.as_ref()),
            )),
        },
    }
}
