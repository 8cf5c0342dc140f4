//! Failure records.
//!
//! A [`FailureRecord`] is the only thing a failing test hands back to the
//! driver. It is built once at the assertion site and never mutated
//! afterwards.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Message used when a test fails without a usable description.
pub const UNKNOWN_FAILURE: &str = "Unknown fail result";

/// Source position captured at an assertion site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Source file as reported by the compiler
    pub file: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location of the caller, resolved through `#[track_caller]` frames.
    #[track_caller]
    pub fn caller() -> Self {
        std::panic::Location::caller().into()
    }
}

impl From<&std::panic::Location<'_>> for Location {
    fn from(loc: &std::panic::Location<'_>) -> Self {
        Self::new(loc.file(), loc.line(), loc.column())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One operand of a failed assertion: its source text and rendered value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    pub expr: String,
    pub value: String,
}

/// Why a test failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    message: String,
    location: Option<Location>,
    assertion: Option<String>,
    operands: Vec<Operand>,
}

impl FailureRecord {
    /// Create a record carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            assertion: None,
            operands: Vec::new(),
        }
    }

    /// Record for a fault that did not come from an assertion.
    ///
    /// The panic text is appended when the payload is a string.
    pub fn anomalous(payload: &(dyn Any + Send)) -> Self {
        match panic_message(payload) {
            Some(text) => Self::new(format!("{} (panicked: {})", UNKNOWN_FAILURE, text)),
            None => Self::new(UNKNOWN_FAILURE),
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_assertion(mut self, assertion: impl Into<String>) -> Self {
        self.assertion = Some(assertion.into());
        self
    }

    pub fn with_operand(mut self, expr: impl Into<String>, value: impl Into<String>) -> Self {
        self.operands.push(Operand {
            expr: expr.into(),
            value: value.into(),
        });
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Logical assertion name, e.g. `ASSERT_EQ`.
    pub fn assertion(&self) -> Option<&str> {
        self.assertion.as_deref()
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Abort the current test body from code that cannot return a `Result`.
    ///
    /// The record travels as the panic payload; the driver and the panic
    /// assertions recognise it and treat it as an ordinary assertion failure.
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for FailureRecord {}

/// Text of a `panic!` payload, if it carries one.
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Some((*s).to_string())
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Some(s.clone())
    } else if let Some(record) = payload.downcast_ref::<FailureRecord>() {
        Some(record.to_string())
    } else {
        None
    }
}
