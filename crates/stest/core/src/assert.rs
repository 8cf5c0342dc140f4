//! Assertion protocol.
//!
//! Every assertion checks the *violating* condition and, if it holds, returns
//! a [`FailureRecord`] describing the violation with the opposite operator
//! (`ASSERT_GREATER(a, b): '1' <= '2'`). The functions here take the operand
//! source text from the caller; the `check_*!` macros fill it in with
//! `stringify!` and propagate the failure with `?`.
//!
//! The call site is captured through `#[track_caller]`, so a failure points
//! at the line of the macro invocation, not at this module.

use std::any::Any;
use std::fmt::Debug;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::case::TestOutcome;
use crate::failure::{panic_message, FailureRecord, Location};

pub const ASSERT_TRUE: &str = "ASSERT_TRUE";
pub const ASSERT_FALSE: &str = "ASSERT_FALSE";
pub const ASSERT_EQ: &str = "ASSERT_EQ";
pub const ASSERT_NEQ: &str = "ASSERT_NEQ";
pub const ASSERT_GREATER: &str = "ASSERT_GREATER";
pub const ASSERT_GREATER_EQUAL: &str = "ASSERT_GREATER_EQUAL";
pub const ASSERT_LESS: &str = "ASSERT_LESS";
pub const ASSERT_LESS_EQUAL: &str = "ASSERT_LESS_EQUAL";
pub const ASSERT_STR_EQ: &str = "ASSERT_STR_EQ";
pub const ASSERT_STR_NEQ: &str = "ASSERT_STR_NEQ";
pub const ASSERT_NEAR: &str = "ASSERT_NEAR";
pub const ASSERT_EXCEPTION: &str = "ASSERT_EXCEPTION";
pub const ASSERT_ANY_EXCEPTION: &str = "ASSERT_ANY_EXCEPTION";
pub const ASSERT_NO_EXCEPTION: &str = "ASSERT_NO_EXCEPTION";
pub const FAIL: &str = "FAIL";

// ============================================================================
// Record builders
// ============================================================================

#[track_caller]
fn operator_failure(
    assertion: &str,
    a_expr: &str,
    b_expr: &str,
    a: String,
    b: String,
    violated: &str,
) -> FailureRecord {
    FailureRecord::new(format!(
        "{}({}, {}): '{}' {} '{}'",
        assertion, a_expr, b_expr, a, violated, b
    ))
    .with_assertion(assertion)
    .with_operand(a_expr, a)
    .with_operand(b_expr, b)
    .with_location(Location::caller())
}

#[track_caller]
fn code_failure(assertion: &str, code: &str, message: impl AsRef<str>) -> FailureRecord {
    FailureRecord::new(format!("{}({}): {}", assertion, code, message.as_ref()))
        .with_assertion(assertion)
        .with_location(Location::caller())
}

#[track_caller]
fn boolean(assertion: &str, expr: &str, value: bool, expected: bool) -> TestOutcome {
    if value != expected {
        return Err(FailureRecord::new(format!(
            "{}({}): '{}' isn't equal to '{}'",
            assertion, expr, value, expected
        ))
        .with_assertion(assertion)
        .with_operand(expr, value.to_string())
        .with_location(Location::caller()));
    }
    Ok(())
}

/// Neither `a < b`, `a == b` nor `a > b` holds (e.g. a NaN operand).
fn incomparable<A, B>(a: &A, b: &B) -> bool
where
    A: PartialOrd<B> + ?Sized,
    B: ?Sized,
{
    a.partial_cmp(b).is_none()
}

// ============================================================================
// Boolean
// ============================================================================

#[track_caller]
pub fn is_true(expr: &str, value: bool) -> TestOutcome {
    boolean(ASSERT_TRUE, expr, value, true)
}

#[track_caller]
pub fn is_false(expr: &str, value: bool) -> TestOutcome {
    boolean(ASSERT_FALSE, expr, value, false)
}

// ============================================================================
// Comparison
// ============================================================================

#[track_caller]
pub fn eq<A, B>(a_expr: &str, b_expr: &str, a: &A, b: &B) -> TestOutcome
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a != b {
        return Err(operator_failure(
            ASSERT_EQ,
            a_expr,
            b_expr,
            format!("{:?}", a),
            format!("{:?}", b),
            "!=",
        ));
    }
    Ok(())
}

#[track_caller]
pub fn neq<A, B>(a_expr: &str, b_expr: &str, a: &A, b: &B) -> TestOutcome
where
    A: PartialEq<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a == b {
        return Err(operator_failure(
            ASSERT_NEQ,
            a_expr,
            b_expr,
            format!("{:?}", a),
            format!("{:?}", b),
            "==",
        ));
    }
    Ok(())
}

#[track_caller]
pub fn gt<A, B>(a_expr: &str, b_expr: &str, a: &A, b: &B) -> TestOutcome
where
    A: PartialOrd<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a <= b || incomparable(a, b) {
        return Err(operator_failure(
            ASSERT_GREATER,
            a_expr,
            b_expr,
            format!("{:?}", a),
            format!("{:?}", b),
            "<=",
        ));
    }
    Ok(())
}

#[track_caller]
pub fn ge<A, B>(a_expr: &str, b_expr: &str, a: &A, b: &B) -> TestOutcome
where
    A: PartialOrd<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a < b || incomparable(a, b) {
        return Err(operator_failure(
            ASSERT_GREATER_EQUAL,
            a_expr,
            b_expr,
            format!("{:?}", a),
            format!("{:?}", b),
            "<",
        ));
    }
    Ok(())
}

#[track_caller]
pub fn lt<A, B>(a_expr: &str, b_expr: &str, a: &A, b: &B) -> TestOutcome
where
    A: PartialOrd<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a >= b || incomparable(a, b) {
        return Err(operator_failure(
            ASSERT_LESS,
            a_expr,
            b_expr,
            format!("{:?}", a),
            format!("{:?}", b),
            ">=",
        ));
    }
    Ok(())
}

#[track_caller]
pub fn le<A, B>(a_expr: &str, b_expr: &str, a: &A, b: &B) -> TestOutcome
where
    A: PartialOrd<B> + Debug + ?Sized,
    B: Debug + ?Sized,
{
    if a > b || incomparable(a, b) {
        return Err(operator_failure(
            ASSERT_LESS_EQUAL,
            a_expr,
            b_expr,
            format!("{:?}", a),
            format!("{:?}", b),
            ">",
        ));
    }
    Ok(())
}

// ============================================================================
// Strings
// ============================================================================

#[track_caller]
pub fn str_eq(a_expr: &str, b_expr: &str, a: impl AsRef<str>, b: impl AsRef<str>) -> TestOutcome {
    let (a, b) = (a.as_ref(), b.as_ref());
    if a != b {
        return Err(operator_failure(
            ASSERT_STR_EQ,
            a_expr,
            b_expr,
            a.to_string(),
            b.to_string(),
            "!=",
        ));
    }
    Ok(())
}

#[track_caller]
pub fn str_neq(a_expr: &str, b_expr: &str, a: impl AsRef<str>, b: impl AsRef<str>) -> TestOutcome {
    let (a, b) = (a.as_ref(), b.as_ref());
    if a == b {
        return Err(operator_failure(
            ASSERT_STR_NEQ,
            a_expr,
            b_expr,
            a.to_string(),
            b.to_string(),
            "==",
        ));
    }
    Ok(())
}

// ============================================================================
// Floating point
// ============================================================================

/// Primitive numbers accepted by [`near`], widened to `f64` for comparison.
pub trait AsF64: Copy {
    fn as_f64(self) -> f64;
}

macro_rules! impl_as_f64 {
    ($($ty:ty),*) => {
        $(
            impl AsF64 for $ty {
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// `abs(a - b) <= eps`. A NaN difference is a violation.
///
/// Integers wider than 53 bits lose precision in the conversion.
#[track_caller]
pub fn near(
    a_expr: &str,
    b_expr: &str,
    eps_expr: &str,
    a: impl AsF64,
    b: impl AsF64,
    eps: impl AsF64,
) -> TestOutcome {
    let (a, b, eps) = (a.as_f64(), b.as_f64(), eps.as_f64());
    let diff = (a - b).abs();
    if diff > eps || diff.is_nan() {
        return Err(FailureRecord::new(format!(
            "{}({}, {}, {}): ABS({:.6} - {:.6}) = {:.6} > {:.6}",
            ASSERT_NEAR, a_expr, b_expr, eps_expr, a, b, diff, eps
        ))
        .with_assertion(ASSERT_NEAR)
        .with_operand(a_expr, format!("{:.6}", a))
        .with_operand(b_expr, format!("{:.6}", b))
        .with_operand(eps_expr, format!("{:.6}", eps))
        .with_location(Location::caller()));
    }
    Ok(())
}

// ============================================================================
// Panics
// ============================================================================

/// `f` must panic with a payload of type `K`.
///
/// `panic!("literal")` carries a `&'static str`, a formatted `panic!` carries
/// a `String`, and `std::panic::panic_any` carries whatever it was given. A
/// [`FailureRecord`] raised inside `f` is passed through unchanged.
#[track_caller]
pub fn panics<K, R>(code: &str, f: impl FnOnce() -> R) -> TestOutcome
where
    K: Any,
{
    let payload = match catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => return Err(code_failure(ASSERT_EXCEPTION, code, "No exception thrown")),
        Err(payload) => payload,
    };
    match payload.downcast::<FailureRecord>() {
        Ok(record) => Err(*record),
        Err(payload) if payload.is::<K>() => Ok(()),
        Err(_) => Err(code_failure(ASSERT_EXCEPTION, code, "Other exception thrown")),
    }
}

/// `f` must panic with any payload.
#[track_caller]
pub fn any_panic<R>(code: &str, f: impl FnOnce() -> R) -> TestOutcome {
    let payload = match catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => {
            return Err(code_failure(
                ASSERT_ANY_EXCEPTION,
                code,
                "No exception thrown",
            ))
        }
        Err(payload) => payload,
    };
    match payload.downcast::<FailureRecord>() {
        Ok(record) => Err(*record),
        Err(_) => Ok(()),
    }
}

/// `f` must not panic. Its value is handed back on success.
#[track_caller]
pub fn no_panic<R>(code: &str, f: impl FnOnce() -> R) -> Result<R, FailureRecord> {
    let payload = match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => return Ok(value),
        Err(payload) => payload,
    };
    let message = match panic_message(payload.as_ref()) {
        Some(text) => format!("An exception was thrown ({})", text),
        None => "An exception was thrown".to_string(),
    };
    Err(code_failure(ASSERT_NO_EXCEPTION, code, message))
}

// ============================================================================
// Unconditional
// ============================================================================

#[track_caller]
pub fn fail() -> FailureRecord {
    FailureRecord::new(FAIL)
        .with_assertion(FAIL)
        .with_location(Location::caller())
}

#[track_caller]
pub fn fail_with(reason: impl AsRef<str>) -> FailureRecord {
    FailureRecord::new(format!("{}: {}", FAIL, reason.as_ref()))
        .with_assertion(FAIL)
        .with_location(Location::caller())
}

// ============================================================================
// Macros
// ============================================================================

/// `ASSERT_TRUE`: the operand must be `true`.
#[macro_export]
macro_rules! check_true {
    ($a:expr $(,)?) => {
        $crate::assert::is_true(stringify!($a), $a)?
    };
}

/// Shorthand for [`check_true!`].
#[macro_export]
macro_rules! check {
    ($a:expr $(,)?) => {
        $crate::check_true!($a)
    };
}

/// `ASSERT_FALSE`: the operand must be `false`.
#[macro_export]
macro_rules! check_false {
    ($a:expr $(,)?) => {
        $crate::assert::is_false(stringify!($a), $a)?
    };
}

/// `ASSERT_EQ`: `a == b`.
#[macro_export]
macro_rules! check_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::eq(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_NEQ`: `a != b`.
#[macro_export]
macro_rules! check_neq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::neq(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_GREATER`: `a > b`.
#[macro_export]
macro_rules! check_gt {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::gt(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_GREATER_EQUAL`: `a >= b`.
#[macro_export]
macro_rules! check_ge {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::ge(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_LESS`: `a < b`.
#[macro_export]
macro_rules! check_lt {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::lt(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_LESS_EQUAL`: `a <= b`.
#[macro_export]
macro_rules! check_le {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::le(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_STR_EQ`: string equality, values reported verbatim.
#[macro_export]
macro_rules! check_str_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::str_eq(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_STR_NEQ`: string inequality, values reported verbatim.
#[macro_export]
macro_rules! check_str_neq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert::str_neq(stringify!($a), stringify!($b), &$a, &$b)?
    };
}

/// `ASSERT_NEAR`: `abs(a - b) <= eps`.
#[macro_export]
macro_rules! check_near {
    ($a:expr, $b:expr, $eps:expr $(,)?) => {
        $crate::assert::near(stringify!($a), stringify!($b), stringify!($eps), $a, $b, $eps)?
    };
}

/// `ASSERT_EXCEPTION`: evaluating the code panics with a payload of the
/// given type.
#[macro_export]
macro_rules! check_panics {
    ($code:expr, $kind:ty $(,)?) => {
        $crate::assert::panics::<$kind, _>(stringify!($code), || {
            let _ = &$code;
        })?
    };
}

/// `ASSERT_ANY_EXCEPTION`: evaluating the code panics.
#[macro_export]
macro_rules! check_any_panic {
    ($code:expr $(,)?) => {
        $crate::assert::any_panic(stringify!($code), || {
            let _ = &$code;
        })?
    };
}

/// `ASSERT_NO_EXCEPTION`: evaluating the code does not panic. Evaluates to
/// the value of the code.
#[macro_export]
macro_rules! check_no_panic {
    ($code:expr $(,)?) => {
        $crate::assert::no_panic(stringify!($code), || $code)?
    };
}

/// `FAIL`: fail the current test unconditionally.
#[macro_export]
macro_rules! fail {
    () => {
        return ::core::result::Result::Err(::core::convert::From::from($crate::assert::fail()))
    };
    ($($reason:tt)+) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::assert::fail_with(::std::format!($($reason)+)),
        ))
    };
}
