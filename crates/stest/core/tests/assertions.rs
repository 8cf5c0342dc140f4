//! Assertion macros exercised the way test bodies use them.

use stest::{
    check, check_any_panic, check_eq, check_false, check_ge, check_gt, check_le, check_lt,
    check_near, check_neq, check_no_panic, check_panics, check_str_eq, check_str_neq,
    check_true, fail, FailureRecord, TestOutcome,
};

fn message(outcome: TestOutcome) -> String {
    outcome
        .expect_err("body should have failed")
        .message()
        .to_string()
}

#[derive(Debug)]
struct Overflow;

fn checked_div(a: i32, b: i32) -> i32 {
    if b == 0 {
        std::panic::panic_any(Overflow);
    }
    a / b
}

#[test]
fn eq_passes_on_equal_values() {
    fn body() -> TestOutcome {
        check_eq!(2, 2);
        check_eq!(vec![1, 2], vec![1, 2]);
        Ok(())
    }
    assert!(body().is_ok());
}

#[test]
fn eq_failure_names_literals_and_values() {
    fn body() -> TestOutcome {
        let left = 2;
        check_eq!(left, 3);
        Ok(())
    }
    assert_eq!(message(body()), "ASSERT_EQ(left, 3): '2' != '3'");
}

#[test]
fn failure_short_circuits_body() {
    use std::cell::Cell;
    let reached = Cell::new(false);
    let body = || -> TestOutcome {
        check_true!(1 > 2);
        reached.set(true);
        Ok(())
    };
    assert!(body().is_err());
    assert!(!reached.get());
}

#[test]
fn boolean_messages() {
    fn not_true() -> TestOutcome {
        check!(1 + 1 == 3);
        Ok(())
    }
    fn not_false() -> TestOutcome {
        check_false!(true);
        Ok(())
    }
    assert_eq!(
        message(not_true()),
        "ASSERT_TRUE(1 + 1 == 3): 'false' isn't equal to 'true'"
    );
    assert_eq!(
        message(not_false()),
        "ASSERT_FALSE(true): 'true' isn't equal to 'false'"
    );
}

#[test]
fn comparison_family() {
    fn passing() -> TestOutcome {
        check_neq!(3, 5);
        check_gt!(5, 3);
        check_ge!(5, 5);
        check_lt!(3, 5);
        check_le!(3, 3);
        Ok(())
    }
    fn neq_fails() -> TestOutcome {
        check_neq!(3, 3);
        Ok(())
    }
    fn gt_fails() -> TestOutcome {
        check_gt!(1, 2);
        Ok(())
    }
    assert!(passing().is_ok());
    assert_eq!(message(neq_fails()), "ASSERT_NEQ(3, 3): '3' == '3'");
    assert_eq!(message(gt_fails()), "ASSERT_GREATER(1, 2): '1' <= '2'");
}

#[test]
fn string_family() {
    fn passing() -> TestOutcome {
        let owned = String::from("abc");
        check_str_eq!(owned, "abc");
        check_str_neq!("abc", "abd");
        Ok(())
    }
    fn failing() -> TestOutcome {
        let greeting = "hello";
        check_str_eq!(greeting, "world");
        Ok(())
    }
    assert!(passing().is_ok());
    assert_eq!(
        message(failing()),
        "ASSERT_STR_EQ(greeting, \"world\"): 'hello' != 'world'"
    );
}

#[test]
fn near_reports_difference() {
    fn passing() -> TestOutcome {
        check_near!(1.0, 1.05, 0.1);
        Ok(())
    }
    fn failing() -> TestOutcome {
        check_near!(1.0, 1.2, 0.1);
        Ok(())
    }
    assert!(passing().is_ok());
    let text = message(failing());
    assert!(text.contains("0.2"), "{}", text);
    assert!(text.starts_with("ASSERT_NEAR(1.0, 1.2, 0.1)"));
}

#[test]
fn near_accepts_any_primitive_number() {
    fn body() -> TestOutcome {
        let values = vec![1u32; 9];
        check_near!(values.len(), 10usize, 1usize);
        check_near!(1_000_000i64, 999_999u64, 1);
        Ok(())
    }
    assert!(body().is_ok());
}

#[test]
fn panic_family() {
    fn passing() -> TestOutcome {
        check_panics!(checked_div(1, 0), Overflow);
        check_any_panic!(checked_div(1, 0));
        let value = check_no_panic!(checked_div(6, 3));
        check_eq!(value, 2);
        Ok(())
    }
    fn wrong_kind() -> TestOutcome {
        check_panics!(checked_div(1, 0), String);
        Ok(())
    }
    fn no_panic_at_all() -> TestOutcome {
        check_panics!(checked_div(4, 2), Overflow);
        Ok(())
    }
    fn unexpected_panic() -> TestOutcome {
        check_no_panic!(checked_div(1, 0));
        Ok(())
    }
    assert!(passing().is_ok());
    assert!(message(wrong_kind()).contains("Other exception thrown"));
    assert!(message(no_panic_at_all()).contains("No exception thrown"));
    assert!(message(unexpected_panic()).contains("An exception was thrown"));
}

#[test]
fn fail_macro() {
    fn plain() -> TestOutcome {
        fail!();
    }
    fn with_reason() -> TestOutcome {
        fail!("step {} not reached", 3);
    }
    assert_eq!(message(plain()), "FAIL");
    assert_eq!(message(with_reason()), "FAIL: step 3 not reached");
}

#[test]
fn location_points_at_macro_call() {
    fn body() -> TestOutcome {
        check_eq!(1, 2);
        Ok(())
    }
    let record: FailureRecord = body().unwrap_err();
    let location = record.location().expect("location");
    assert!(location.file.ends_with("assertions.rs"));
    assert!(record.to_string().contains("assertions.rs"));
}
