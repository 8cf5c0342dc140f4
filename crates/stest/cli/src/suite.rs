//! Self-check suite bundled with the `stest` binary.
//!
//! Every case here is expected to pass; a failure means the harness itself
//! is broken.

use stest::report::format_progress;
use stest::{
    check_any_panic, check_eq, check_false, check_ge, check_gt, check_le, check_lt, check_near,
    check_neq, check_no_panic, check_panics, check_str_eq, check_str_neq, check_true,
    define_tests, fail, verbose_requested, Driver, FailureKind, FailureRecord, Location, Registry,
};

#[derive(Debug)]
struct Exhausted;

fn draw(budget: u32) -> u32 {
    if budget == 0 {
        std::panic::panic_any(Exhausted);
    }
    budget - 1
}

define_tests! {
    /// Registers the harness self-checks in the order they should run.
    pub fn register_self_checks;

    failure_record_is_a_value {
        let record = FailureRecord::new("boom").with_location(Location::new("a.rs", 3, 1));
        let copy = record.clone();
        check_eq!(record, copy);
        check_str_eq!(copy.to_string(), "a.rs:3:1: boom");
    }

    comparisons_hold {
        check_eq!(2 + 2, 4);
        check_neq!(3, 5);
        check_gt!(5, 3);
        check_ge!(5, 5);
        check_lt!(3, 5);
        check_le!(3, 3);
        check_true!(u8::MAX > 0);
        check_false!("".contains('x'));
    }

    comparison_failure_names_operands {
        let record = match stest::assert::eq("left", "right", &2, &3) {
            Ok(()) => fail!("ASSERT_EQ accepted 2 == 3"),
            Err(record) => record,
        };
        check_str_eq!(record.message(), "ASSERT_EQ(left, right): '2' != '3'");
        check_eq!(record.operands().len(), 2);
    }

    strings_compare_by_content {
        let owned = String::from("stest");
        check_str_eq!(owned, "stest");
        check_str_neq!(owned, "stest ");
    }

    near_uses_tolerance {
        check_near!(1.0, 1.05, 0.1);
        check_true!(stest::assert::near("a", "b", "eps", 1.0, 1.2, 0.1).is_err());
        check_true!(stest::assert::near("a", "b", "eps", f64::NAN, 1.0, 0.1).is_err());
    }

    panics_are_classified_by_payload {
        check_panics!(draw(0), Exhausted);
        check_any_panic!(draw(0));
        let left = check_no_panic!(draw(2));
        check_eq!(left, 1);
    }

    registry_keeps_registration_order {
        let mut registry = Registry::new();
        registry.register_fn("b", || Ok(()));
        registry.register_fn("a", || Ok(()));
        check_eq!(registry.names(), vec!["b", "a"]);
    }

    driver_contains_failures {
        let mut registry = Registry::new();
        registry.register_fn("fails", || Err(FailureRecord::new("expected")));
        registry.register_fn("panics", || panic!("expected panic"));
        registry.register_fn("passes", || Ok(()));
        let mut sink = Vec::new();
        let report = match Driver::default().run_with_output(&registry, &mut sink) {
            Ok(report) => report,
            Err(err) => fail!("nested run failed: {}", err),
        };
        check_eq!(report.total(), 3);
        check_eq!(report.failed_count(), 2);
        check_eq!(report.failures()[0].kind, FailureKind::Assertion);
        check_eq!(report.failures()[1].kind, FailureKind::Anomalous);
    }

    progress_line_format {
        check_str_eq!(format_progress(1, 3, "x"), "[ 33.33% ] Run 'x'... ");
        check_str_eq!(format_progress(4, 4, "x"), "[ 100.00% ] Run 'x'... ");
    }

    verbose_token_detection {
        check_true!(verbose_requested(["stest", "-v"]));
        check_false!(verbose_requested(["stest", "--v"]));
    }
}
