//! End-to-end driver behaviour: bootstrap, run, report.

use stest::{
    check_eq, check_gt, check_near, define_tests, Driver, DriverConfig, FailureKind, Registry,
    RunReport,
};

define_tests! {
    /// Two passing cases and one failing case.
    fn register_mixed;

    arithmetic_holds {
        check_eq!(2 + 2, 4);
    }

    ordering_is_wrong {
        check_gt!(1, 2);
    }

    float_is_close {
        check_near!(0.1 + 0.2, 0.3, 1e-9);
    }
}

define_tests! {
    fn register_panicking;

    index_out_of_range {
        let values: Vec<u8> = Vec::new();
        check_eq!(values[3], 0);
    }
}

fn drive(registry: &Registry, verbose: bool) -> (RunReport, String) {
    let mut out = Vec::new();
    let report = Driver::new(DriverConfig::new().with_verbose(verbose))
        .run_with_output(registry, &mut out)
        .expect("writing to a Vec cannot fail");
    (report, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn bootstrap_registers_in_declaration_order() {
    let mut registry = Registry::new();
    register_mixed(&mut registry);
    assert_eq!(
        registry.names(),
        vec!["arithmetic_holds", "ordering_is_wrong", "float_is_close"]
    );
}

#[test]
fn mixed_run_console_output() {
    let mut registry = Registry::new();
    register_mixed(&mut registry);
    let (report, out) = drive(&registry, false);

    assert_eq!(report.total(), 3);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failures()[0].test, "ordering_is_wrong");
    assert_eq!(report.failures()[0].position, 2);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Run 3 tests",
            "[ 33.33% ] Run 'arithmetic_holds'... done",
            "[ 66.67% ] Run 'ordering_is_wrong'... Fail!",
            "[ 100.00% ] Run 'float_is_close'... done",
            "------------------------------",
            "Fail! Not all tests pass (1 test fails(66.67%))",
        ]
    );
}

#[test]
fn verbose_run_appends_detail_block() {
    let mut registry = Registry::new();
    register_mixed(&mut registry);
    let (_, out) = drive(&registry, true);

    let tail: Vec<&str> = out.lines().skip(6).collect();
    assert_eq!(tail[0], "------------------------------");
    assert_eq!(tail[1], "In test 'ordering_is_wrong':");
    assert!(tail[2].starts_with('\t'));
    assert!(tail[2].ends_with("ASSERT_GREATER(1, 2): '1' <= '2'"));
    assert_eq!(tail.len(), 3);
}

#[test]
fn panicking_case_is_contained() {
    let mut registry = Registry::new();
    register_panicking(&mut registry);
    register_mixed(&mut registry);
    let (report, out) = drive(&registry, true);

    assert_eq!(report.total(), 4);
    assert_eq!(report.failures()[0].kind, FailureKind::Anomalous);
    assert!(report.failures()[0]
        .record
        .message()
        .starts_with("Unknown fail result"));
    assert!(out.contains("Run 'float_is_close'... done"));
    assert!(out.contains("In test 'index_out_of_range':"));
}

#[test]
fn duplicate_names_are_reported_separately() {
    let mut registry = Registry::new();
    register_mixed(&mut registry);
    register_mixed(&mut registry);
    let (report, out) = drive(&registry, true);

    assert_eq!(report.total(), 6);
    assert_eq!(report.failed_count(), 2);
    assert_eq!(out.matches("In test 'ordering_is_wrong':").count(), 2);
}

#[test]
fn empty_run_prints_only_notice() {
    let (report, out) = drive(&Registry::new(), true);
    assert!(report.is_empty());
    assert_eq!(out, "no tests to run\n");
    assert!(!out.contains("------------------------------"));
}
