//! Property tests for run totals, progress percentages and success rates.

use proptest::prelude::*;
use stest::report::format_progress;
use stest::{Driver, DriverConfig, FailureRecord, Registry};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// Pass/fail pattern for a registry of up to 40 cases.
fn arb_outcomes() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..40)
}

fn registry_from(outcomes: &[bool]) -> Registry {
    let mut registry = Registry::new();
    for (index, passes) in outcomes.iter().copied().enumerate() {
        registry.register_fn(format!("case_{}", index), move || {
            if passes {
                Ok(())
            } else {
                Err(FailureRecord::new(format!("case {} failed", index)))
            }
        });
    }
    registry
}

fn round2(value: f64) -> String {
    format!("{:.2}", value)
}

#[test]
fn progress_percentage_known_values() {
    let cases = [
        (1, 3, "33.33"),
        (2, 3, "66.67"),
        (1, 8, "12.50"),
        (1, 800, "0.12"),
        (5, 800, "0.62"),
        (7, 7, "100.00"),
    ];
    for (position, total, shown) in cases {
        assert_eq!(
            format_progress(position, total, "t"),
            format!("[ {}% ] Run 't'... ", shown),
            "{}/{}",
            position,
            total
        );
    }
}

proptest! {
    #[test]
    fn total_matches_registered_cases(outcomes in arb_outcomes()) {
        let registry = registry_from(&outcomes);
        let mut out = Vec::new();
        let report = Driver::new(DriverConfig::default())
            .run_with_output(&registry, &mut out)
            .unwrap();

        prop_assert_eq!(report.total(), outcomes.len());
        let expected_failures = outcomes.iter().filter(|passes| !**passes).count();
        prop_assert_eq!(report.failed_count(), expected_failures);
        prop_assert!(report.failed_count() <= report.total());

        for failure in report.failures() {
            prop_assert!(!outcomes[failure.position - 1]);
            prop_assert_eq!(&failure.test, &format!("case_{}", failure.position - 1));
        }
    }

    #[test]
    fn progress_percentage_is_within_rounding_of_ratio(total in 1usize..500, offset in 0usize..500) {
        let position = offset % total + 1;
        let line = format_progress(position, total, "t");

        let shown = line
            .strip_prefix("[ ")
            .and_then(|rest| rest.strip_suffix("% ] Run 't'... "))
            .unwrap();
        let (_, decimals) = shown.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 2);

        let shown: f64 = shown.parse().unwrap();
        let exact = position as f64 * 100.0 / total as f64;
        prop_assert!((shown - exact).abs() <= 0.005 + 1e-9, "{} vs {}", shown, exact);
        prop_assert!(shown > 0.0 && shown <= 100.0);
    }

    #[test]
    fn success_rate_is_rounded_ratio(outcomes in arb_outcomes()) {
        prop_assume!(outcomes.iter().any(|passes| !passes));
        let registry = registry_from(&outcomes);
        let mut out = Vec::new();
        let report = Driver::new(DriverConfig::default())
            .run_with_output(&registry, &mut out)
            .unwrap();

        let n = outcomes.len();
        let f = report.failed_count();
        let expected = format!(
            "Fail! Not all tests pass ({} test fails({}%))",
            f,
            round2(((n - f) as f64 / n as f64) * 100.0)
        );
        prop_assert_eq!(report.summary_line(), expected);
    }

    #[test]
    fn verbose_blocks_follow_failure_order(outcomes in arb_outcomes()) {
        let registry = registry_from(&outcomes);
        let mut out = Vec::new();
        let report = Driver::new(DriverConfig::new().with_verbose(true))
            .run_with_output(&registry, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut cursor = 0;
        for failure in report.failures() {
            let header = format!("In test '{}':", failure.test);
            let found = text[cursor..].find(&header);
            prop_assert!(found.is_some());
            cursor += found.unwrap() + header.len();
        }
        prop_assert_eq!(text.matches("In test '").count(), report.failed_count());
    }
}
