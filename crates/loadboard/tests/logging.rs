//! Malformed records are logged and skipped, never fatal.

use std::io;
use std::sync::{Arc, Mutex};

use loadboard::{filter, sort, ApiGroup, FilterState, Outcome, SortKey, TestRecord};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a WARN-level subscriber and returns what it logged.
fn warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    (result, logged)
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn duration_ranking_warns_per_missing_value() {
    let groups = vec![
        ApiGroup::new(
            "Search",
            vec![
                TestRecord::new("4G").with_avg_duration("n/a"),
                TestRecord::new("WiFi").with_avg_duration("12ms"),
                TestRecord::new("3G"),
            ],
        ),
        ApiGroup::new("Login", vec![TestRecord::new("4G").with_avg_duration("40ms")]),
    ];

    let (ranked, logged) = warnings(|| sort(groups, SortKey::Duration));

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "Login");
    assert_eq!(logged.matches("ranking past malformed record").count(), 2);
    assert!(logged.contains("WARN"));
    assert!(logged.contains("api=Search"));
    assert!(logged.contains("duration.avg"));
    assert!(!logged.contains("api=Login"));
}

#[test]
fn success_rate_ranking_checks_first_record_only() {
    let groups = vec![ApiGroup::new(
        "Cart",
        vec![TestRecord::new("4G"), TestRecord::new("WiFi")],
    )];

    let (_, logged) = warnings(|| sort(groups, SortKey::SuccessRate));

    assert_eq!(logged.matches("ranking past malformed record").count(), 1);
    assert!(logged.contains("status.passRate"));
}

#[test]
fn name_ranking_is_silent() {
    let groups = vec![ApiGroup::new("Bare", vec![TestRecord::new("4G")])];
    let (_, logged) = warnings(|| sort(groups, SortKey::Name));
    assert!(logged.is_empty());
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn status_filter_warns_and_skips_records_without_result() {
    let groups = vec![
        ApiGroup::new(
            "Profile",
            vec![
                TestRecord::new("4G"),
                TestRecord::new("WiFi").with_status(Outcome::Pass),
            ],
        ),
        ApiGroup::new("Orders", vec![TestRecord::new("3G")]),
    ];
    let state = FilterState::new().with_status(Some(Outcome::Pass));

    let (kept, logged) = warnings(|| filter(&groups, &state));

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "Profile");
    assert_eq!(logged.matches("skipping malformed record in status filter").count(), 2);
    assert!(logged.contains("api=Orders"));
    assert!(logged.contains("status.result"));
}
