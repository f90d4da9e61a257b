//! End-to-end dashboard scenarios against a recorded report.

use std::fs::File;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use loadboard::{
    filter, paginate, sort, summarize, ApiGroup, AvgResponseTime, DashboardConfig, Dataset,
    FilterState, Outcome, Session, SortKey, TestRecord,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/testresults.json")
}

fn fixture() -> Dataset {
    let file = File::open(fixture_path()).unwrap();
    Dataset::from_reader(file).unwrap()
}

fn names(groups: &[ApiGroup]) -> Vec<&str> {
    groups.iter().map(|g| g.name.as_str()).collect()
}

// ============================================================================
// Two-API scenario
// ============================================================================

fn login_checkout() -> Vec<ApiGroup> {
    vec![
        ApiGroup::new(
            "Login",
            vec![TestRecord::new("4G")
                .with_status(Outcome::Pass)
                .with_avg_duration("100ms")],
        ),
        ApiGroup::new(
            "Checkout",
            vec![TestRecord::new("WiFi")
                .with_status(Outcome::Fail)
                .with_avg_duration("300ms")],
        ),
    ]
}

#[test]
fn status_pass_keeps_login() {
    let groups = login_checkout();
    let kept = filter(&groups, &FilterState::new().with_status(Some(Outcome::Pass)));
    assert_eq!(names(&kept), ["Login"]);
}

#[test]
fn search_check_keeps_checkout() {
    let groups = login_checkout();
    let kept = filter(&groups, &FilterState::new().with_search("check"));
    assert_eq!(names(&kept), ["Checkout"]);
}

#[test]
fn summary_of_both() {
    let summary = summarize(&login_checkout());
    assert_eq!(summary.api_count, 2);
    assert_eq!(summary.passed_tests, 1);
    assert_eq!(summary.total_tests, 2);
    assert_eq!(summary.pass_percentage, "50.0%");
    assert_eq!(summary.avg_response_time, AvgResponseTime::Millis(200.0));
}

// ============================================================================
// Recorded report
// ============================================================================

#[test]
fn fixture_loads() {
    let dataset = fixture();
    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.test_count(), 7);

    let login = &dataset.groups()[0];
    assert_eq!(login.tests[1].network, "3G Slow");
    assert_eq!(login.tests[1].status(), Some(Outcome::Flaky));
    assert_eq!(login.tests[0].metrics.response_time.fail_count, Some(1));
}

#[test]
fn fixture_summary_skips_placeholders() {
    let dataset = fixture();
    let summary = summarize(dataset.groups());
    assert_eq!(summary.total_tests, 7);
    assert_eq!(summary.passed_tests, 4);
    assert_eq!(summary.pass_percentage, "57.1%");
    // Checkout's "0s" and one "n/a" are left out
    assert_eq!(summary.avg_response_time.to_string(), "311.30ms");
}

#[test]
fn fixture_rankings() {
    let dataset = fixture();
    let all = dataset.groups().to_vec();

    let by_duration = sort(all.clone(), SortKey::Duration);
    assert_eq!(
        names(&by_duration),
        ["Order History", "Add to Cart", "Login", "Search Products", "Checkout"]
    );
    let search = &by_duration[3];
    assert_eq!(search.tests[0].network, "WiFi");
    assert_eq!(search.tests[1].avg_duration(), None);

    let by_rate = sort(all.clone(), SortKey::SuccessRate);
    assert_eq!(
        names(&by_rate),
        ["Login", "Add to Cart", "Search Products", "Order History", "Checkout"]
    );

    let by_name = sort(all.clone(), SortKey::Name);
    assert_eq!(
        names(&by_name),
        ["Add to Cart", "Checkout", "Login", "Order History", "Search Products"]
    );
    assert_eq!(sort(all.clone(), SortKey::MostRecent), by_name);
    assert_eq!(sort(all.clone(), SortKey::None), all);
}

#[test]
fn fixture_filters() {
    let dataset = fixture();
    let groups = dataset.groups();

    let failing = filter(groups, &FilterState::new().with_status(Some(Outcome::Fail)));
    assert_eq!(names(&failing), ["Checkout", "Order History"]);

    let wifi = filter(groups, &FilterState::new().with_network("WiFi"));
    assert_eq!(names(&wifi), ["Checkout", "Search Products"]);
    assert!(filter(groups, &FilterState::new().with_network("wifi")).is_empty());

    let slow = filter(groups, &FilterState::new().with_search("3g"));
    assert_eq!(names(&slow), ["Login", "Order History"]);
}

#[test]
fn fixture_pages() {
    let dataset = fixture();
    let size = NonZeroUsize::new(2).unwrap();

    let last = paginate(dataset.groups(), size, 3);
    assert_eq!(last.total_pages, 3);
    assert_eq!(names(last.items), ["Order History"]);
    assert!(paginate(dataset.groups(), size, 4).is_empty());
}

// ============================================================================
// Session flow
// ============================================================================

#[test]
fn browsing_session() {
    let config = DashboardConfig::from_yaml_str("pageSize: 2\nfilters:\n  sortKey: Duration\n").unwrap();
    let mut session = Session::new(fixture(), config);

    assert_eq!(session.total_pages(), 3);
    assert_eq!(names(session.page().items), ["Order History", "Add to Cart"]);

    assert!(session.change_page(1));
    assert!(session.change_page(1));
    assert!(!session.change_page(1));
    assert_eq!(names(session.page().items), ["Checkout"]);

    session.set_status(Some(Outcome::Pass));
    assert_eq!(session.current_page(), 1);
    assert_eq!(names(session.projection()), ["Add to Cart", "Login", "Search Products"]);
    assert_eq!(session.total_pages(), 2);

    let details = session.test_details("Login", 1).unwrap();
    assert_eq!(details.network, "3G Slow");
    assert_eq!(details.metrics.duration.p95.raw(), "820.00ms");

    let view = serde_json::to_value(session.view()).unwrap();
    assert_eq!(view["summary"]["apiCount"], 3);
    assert_eq!(view["filters"]["status"], "pass");
    assert_eq!(view["filters"]["sortKey"], "Duration");
    assert_eq!(view["page"]["page"], 1);
}

#[test]
fn reload_with_new_report() {
    let mut session = Session::new(fixture(), DashboardConfig::default());
    session.set_network("3G Slow");
    assert_eq!(session.projection().len(), 2);

    let fresh = Dataset::from_json_str(
        r#"[{"name": "Login", "tests": [{"network": "3G Slow",
            "metrics": {"status": {"result": "pass"}}}]}]"#,
    )
    .unwrap();
    session.reload(fresh);
    assert_eq!(names(session.projection()), ["Login"]);
    assert_eq!(session.summary().pass_percentage, "100.0%");
    assert_eq!(session.summary().avg_response_time.to_string(), "N/A");
}
