use chrono::NaiveDate;
use wbs_calendar::{
    Clock, DelayClassifier, DelayResult, DelayStatus, FixedClock, WorkItem, WorkStatus,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn item(status: WorkStatus, planned_end: Option<NaiveDate>) -> WorkItem {
    WorkItem::new(1, 1, status).with_planned(None, planned_end)
}

#[test]
fn missing_planned_end_is_unknown() {
    let classifier = DelayClassifier::default();
    for status in WorkStatus::ALL {
        let result = classifier.classify(&item(status, None), d(2024, 3, 1));
        assert_eq!(result, DelayResult::new(DelayStatus::Unknown, 0));
    }
}

#[test]
fn completed_late_is_delayed() {
    let classifier = DelayClassifier::default();
    let late = item(WorkStatus::Completed, Some(d(2024, 3, 10)))
        .with_actual(None, Some(d(2024, 3, 15)));
    assert_eq!(
        classifier.classify(&late, d(2024, 4, 1)),
        DelayResult { status: DelayStatus::Delayed, days: 5 }
    );
}

#[test]
fn completed_early_reports_on_time_with_days() {
    let classifier = DelayClassifier::default();
    let early = item(WorkStatus::Completed, Some(d(2024, 3, 10)))
        .with_actual(None, Some(d(2024, 3, 7)));
    assert_eq!(
        classifier.classify(&early, d(2024, 4, 1)),
        DelayResult { status: DelayStatus::OnTime, days: 3 }
    );
}

#[test]
fn completed_exactly_on_plan_or_without_actual_end_is_on_time() {
    let classifier = DelayClassifier::default();
    let exact = item(WorkStatus::Completed, Some(d(2024, 3, 10)))
        .with_actual(None, Some(d(2024, 3, 10)));
    let undated = item(WorkStatus::Completed, Some(d(2024, 3, 10)));
    let expected = DelayResult { status: DelayStatus::OnTime, days: 0 };
    assert_eq!(classifier.classify(&exact, d(2024, 4, 1)), expected);
    assert_eq!(classifier.classify(&undated, d(2024, 4, 1)), expected);
}

#[test]
fn unfinished_due_soon_is_warning() {
    let classifier = DelayClassifier::default();
    let due = item(WorkStatus::InProgress, Some(d(2024, 3, 10)));
    assert_eq!(
        classifier.classify(&due, d(2024, 3, 8)),
        DelayResult { status: DelayStatus::Warning, days: 2 }
    );
}

#[test]
fn unfinished_past_due_is_overdue() {
    let classifier = DelayClassifier::default();
    let past = item(WorkStatus::InProgress, Some(d(2024, 3, 1)));
    assert_eq!(
        classifier.classify(&past, d(2024, 3, 20)),
        DelayResult { status: DelayStatus::Overdue, days: 19 }
    );
}

#[test]
fn unfinished_far_from_due_is_on_track() {
    let classifier = DelayClassifier::default();
    let later = item(WorkStatus::NotStarted, Some(d(2024, 3, 31)));
    assert_eq!(
        classifier.classify(&later, d(2024, 3, 20)),
        DelayResult { status: DelayStatus::OnTrack, days: 11 }
    );
}

#[test]
fn review_states_are_treated_as_unfinished() {
    let classifier = DelayClassifier::default();
    for status in [WorkStatus::ReviewPending, WorkStatus::Reviewed] {
        let reviewed = item(status, Some(d(2024, 3, 1))).with_actual(None, Some(d(2024, 2, 28)));
        assert_eq!(classifier.classify(&reviewed, d(2024, 3, 4)).status, DelayStatus::Overdue);
    }
}

#[test]
fn classification_is_idempotent() {
    let classifier = DelayClassifier::default();
    let overdue = item(WorkStatus::InProgress, Some(d(2024, 3, 1)));
    let first = classifier.classify(&overdue, d(2024, 3, 20));
    let second = classifier.classify(&overdue, d(2024, 3, 20));
    assert_eq!(first, second);
}

#[test]
fn custom_warning_window() {
    let classifier = DelayClassifier::new(7);
    let due = item(WorkStatus::InProgress, Some(d(2024, 3, 10)));
    assert_eq!(classifier.classify(&due, d(2024, 3, 3)).status, DelayStatus::Warning);
    assert_eq!(classifier.classify(&due, d(2024, 3, 2)).status, DelayStatus::OnTrack);
}

#[test]
fn classify_now_reads_injected_clock() {
    let classifier = DelayClassifier::default();
    let clock = FixedClock(d(2024, 3, 8));
    let due = item(WorkStatus::InProgress, Some(d(2024, 3, 10)));
    assert_eq!(clock.today(), d(2024, 3, 8));
    assert_eq!(classifier.classify_now(&due, &clock).status, DelayStatus::Warning);
}

#[test]
fn delay_status_serializes_as_kebab_case() {
    let json = serde_json::to_string(&DelayResult::new(DelayStatus::OnTrack, 4)).unwrap();
    assert_eq!(json, r#"{"status":"on-track","days":4}"#);
    assert_eq!(DelayStatus::OnTime.to_string(), "on-time");
}

#[test]
fn negative_warning_window_is_clamped_to_zero() {
    let classifier = DelayClassifier::new(-5);
    assert_eq!(classifier.warning_window_days(), 0);
    let due_today = item(WorkStatus::InProgress, Some(d(2024, 3, 10)));
    assert_eq!(
        classifier.classify(&due_today, d(2024, 3, 10)),
        DelayResult { status: DelayStatus::Warning, days: 0 }
    );
    let due_tomorrow = item(WorkStatus::InProgress, Some(d(2024, 3, 11)));
    assert_eq!(classifier.classify(&due_tomorrow, d(2024, 3, 10)).status, DelayStatus::OnTrack);
}
