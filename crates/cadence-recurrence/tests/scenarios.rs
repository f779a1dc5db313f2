// End-to-end checks against rules as they arrive from storage (JSON records),
// anchored on Monday 2025-01-06.

use cadence_recurrence::{
    describe, tasks_by_month_day, tasks_by_weekday, tasks_on_date, RecurrenceRecord,
    RecurrenceRule, RuleKind, Scheduled, Task,
};
use chrono::{Datelike, NaiveDate};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn anchor() -> NaiveDate {
    d(2025, 1, 6)
}

fn rule(json: &str) -> RecurrenceRule {
    serde_json::from_str(json).unwrap()
}

#[test]
fn every_other_day() {
    let r = rule(r#"{"type":"daily","interval":2}"#);
    for due in [d(2025, 1, 6), d(2025, 1, 8), d(2025, 1, 10)] {
        assert!(r.matches(anchor(), due), "{due} should be due");
    }
    for off in [d(2025, 1, 7), d(2025, 1, 9)] {
        assert!(!r.matches(anchor(), off), "{off} should not be due");
    }
}

#[test]
fn mondays_and_wednesdays() {
    let r = rule(r#"{"type":"weekly","interval":1,"daysOfWeek":[1,3]}"#);
    assert!(r.matches(anchor(), d(2025, 2, 10)));
    assert!(r.matches(anchor(), d(2025, 2, 12)));
    assert!(!r.matches(anchor(), d(2025, 2, 11)));
}

#[test]
fn every_other_saturday() {
    let r = rule(r#"{"type":"weekly","interval":2,"daysOfWeek":[6]}"#);
    assert!(r.matches(anchor(), d(2025, 1, 11)));
    assert!(r.matches(anchor(), d(2025, 1, 25)));
    assert!(!r.matches(anchor(), d(2025, 1, 18)));
    assert_eq!(describe(&r), "every 2 weeks (Sat)");
}

#[test]
fn end_of_month_clamps() {
    let r = rule(r#"{"type":"monthly","dayOfMonth":31}"#);
    assert!(r.matches(anchor(), d(2025, 2, 28)));
    assert!(r.matches(anchor(), d(2025, 1, 31)));
    assert!(r.matches(anchor(), d(2025, 4, 30)));
}

#[test]
fn first_saturday_of_month() {
    let r = rule(r#"{"type":"monthly","weekOfMonth":1,"daysOfWeek":[6]}"#);
    assert!(r.matches(anchor(), d(2025, 2, 1)));
    assert!(r.matches(anchor(), d(2025, 3, 1)));
    assert!(!r.matches(anchor(), d(2025, 2, 8)));
    assert_eq!(describe(&r), "1st Saturday of month");
}

#[test]
fn leap_day_every_year() {
    let r = rule(r#"{"type":"yearly","monthOfYear":2,"dayOfMonth":29}"#);
    assert!(r.matches(anchor(), d(2025, 2, 28)));
    assert!(r.matches(anchor(), d(2024, 2, 29)));
    assert_eq!(describe(&r), "Feb 29 every year");

    // and nothing else across four years
    let hits: Vec<_> = d(2024, 1, 1)
        .iter_days()
        .take_while(|day| day.year() < 2028)
        .filter(|day| r.matches(anchor(), *day))
        .collect();
    assert_eq!(
        hits,
        vec![d(2024, 2, 29), d(2025, 2, 28), d(2026, 2, 28), d(2027, 2, 28)]
    );
}

#[test]
fn ordinal_rules_hit_once_per_month() {
    let first_sat = rule(r#"{"type":"monthly","weekOfMonth":1,"daysOfWeek":[6]}"#);
    let last_fri = rule(r#"{"type":"monthly","weekOfMonth":-1,"daysOfWeek":[5]}"#);
    for month in 1..=12 {
        let days: Vec<_> = d(2025, month, 1)
            .iter_days()
            .take_while(|day| day.month() == month)
            .collect();

        let sats: Vec<_> = days.iter().filter(|day| first_sat.matches(anchor(), **day)).collect();
        assert_eq!(sats.len(), 1, "month {month}");
        assert!(sats[0].day() <= 7);

        let fris: Vec<_> = days.iter().filter(|day| last_fri.matches(anchor(), **day)).collect();
        assert_eq!(fris.len(), 1, "month {month}");
        assert!(fris[0].day() + 7 > days.len() as u32);
    }
}

#[test]
fn weekly_matches_only_listed_weekdays() {
    let r = rule(r#"{"type":"weekly","interval":3,"daysOfWeek":[0,2,4]}"#);
    for day in anchor().iter_days().take(200) {
        if r.matches(anchor(), day) {
            let index = day.weekday().num_days_from_sunday();
            assert!([0, 2, 4].contains(&index), "{day}");
        }
    }
}

#[test]
fn underspecified_monthly_never_matches_when_read_leniently() {
    let record: RecurrenceRecord = serde_json::from_str(r#"{"type":"monthly","interval":1}"#).unwrap();
    assert!(record.validate().is_err());

    let task = Task::new(record.to_rule_lenient(), anchor());
    for day in anchor().iter_days().take(366) {
        assert!(tasks_on_date(day, std::slice::from_ref(&task)).is_empty());
    }
}

#[test]
fn views_filter_by_kind_and_are_idempotent() {
    let tasks = vec![
        Task::new(rule(r#"{"type":"daily"}"#), anchor()),
        Task::new(rule(r#"{"type":"weekly","daysOfWeek":[1,2,3,4,5]}"#), anchor()),
        Task::new(rule(r#"{"type":"monthly","dayOfMonth":10}"#), anchor()),
        Task::new(rule(r#"{"type":"yearly","monthOfYear":2,"dayOfMonth":14}"#), anchor()),
        Task::new(rule(r#"{"type":"none"}"#), anchor()),
    ];

    let week = tasks_by_weekday(d(2025, 2, 10), &tasks);
    assert!(week
        .values()
        .flatten()
        .all(|task| task.rule().kind() != RuleKind::Daily));
    assert_eq!(week.len(), 5); // Mon..Fri
    assert_eq!(week[&4].len(), 2); // Fri 14th: weekday task + Valentine's

    let month = tasks_by_month_day(2025, 2, &tasks);
    assert!(month.values().flatten().all(|task| {
        !matches!(task.rule().kind(), RuleKind::Daily | RuleKind::Weekly)
    }));
    assert_eq!(month.keys().copied().collect::<Vec<_>>(), vec![10, 14]);

    assert_eq!(tasks_by_weekday(d(2025, 2, 10), &tasks), week);
    assert_eq!(tasks_by_month_day(2025, 2, &tasks), month);
}

#[test]
fn tasks_serialize_with_embedded_record() {
    let task = Task {
        id: "t-1".into(),
        recurrence: rule(r#"{"type":"weekly","interval":2,"daysOfWeek":[6]}"#),
        anchor: anchor(),
    };
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "t-1",
            "recurrence": {"type": "weekly", "interval": 2, "daysOfWeek": [6]},
            "anchor": "2025-01-06",
        })
    );
    let back: Task = serde_json::from_value(json).unwrap();
    assert_eq!(back, task);
}
