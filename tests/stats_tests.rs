mod common;
use chrono::{Duration, Timelike};
use common::at;
use rcompanion::core::stats::{
    assignments_by_due, attendance_percentage, format_time_left, is_urgent,
    overall_attendance, sessions_for_day,
};
use rcompanion::models::{Assignment, ClassSession, Day, Subject};
use rcompanion::utils::date::parse_instant;
use rcompanion::utils::time::{minutes_since_midnight, normalize_hhmm};

fn subject(name: &str, total: u32, present: u32, absent: u32) -> Subject {
    Subject {
        id: 1,
        name: name.into(),
        total_classes: total,
        present_days: present,
        absent_days: absent,
        extra: Default::default(),
    }
}

#[test]
fn test_attendance_percentage_rounds() {
    assert_eq!(attendance_percentage(0, 0), 0);
    assert_eq!(attendance_percentage(1, 3), 33);
    assert_eq!(attendance_percentage(2, 3), 67);
    assert_eq!(attendance_percentage(1, 2), 50);
    assert_eq!(attendance_percentage(3, 3), 100);
}

#[test]
fn test_overall_attendance_sums_every_subject() {
    let subjects = [subject("Math", 4, 3, 1), subject("Physics", 2, 0, 2)];

    let overall = overall_attendance(&subjects);

    assert_eq!(overall.present, 3);
    assert_eq!(overall.absent, 3);
    assert_eq!(overall.total, 6);
    assert_eq!(overall.percentage, 50);

    assert_eq!(overall_attendance(&[]).percentage, 0);
}

#[test]
fn test_overall_attendance_saturates() {
    let subjects = [
        subject("Math", u32::MAX, u32::MAX, 0),
        subject("Physics", u32::MAX, 1, u32::MAX),
    ];

    let overall = overall_attendance(&subjects);

    assert_eq!(overall.total, u32::MAX);
    assert_eq!(overall.present, u32::MAX);
    assert_eq!(overall.absent, u32::MAX);
    assert_eq!(overall.percentage, 100);
}

#[test]
fn test_format_time_left() {
    assert_eq!(format_time_left(Duration::hours(53)), "2d 5h left");
    assert_eq!(format_time_left(Duration::hours(48)), "2d 0h left");
    assert_eq!(format_time_left(Duration::minutes(5 * 60 + 30)), "5h left");
    assert_eq!(format_time_left(Duration::minutes(30)), "Less than 1h left");
    assert_eq!(format_time_left(Duration::minutes(-1)), "OVERDUE");
}

#[test]
fn test_urgency_threshold() {
    assert!(is_urgent(Duration::hours(23)));
    assert!(is_urgent(Duration::hours(-2)));
    assert!(!is_urgent(Duration::hours(24)));
}

#[test]
fn test_assignments_sorted_by_due_date() {
    let base = at(2025, 10, 6, 12, 0);
    let make = |id: i64, hours: i64| Assignment {
        id,
        title: format!("a{id}"),
        subject: "Math".into(),
        due_date: base + Duration::hours(hours),
        description: String::new(),
        completed: false,
        created_at: base,
        extra: Default::default(),
    };
    let list = [make(1, 30), make(2, -5), make(3, 2)];

    let ids: Vec<i64> = assignments_by_due(&list).iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn test_sessions_for_day_ordered_by_time() {
    let make = |id: i64, day: Day, time: &str| ClassSession {
        id,
        subject: format!("s{id}"),
        day,
        time: time.into(),
        room: String::new(),
        professor: String::new(),
        extra: Default::default(),
    };
    let classes = [
        make(1, Day::Monday, "14:00"),
        make(2, Day::Tuesday, "08:00"),
        make(3, Day::Monday, "09:30"),
    ];

    let ids: Vec<i64> = sessions_for_day(&classes, Day::Monday)
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![3, 1]);
    assert!(sessions_for_day(&classes, Day::Saturday).is_empty());
}

#[test]
fn test_parse_instant_accepts_browser_and_cli_forms() {
    let expected = at(2025, 10, 1, 17, 0);

    assert_eq!(parse_instant("2025-10-01T17:00"), Some(expected));
    assert_eq!(parse_instant("2025-10-01 17:00"), Some(expected));
    assert_eq!(parse_instant("2025-10-01T17:00:00"), Some(expected));
    assert_eq!(parse_instant(&expected.to_rfc3339()), Some(expected));

    let midnight = parse_instant("2025-10-01").unwrap();
    assert_eq!((midnight.hour(), midnight.minute()), (0, 0));

    assert!(parse_instant("tomorrow").is_none());
    assert!(parse_instant("2025-13-01T10:00").is_none());
}

#[test]
fn test_clock_times() {
    assert_eq!(normalize_hhmm("9:5").unwrap(), "09:05");
    assert_eq!(normalize_hhmm(" 23:59 ").unwrap(), "23:59");
    assert!(normalize_hhmm("24:00").is_err());
    assert!(normalize_hhmm("12:60").is_err());
    assert!(normalize_hhmm("noon").is_err());

    assert_eq!(minutes_since_midnight("09:00"), Some(540));
    assert_eq!(minutes_since_midnight("bad"), None);
}

#[test]
fn test_day_codes() {
    assert_eq!(Day::from_code("MON"), Some(Day::Monday));
    assert_eq!(Day::from_code("saturday"), Some(Day::Saturday));
    assert_eq!(Day::from_code("sunday"), None);
    assert_eq!(Day::Wednesday.to_string(), "wednesday");
}
