mod common;
use chrono::{DateTime, Duration, Local};
use common::at;
use rcompanion::core::scanner::{
    CollectingSink, Reminder, ReminderScanner, ScanRules, ScanState, Severity,
    assignment_deadlines, scan, upcoming_classes,
};
use rcompanion::models::{Assignment, ClassSession, Day, OrganizerState};

fn class(subject: &str, day: Day, time: &str) -> ClassSession {
    ClassSession {
        id: 1,
        subject: subject.into(),
        day,
        time: time.into(),
        room: String::new(),
        professor: String::new(),
        extra: Default::default(),
    }
}

fn assignment(title: &str, due_date: DateTime<Local>, completed: bool) -> Assignment {
    Assignment {
        id: 2,
        title: title.into(),
        subject: "Math".into(),
        due_date,
        description: String::new(),
        completed,
        created_at: due_date - Duration::days(7),
        extra: Default::default(),
    }
}

fn rules() -> ScanRules {
    ScanRules::default()
}

#[test]
fn test_class_starting_in_ten_minutes() {
    let classes = [class("Physics", Day::Monday, "09:00")];
    let now = at(2025, 10, 6, 8, 50); // Monday

    let out = upcoming_classes(&classes, now, &rules());

    assert_eq!(
        out,
        vec![Reminder::ClassStartingSoon {
            subject: "Physics".into(),
            minutes_left: 10
        }]
    );
    assert_eq!(out[0].to_string(), "Class \"Physics\" starts in 10 minutes!");
}

#[test]
fn test_later_scan_reports_fewer_minutes() {
    let classes = [class("Physics", Day::Monday, "09:00")];

    let out = upcoming_classes(&classes, at(2025, 10, 6, 8, 51), &rules());

    assert_eq!(
        out,
        vec![Reminder::ClassStartingSoon {
            subject: "Physics".into(),
            minutes_left: 9
        }]
    );
}

#[test]
fn test_class_window_boundaries() {
    let classes = [class("Physics", Day::Monday, "09:00")];

    let exactly_lead = upcoming_classes(&classes, at(2025, 10, 6, 8, 45), &rules());
    assert_eq!(exactly_lead.len(), 1, "15 minutes ahead is inside the window");

    let too_early = upcoming_classes(&classes, at(2025, 10, 6, 8, 44), &rules());
    assert!(too_early.is_empty(), "16 minutes ahead is outside the window");

    let starting_now = upcoming_classes(&classes, at(2025, 10, 6, 9, 0), &rules());
    assert!(starting_now.is_empty(), "a class starting now is not upcoming");

    let started = upcoming_classes(&classes, at(2025, 10, 6, 9, 5), &rules());
    assert!(started.is_empty());
}

#[test]
fn test_no_class_reminders_on_sunday() {
    let classes: Vec<ClassSession> = Day::ALL
        .iter()
        .map(|d| class("Physics", *d, "09:00"))
        .collect();

    let out = upcoming_classes(&classes, at(2025, 10, 5, 8, 50), &rules());
    assert!(out.is_empty());
}

#[test]
fn test_classes_of_other_days_are_ignored() {
    let classes = [
        class("Physics", Day::Tuesday, "09:00"),
        class("Chemistry", Day::Monday, "09:10"),
    ];

    let out = upcoming_classes(&classes, at(2025, 10, 6, 8, 56), &rules());

    assert_eq!(
        out,
        vec![Reminder::ClassStartingSoon {
            subject: "Chemistry".into(),
            minutes_left: 14
        }]
    );
}

#[test]
fn test_due_soon_reports_whole_hours() {
    let now = at(2025, 10, 6, 12, 0);
    let list = [assignment("Essay", now + Duration::hours(23), false)];

    let out = assignment_deadlines(&list, now, &rules());

    assert_eq!(
        out,
        vec![Reminder::DueSoon {
            title: "Essay".into(),
            hours_left: 23
        }]
    );
    assert_eq!(out[0].to_string(), "\"Essay\" is due in 23 hours!");
    assert_eq!(out[0].severity(), Severity::Warning);
}

#[test]
fn test_due_in_under_an_hour_reports_zero_hours() {
    let now = at(2025, 10, 6, 12, 0);
    let list = [assignment("Quiz", now + Duration::minutes(30), false)];

    let out = assignment_deadlines(&list, now, &rules());

    assert_eq!(
        out,
        vec![Reminder::DueSoon {
            title: "Quiz".into(),
            hours_left: 0
        }]
    );
}

#[test]
fn test_overdue_is_reported_only_as_overdue() {
    let now = at(2025, 10, 6, 12, 0);
    let list = [assignment("Essay", now - Duration::hours(1), false)];

    let out = assignment_deadlines(&list, now, &rules());

    assert_eq!(
        out,
        vec![Reminder::Overdue {
            title: "Essay".into()
        }]
    );
    assert_eq!(out[0].severity(), Severity::Error);
    assert_eq!(out[0].to_string(), "\"Essay\" is OVERDUE!");
}

#[test]
fn test_far_and_completed_assignments_are_silent() {
    let now = at(2025, 10, 6, 12, 0);
    let list = [
        assignment("Far", now + Duration::hours(25), false),
        assignment("Done soon", now + Duration::hours(2), true),
        assignment("Done late", now - Duration::days(2), true),
    ];

    assert!(assignment_deadlines(&list, now, &rules()).is_empty());
}

#[test]
fn test_full_scan_lists_classes_before_deadlines() {
    let now = at(2025, 10, 6, 8, 50);
    let state = OrganizerState {
        classes: vec![class("Physics", Day::Monday, "09:00")],
        assignments: vec![assignment("Essay", now - Duration::hours(3), false)],
        ..Default::default()
    };

    let out = scan(&state, now, &rules());

    assert_eq!(out.len(), 2);
    assert!(matches!(out[0], Reminder::ClassStartingSoon { .. }));
    assert!(matches!(out[1], Reminder::Overdue { .. }));
}

#[test]
fn test_tick_notifies_sink_and_counts_scans() {
    let now = at(2025, 10, 6, 8, 50);
    let state = OrganizerState {
        classes: vec![class("Physics", Day::Monday, "09:00")],
        ..Default::default()
    };
    let sink = CollectingSink::new();
    let mut scanner = ReminderScanner::new(rules());
    assert_eq!(scanner.state(), ScanState::Idle);

    let first = scanner.tick(&state, now, &sink);
    let second = scanner.tick(&state, now + Duration::minutes(1), &sink);

    assert_eq!(scanner.state(), ScanState::Idle);
    assert_eq!(scanner.scans(), 2);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    // no history between scans: the same class is reported again
    assert_eq!(sink.received().len(), 2);
}

#[test]
fn test_tick_on_empty_state_emits_nothing() {
    let sink = CollectingSink::new();
    let mut scanner = ReminderScanner::new(rules());

    let out = scanner.tick(&OrganizerState::default(), at(2025, 10, 6, 8, 50), &sink);

    assert!(out.is_empty());
    assert!(sink.received().is_empty());
    assert_eq!(scanner.scans(), 1);
}

#[test]
fn test_custom_rules_widen_the_windows() {
    let custom = ScanRules {
        class_lead_minutes: 30,
        due_soon_hours: 48,
    };
    let now = at(2025, 10, 6, 8, 30);
    let classes = [class("Physics", Day::Monday, "09:00")];
    let list = [assignment("Essay", now + Duration::hours(40), false)];

    assert_eq!(upcoming_classes(&classes, now, &custom).len(), 1);
    assert_eq!(
        assignment_deadlines(&list, now, &custom),
        vec![Reminder::DueSoon {
            title: "Essay".into(),
            hours_left: 40
        }]
    );

    let scanner = ReminderScanner::new(custom);
    assert_eq!(scanner.rules(), &custom);
}
