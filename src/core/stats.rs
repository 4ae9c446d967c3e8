//! Small derived values shown next to the stored records:
//! attendance percentages, time-left labels and display ordering.

use crate::models::{Assignment, ClassSession, Day, Notice, Subject};
use chrono::Duration;

/// `round(100 × present / total)`; a subject with no classes yet is 0%.
pub fn attendance_percentage(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(present) * 100.0 / f64::from(total)).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Totals over every subject, saturating at `u32::MAX`.
pub fn overall_attendance(subjects: &[Subject]) -> AttendanceSummary {
    let mut summary = subjects
        .iter()
        .fold(AttendanceSummary::default(), |mut acc, s| {
            acc.present = acc.present.saturating_add(s.present_days);
            acc.absent = acc.absent.saturating_add(s.absent_days);
            acc.total = acc.total.saturating_add(s.total_classes);
            acc
        });

    summary.percentage = attendance_percentage(summary.present, summary.total);
    summary
}

/// Human label for the time left before a deadline.
pub fn format_time_left(left: Duration) -> String {
    if left < Duration::zero() {
        return "OVERDUE".to_string();
    }

    let days = left.num_days();
    let hours = left.num_hours() % 24;

    if days > 0 {
        format!("{}d {}h left", days, hours)
    } else if hours > 0 {
        format!("{}h left", hours)
    } else {
        "Less than 1h left".to_string()
    }
}

/// Less than a day to go (overdue included).
pub fn is_urgent(left: Duration) -> bool {
    left < Duration::hours(24)
}

/// Assignments ordered by due date, earliest first.
pub fn assignments_by_due(assignments: &[Assignment]) -> Vec<&Assignment> {
    let mut out: Vec<&Assignment> = assignments.iter().collect();
    out.sort_by_key(|a| a.due_date);
    out
}

/// Notices ordered newest first.
pub fn notices_newest_first(notices: &[Notice]) -> Vec<&Notice> {
    let mut out: Vec<&Notice> = notices.iter().collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

/// Sessions of one day, ordered by start time.
pub fn sessions_for_day(classes: &[ClassSession], day: Day) -> Vec<&ClassSession> {
    let mut out: Vec<&ClassSession> = classes.iter().filter(|c| c.day == day).collect();
    out.sort_by_key(|c| c.start_minutes().unwrap_or(i64::MAX));
    out
}
