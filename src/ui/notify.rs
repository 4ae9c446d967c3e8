//! Terminal side of notifications: scanner reminders and store changes.

use crate::core::scanner::{NotificationSink, Reminder, Severity};
use crate::core::store::StoreEvent;
use crate::ui::messages::{error, info, success, warning};

/// Prints reminders as transient terminal notices.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, reminder: &Reminder) {
        match reminder.severity() {
            Severity::Warning => warning(reminder),
            Severity::Error => error(reminder),
        }
    }
}

/// Report a persisted change to the user.
pub fn announce(event: &StoreEvent) {
    match event {
        StoreEvent::ClassAdded(c) => success(format!(
            "Class added successfully! #{} {} on {} at {}",
            c.id, c.subject, c.day, c.time
        )),
        StoreEvent::ClassRemoved(id) => success(format!("Class #{} deleted successfully!", id)),
        StoreEvent::AssignmentAdded(a) => success(format!(
            "Assignment added successfully! #{} \"{}\" due {}",
            a.id,
            a.title,
            a.due_date.format("%Y-%m-%d %H:%M")
        )),
        StoreEvent::AssignmentRemoved(id) => {
            success(format!("Assignment #{} deleted successfully!", id))
        }
        StoreEvent::AssignmentToggled(a) => {
            let status = if a.completed {
                "completed"
            } else {
                "marked incomplete"
            };
            success(format!("Assignment \"{}\" {}!", a.title, status))
        }
        StoreEvent::SubjectAdded(s) => {
            success(format!("Subject added successfully! #{} {}", s.id, s.name))
        }
        StoreEvent::SubjectRemoved(id) => success(format!("Subject #{} deleted successfully!", id)),
        StoreEvent::AttendanceMarked { subject, outcome } => success(format!(
            "Marked {} for {} ({}/{} present, {}%)",
            outcome,
            subject.name,
            subject.present_days,
            subject.total_classes,
            subject.percentage()
        )),
        StoreEvent::NoticeAdded(n) => {
            success(format!("Notice added successfully! #{} {}", n.id, n.title))
        }
        StoreEvent::NoticeRemoved(id) => success(format!("Notice #{} deleted successfully!", id)),
    }
}

/// Message for a mutation whose target id does not exist.
pub fn not_found(kind: &str, id: i64) {
    info(format!("No {} with id {}: nothing to do.", kind, id));
}
