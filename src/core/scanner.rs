//! Reminder scan engine.
//!
//! A scan looks at the current store contents and the current time and
//! emits one [`Reminder`] per qualifying class or assignment. It keeps no
//! history: the same condition is reported again on the next scan.

use crate::config::Config;
use crate::models::{Assignment, ClassSession, Day, OrganizerState};
use chrono::{DateTime, Datelike, Duration, Local, Timelike};
use log::debug;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reminder {
    ClassStartingSoon { subject: String, minutes_left: i64 },
    DueSoon { title: String, hours_left: i64 },
    Overdue { title: String },
    DueTomorrow { title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Reminder {
    pub fn severity(&self) -> Severity {
        match self {
            Reminder::Overdue { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reminder::ClassStartingSoon {
                subject,
                minutes_left,
            } => write!(f, "Class \"{}\" starts in {} minutes!", subject, minutes_left),
            Reminder::DueSoon { title, hours_left } => {
                write!(f, "\"{}\" is due in {} hours!", title, hours_left)
            }
            Reminder::Overdue { title } => write!(f, "\"{}\" is OVERDUE!", title),
            Reminder::DueTomorrow { title } => {
                write!(f, "Reminder: \"{}\" is due tomorrow!", title)
            }
        }
    }
}

/// Receiver of transient notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, reminder: &Reminder);
}

/// Sink that keeps every reminder it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    received: Mutex<Vec<Reminder>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Reminder> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, reminder: &Reminder) {
        if let Ok(mut received) = self.received.lock() {
            received.push(reminder.clone());
        }
    }
}

/// Thresholds of the two checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRules {
    /// A class is "starting soon" when it begins within this many minutes.
    pub class_lead_minutes: i64,
    /// An assignment is "due soon" when less than this many hours are left.
    pub due_soon_hours: i64,
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            class_lead_minutes: 15,
            due_soon_hours: 24,
        }
    }
}

impl ScanRules {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            class_lead_minutes: cfg.class_lead_minutes,
            due_soon_hours: cfg.due_soon_hours,
        }
    }
}

/// Classes of today starting in `(0, lead]` minutes. Nothing on Sunday.
pub fn upcoming_classes(
    classes: &[ClassSession],
    now: DateTime<Local>,
    rules: &ScanRules,
) -> Vec<Reminder> {
    let Some(today) = Day::from_weekday(now.weekday()) else {
        return Vec::new();
    };
    let now_minutes = i64::from(now.hour()) * 60 + i64::from(now.minute());

    classes
        .iter()
        .filter(|c| c.day == today)
        .filter_map(|c| {
            let minutes_left = c.start_minutes()? - now_minutes;
            (minutes_left > 0 && minutes_left <= rules.class_lead_minutes).then(|| {
                Reminder::ClassStartingSoon {
                    subject: c.subject.clone(),
                    minutes_left,
                }
            })
        })
        .collect()
}

/// Due-soon or overdue reminders for incomplete assignments.
pub fn assignment_deadlines(
    assignments: &[Assignment],
    now: DateTime<Local>,
    rules: &ScanRules,
) -> Vec<Reminder> {
    let window = Duration::hours(rules.due_soon_hours);

    assignments
        .iter()
        .filter(|a| !a.completed)
        .filter_map(|a| {
            let left = a.time_left(now);
            if left > Duration::zero() && left < window {
                Some(Reminder::DueSoon {
                    title: a.title.clone(),
                    hours_left: left.num_hours(),
                })
            } else if left < Duration::zero() {
                Some(Reminder::Overdue {
                    title: a.title.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// One full scan: class check first, then deadlines.
pub fn scan(state: &OrganizerState, now: DateTime<Local>, rules: &ScanRules) -> Vec<Reminder> {
    let mut out = upcoming_classes(&state.classes, now, rules);
    out.extend(assignment_deadlines(&state.assignments, now, rules));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

/// Stateless apart from Idle/Scanning and a counter of completed scans.
#[derive(Debug)]
pub struct ReminderScanner {
    rules: ScanRules,
    state: ScanState,
    scans: u64,
}

impl ReminderScanner {
    pub fn new(rules: ScanRules) -> Self {
        Self {
            rules,
            state: ScanState::Idle,
            scans: 0,
        }
    }

    pub fn rules(&self) -> &ScanRules {
        &self.rules
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn scans(&self) -> u64 {
        self.scans
    }

    /// Run one scan and hand every reminder to `sink`.
    pub fn tick(
        &mut self,
        organizer: &OrganizerState,
        now: DateTime<Local>,
        sink: &dyn NotificationSink,
    ) -> Vec<Reminder> {
        self.state = ScanState::Scanning;

        let reminders = scan(organizer, now, &self.rules);
        for reminder in &reminders {
            sink.notify(reminder);
        }

        self.scans += 1;
        self.state = ScanState::Idle;

        debug!(
            "Scan #{} at {} emitted {} reminder(s)",
            self.scans,
            now.format("%Y-%m-%d %H:%M"),
            reminders.len()
        );
        reminders
    }
}
