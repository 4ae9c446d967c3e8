//! One-shot "due tomorrow" reminders.
//!
//! Each incomplete assignment whose due date is more than a day away gets a
//! timer that fires once, 24 hours before the deadline. Timers are tokio
//! tasks kept by assignment id and aborted when the assignment is deleted,
//! completed or rescheduled.

use crate::core::scanner::{NotificationSink, Reminder};
use crate::core::store::StoreEvent;
use crate::models::Assignment;
use chrono::{DateTime, Duration, Local};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const REMINDER_LEAD_HOURS: i64 = 24;

struct Pending {
    due_date: DateTime<Local>,
    handle: JoinHandle<()>,
}

pub struct ReminderScheduler {
    sink: Arc<dyn NotificationSink>,
    lead: Duration,
    pending: HashMap<i64, Pending>,
}

impl ReminderScheduler {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            lead: Duration::hours(REMINDER_LEAD_HOURS),
            pending: HashMap::new(),
        }
    }

    /// Spawn the one-shot timer for `assignment`, replacing any previous one.
    /// Must be called inside a tokio runtime.
    ///
    /// Returns false when nothing was scheduled: the assignment is completed
    /// or the reminder instant is not in the future.
    pub fn schedule(&mut self, assignment: &Assignment, now: DateTime<Local>) -> bool {
        if assignment.completed {
            return false;
        }

        let fire_at = assignment.due_date - self.lead;
        let Ok(delay) = (fire_at - now).to_std() else {
            return false;
        };
        if delay.is_zero() {
            return false;
        }

        self.cancel(assignment.id);

        let sink = Arc::clone(&self.sink);
        let reminder = Reminder::DueTomorrow {
            title: assignment.title.clone(),
        };
        let deadline = tokio::time::Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            sink.notify(&reminder);
        });

        debug!(
            "Reminder for assignment {} scheduled at {}",
            assignment.id,
            fire_at.format("%Y-%m-%d %H:%M")
        );
        self.pending.insert(
            assignment.id,
            Pending {
                due_date: assignment.due_date,
                handle,
            },
        );
        true
    }

    /// Abort the timer of `id`. Returns true if a timer was still waiting.
    pub fn cancel(&mut self, id: i64) -> bool {
        match self.pending.remove(&id) {
            Some(p) => {
                let waiting = !p.handle.is_finished();
                p.handle.abort();
                if waiting {
                    debug!("Reminder for assignment {} cancelled", id);
                }
                waiting
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, p) in self.pending.drain() {
            p.handle.abort();
        }
    }

    /// Timers that have not fired yet.
    pub fn waiting(&self) -> usize {
        self.pending
            .values()
            .filter(|p| !p.handle.is_finished())
            .count()
    }

    pub fn is_scheduled(&self, id: i64) -> bool {
        self.pending
            .get(&id)
            .is_some_and(|p| !p.handle.is_finished())
    }

    /// Follow a store mutation.
    pub fn handle_event(&mut self, event: &StoreEvent, now: DateTime<Local>) {
        match event {
            StoreEvent::AssignmentAdded(a) => {
                self.schedule(a, now);
            }
            StoreEvent::AssignmentRemoved(id) => {
                self.cancel(*id);
            }
            StoreEvent::AssignmentToggled(a) if a.completed => {
                self.cancel(a.id);
            }
            StoreEvent::AssignmentToggled(a) => {
                self.schedule(a, now);
            }
            _ => {}
        }
    }

    /// Align the timers with a freshly loaded list of assignments.
    ///
    /// Timers of assignments that disappeared, were completed or changed due
    /// date are cancelled; new incomplete assignments get a timer. A timer
    /// that already fired stays recorded so it never fires twice.
    pub fn reconcile(&mut self, assignments: &[Assignment], now: DateTime<Local>) {
        let wanted: HashMap<i64, &Assignment> = assignments
            .iter()
            .filter(|a| !a.completed)
            .map(|a| (a.id, a))
            .collect();

        let stale: Vec<i64> = self
            .pending
            .iter()
            .filter(|(id, p)| wanted.get(*id).is_none_or(|a| a.due_date != p.due_date))
            .map(|(id, _)| *id)
            .collect();

        for id in stale {
            self.cancel(id);
        }

        let mut added = 0;
        for a in wanted.values() {
            if !self.pending.contains_key(&a.id) && self.schedule(a, now) {
                added += 1;
            }
        }

        if added > 0 {
            info!("{} new assignment reminder(s) scheduled", added);
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
