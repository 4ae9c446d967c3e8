//! Periodic reminder loop.
//!
//! Every tick reloads the store (other invocations may have changed it),
//! runs one scan and keeps the deferred reminders in line with the
//! assignments currently on record.

use crate::core::reminders::ReminderScheduler;
use crate::core::scanner::{NotificationSink, ReminderScanner};
use crate::core::store::{KvBackend, Store};
use crate::errors::AppResult;
use chrono::{DateTime, Local};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub interval: Duration,
    /// Stop after this many scans; run until Ctrl-C when None.
    pub ticks: Option<u64>,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_SCAN_INTERVAL_SECS),
            ticks: None,
        }
    }
}

/// Drive `scanner` until Ctrl-C or until `opts.ticks` scans have run.
/// `clock` supplies the wall-clock time of each scan.
/// Returns the number of scans performed.
pub async fn run_watch<B, C>(
    store: &mut Store<B>,
    scanner: &mut ReminderScanner,
    sink: Arc<dyn NotificationSink>,
    opts: WatchOptions,
    mut clock: C,
) -> AppResult<u64>
where
    B: KvBackend,
    C: FnMut() -> DateTime<Local>,
{
    let mut scheduler = ReminderScheduler::new(Arc::clone(&sink));
    let mut interval = tokio::time::interval(opts.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        "Reminder scanner started for '{}' (interval: {}s)",
        store.user_id(),
        opts.interval.as_secs()
    );

    let mut done = 0u64;
    loop {
        if opts.ticks.is_some_and(|limit| done >= limit) {
            break;
        }

        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => {
                info!("Interrupted, stopping reminder scanner");
                break;
            }
        }

        if let Err(e) = store.reload() {
            warn!("Reload failed, scanning last known data: {}", e);
        }

        let now = clock();
        scanner.tick(store.state(), now, sink.as_ref());
        scheduler.reconcile(store.assignments(), now);
        done += 1;
    }

    Ok(done)
}
