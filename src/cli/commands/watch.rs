use crate::cli::commands::open_store;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::scanner::{NotificationSink, ReminderScanner, ScanRules};
use crate::core::watch::{WatchOptions, run_watch};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::notify::ConsoleSink;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;

pub fn handle(interval: Option<u64>, ticks: Option<u64>, cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut store = open_store(cli, cfg)?;

    let secs = interval.unwrap_or(cfg.scan_interval_secs).max(1);
    let opts = WatchOptions {
        interval: Duration::from_secs(secs),
        ticks,
    };
    let mut scanner = ReminderScanner::new(ScanRules::from_config(cfg));
    let sink: Arc<dyn NotificationSink> = Arc::new(ConsoleSink);

    // single-threaded: the scanner and the reminder timers share one loop
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    info(format!(
        "Watching reminders for '{}' every {}s (Ctrl-C to stop)",
        store.user_id(),
        secs
    ));

    let scans = runtime.block_on(run_watch(&mut store, &mut scanner, sink, opts, Local::now))?;

    info(format!("Stopped after {} scan(s).", scans));
    Ok(())
}
