use crate::cli::commands::open_store;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::scanner::{ReminderScanner, ScanRules};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::ui::notify::ConsoleSink;
use crate::utils::date::parse_instant;
use chrono::Local;

/// One scan, printed immediately.
pub fn handle(at: Option<&str>, cli: &Cli, cfg: &Config) -> AppResult<()> {
    let now = match at {
        Some(s) => parse_instant(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
        None => Local::now(),
    };

    let store = open_store(cli, cfg)?;
    let mut scanner = ReminderScanner::new(ScanRules::from_config(cfg));

    let reminders = scanner.tick(store.state(), now, &ConsoleSink);
    if reminders.is_empty() {
        info(format!(
            "No reminders at {}.",
            now.format("%a %Y-%m-%d %H:%M")
        ));
    }

    Ok(())
}
