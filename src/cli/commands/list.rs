use crate::cli::commands::open_store;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::views;
use chrono::Local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        timetable,
        assignments,
        attendance,
        notices,
    } = &cli.command
    {
        let store = open_store(cli, cfg)?;
        let all = !(*timetable || *assignments || *attendance || *notices);

        if all || *timetable {
            views::print_timetable(store.classes());
        }
        if all || *assignments {
            views::print_assignments(store.assignments(), Local::now());
        }
        if all || *attendance {
            views::print_attendance(store.subjects());
        }
        if all || *notices {
            views::print_notices(store.notices());
        }
    }

    Ok(())
}
