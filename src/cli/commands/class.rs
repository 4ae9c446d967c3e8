use crate::cli::commands::{audit, open_store};
use crate::cli::parser::{ClassAction, Cli};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Day, NewClass};
use crate::ui::notify::not_found;

pub fn handle(action: &ClassAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    match action {
        ClassAction::Add {
            subject,
            day,
            time,
            room,
            professor,
        } => {
            let day = Day::from_code(day).ok_or_else(|| AppError::InvalidDay(day.clone()))?;

            let mut store = open_store(cli, cfg)?;
            let class = store.add_class(NewClass {
                subject: subject.clone(),
                day,
                time: time.clone(),
                room: room.clone(),
                professor: professor.clone(),
            })?;

            audit(
                &store,
                "add",
                &format!("class #{} {} ({} {})", class.id, class.subject, class.day, class.time),
            );
        }
        ClassAction::Del { id } => {
            let mut store = open_store(cli, cfg)?;
            if store.remove_class(*id)? {
                audit(&store, "del", &format!("class #{}", id));
            } else {
                not_found("class", *id);
            }
        }
    }

    Ok(())
}
