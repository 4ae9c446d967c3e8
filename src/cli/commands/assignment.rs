use crate::cli::commands::{audit, open_store};
use crate::cli::parser::{AssignmentAction, Cli};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::NewAssignment;
use crate::ui::messages::warning;
use crate::ui::notify::not_found;
use crate::utils::date::parse_instant;
use chrono::Local;

pub fn handle(action: &AssignmentAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut store = open_store(cli, cfg)?;

    match action {
        AssignmentAction::Add {
            title,
            subject,
            due,
            description,
        } => {
            let due_date = parse_instant(due).ok_or_else(|| AppError::InvalidDate(due.clone()))?;
            if due_date < Local::now() {
                warning(format!("Due date {} is already in the past.", due));
            }

            let a = store.add_assignment(NewAssignment {
                title: title.clone(),
                subject: subject.clone(),
                due_date,
                description: description.clone(),
            })?;

            audit(
                &store,
                "add",
                &format!("assignment #{} \"{}\" due {}", a.id, a.title, a.due_date.to_rfc3339()),
            );
        }
        AssignmentAction::Del { id } => {
            if store.remove_assignment(*id)? {
                audit(&store, "del", &format!("assignment #{}", id));
            } else {
                not_found("assignment", *id);
            }
        }
        AssignmentAction::Toggle { id } => match store.toggle_assignment_complete(*id)? {
            Some(a) => audit(
                &store,
                "toggle",
                &format!("assignment #{} completed={}", a.id, a.completed),
            ),
            None => not_found("assignment", *id),
        },
    }

    Ok(())
}
