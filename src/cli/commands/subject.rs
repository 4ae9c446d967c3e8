use crate::cli::commands::{audit, open_store};
use crate::cli::parser::{Cli, SubjectAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{NewSubject, Outcome};
use crate::ui::notify::not_found;

pub fn handle(action: &SubjectAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    match action {
        SubjectAction::Add { name, total } => {
            let mut store = open_store(cli, cfg)?;
            let s = store.add_subject(NewSubject {
                name: name.clone(),
                total_classes: *total,
            })?;
            audit(&store, "add", &format!("subject #{} {}", s.id, s.name));
        }
        SubjectAction::Del { id } => {
            let mut store = open_store(cli, cfg)?;
            if store.remove_subject(*id)? {
                audit(&store, "del", &format!("subject #{}", id));
            } else {
                not_found("subject", *id);
            }
        }
        SubjectAction::Mark { id, outcome } => {
            let outcome = Outcome::from_code(outcome)
                .ok_or_else(|| AppError::InvalidOutcome(outcome.clone()))?;

            let mut store = open_store(cli, cfg)?;
            match store.mark_attendance(*id, outcome)? {
                Some(s) => audit(
                    &store,
                    "mark",
                    &format!("subject #{} {} -> {}", s.id, s.name, outcome),
                ),
                None => not_found("subject", *id),
            }
        }
    }

    Ok(())
}
