use crate::cli::commands::{audit, open_store};
use crate::cli::parser::{Cli, NoticeAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{NewNotice, Priority};
use crate::ui::notify::not_found;

pub fn handle(action: &NoticeAction, cli: &Cli, cfg: &Config) -> AppResult<()> {
    match action {
        NoticeAction::Add {
            title,
            content,
            priority,
        } => {
            let priority = Priority::from_code(priority)
                .ok_or_else(|| AppError::InvalidPriority(priority.clone()))?;

            let mut store = open_store(cli, cfg)?;
            let n = store.add_notice(NewNotice {
                title: title.clone(),
                content: content.clone(),
                priority,
            })?;
            audit(
                &store,
                "add",
                &format!("notice #{} {} [{}]", n.id, n.title, n.priority),
            );
        }
        NoticeAction::Del { id } => {
            let mut store = open_store(cli, cfg)?;
            if store.remove_notice(*id)? {
                audit(&store, "del", &format!("notice #{}", id));
            } else {
                not_found("notice", *id);
            }
        }
    }

    Ok(())
}
