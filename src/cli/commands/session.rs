use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::store::backup_key;
use crate::db::audit::ttlog;
use crate::db::kv::list_keys;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// `login <user>`: remember the active user in the config file.
pub fn login(user: &str, cli: &Cli, cfg: &Config) -> AppResult<()> {
    let user = user.trim();
    if user.is_empty() {
        return Err(AppError::NotLoggedIn);
    }

    let mut updated = cfg.clone();
    updated.current_user = Some(user.to_string());
    if !cli.test {
        updated.save()?;
    }

    let pool = DbPool::open_initialized(&cfg.database)?;
    ttlog(&pool.conn, "login", user, "User logged in")?;

    success(format!("Logged in as '{}'.", user));
    Ok(())
}

pub fn logout(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Some(user) = cfg.current_user.clone() else {
        info("Nobody is logged in.");
        return Ok(());
    };

    let mut updated = cfg.clone();
    updated.current_user = None;
    if !cli.test {
        updated.save()?;
    }

    let pool = DbPool::open_initialized(&cfg.database)?;
    ttlog(&pool.conn, "logout", &user, "User logged out")?;

    success(format!("'{}' logged out.", user));
    Ok(())
}

/// Print the active user and every user with stored data.
/// Copies of damaged documents are not profiles.
pub fn whoami(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let backup_suffix = backup_key("");
    match cfg.resolve_user(cli.user.as_deref()) {
        Ok(user) => println!("👤 Active user: {}", user),
        Err(_) => println!("👤 Active user: (none)"),
    }

    let pool = DbPool::open_initialized(&cfg.database)?;
    let prefix = format!("{}_", cfg.namespace);
    let users: Vec<String> = list_keys(&pool)?
        .into_iter()
        .filter(|k| !k.ends_with(&backup_suffix))
        .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
        .collect();

    if users.is_empty() {
        println!("🗄️  No stored profiles.");
    } else {
        println!("🗄️  Stored profiles: {}", users.join(", "));
    }

    Ok(())
}
