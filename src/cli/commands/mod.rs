pub mod assignment;
pub mod class;
pub mod config;
pub mod init;
pub mod list;
pub mod log;
pub mod notice;
pub mod scan;
pub mod session;
pub mod subject;
pub mod watch;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::store::Store;
use crate::db::audit::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::notify::announce;

/// Open the active user's store, with the terminal renderer subscribed
/// to every persisted change.
pub fn open_store(cli: &Cli, cfg: &Config) -> AppResult<Store<DbPool>> {
    let user = cfg.resolve_user(cli.user.as_deref())?;
    let pool = DbPool::open_initialized(&cfg.database)?;

    let mut store = Store::load(pool, &cfg.namespace, &user)?;
    store.subscribe(announce);
    Ok(store)
}

/// Record a mutation in the internal log table (non blocking).
pub fn audit(store: &Store<DbPool>, operation: &str, message: &str) {
    if let Err(e) = ttlog(&store.backend().conn, operation, store.user_id(), message) {
        ::log::warn!("Failed to write internal log: {}", e);
    }
}
