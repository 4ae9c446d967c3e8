pub mod audit;
pub mod reminders;
pub mod scanner;
pub mod stats;
pub mod store;
pub mod watch;
