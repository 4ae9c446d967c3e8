pub mod messages;
pub mod notify;
pub mod views;
