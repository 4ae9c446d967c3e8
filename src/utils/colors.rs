//! ANSI color helper utilities for terminal output.

use crate::models::Priority;

pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Attendance colour:
/// ≥75 → green
/// ≥50 → yellow
/// else → red
pub fn color_for_percentage(pct: u32) -> &'static str {
    if pct >= 75 {
        GREEN
    } else if pct >= 50 {
        YELLOW
    } else {
        RED
    }
}

pub fn color_for_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => RED,
        Priority::Medium => YELLOW,
        Priority::Low => CYAN,
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
