//! Time utilities: parsing HH:MM and minutes since midnight.

use crate::errors::{AppError, AppResult};

/// Normalize a user-entered clock time to zero-padded `HH:MM` ("9:5" → "09:05").
pub fn normalize_hhmm(t: &str) -> AppResult<String> {
    let (h, m) = split_hhmm(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))?;
    Ok(format!("{:02}:{:02}", h, m))
}

/// Minutes since midnight for an `HH:MM` string.
pub fn minutes_since_midnight(t: &str) -> Option<i64> {
    split_hhmm(t).map(|(h, m)| i64::from(h) * 60 + i64::from(m))
}

fn split_hhmm(t: &str) -> Option<(u32, u32)> {
    let (h, m) = t.trim().split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;

    if h < 24 && m < 60 { Some((h, m)) } else { None }
}
