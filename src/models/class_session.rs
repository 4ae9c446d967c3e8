use super::day::Day;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One timetable entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: i64,
    pub subject: String,
    pub day: Day,
    pub time: String, // "HH:MM", zero-padded
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub professor: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields supplied by the user when adding a class.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub subject: String,
    pub day: Day,
    pub time: String,
    pub room: String,
    pub professor: String,
}

impl ClassSession {
    /// Minutes since midnight of the start time, if `time` is well formed.
    pub fn start_minutes(&self) -> Option<i64> {
        crate::utils::time::minutes_since_midnight(&self.time)
    }
}
