use crate::utils::date::instant;
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub subject: String,
    #[serde(with = "instant")]
    pub due_date: DateTime<Local>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "instant")]
    pub created_at: DateTime<Local>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub subject: String,
    pub due_date: DateTime<Local>,
    pub description: String,
}

impl Assignment {
    /// Signed time left until the due date (negative once overdue).
    pub fn time_left(&self, now: DateTime<Local>) -> Duration {
        self.due_date - now
    }

    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        self.time_left(now) < Duration::zero()
    }
}
