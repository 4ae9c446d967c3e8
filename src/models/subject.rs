use super::outcome::Outcome;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Attendance counters for one subject.
///
/// `total_classes` starts from the value given at creation and grows by one
/// on every mark, so it is not forced to equal `present_days + absent_days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_classes: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub present_days: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub absent_days: u32,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub total_classes: u32,
}

impl Subject {
    pub fn mark(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Present => self.present_days = self.present_days.saturating_add(1),
            Outcome::Absent => self.absent_days = self.absent_days.saturating_add(1),
        }
        self.total_classes = self.total_classes.saturating_add(1);
    }

    pub fn percentage(&self) -> u32 {
        crate::core::stats::attendance_percentage(self.present_days, self.total_classes)
    }
}

/// Counter as written by a browser: `null`/NaN and garbage read as 0,
/// negatives clamp to 0, numeric strings are accepted and anything above
/// `u32::MAX` saturates.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(saturate).unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map(saturate).unwrap_or(0),
        _ => 0,
    };
    Ok(count)
}

fn saturate(n: f64) -> u32 {
    // float-to-int `as` saturates and maps NaN to 0
    n.trunc() as u32
}
