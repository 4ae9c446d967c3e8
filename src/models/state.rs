use super::{Assignment, ClassSession, Notice, Subject};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The whole per-user document, persisted as one JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizerState {
    #[serde(default)]
    pub classes: Vec<ClassSession>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub notices: Vec<Notice>,

    /// Stored entries that do not fit the record types. Written back as is.
    #[serde(skip)]
    pub unreadable: Unreadable,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw collection entries kept verbatim, per collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unreadable {
    pub classes: Vec<Value>,
    pub assignments: Vec<Value>,
    pub subjects: Vec<Value>,
    pub notices: Vec<Value>,
}

impl Unreadable {
    pub fn len(&self) -> usize {
        self.classes.len() + self.assignments.len() + self.subjects.len() + self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest integer `id` among the raw entries, so new ids never collide with them.
    fn max_id(&self) -> i64 {
        self.classes
            .iter()
            .chain(&self.assignments)
            .chain(&self.subjects)
            .chain(&self.notices)
            .filter_map(|v| v.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
    }
}

impl OrganizerState {
    /// Highest id across all four collections (0 when empty).
    pub fn max_id(&self) -> i64 {
        let classes = self.classes.iter().map(|c| c.id);
        let assignments = self.assignments.iter().map(|a| a.id);
        let subjects = self.subjects.iter().map(|s| s.id);
        let notices = self.notices.iter().map(|n| n.id);

        classes
            .chain(assignments)
            .chain(subjects)
            .chain(notices)
            .max()
            .unwrap_or(0)
            .max(self.unreadable.max_id())
    }

    /// No readable records. Entries kept in `unreadable` are not counted.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.assignments.is_empty()
            && self.subjects.is_empty()
            && self.notices.is_empty()
    }
}
