pub mod assignment;
pub mod class_session;
pub mod day;
pub mod notice;
pub mod outcome;
pub mod priority;
pub mod state;
pub mod subject;

pub use assignment::{Assignment, NewAssignment};
pub use class_session::{ClassSession, NewClass};
pub use day::Day;
pub use notice::{NewNotice, Notice};
pub use outcome::Outcome;
pub use priority::Priority;
pub use state::{OrganizerState, Unreadable};
pub use subject::{NewSubject, Subject};

/// Anything stored in a collection keyed by a creation-timestamp id.
pub trait Record {
    fn id(&self) -> i64;
}

impl Record for ClassSession {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Assignment {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Subject {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Notice {
    fn id(&self) -> i64 {
        self.id
    }
}
