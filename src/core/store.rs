//! Per-user organizer store.
//!
//! The store owns the four collections of the logged-in user. Every mutation
//! changes the in-memory state and writes the whole document back through a
//! [`KvBackend`] before returning; if the write fails the state is restored,
//! so no caller ever sees a mutated-but-unpersisted store.

use crate::errors::{AppError, AppResult};
use crate::models::{
    Assignment, ClassSession, NewAssignment, NewClass, NewNotice, NewSubject, Notice,
    OrganizerState, Outcome, Record, Subject,
};
use crate::utils::time::normalize_hhmm;
use chrono::Local;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Namespace used when the configuration does not override it.
pub const DEFAULT_NAMESPACE: &str = "collegeCompanionData";

/// Key under which a user's document is stored: `<namespace>_<userId>`.
pub fn storage_key(namespace: &str, user_id: &str) -> String {
    format!("{}_{}", namespace, user_id)
}

/// Where a damaged document is copied before it can be overwritten.
pub fn backup_key(key: &str) -> String {
    format!("{}.unreadable", key)
}

/// A persistent key/value slot holding whole documents.
pub trait KvBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous document.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// In-process backend, used for headless runs and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, as a full disk would.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Persistence(format!(
                "write to '{}' rejected: storage full",
                key
            )));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What changed, delivered to subscribers after the change is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    ClassAdded(ClassSession),
    ClassRemoved(i64),
    AssignmentAdded(Assignment),
    AssignmentRemoved(i64),
    AssignmentToggled(Assignment),
    SubjectAdded(Subject),
    SubjectRemoved(i64),
    AttendanceMarked { subject: Subject, outcome: Outcome },
    NoticeAdded(Notice),
    NoticeRemoved(i64),
}

type Observer = Box<dyn FnMut(&StoreEvent)>;

pub struct Store<B: KvBackend> {
    backend: B,
    user_id: String,
    key: String,
    state: OrganizerState,
    last_id: i64,
    observers: Vec<Observer>,
}

impl<B: KvBackend> Store<B> {
    /// Load the document of `user_id`.
    ///
    /// A missing or unparseable document yields four empty collections.
    /// Entries that do not fit their record type are kept aside and written
    /// back unchanged. A document that cannot be read at all is first copied
    /// under [`backup_key`]; failing that copy is an error, as is a failing
    /// backend read.
    pub fn load(mut backend: B, namespace: &str, user_id: &str) -> AppResult<Self> {
        let key = storage_key(namespace, user_id);
        let state = read_state(&mut backend, &key)?;

        Ok(Self {
            backend,
            user_id: user_id.to_string(),
            last_id: state.max_id(),
            key,
            state,
            observers: Vec::new(),
        })
    }

    /// Re-read the document, picking up writes made by other processes.
    pub fn reload(&mut self) -> AppResult<()> {
        self.state = read_state(&mut self.backend, &self.key)?;
        self.last_id = self.last_id.max(self.state.max_id());
        Ok(())
    }

    /// Write the full state as a single document (last writer wins).
    pub fn save(&mut self) -> AppResult<()> {
        let doc = encode_state(&self.state)?;
        self.backend.set(&self.key, &doc).map_err(|e| match e {
            AppError::Persistence(_) => e,
            other => AppError::Persistence(other.to_string()),
        })
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // ---------------------------
    // Accessors
    // ---------------------------
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> &OrganizerState {
        &self.state
    }

    pub fn classes(&self) -> &[ClassSession] {
        &self.state.classes
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.state.assignments
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.state.subjects
    }

    pub fn notices(&self) -> &[Notice] {
        &self.state.notices
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// End the session and give the backend back.
    pub fn into_backend(self) -> B {
        self.backend
    }

    // ---------------------------
    // Classes
    // ---------------------------
    pub fn add_class(&mut self, new: NewClass) -> AppResult<ClassSession> {
        let time = normalize_hhmm(&new.time)?;
        let class = ClassSession {
            id: self.next_id(),
            subject: new.subject,
            day: new.day,
            time,
            room: new.room,
            professor: new.professor,
            extra: Default::default(),
        };

        self.commit(
            |state| state.classes.push(class.clone()),
            StoreEvent::ClassAdded(class.clone()),
        )?;
        Ok(class)
    }

    pub fn remove_class(&mut self, id: i64) -> AppResult<bool> {
        if !contains(&self.state.classes, id) {
            return Ok(false);
        }
        self.commit(
            |state| state.classes.retain(|c| c.id != id),
            StoreEvent::ClassRemoved(id),
        )?;
        Ok(true)
    }

    // ---------------------------
    // Assignments
    // ---------------------------
    pub fn add_assignment(&mut self, new: NewAssignment) -> AppResult<Assignment> {
        let assignment = Assignment {
            id: self.next_id(),
            title: new.title,
            subject: new.subject,
            due_date: new.due_date,
            description: new.description,
            completed: false,
            created_at: Local::now(),
            extra: Default::default(),
        };

        self.commit(
            |state| state.assignments.push(assignment.clone()),
            StoreEvent::AssignmentAdded(assignment.clone()),
        )?;
        Ok(assignment)
    }

    pub fn remove_assignment(&mut self, id: i64) -> AppResult<bool> {
        if !contains(&self.state.assignments, id) {
            return Ok(false);
        }
        self.commit(
            |state| state.assignments.retain(|a| a.id != id),
            StoreEvent::AssignmentRemoved(id),
        )?;
        Ok(true)
    }

    /// Flip `completed`. Returns the updated assignment, or None if absent.
    pub fn toggle_assignment_complete(&mut self, id: i64) -> AppResult<Option<Assignment>> {
        let Some(pos) = position(&self.state.assignments, id) else {
            return Ok(None);
        };

        let mut updated = self.state.assignments[pos].clone();
        updated.completed = !updated.completed;

        self.commit(
            |state| state.assignments[pos] = updated.clone(),
            StoreEvent::AssignmentToggled(updated.clone()),
        )?;
        Ok(Some(updated))
    }

    // ---------------------------
    // Subjects / attendance
    // ---------------------------
    pub fn add_subject(&mut self, new: NewSubject) -> AppResult<Subject> {
        let subject = Subject {
            id: self.next_id(),
            name: new.name,
            total_classes: new.total_classes,
            present_days: 0,
            absent_days: 0,
            extra: Default::default(),
        };

        self.commit(
            |state| state.subjects.push(subject.clone()),
            StoreEvent::SubjectAdded(subject.clone()),
        )?;
        Ok(subject)
    }

    pub fn remove_subject(&mut self, id: i64) -> AppResult<bool> {
        if !contains(&self.state.subjects, id) {
            return Ok(false);
        }
        self.commit(
            |state| state.subjects.retain(|s| s.id != id),
            StoreEvent::SubjectRemoved(id),
        )?;
        Ok(true)
    }

    /// Count one class as present or absent. Returns the updated subject.
    pub fn mark_attendance(&mut self, subject_id: i64, outcome: Outcome) -> AppResult<Option<Subject>> {
        let Some(pos) = position(&self.state.subjects, subject_id) else {
            return Ok(None);
        };

        let mut updated = self.state.subjects[pos].clone();
        updated.mark(outcome);

        self.commit(
            |state| state.subjects[pos] = updated.clone(),
            StoreEvent::AttendanceMarked {
                subject: updated.clone(),
                outcome,
            },
        )?;
        Ok(Some(updated))
    }

    // ---------------------------
    // Notices
    // ---------------------------
    pub fn add_notice(&mut self, new: NewNotice) -> AppResult<Notice> {
        let notice = Notice {
            id: self.next_id(),
            title: new.title,
            content: new.content,
            priority: new.priority,
            created_at: Local::now(),
            extra: Default::default(),
        };

        self.commit(
            |state| state.notices.push(notice.clone()),
            StoreEvent::NoticeAdded(notice.clone()),
        )?;
        Ok(notice)
    }

    pub fn remove_notice(&mut self, id: i64) -> AppResult<bool> {
        if !contains(&self.state.notices, id) {
            return Ok(false);
        }
        self.commit(
            |state| state.notices.retain(|n| n.id != id),
            StoreEvent::NoticeRemoved(id),
        )?;
        Ok(true)
    }

    // ---------------------------
    // Internals
    // ---------------------------

    /// Creation-timestamp id in epoch milliseconds, strictly increasing
    /// within this store so that ids are never handed out twice.
    fn next_id(&mut self) -> i64 {
        let now = Local::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Apply `mutate`, persist, then notify subscribers.
    /// On a failed write the previous state is restored.
    fn commit<F>(&mut self, mutate: F, event: StoreEvent) -> AppResult<()>
    where
        F: FnOnce(&mut OrganizerState),
    {
        let previous = self.state.clone();
        mutate(&mut self.state);

        if let Err(e) = self.save() {
            warn!("Persist failed for '{}', rolling back: {}", self.key, e);
            self.state = previous;
            return Err(e);
        }

        debug!("Persisted '{}' after {}", self.key, event_name(&event));
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
        Ok(())
    }
}

fn read_state<B: KvBackend>(backend: &mut B, key: &str) -> AppResult<OrganizerState> {
    let Some(raw) = backend.get(key)? else {
        debug!("No data under '{}', starting with empty collections", key);
        return Ok(OrganizerState::default());
    };

    let (state, damaged) = match serde_json::from_str::<Value>(&raw) {
        Ok(doc) => decode_state(doc),
        Err(e) => {
            warn!("Malformed data under '{}', starting with empty collections: {}", key, e);
            (OrganizerState::default(), true)
        }
    };

    if damaged {
        keep_copy(backend, key, &raw)?;
    }
    if !state.unreadable.is_empty() {
        warn!(
            "{} stored entries under '{}' do not fit their record type, kept as stored",
            state.unreadable.len(),
            key
        );
    }
    Ok(state)
}

/// Copy a damaged document aside, once per distinct content.
fn keep_copy<B: KvBackend>(backend: &mut B, key: &str, raw: &str) -> AppResult<()> {
    let backup = backup_key(key);
    if backend.get(&backup)?.as_deref() == Some(raw) {
        return Ok(());
    }

    backend.set(&backup, raw).map_err(|e| {
        AppError::Persistence(format!(
            "cannot keep a copy of the damaged document '{}': {}",
            key, e
        ))
    })?;
    info!("Damaged document '{}' copied to '{}'", key, backup);
    Ok(())
}

/// Split a stored document into records, entries kept verbatim and extra
/// top-level fields. Returns true when something could not be kept.
fn decode_state(doc: Value) -> (OrganizerState, bool) {
    let mut map = match doc {
        Value::Object(map) => map,
        Value::Null => return (OrganizerState::default(), false),
        other => {
            warn!("Stored document is a {}, not an object", json_kind(&other));
            return (OrganizerState::default(), true);
        }
    };

    let mut state = OrganizerState::default();
    let mut damaged = false;
    let unreadable = &mut state.unreadable;
    damaged |= take_records(&mut map, "classes", &mut state.classes, &mut unreadable.classes);
    damaged |= take_records(
        &mut map,
        "assignments",
        &mut state.assignments,
        &mut unreadable.assignments,
    );
    damaged |= take_records(&mut map, "subjects", &mut state.subjects, &mut unreadable.subjects);
    damaged |= take_records(&mut map, "notices", &mut state.notices, &mut unreadable.notices);
    state.extra = map;

    (state, damaged)
}

/// Move the `name` collection out of `map`, one entry at a time.
/// Returns true when the collection itself is not an array.
fn take_records<T: DeserializeOwned>(
    map: &mut Map<String, Value>,
    name: &str,
    records: &mut Vec<T>,
    kept: &mut Vec<Value>,
) -> bool {
    match map.remove(name) {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => {
            for item in items {
                match T::deserialize(&item) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        debug!("Entry of '{}' kept as stored: {}", name, e);
                        kept.push(item);
                    }
                }
            }
            false
        }
        Some(other) => {
            warn!("'{}' is a {}, not a list", name, json_kind(&other));
            true
        }
    }
}

/// Serialize the state, appending the entries kept verbatim.
fn encode_state(state: &OrganizerState) -> AppResult<String> {
    let mut doc = serde_json::to_value(state)?;

    if let Value::Object(map) = &mut doc {
        let kept = &state.unreadable;
        for (name, entries) in [
            ("classes", &kept.classes),
            ("assignments", &kept.assignments),
            ("subjects", &kept.subjects),
            ("notices", &kept.notices),
        ] {
            if let Some(Value::Array(items)) = map.get_mut(name) {
                items.extend(entries.iter().cloned());
            }
        }
    }

    Ok(serde_json::to_string(&doc)?)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn position<T: Record>(items: &[T], id: i64) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

fn contains<T: Record>(items: &[T], id: i64) -> bool {
    position(items, id).is_some()
}

fn event_name(event: &StoreEvent) -> &'static str {
    match event {
        StoreEvent::ClassAdded(_) => "class_added",
        StoreEvent::ClassRemoved(_) => "class_removed",
        StoreEvent::AssignmentAdded(_) => "assignment_added",
        StoreEvent::AssignmentRemoved(_) => "assignment_removed",
        StoreEvent::AssignmentToggled(_) => "assignment_toggled",
        StoreEvent::SubjectAdded(_) => "subject_added",
        StoreEvent::SubjectRemoved(_) => "subject_removed",
        StoreEvent::AttendanceMarked { .. } => "attendance_marked",
        StoreEvent::NoticeAdded(_) => "notice_added",
        StoreEvent::NoticeRemoved(_) => "notice_removed",
    }
}
