mod common;
use common::{first_id, rco, setup_test_env};
use predicates::prelude::*;
use predicates::str::contains;

/// Fresh environment with an initialized database.
fn init_env(name: &str) -> (String, String) {
    let (home, db) = setup_test_env(name);
    rco(&home)
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));
    (home, db)
}

#[test]
fn test_init_creates_database() {
    let (home, db) = init_env("init_creates_db");
    assert!(std::path::Path::new(&db).exists());

    rco(&home)
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"));
}

#[test]
fn test_commands_require_a_user() {
    let (home, db) = init_env("requires_user");

    rco(&home)
        .args(["--db", &db, "list"])
        .assert()
        .failure()
        .stderr(contains("No user logged in"));
}

#[test]
fn test_login_whoami_logout() {
    let (home, db) = init_env("login_cycle");

    rco(&home)
        .args(["--db", &db, "login", "alice"])
        .assert()
        .success()
        .stdout(contains("Logged in as 'alice'"));

    rco(&home)
        .args(["--db", &db, "class", "add", "Physics", "monday", "09:00"])
        .assert()
        .success();

    rco(&home)
        .args(["--db", &db, "whoami"])
        .assert()
        .success()
        .stdout(contains("Active user: alice"))
        .stdout(contains("Stored profiles: alice"));

    rco(&home)
        .args(["--db", &db, "logout"])
        .assert()
        .success()
        .stdout(contains("'alice' logged out"));

    rco(&home)
        .args(["--db", &db, "whoami"])
        .assert()
        .success()
        .stdout(contains("Active user: (none)"));
}

#[test]
fn test_class_add_list_delete() {
    let (home, db) = init_env("class_cycle");

    let out = rco(&home)
        .args(["--db", &db, "-u", "alice", "class", "add", "Physics", "mon", "9:00"])
        .args(["--room", "B12", "--professor", "Rossi"])
        .assert()
        .success()
        .stdout(contains("Class added successfully!"))
        .stdout(contains("Physics on monday at 09:00"))
        .get_output()
        .stdout
        .clone();
    let id = first_id(&out);

    rco(&home)
        .args(["--db", &db, "-u", "alice", "list", "--timetable"])
        .assert()
        .success()
        .stdout(contains("Physics"))
        .stdout(contains("B12"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "class", "del", &id.to_string()])
        .assert()
        .success()
        .stdout(contains("deleted successfully"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "list", "-t"])
        .assert()
        .success()
        .stdout(contains("Physics").not());
}

#[test]
fn test_invalid_input_is_rejected() {
    let (home, db) = init_env("invalid_input");

    rco(&home)
        .args(["--db", &db, "-u", "alice", "class", "add", "Physics", "sunday", "09:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid day"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "class", "add", "Physics", "monday", "9am"])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "assignment", "add", "Essay", "Lit", "tomorrow"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "notice", "add", "T", "C", "-p", "urgent"])
        .assert()
        .failure()
        .stderr(contains("Invalid priority"));
}

#[test]
fn test_assignment_toggle_and_missing_ids() {
    let (home, db) = init_env("assignment_cycle");

    let out = rco(&home)
        .args(["--db", &db, "-u", "alice", "assignment", "add", "Essay", "Literature"])
        .args(["2099-01-15T17:00", "-d", "2000 words"])
        .assert()
        .success()
        .stdout(contains("Assignment added successfully!"))
        .get_output()
        .stdout
        .clone();
    let id = first_id(&out).to_string();

    rco(&home)
        .args(["--db", &db, "-u", "alice", "assignment", "toggle", &id])
        .assert()
        .success()
        .stdout(contains("\"Essay\" completed!"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "assignment", "toggle", &id])
        .assert()
        .success()
        .stdout(contains("marked incomplete"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "assignment", "del", "42"])
        .assert()
        .success()
        .stdout(contains("No assignment with id 42: nothing to do."));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "assignment", "toggle", "42"])
        .assert()
        .success()
        .stdout(contains("nothing to do"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "list", "-a"])
        .assert()
        .success()
        .stdout(contains("Essay"));
}

#[test]
fn test_subject_attendance() {
    let (home, db) = init_env("attendance");

    let out = rco(&home)
        .args(["--db", &db, "-u", "alice", "subject", "add", "Math"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = first_id(&out).to_string();

    rco(&home)
        .args(["--db", &db, "-u", "alice", "subject", "mark", &id, "present"])
        .assert()
        .success()
        .stdout(contains("Marked present for Math (1/1 present, 100%)"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "subject", "mark", &id, "absent"])
        .assert()
        .success()
        .stdout(contains("(1/2 present, 50%)"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "list", "--attendance"])
        .assert()
        .success()
        .stdout(contains("Math"))
        .stdout(contains("50%"));
}

#[test]
fn test_notices_are_listed() {
    let (home, db) = init_env("notices");

    rco(&home)
        .args(["--db", &db, "-u", "alice", "notice", "add", "Exam hall", "Moved to A1"])
        .args(["-p", "high"])
        .assert()
        .success()
        .stdout(contains("Notice added successfully!"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "list", "-n"])
        .assert()
        .success()
        .stdout(contains("Exam hall"))
        .stdout(contains("Moved to A1"));
}

#[test]
fn test_scan_reports_upcoming_class() {
    let (home, db) = init_env("scan_class");

    rco(&home)
        .args(["--db", &db, "-u", "alice", "class", "add", "Physics", "monday", "09:00"])
        .assert()
        .success();

    rco(&home)
        .args(["--db", &db, "-u", "alice", "scan", "--at", "2025-10-06T08:50"])
        .assert()
        .success()
        .stdout(contains("Class \"Physics\" starts in 10 minutes!"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "scan", "--at", "2025-10-05T08:50"])
        .assert()
        .success()
        .stdout(contains("No reminders"));
}

#[test]
fn test_scan_reports_overdue_on_stderr() {
    let (home, db) = init_env("scan_overdue");

    rco(&home)
        .args(["--db", &db, "-u", "alice", "assignment", "add", "Lab", "Physics"])
        .arg("2025-10-01T17:00")
        .assert()
        .success()
        .stdout(contains("already in the past"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "scan", "--at", "2025-10-06T08:50"])
        .assert()
        .success()
        .stderr(contains("\"Lab\" is OVERDUE!"));

    rco(&home)
        .args(["--db", &db, "-u", "alice", "scan", "--at", "2025-10-01T12:00"])
        .assert()
        .success()
        .stdout(contains("\"Lab\" is due in 5 hours!"));
}

#[test]
fn test_users_do_not_see_each_other() {
    let (home, db) = init_env("isolation");

    rco(&home)
        .args(["--db", &db, "-u", "alice", "notice", "add", "Secret", "alice only"])
        .assert()
        .success();

    rco(&home)
        .args(["--db", &db, "--user", "bob", "list", "-n"])
        .assert()
        .success()
        .stdout(contains("Secret").not());

    rco(&home)
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("add"))
        .stdout(contains("alice"));
}

#[test]
fn test_watch_stops_after_ticks() {
    let (home, db) = init_env("watch_ticks");

    rco(&home)
        .args(["--db", &db, "-u", "alice", "watch", "--ticks", "1", "--interval", "1"])
        .assert()
        .success()
        .stdout(contains("Stopped after 1 scan(s)."));
}

#[test]
fn test_config_print() {
    let (home, db) = setup_test_env("config_print");

    rco(&home)
        .args(["--db", &db, "init"])
        .assert()
        .success();

    rco(&home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("namespace: collegeCompanionData"))
        .stdout(contains("scan_interval_secs: 60"));
}

#[test]
fn test_damaged_document_is_kept_aside() {
    let (home, db) = init_env("damaged_doc");
    {
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            ["collegeCompanionData_alice", "{\"classes\": 1", "2025-10-01T00:00:00Z"],
        )
        .unwrap();
    }

    rco(&home)
        .args(["--db", &db, "-u", "alice", "notice", "add", "Hello", "again"])
        .assert()
        .success();

    rco(&home)
        .args(["--db", &db, "whoami"])
        .assert()
        .success()
        .stdout(contains("Stored profiles: alice"))
        .stdout(contains("unreadable").not());

    let conn = rusqlite::Connection::open(&db).unwrap();
    let kept: String = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = 'collegeCompanionData_alice.unreadable'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(kept, "{\"classes\": 1");
}
