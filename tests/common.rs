#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, NaiveDate};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with its config directory pointed at `home`
/// so tests never touch the real ~/.rcompanion.
pub fn rco(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rcompanion");
    cmd.env("RCOMPANION_HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique config dir and DB path inside the system temp dir,
/// removing anything left by a previous run.
pub fn setup_test_env(name: &str) -> (String, String) {
    let mut home: PathBuf = env::temp_dir();
    home.push(format!("{}_rcompanion_home", name));
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(&home).expect("create test home");

    let db = home.join("rcompanion.sqlite");
    (
        home.to_string_lossy().to_string(),
        db.to_string_lossy().to_string(),
    )
}

/// Local instant for a wall-clock date and time.
pub fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Local> {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, 0))
        .expect("valid date");
    rcompanion::utils::date::local_from_naive(naive).expect("local time exists")
}

/// First `#<id>` found in a command's stdout.
pub fn first_id(stdout: &[u8]) -> i64 {
    let text = String::from_utf8_lossy(stdout);
    let re = regex::Regex::new(r"#(\d+)").expect("regex");
    re.captures(&text)
        .and_then(|c| c[1].parse().ok())
        .expect("an id in the output")
}
