#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use finance_tracker::{
    core::{clock::FixedClock, tracker::Tracker},
    storage::JsonStorage,
    utils::paths,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// Creates a unique home directory that is cleaned up when the test binary exits.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a tracker on `data_dir` whose clock is frozen on `today`.
pub fn open_tracker(data_dir: &PathBuf, today: NaiveDate) -> Tracker {
    let storage = JsonStorage::new(data_dir.clone()).expect("create json storage backend");
    Tracker::open(Box::new(storage), Box::new(FixedClock::on(today))).expect("open tracker")
}

/// Creates an isolated tracker backed by JSON files, returning it with its data directory.
pub fn setup_test_env(today: NaiveDate) -> (Tracker, PathBuf) {
    let data_dir = paths::data_dir_in(&temp_home());
    let tracker = open_tracker(&data_dir, today);
    (tracker, data_dir)
}
