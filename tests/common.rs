#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rhos() -> Command {
    cargo_bin_cmd!("rhoslog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhoslog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhoslog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and onboard driver `D1`
pub fn init_db_with_driver(db_path: &str) {
    rhos()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rhos()
        .args([
            "--db", db_path, "--test", "register", "D1", "--name", "Ann Smith", "-l", "Depot",
        ])
        .assert()
        .success();
}
