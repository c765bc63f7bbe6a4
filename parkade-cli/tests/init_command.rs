//! Integration tests for the `init` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_fresh_initialization() {
    let env = TestEnv::new();
    assert!(!env.data_dir.exists());

    env.command_bare()
        .arg("init")
        .arg("--data-dir")
        .arg(&env.data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized parkade"))
        .stdout(predicate::str::contains("Created data directory"));

    assert!(env.database_path().exists());
}

#[test]
fn test_init_uses_global_data_dir() {
    let env = TestEnv::new();
    env.command().arg("init").assert().success();
    assert!(env.database_path().exists());
}

#[test]
fn test_init_existing_database_needs_overwrite() {
    let env = TestEnv::new();
    env.command().arg("init").assert().success();

    env.command()
        .arg("init")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("--overwrite"));

    env.command()
        .arg("init")
        .arg("--overwrite")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recreated database"));
}

#[test]
fn test_init_overwrite_drops_data() {
    let (env, _) = TestEnv::seeded();
    env.command().arg("init").arg("--overwrite").assert().success();
    env.command()
        .args(["lot", "7"])
        .assert()
        .failure()
        .code(8);
}

#[test]
fn test_init_with_config_writes_loadable_sample() {
    let env = TestEnv::new();
    env.command()
        .arg("init")
        .arg("--with-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sample configuration file"));

    let config_path = env.data_dir.join("config.yaml");
    assert!(config_path.exists());

    env.command_bare()
        .arg("validate")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    // Commands still run with the sample in place.
    env.command().arg("lots").assert().success();
}

#[test]
fn test_init_keeps_existing_config() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(env.data_dir.join("config.yaml"), "output_format: csv\n").unwrap();

    env.command()
        .arg("init")
        .arg("--with-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let contents = fs::read_to_string(env.data_dir.join("config.yaml")).unwrap();
    assert_eq!(contents, "output_format: csv\n");
}

#[test]
fn test_init_dry_run_changes_nothing() {
    let env = TestEnv::new();
    env.command()
        .arg("init")
        .arg("--dry-run")
        .arg("--with-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry-run mode"))
        .stdout(predicate::str::contains("Create database"));

    assert!(!env.data_dir.exists());
}

#[test]
fn test_disable_autoinit_requires_data_dir() {
    let env = TestEnv::new();
    env.command()
        .arg("--disable-autoinit")
        .arg("lots")
        .assert()
        .failure()
        .code(3);
    assert!(!env.data_dir.exists());
}

#[test]
fn test_autoinit_creates_store_on_first_use() {
    let env = TestEnv::new();
    env.command()
        .arg("lots")
        .assert()
        .success()
        .stdout("ID\tNAME\n");
    assert!(env.database_path().exists());
}
