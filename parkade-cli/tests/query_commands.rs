//! Integration tests for `import`, `lots`, `lot`, `availability` and
//! `history`.

mod common;

use common::{TestEnv, CATALOG};
use predicates::prelude::*;

#[test]
fn test_import_reports_counts_and_ids() {
    let env = TestEnv::new();
    let catalog = env.write_file("catalog.yaml", CATALOG);

    env.command()
        .arg("import")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 1 lots, 2 floors, 6 spots, 2 accounts, 2 cars",
        ))
        .stdout(predicate::str::contains("lot\t7"))
        .stdout(predicate::str::contains("account\t12"));
}

#[test]
fn test_import_twice_fails_without_partial_rows() {
    let (env, _) = TestEnv::seeded();
    let catalog = env.write_file("again.yaml", CATALOG);

    env.command().arg("import").arg(&catalog).assert().failure();
    assert_eq!(env.run(&["lots"]), "ID\tNAME\n7\tHarbor\n");
}

#[test]
fn test_import_invalid_catalog() {
    let env = TestEnv::new();
    let catalog = env.write_file("bad.yaml", "lots:\n  - name: X\n    colour: red\n");
    env.command()
        .arg("import")
        .arg(&catalog)
        .assert()
        .failure()
        .code(4);

    env.command()
        .arg("import")
        .arg(env.path().join("missing.yaml"))
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_lots_formats() {
    let (env, _) = TestEnv::seeded();
    assert_eq!(env.run(&["lots", "--format", "csv"]), "id,name\n7,Harbor\n");

    let json: serde_json::Value =
        serde_json::from_str(&env.run(&["lots", "--format", "json"])).unwrap();
    assert_eq!(json[0]["name"], "Harbor");
}

#[test]
fn test_configured_output_format() {
    let (env, _) = TestEnv::seeded();
    std::fs::write(env.data_dir.join("config.yaml"), "output_format: csv\n").unwrap();
    assert_eq!(env.run(&["lots"]), "id,name\n7,Harbor\n");
    assert_eq!(env.run(&["lots", "--format", "table"]), "ID\tNAME\n7\tHarbor\n");
}

#[test]
fn test_lot_detail() {
    let (env, floors) = TestEnv::seeded();
    let out = env.run(&["lot", "7"]);
    assert!(out.contains("Lot 7: Harbor"), "{out}");
    assert!(out.contains("Hours: 06:00-23:00"), "{out}");
    assert!(out.contains("Price: 20.00"), "{out}");
    assert!(
        out.contains(&format!("Floor 2 (id {}): 3 spots", floors.upper)),
        "{out}"
    );
}

#[test]
fn test_availability_reflects_reservations() {
    let (env, floors) = TestEnv::seeded();
    env.command()
        .args(TestEnv::reserve_args(floors.ground, 2, "09:00", "10:00"))
        .assert()
        .success();

    let floor = floors.ground.to_string();
    let base = [
        "availability", "--lot", "7", "--floor", &floor, "--date", "2024-05-01",
    ];

    let during = env.run(&[&base[..], &["--start", "09:30", "--end", "11:00"]].concat());
    assert!(during.contains("Capacity: 3"), "{during}");
    assert!(during.contains("Free: 2"), "{during}");
    assert!(during.contains("SPOT\tRESERVATION\tWINDOW\tPRICE"), "{during}");
    assert!(during.contains("\t09:00-10:00\t20.00"), "{during}");

    // Default window is one hour: 10:00-11:00 abuts the reservation.
    let after = env.run(&[&base[..], &["--start", "10:00", "--format", "json"]].concat());
    let json: serde_json::Value = serde_json::from_str(&after).unwrap();
    assert_eq!(json["free"], 3);
    assert_eq!(json["window"]["start"], "10:00");
    assert_eq!(json["window"]["end"], "11:00");
    assert!(json["occupied"].as_array().unwrap().is_empty());
}

#[test]
fn test_availability_floor_of_other_lot() {
    let (env, floors) = TestEnv::seeded();
    let floor = floors.ground.to_string();
    env.command()
        .args([
            "availability", "--lot", "99", "--floor", &floor, "--date", "2024-05-01", "--start",
            "09:00",
        ])
        .assert()
        .failure()
        .code(8);
}

#[test]
fn test_history_newest_first() {
    let (env, floors) = TestEnv::seeded();
    env.command()
        .args(TestEnv::reserve_args(floors.ground, 1, "08:00", "09:00"))
        .assert()
        .success();
    env.command()
        .args(TestEnv::reserve_args(floors.ground, 1, "13:00", "14:00"))
        .assert()
        .success();

    let out = env.run(&["history", "--account", "11"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        "ID\tLOT\tFLOOR\tSPOT\tDATE\tWINDOW\tPLATE\tPRICE\tPAYMENT"
    );
    assert!(lines[1].contains("13:00-14:00"));
    assert!(lines[2].contains("08:00-09:00"));

    assert_eq!(env.run(&["history", "--account", "12"]).lines().count(), 1);

    env.command()
        .args(["history", "--account", "404"])
        .assert()
        .failure()
        .code(8);
}
