use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, setup_test_db, slg, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_add_and_list() {
    let db_path = setup_test_db("add_list");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2026-03-02"))
        .stdout(contains("Math"))
        .stdout(contains("English"));
}

#[test]
fn test_add_rejects_zero_minutes() {
    let db_path = setup_test_db("add_zero");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "add", "Math", "0"])
        .assert()
        .failure()
        .stderr(contains("Minutes must be a positive integer"));
}

#[test]
fn test_add_rejects_invalid_date() {
    let db_path = setup_test_db("add_bad_date");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "add", "Math", "30", "--date", "not-a-date"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_list_period_filter() {
    let db_path = setup_test_db("list_period");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "add", "Math", "30", "--date", "2025-12-31"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "list", "--period", "2026-03"])
        .assert()
        .success()
        .stdout(contains("2026-03-02"))
        .stdout(contains("2025-12-31").not());
}

#[test]
fn test_del_removes_entry() {
    let db_path = setup_test_db("del");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    slg()
        .args(["--db", &db_path, "list", "--subject", "Math"])
        .assert()
        .success()
        .stdout(contains("No entries found"));
}

#[test]
fn test_goal_set_and_progress() {
    let db_path = setup_test_db("goal_progress");
    init_db_with_data(&db_path);

    // 2026-03-02 is a Monday
    slg()
        .args([
            "--db",
            &db_path,
            "goal",
            "set",
            "weekly",
            "Math",
            "120",
            "--date",
            "2026-03-02",
        ])
        .assert()
        .success()
        .stdout(contains("Weekly goal for Math"));

    slg()
        .args([
            "--db",
            &db_path,
            "goal",
            "progress",
            "weekly",
            "Math",
            "--date",
            "2026-03-04",
        ])
        .assert()
        .success()
        .stdout(contains("50.0%"));
}

#[test]
fn test_goal_progress_absent_is_reported() {
    let db_path = setup_test_db("goal_absent");
    init_db_with_data(&db_path);

    slg()
        .args([
            "--db",
            &db_path,
            "goal",
            "progress",
            "daily",
            "Math",
            "--date",
            "2026-03-02",
        ])
        .assert()
        .success()
        .stdout(contains("No daily goal covers"));
}

#[test]
fn test_goal_rejects_unknown_type() {
    let db_path = setup_test_db("goal_bad_type");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "goal", "set", "monthly", "Math", "120"])
        .assert()
        .failure()
        .stderr(contains("Invalid goal type"));
}

#[test]
fn test_timer_free_session_under_a_minute_records_nothing() {
    let db_path = setup_test_db("timer_short");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "timer", "start", "--subject", "Math"])
        .assert()
        .success()
        .stdout(contains("Timer started for Math"));

    slg()
        .args(["--db", &db_path, "timer", "status"])
        .assert()
        .success()
        .stdout(contains("Running"));

    slg()
        .args(["--db", &db_path, "timer", "stop"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "timer", "save"])
        .assert()
        .success()
        .stdout(contains("nothing recorded"));

    slg()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No entries found"));
}

#[test]
fn test_timer_start_twice_fails() {
    let db_path = setup_test_db("timer_twice");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "timer", "start"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "timer", "start"])
        .assert()
        .failure()
        .stderr(contains("already active"));
}

#[test]
fn test_todo_roundtrip() {
    let db_path = setup_test_db("todo");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "todo", "add", "Review algebra notes"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "todo", "list"])
        .assert()
        .success()
        .stdout(contains("[ ] Review algebra notes"));

    slg()
        .args(["--db", &db_path, "todo", "toggle", "1"])
        .assert()
        .success()
        .stdout(contains("marked done"));

    slg()
        .args(["--db", &db_path, "todo", "list"])
        .assert()
        .success()
        .stdout(contains("[x] Review algebra notes"));
}

#[test]
fn test_exam_and_examgoal() {
    let db_path = setup_test_db("exam");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args([
            "--db",
            &db_path,
            "exam",
            "add",
            "2026-05-10",
            "Math",
            "Spring Mock",
            "--score",
            "68",
            "--max-score",
            "100",
        ])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "exam", "list"])
        .assert()
        .success()
        .stdout(contains("Spring Mock"))
        .stdout(contains("68"));

    slg()
        .args([
            "--db",
            &db_path,
            "examgoal",
            "add",
            "Math",
            "Summer Mock",
            "2026-07-01",
            "75",
        ])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "examgoal", "status", "1", "achieved"])
        .assert()
        .success()
        .stdout(contains("Achieved"));
}

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("export_csv");
    let out = temp_out("export_csv", "csv");
    init_db_with_data(&db_path);

    slg()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("Math"));
    assert!(content.contains("2026-03-02"));
}

#[test]
fn test_stats_without_data() {
    let db_path = setup_test_db("stats_empty");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("No data to analyze"));
}

#[test]
fn test_stats_with_data() {
    let db_path = setup_test_db("stats_data");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "stats", "--period", "2026-03"])
        .assert()
        .success()
        .stdout(contains("Math"))
        .stdout(contains("English"));
}

#[test]
fn test_stats_without_period_shows_day_chart() {
    let db_path = setup_test_db("stats_day_chart");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Study time by subject"))
        .stdout(contains("Study time by day"))
        .stdout(contains("2026-03-02"));
}

#[test]
fn test_stats_rejects_non_ascii_period() {
    let db_path = setup_test_db("stats_bad_period");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "stats", "--period", "€€x"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_report_without_data() {
    let db_path = setup_test_db("report_empty");

    slg()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    slg()
        .args(["--db", &db_path, "report", "--end", "2026-03-10"])
        .assert()
        .success()
        .stdout(contains("no report generated"));
}

#[test]
fn test_report_writes_pdf() {
    let db_path = setup_test_db("report_pdf");
    init_db_with_data(&db_path);

    let out_dir = std::env::temp_dir().join("studylog_report_test");
    std::fs::remove_dir_all(&out_dir).ok();
    let out_dir_str = out_dir.to_string_lossy().to_string();

    slg()
        .args([
            "--db",
            &db_path,
            "report",
            "--end",
            "2026-03-05",
            "--output",
            &out_dir_str,
        ])
        .assert()
        .success()
        .stdout(contains("Weekly report written"));

    assert!(out_dir.join("Weekly_Report_2026-03-05.pdf").exists());
}

#[test]
fn test_backup_creates_copy() {
    let db_path = setup_test_db("backup");
    let out = temp_out("backup", "sqlite");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "backup", "--file", &out, "--yes"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(std::path::Path::new(&out).exists());
}

#[test]
fn test_db_info_counts_rows() {
    let db_path = setup_test_db("db_info");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("study_log rows"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_ops");
    init_db_with_data(&db_path);

    slg()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("add"))
        .stdout(contains("init"));
}
