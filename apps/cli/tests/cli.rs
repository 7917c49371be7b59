use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const NOW: i64 = 1_700_000_000;
const DAY: i64 = 86_400;

const CONFIG: &str = r#"
[logging]
level = "error"

[[users]]
id = "stu-1"
role = "student"

[[users]]
id = "stu-2"
role = "student"

[[users]]
id = "tut-1"
role = "tutor"

[[users]]
id = "stu-3"
role = "student"

[[users]]
id = "lec-1"
role = "lecturer"

[[users]]
id = "adm-1"
role = "admin"

[[subscriptions]]
id = "sub_basic"
userId = "stu-1"
planId = "basic-plan"
status = "active"
startDate = 1700000000
endDate = 1702592000
createdAt = 1700000000

[[subscriptions]]
id = "sub_lapsed"
userId = "stu-3"
planId = "basic-plan"
status = "active"
startDate = 1697408000
endDate = 1699740795
createdAt = 1697408000
"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("studyhub.toml"), CONFIG).expect("write config");
    dir
}

fn studyhub_at(dir: &TempDir, now: i64) -> Command {
    let mut cmd = Command::cargo_bin("studyhub").expect("binary built");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").arg("--now").arg(now.to_string());
    cmd
}

fn studyhub(dir: &TempDir) -> Command {
    studyhub_at(dir, NOW)
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run studyhub");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn check_grants_plan_feature() {
    let dir = workspace();
    let result = json_stdout(studyhub(&dir).args(["check", "materials_access", "--user", "stu-1"]));
    assert_eq!(result, serde_json::json!({ "hasAccess": true }));
}

#[test]
fn check_reports_feature_outside_plan() {
    let dir = workspace();
    let result = json_stdout(studyhub(&dir).args(["check", "live_sessions", "--user", "stu-1"]));

    assert_eq!(result["hasAccess"], false);
    assert_eq!(result["reason"], "Feature \"live_sessions\" not included in your current plan");
    assert_eq!(result["upgradeRequired"], true);
}

#[test]
fn check_without_subscription() {
    let dir = workspace();
    let result = json_stdout(studyhub(&dir).args(["check", "unlimited_chat", "--user", "stu-2"]));
    assert_eq!(result["reason"], "Active subscription required");
}

#[test]
fn expired_subscription_is_not_active() {
    let dir = workspace();
    let result = json_stdout(
        studyhub_at(&dir, NOW + 31 * DAY).args(["check", "materials_access", "--user", "stu-1"]),
    );
    assert_eq!(result["reason"], "Active subscription required");
}

#[test]
fn require_fails_with_reason_on_stderr() {
    let dir = workspace();
    studyhub(&dir)
        .args(["check", "live_sessions", "--role", "student", "--require"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Active subscription required"));

    studyhub(&dir)
        .args(["check", "tutor_sessions", "--user", "tut-1", "--require"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hasAccess\": true"));
}

#[test]
fn features_by_role_and_user() {
    let dir = workspace();

    let all = json_stdout(studyhub(&dir).args(["features", "--user", "lec-1"]));
    assert_eq!(all, serde_json::json!(["all"]));

    let tutor = json_stdout(studyhub(&dir).args(["features", "--role", "tutor"]));
    assert_eq!(tutor, serde_json::json!(["tutor_requests", "tutor_sessions", "tutor_students"]));

    let student = json_stdout(studyhub(&dir).args(["features", "--user", "stu-1"]));
    assert_eq!(
        student,
        serde_json::json!(["materials_access", "tutor_support", "unlimited_chat"])
    );
}

#[test]
fn status_shows_days_remaining() {
    let dir = workspace();
    let status = json_stdout(studyhub(&dir).args(["status", "--user", "stu-1"]));

    assert_eq!(status["isActive"], true);
    assert_eq!(status["daysRemaining"], 30);
    assert_eq!(status["subscription"]["planId"], "basic-plan");

    let none = json_stdout(studyhub(&dir).args(["status", "--user", "stu-2"]));
    assert_eq!(none["isActive"], false);
    assert_eq!(none["subscription"], Value::Null);
}

#[test]
fn plans_lists_stock_catalog() {
    let dir = workspace();
    let plans = json_stdout(studyhub(&dir).arg("plans"));

    let ids: Vec<&str> = plans
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|plan| plan["id"].as_str())
        .collect();
    assert_eq!(ids, ["basic-plan", "premium-plan", "yearly-plan"]);
}

#[test]
fn unknown_user_and_role_are_errors() {
    let dir = workspace();

    studyhub(&dir)
        .args(["check", "notes", "--user", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown user 'ghost'"));

    studyhub(&dir)
        .args(["check", "notes", "--role", "dean"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role 'dean'"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = workspace();
    studyhub(&dir)
        .args(["--config", "missing.toml", "plans"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn overdue_lists_lapsed_subscriptions() {
    let dir = workspace();
    let overdue = json_stdout(studyhub(&dir).args(["overdue", "--user", "adm-1"]));

    assert_eq!(
        overdue,
        serde_json::json!([{
            "subscriptionId": "sub_lapsed",
            "userId": "stu-3",
            "planId": "basic-plan",
            "endDate": 1_699_740_795,
            "daysOverdue": 3,
        }])
    );
}

#[test]
fn admin_reports_require_the_admin_role() {
    let dir = workspace();

    studyhub(&dir)
        .args(["overdue", "--user", "lec-1"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Access denied. One of admin roles required."));

    studyhub(&dir)
        .args(["analytics", "--user", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown user 'ghost'"));
}

#[test]
fn analytics_summarizes_the_range() {
    let dir = workspace();
    let from = (NOW - 40 * DAY).to_string();
    let report =
        json_stdout(studyhub(&dir).args(["analytics", "--user", "adm-1", "--from", &from]));

    assert_eq!(report["statusBreakdown"], serde_json::json!([{ "status": "active", "count": 2 }]));
    assert_eq!(report["popularPlans"][0]["planId"], "basic-plan");
    assert_eq!(report["popularPlans"][0]["count"], 2);
    assert_eq!(report["popularPlans"][0]["revenue"], 2 * 999);
    assert_eq!(report["to"], NOW);

    let recent = json_stdout(studyhub(&dir).args([
        "analytics",
        "--user",
        "adm-1",
        "--from",
        "1699000000",
    ]));
    assert_eq!(recent["statusBreakdown"], serde_json::json!([{ "status": "active", "count": 1 }]));
}
