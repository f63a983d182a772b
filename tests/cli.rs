use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the caller's home directory and environment overrides
fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ld-agent-examples").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("LD_AGENT_FORMAT")
        .env_remove("LD_AGENT_AUDIT_LOG")
        .env_remove("LD_AGENT_MODULES")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_call_examples() {
    let home = TempDir::new().unwrap();

    for (op, a, b, expected) in [
        ("add_numbers", "2", "3", "5"),
        ("subtract_numbers", "5", "2", "3"),
        ("multiply_numbers", "4", "5", "20"),
        ("divide_numbers", "10", "2", "5"),
    ] {
        cmd(&home)
            .args(["call", op, a, b])
            .assert()
            .success()
            .stdout(format!("{}\n", expected));
    }
}

#[test]
fn test_call_negative_arguments() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["call", "add_numbers", "-2", "-3.5"])
        .assert()
        .success()
        .stdout("-5.5\n");
}

#[test]
fn test_call_flags_after_operands() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["call", "add_numbers", "1", "2", "--module", "calculator"])
        .assert()
        .success()
        .stdout("3\n");

    let output = cmd(&home)
        .args(["call", "multiply_numbers", "4", "5", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["result"], serde_json::json!(20.0));
}

#[test]
fn test_divide_by_zero_fails() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["call", "divide_numbers", "1", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot divide by zero"));
}

#[test]
fn test_hello_world() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["call", "hello_world"])
        .assert()
        .success()
        .stdout("Hello from ld-agent!\n");
}

#[test]
fn test_call_wrong_arity() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["call", "add_numbers", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 2 argument(s), got 1"));
}

#[test]
fn test_call_unknown_operation() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["call", "power_numbers", "2", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Operation not found: power_numbers"));
}

#[test]
fn test_call_in_wrong_module() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["call", "--module", "minimal", "add_numbers", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Operation not found"));
}

#[test]
fn test_call_json_output() {
    let home = TempDir::new().unwrap();

    let output = cmd(&home)
        .args(["--format", "json", "call", "multiply_numbers", "4", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["success"], serde_json::json!(true));
    assert_eq!(response["result"], serde_json::json!(20.0));
}

#[test]
fn test_call_json_output_not_a_number() {
    let home = TempDir::new().unwrap();

    let output = cmd(&home)
        .args(["--format", "json", "call", "add_numbers", "nan", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["success"], serde_json::json!(true));
    assert_eq!(response["result"], "NaN");
}

#[test]
fn test_format_from_environment() {
    let home = TempDir::new().unwrap();

    let output = cmd(&home)
        .env("LD_AGENT_FORMAT", "json")
        .args(["call", "add_numbers", "2", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["result"], serde_json::json!(5.0));

    // Command line wins over the environment
    cmd(&home)
        .env("LD_AGENT_FORMAT", "json")
        .args(["--format", "text", "call", "add_numbers", "2", "3"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_invalid_format_from_environment_fails() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .env("LD_AGENT_FORMAT", "yaml")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("output.format must be one of"));
}

#[test]
fn test_list() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("calculator (Simple Calculator v1.0.0)"))
        .stdout(predicate::str::contains("divide_numbers"))
        .stdout(predicate::str::contains("minimal (Minimal Example v1.0.0)"))
        .stdout(predicate::str::contains("hello_world"));
}

#[test]
fn test_describe_json() {
    let home = TempDir::new().unwrap();

    let output = cmd(&home)
        .args(["describe", "calculator", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let descriptor: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(descriptor["name"], "Simple Calculator");
    assert_eq!(descriptor["author"], "ld-agent Team");
    assert_eq!(descriptor["platform"], "any");
    assert_eq!(descriptor["dependencies"], serde_json::json!([]));
}

#[test]
fn test_describe_unknown_module() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["describe", "weather"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Module not found: weather"));
}

#[test]
fn test_tools_listing() {
    let home = TempDir::new().unwrap();

    let output = cmd(&home).arg("tools").output().unwrap();
    assert!(output.status.success());

    let tools: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let calculator = tools["calculator"].as_array().unwrap();
    assert_eq!(calculator.len(), 4);
    assert_eq!(calculator[3]["name"], "divide_numbers");
    assert_eq!(calculator[3]["fallible"], true);
    assert_eq!(tools["minimal"][0]["returns"], "text");
}

#[test]
fn test_config_selects_modules() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    fs::write(&config, "[modules]\nload = [\"minimal\"]\n").unwrap();

    cmd(&home)
        .args(["--config", config.to_str().unwrap(), "call", "add_numbers", "1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Operation not found"));

    cmd(&home)
        .env("LD_AGENT_MODULES", "calculator")
        .args(["--config", config.to_str().unwrap(), "call", "add_numbers", "1", "2"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_invalid_config_fails() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .env("LD_AGENT_MODULES", "weather")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown module"));
}

#[test]
fn test_audit_log_written() {
    let home = TempDir::new().unwrap();
    let log = home.path().join("logs/invocations.log");

    cmd(&home)
        .env("LD_AGENT_AUDIT_LOG", &log)
        .args(["call", "divide_numbers", "1", "0"])
        .assert()
        .failure();

    let content = fs::read_to_string(&log).unwrap();
    let entry: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(entry["operation"], "divide_numbers");
    assert_eq!(entry["module"], "calculator");
    assert_eq!(entry["outcome"]["status"], "error");
    assert_eq!(entry["outcome"]["message"], "cannot divide by zero");
}
