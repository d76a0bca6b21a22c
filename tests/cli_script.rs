use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

#[test]
fn script_mode_records_and_projects_a_balance() {
    let home = tempdir().unwrap();
    let input = "add 50 Salary 2024-01-05\nbalance 2024-01-06\nexit\n";

    let mut cmd = Command::cargo_bin("calendar_core_cli").unwrap();
    cmd.env("CALENDAR_CORE_CLI_SCRIPT", "1")
        .env("CALENDAR_CORE_HOME", home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Transaction #1 created."))
        .stdout(contains("2024-01-06"))
        .stdout(contains("$ 50,00"));

    let json = std::fs::read_to_string(home.path().join("store.json")).unwrap();
    assert!(json.contains("\"Salary\""));
}

#[test]
fn script_mode_remove_deletes_the_record() {
    let home = tempdir().unwrap();
    let input = "add -20 Gym 2024-01-01 WEEKLY\nremove 1 all\nbalance 2024-01-15\nexit\n";

    let mut cmd = Command::cargo_bin("calendar_core_cli").unwrap();
    cmd.env("CALENDAR_CORE_CLI_SCRIPT", "1")
        .env("CALENDAR_CORE_HOME", home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Transaction #1 removed."))
        .stdout(contains("$ 0,00"));
}

#[test]
fn unknown_commands_suggest_the_nearest_name() {
    let home = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("calendar_core_cli").unwrap();
    cmd.env("CALENDAR_CORE_CLI_SCRIPT", "1")
        .env("CALENDAR_CORE_HOME", home.path())
        .write_stdin("shwo\nexit\n")
        .assert()
        .success()
        .stdout(contains("Did you mean `show`?"));
}

#[test]
fn help_lists_the_command_set() {
    let home = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("calendar_core_cli").unwrap();
    cmd.env("CALENDAR_CORE_CLI_SCRIPT", "1")
        .env("CALENDAR_CORE_HOME", home.path())
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Commands:"))
        .stdout(contains("goto <YYYY-MM>"));
}
