use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn daily_export() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "DATE,REPORT_TYPE,DailyAverageDryBulbTemperature").unwrap();
    writeln!(file, "2020-05-10T23:59:00,SOD  ,55.0").unwrap();
    writeln!(file, "2020-05-10T23:51:00,FM-15,60.0").unwrap();
    file.flush().unwrap();
    file
}

fn weather(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weather"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn prints_report_then_arguments() {
    let file = daily_export();
    let path = file.path().to_str().unwrap();
    let output = weather(&[path, "DailyAverageDryBulbTemperature", "min"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!(
            "55.0\n{{'file_path': '{path}', 'column': 'DailyAverageDryBulbTemperature', 'operation': 'min'}}\n"
        )
    );
}

#[test]
fn invalid_operation_goes_to_stdout() {
    let file = daily_export();
    let path = file.path().to_str().unwrap();
    let output = weather(&[path, "DailyAverageDryBulbTemperature", "median"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "Invalid operation: median\n");
}

#[test]
fn invalid_column_goes_to_stdout() {
    let file = daily_export();
    let path = file.path().to_str().unwrap();
    let output = weather(&[path, "Pressure", "min"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "Invalid column: Pressure\n");
}

#[test]
fn wrong_argument_count_prints_usage() {
    let output = weather(&["only-a-file.csv"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn missing_file_reports_on_stderr() {
    let output = weather(&["/nonexistent/jfk.csv", "DailyPrecipitation", "min"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
}
