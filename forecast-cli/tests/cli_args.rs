//! Integration tests for the `forecast` binary.
//!
//! Each run gets an empty config directory and no provider environment, so
//! results never depend on the developer's own setup.

use serde_json::json;
use std::path::Path;
use std::process::{Command, Output};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WEATHER_PATH: &str = "/data/2.5/weather";

fn run_cli(config_home: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_forecast"));
    cmd.args(args)
        .env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("WEATHER_API_BASE_URL")
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("FORECAST_CACHE_EXPIRY")
        .env_remove("RUST_LOG");

    for (key, value) in env {
        cmd.env(key, value);
    }

    cmd.output().expect("Failed to execute forecast")
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(home.path(), &["--help"], &[]);

    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("show"), "Help should mention show: {stdout}");
    assert!(stdout.contains("configure"), "Help should mention configure: {stdout}");
}

#[test]
fn test_blank_zip_prints_enter_zip_alert() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(home.path(), &["show", "  ", "US"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a ZIP code."), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_blank_country_prints_enter_country_alert() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(home.path(), &["show", "12345", ""], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a country code."), "stderr: {stderr}");
}

#[test]
fn test_missing_configuration_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(home.path(), &["show", "12345", "us"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Weather API base URL is not configured"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_missing_api_key_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(
        home.path(),
        &["show", "12345", "us"],
        &[("WEATHER_API_BASE_URL", "http://127.0.0.1:9/data/2.5/weather")],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OpenWeather API key is not configured"), "stderr: {stderr}");
}

#[test]
fn test_unreachable_provider_is_a_network_error() {
    let home = tempfile::tempdir().unwrap();
    let output = run_cli(
        home.path(),
        &["show", "12345", "us"],
        &[
            ("WEATHER_API_BASE_URL", "http://127.0.0.1:9/data/2.5/weather"),
            ("OPENWEATHER_API_KEY", "TEST_KEY"),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Network error"), "stderr: {stderr}");
    assert!(!stderr.contains("TEST_KEY"), "API key must not leak: {stderr}");
}

/// Mock provider answering for ZIP 12345 in the US with the given key.
async fn provider_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("zip", "12345,US"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
            "main": {
                "temp": 21.4,
                "temp_min": 19.8,
                "temp_max": 23.1,
                "humidity": 56,
                "sea_level": 1015
            },
            "name": "Schenectady",
            "cod": 200
        })))
        .expect(1)
        .mount(&server)
        .await;

    server
}

/// Run `show 12345 us` against `server` off the async runtime.
async fn show_against(server: &MockServer, extra_args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    let base_url = format!("{}{WEATHER_PATH}", server.uri());

    let mut args = vec!["show".to_string(), "12345".to_string(), "us".to_string()];
    args.extend(extra_args.iter().map(|a| a.to_string()));

    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(
            home.path(),
            &args,
            &[("WEATHER_API_BASE_URL", base_url.as_str()), ("OPENWEATHER_API_KEY", "TEST_KEY")],
        )
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_renders_forecast_text() {
    let server = provider_server().await;
    let output = show_against(&server, &[]).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Forecast retrieved successfully.\n"), "stdout: {stdout}");
    assert!(stdout.contains("12345, US: clear sky"), "stdout: {stdout}");
    assert!(stdout.contains("Temperature: 21.4 °C (high 23.1 °C, low 19.8 °C)"), "stdout: {stdout}");
    assert!(stdout.contains("Humidity:    56%"), "stdout: {stdout}");
    assert!(stdout.contains("Sea level:   1015 hPa"), "stdout: {stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_json_prints_forecast_payload() {
    let server = provider_server().await;
    let output = show_against(&server, &["--json"]).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let forecast: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    assert_eq!(forecast["temp"], 21.4);
    assert_eq!(forecast["high"], 23.1);
    assert_eq!(forecast["low"], 19.8);
    assert_eq!(forecast["humidity"], 56.0);
    assert_eq!(forecast["sea_level"], 1015.0);
    assert_eq!(forecast["description"], "clear sky");
    assert_eq!(forecast["zip_code"], "12345");
    assert_eq!(forecast["country"], "US");
}
