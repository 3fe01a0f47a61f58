use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use tradefloor::core::config::{DEFAULT_SERVER_URL, HTTP_TIMEOUT_SECONDS};
use tradefloor::core::{
    resolve_server_url, ClockConfig, Settings, FALLBACK_ROUND_SECONDS, FINAL_ROUND,
};

#[test]
fn test_defaults() {
    let config = ClockConfig::default();
    assert_eq!(config.final_round, 10);
    assert_eq!(config.fallback_seconds(), 120);
    assert_eq!(config.tick_interval, Duration::from_secs(1));
    assert_eq!(FINAL_ROUND, 10);
    assert_eq!(FALLBACK_ROUND_SECONDS, 120);
}

#[test]
fn test_server_url_priority() {
    let settings = Settings {
        server_url: Some("http://from-file".to_string()),
        ..Settings::default()
    };

    assert_eq!(
        resolve_server_url(Some("http://from-flag"), Some("http://from-env".into()), &settings),
        "http://from-flag"
    );
    assert_eq!(
        resolve_server_url(None, Some("http://from-env".into()), &settings),
        "http://from-env"
    );
    assert_eq!(resolve_server_url(None, None, &settings), "http://from-file");
    assert_eq!(
        resolve_server_url(None, Some("   ".into()), &Settings::default()),
        DEFAULT_SERVER_URL
    );
}

#[test]
fn test_settings_file_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
server_url = "http://game.example:8080"
final_round = 12
fallback_seconds = 90
http_timeout_seconds = 3
store_path = "/tmp/rounds.toml"
"#,
    )?;

    let settings = Settings::resolve(Some(&path))?;
    assert_eq!(settings.server_url.as_deref(), Some("http://game.example:8080"));
    assert_eq!(settings.http_timeout(), Duration::from_secs(3));
    assert_eq!(settings.store_path(), Some(PathBuf::from("/tmp/rounds.toml")));

    let config = ClockConfig::resolve(None, &settings);
    assert_eq!(config.final_round, 12);
    assert_eq!(config.fallback_seconds(), 90);

    let overridden = ClockConfig::resolve(Some(5), &settings);
    assert_eq!(overridden.final_round, 5);
    Ok(())
}

#[test]
fn test_partial_settings_file_uses_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "final_round = 8\n")?;

    let settings = Settings::load(&path)?;
    assert_eq!(settings.server_url, None);
    assert_eq!(settings.http_timeout(), Duration::from_secs(HTTP_TIMEOUT_SECONDS));

    let config = ClockConfig::resolve(None, &settings);
    assert_eq!(config.final_round, 8);
    assert_eq!(config.fallback_seconds(), 120);
    Ok(())
}

#[test]
fn test_missing_explicit_settings_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("nope.toml");
    assert!(Settings::resolve(Some(&missing)).is_err());
}

#[test]
fn test_malformed_settings_file_is_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "final_round = \"ten\"\n")?;

    assert!(Settings::load(&path).is_err());
    Ok(())
}

#[test]
fn test_degenerate_values_are_clamped() {
    let settings = Settings {
        final_round: Some(0),
        fallback_seconds: Some(0),
        http_timeout_seconds: Some(0),
        ..Settings::default()
    };

    let config = ClockConfig::resolve(None, &settings);
    assert_eq!(config.final_round, 1);
    assert_eq!(config.fallback_seconds(), 1);
    assert_eq!(settings.http_timeout(), Duration::from_secs(1));
}
