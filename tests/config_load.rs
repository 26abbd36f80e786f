// tests/config_load.rs
use std::fs;
use std::path::{Path, PathBuf};

use job_radar::config::{resolve_config_path, AgentConfig, EXAMPLE_CONFIG_FILE};
use serial_test::serial;

const EMAIL_VARS: &[&str] = &[
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_USER",
    "SMTP_PASS",
    "REPORT_FROM_EMAIL",
    "REPORT_TO_EMAIL",
];

fn clear_email_env() {
    for k in EMAIL_VARS {
        std::env::remove_var(k);
    }
}

#[test]
fn shipped_example_config_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config").join(EXAMPLE_CONFIG_FILE);
    let text = fs::read_to_string(&path).unwrap();
    let cfg = AgentConfig::from_yaml_str(&text).unwrap();
    assert!(!cfg.sources.greenhouse.is_empty() || !cfg.sources.lever.is_empty());
    assert!(cfg.report.top_n > 0);
}

#[test]
#[serial]
fn falls_back_to_example_next_to_requested_path() {
    clear_email_env();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(EXAMPLE_CONFIG_FILE),
        "report:\n  top_n: 7\n",
    )
    .unwrap();

    let requested = dir.path().join("config.yaml");
    assert_eq!(
        resolve_config_path(&requested).unwrap(),
        dir.path().join(EXAMPLE_CONFIG_FILE)
    );
    let cfg = AgentConfig::load(&requested).unwrap();
    assert_eq!(cfg.report.top_n, 7);
}

#[test]
fn missing_config_without_example_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = AgentConfig::load(&dir.path().join("config.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("config not found"));
}

#[test]
fn invalid_yaml_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "report: [unclosed\n").unwrap();
    assert!(AgentConfig::load(&path).is_err());
}

#[test]
#[serial]
fn email_env_overrides_file_values() {
    clear_email_env();
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("config.yaml");
    fs::write(
        &path,
        "email:\n  enabled: true\n  smtp_host: file.example\n  smtp_port: 25\n  to_email: file@example.com\n",
    )
    .unwrap();

    std::env::set_var("SMTP_HOST", "env.example");
    std::env::set_var("SMTP_PORT", "2525");
    std::env::set_var("REPORT_TO_EMAIL", "env@example.com");
    let cfg = AgentConfig::load(&path);
    clear_email_env();

    let cfg = cfg.unwrap();
    assert_eq!(cfg.email.smtp_host, "env.example");
    assert_eq!(cfg.email.smtp_port, 2525);
    assert_eq!(cfg.email.to_email, "env@example.com");
    assert!(cfg.email.enabled);
}
