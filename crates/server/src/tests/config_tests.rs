use super::{apply_cli, apply_env, apply_file, normalize_backend_url, Cli, Settings};

use std::{collections::HashMap, path::PathBuf};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.bind_addr, "127.0.0.1:8080");
    assert_eq!(settings.backend_url, "http://127.0.0.1:8000");
    assert_eq!(settings.backend_timeout_secs, 10);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9090"
backend_url = "http://scanner.lab:8000"
backend_timeout_secs = 3
"#,
    )
    .expect("parse");

    assert_eq!(settings.bind_addr, "0.0.0.0:9090");
    assert_eq!(settings.backend_url, "http://scanner.lab:8000");
    assert_eq!(settings.backend_timeout_secs, 3);
    assert_eq!(settings.template_dir, PathBuf::from("templates"));
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "backend_timeout_secs = \"soon\"").is_err());
}

#[test]
fn env_overrides_file_and_ignores_bad_numbers() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "backend_url = \"http://from-file:8000\"").expect("parse");
    apply_env(
        &mut settings,
        env_of(&[
            ("BACKEND_URL", "http://from-env:8000"),
            ("BACKEND_TIMEOUT_SECS", "not-a-number"),
            ("FRONTEND_TEMPLATE_DIR", "/srv/templates"),
        ]),
    );

    assert_eq!(settings.backend_url, "http://from-env:8000");
    assert_eq!(settings.backend_timeout_secs, 10);
    assert_eq!(settings.template_dir, PathBuf::from("/srv/templates"));
}

#[test]
fn cli_flags_win_over_env() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_of(&[("FRONTEND_BIND", "127.0.0.1:7000")]));
    apply_cli(
        &mut settings,
        &Cli {
            bind: Some("127.0.0.1:7500".into()),
            backend_timeout_secs: Some(2),
            ..Cli::default()
        },
    );

    assert_eq!(settings.bind_addr, "127.0.0.1:7500");
    assert_eq!(settings.backend_timeout_secs, 2);
}

#[test]
fn backend_url_is_normalized() {
    assert_eq!(
        normalize_backend_url(" http://127.0.0.1:8000/ ").expect("url"),
        "http://127.0.0.1:8000"
    );
    assert_eq!(
        normalize_backend_url("https://api.lab/v1/").expect("url"),
        "https://api.lab/v1"
    );
}

#[test]
fn backend_url_must_be_http() {
    assert!(normalize_backend_url("ftp://127.0.0.1").is_err());
    assert!(normalize_backend_url("not a url").is_err());
}
