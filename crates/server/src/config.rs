use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "frontend.toml";

#[derive(Debug, Parser, Default)]
#[command(name = "server", about = "Server-rendered frontend for the BreachScan backend")]
pub struct Cli {
    /// Address the frontend listens on, e.g. 127.0.0.1:8080.
    #[arg(long)]
    pub bind: Option<String>,
    /// Base URL of the asset/scan backend.
    #[arg(long)]
    pub backend_url: Option<String>,
    /// Directory holding index.html and scheduler.html.
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
    /// Upper bound for a single backend request.
    #[arg(long)]
    pub backend_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub backend_url: String,
    pub template_dir: PathBuf,
    pub backend_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            backend_url: "http://127.0.0.1:8000".into(),
            template_dir: PathBuf::from("templates"),
            backend_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    backend_url: Option<String>,
    template_dir: Option<PathBuf>,
    backend_timeout_secs: Option<u64>,
}

/// Defaults, then the TOML file, then environment, then CLI flags.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = std::env::var("FRONTEND_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    if let Ok(raw) = fs::read_to_string(&path) {
        apply_file(&mut settings, &raw).with_context(|| format!("failed to parse {path}"))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    apply_cli(&mut settings, cli);

    settings.backend_url = normalize_backend_url(&settings.backend_url)?;
    if settings.backend_timeout_secs == 0 {
        bail!("backend timeout must be at least one second");
    }

    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.bind_addr {
        settings.bind_addr = v;
    }
    if let Some(v) = file_cfg.backend_url {
        settings.backend_url = v;
    }
    if let Some(v) = file_cfg.template_dir {
        settings.template_dir = v;
    }
    if let Some(v) = file_cfg.backend_timeout_secs {
        settings.backend_timeout_secs = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("FRONTEND_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = lookup("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = lookup("FRONTEND_TEMPLATE_DIR") {
        settings.template_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("BACKEND_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.backend_timeout_secs = parsed;
        }
    }
}

fn apply_cli(settings: &mut Settings, cli: &Cli) {
    if let Some(v) = &cli.bind {
        settings.bind_addr = v.clone();
    }
    if let Some(v) = &cli.backend_url {
        settings.backend_url = v.clone();
    }
    if let Some(v) = &cli.template_dir {
        settings.template_dir = v.clone();
    }
    if let Some(v) = cli.backend_timeout_secs {
        settings.backend_timeout_secs = v;
    }
}

fn normalize_backend_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid backend url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("backend url '{raw}' must use http or https");
    }
    if url.host_str().is_none() {
        bail!("backend url '{raw}' has no host");
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
