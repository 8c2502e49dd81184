use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_SESSION_SECRET: &str = "dev-session-secret";
/// Thirty days.
pub const MAX_SESSION_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub session_secret: String,
    pub session_ttl_seconds: i64,
    pub seed_path: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            session_secret: DEFAULT_SESSION_SECRET.into(),
            session_ttl_seconds: 3600,
            seed_path: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    #[serde(alias = "server_bind")]
    bind_addr: Option<String>,
    session_secret: Option<String>,
    session_ttl_seconds: Option<i64>,
    seed_path: Option<PathBuf>,
    max_body_bytes: Option<usize>,
}

/// Defaults, then `server.toml` in the working directory, then the environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw).context("failed to parse server.toml")?;
    }
    apply_env(&mut settings, |key| std::env::var(key).ok())?;

    Ok(settings)
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.session_secret {
        settings.session_secret = v;
    }
    if let Some(v) = file_cfg.session_ttl_seconds {
        settings.session_ttl_seconds = checked_ttl(v)?;
    }
    if let Some(v) = file_cfg.seed_path {
        settings.seed_path = Some(v);
    }
    if let Some(v) = file_cfg.max_body_bytes {
        settings.max_body_bytes = v;
    }
    Ok(())
}

pub(crate) fn apply_env(
    settings: &mut Settings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("APP__SESSION_SECRET").filter(|v| !v.trim().is_empty()) {
        settings.session_secret = v;
    }

    if let Some(parsed) = var("APP__SESSION_TTL_SECONDS").and_then(|v| v.parse::<i64>().ok()) {
        settings.session_ttl_seconds =
            checked_ttl(parsed).context("invalid APP__SESSION_TTL_SECONDS")?;
    }

    if let Some(v) = var("APP__SEED_PATH").filter(|v| !v.trim().is_empty()) {
        settings.seed_path = Some(PathBuf::from(v));
    }

    if let Some(parsed) = var("APP__MAX_BODY_BYTES").and_then(|v| v.parse::<usize>().ok()) {
        settings.max_body_bytes = parsed;
    }
    Ok(())
}

fn checked_ttl(seconds: i64) -> anyhow::Result<i64> {
    if !(1..=MAX_SESSION_TTL_SECONDS).contains(&seconds) {
        bail!("session ttl must be between 1 and {MAX_SESSION_TTL_SECONDS} seconds, got {seconds}");
    }
    Ok(seconds)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
