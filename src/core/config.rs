//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ScrollError};

/// Accepted scroll intervals, in seconds.
pub const INTERVAL_RANGE: RangeInclusive<u8> = 1..=59;

/// Command-line values that take precedence over env and file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub interval_secs: Option<u8>,
    pub jsonl_path: Option<PathBuf>,
}

impl Overrides {
    /// Whether a command-line value replaces the environment variable `name`.
    ///
    /// Shadowed variables are never read, so a malformed value cannot fail a
    /// run that does not use it.
    fn shadows(&self, name: &str) -> bool {
        match name {
            "AUTOSCROLL_INTERVAL_SECS" => self.interval_secs.is_some(),
            "AUTOSCROLL_LOG_PATH" => self.jsonl_path.is_some(),
            _ => false,
        }
    }
}

/// Full autoscroll configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub scroll: ScrollConfig,
    pub terminal: TerminalConfig,
    pub log: LogConfig,
    /// Where this configuration was loaded from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Scroll timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScrollConfig {
    /// Seconds between scroll events.
    pub interval_secs: u8,
}

/// Terminal session behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TerminalConfig {
    /// Re-sample the terminal size on SIGWINCH. Off keeps the size fixed for
    /// the whole session.
    pub resample_on_resize: bool,
}

/// JSONL event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Destination of the event log. `None` disables logging.
    pub jsonl_path: Option<PathBuf>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { interval_secs: 1 }
    }
}

impl Config {
    /// Default configuration path.
    ///
    /// `$XDG_CONFIG_HOME/autoscroll/config.toml`, else `$HOME/.config/...`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let base = env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("/tmp"));
        base.join("autoscroll").join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_overrides(path, &Overrides::default())
    }

    /// Load config, apply env overrides, then command-line overrides, and
    /// validate the merged result once.
    pub fn load_with_overrides(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| ScrollError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let mut parsed: Self = toml::from_str(&raw)?;
            parsed.source = Some(path_buf);
            parsed
        } else if is_explicit_path {
            return Err(ScrollError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_layers(env_var, overrides)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_layers<F>(&mut self, mut lookup: F, overrides: &Overrides) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        self.apply_env_overrides_from(|name| {
            if overrides.shadows(name) {
                None
            } else {
                lookup(name)
            }
        })?;
        self.apply_overrides(overrides);
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(secs) = overrides.interval_secs {
            self.scroll.interval_secs = secs;
        }
        if let Some(path) = &overrides.jsonl_path {
            self.log.jsonl_path = Some(path.clone());
        }
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("AUTOSCROLL_INTERVAL_SECS") {
            self.scroll.interval_secs = parse_env_u8("AUTOSCROLL_INTERVAL_SECS", &raw)?;
        }

        if let Some(raw) = lookup("AUTOSCROLL_RESAMPLE_ON_RESIZE") {
            self.terminal.resample_on_resize =
                parse_env_bool("AUTOSCROLL_RESAMPLE_ON_RESIZE", &raw)?;
        }

        if let Some(raw) = lookup("AUTOSCROLL_LOG_PATH") {
            self.log.jsonl_path = Some(PathBuf::from(raw));
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !INTERVAL_RANGE.contains(&self.scroll.interval_secs) {
            return Err(ScrollError::InvalidConfig {
                details: format!(
                    "scroll.interval_secs must be a positive integer less than 60, got {}",
                    self.scroll.interval_secs
                ),
            });
        }

        if let Some(path) = &self.log.jsonl_path
            && path.as_os_str().is_empty()
        {
            return Err(ScrollError::InvalidConfig {
                details: "log.jsonl_path must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_u8(name: &str, raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .map_err(|error| ScrollError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    raw.trim()
        .parse::<bool>()
        .map_err(|error| ScrollError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}
