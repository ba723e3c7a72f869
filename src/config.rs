use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use sabbats::SabbatOptions;
use sabbats::ical::{DEFAULT_PRODID, DEFAULT_REFRESH_INTERVAL};
use sabbats::sabbat::fmt::DEFAULT_UID_DOMAIN;

use crate::cli::Cli;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "sabbats.toml";

/// Top-level configuration.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SabbatsConfig {
    /// Year to compute; the current year when absent.
    #[serde(default)]
    pub year: Option<i32>,

    /// Output calendar path, `-` for stdout.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Solar longitude table; the built-in model when absent.
    #[serde(default)]
    pub ephemeris: Option<PathBuf>,

    /// Calendar settings.
    #[serde(default)]
    pub calendar: CalendarToml,
}

impl Default for SabbatsConfig {
    fn default() -> Self {
        Self {
            year: None,
            output: default_output(),
            ephemeris: None,
            calendar: CalendarToml::default(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    #[serde(default = "default_prodid")]
    pub prodid: String,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for CalendarToml {
    fn default() -> Self {
        Self {
            prodid: default_prodid(),
            refresh_interval: default_refresh_interval(),
            uid_domain: default_uid_domain(),
            utc_offset_minutes: 0,
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("wiccan-sabbats.ics")
}
fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}
fn default_refresh_interval() -> String {
    DEFAULT_REFRESH_INTERVAL.to_string()
}
fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

impl SabbatsConfig {
    /// Reads `path`, or [`DEFAULT_CONFIG_PATH`] if it exists, or falls back
    /// to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => Path::new(DEFAULT_CONFIG_PATH),
            None => {
                debug!("no config file, using defaults");
                return Ok(Self::default());
            }
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: SabbatsConfig = toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Lets command-line flags take precedence.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(year) = cli.year {
            self.year = Some(year);
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if let Some(ephemeris) = &cli.ephemeris {
            self.ephemeris = Some(ephemeris.clone());
        }
    }

    /// The configured year, or `current_year` if none is.
    pub fn year_or(&self, current_year: impl FnOnce() -> i32) -> i32 {
        self.year.unwrap_or_else(current_year)
    }

    pub fn sabbat_options(&self) -> SabbatOptions {
        SabbatOptions::new()
            .with_utc_offset_minutes(self.calendar.utc_offset_minutes)
            .with_uid_domain(self.calendar.uid_domain.clone())
    }

    /// Whether the calendar goes to stdout rather than a file.
    pub fn writes_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}
