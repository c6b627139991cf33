//! Runtime configuration.
//!
//! Read from a YAML file named by `DAYCARE_CONFIG` (default `daycare.yaml`).
//! A missing file means all defaults; any key left out of the file takes its
//! default too.

use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::models::attendance::{AttendancePolicy, DEFAULT_LATE_CUTOFF_MINUTES};

pub const CONFIG_PATH_ENV: &str = "DAYCARE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "daycare.yaml";

const MINUTES_PER_DAY: u32 = 24 * 60;
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub cors_origin: String,
    /// Minutes after site-local midnight; check-ins later than this are late
    pub late_cutoff_minutes: u32,
    pub site_utc_offset_minutes: i32,
    /// 0 disables the background sweeper
    pub sweep_interval_secs: u64,
    /// Used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:daycare.db".to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            late_cutoff_minutes: DEFAULT_LATE_CUTOFF_MINUTES,
            site_utc_offset_minutes: 0,
            sweep_interval_secs: 3600,
            log_filter: "info".to_string(),
        }
    }
}

/// Where a loaded config came from. Config is read before tracing exists, so
/// `main` logs this once the subscriber is installed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at this path; every field is a default
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "file {}", path.display()),
            ConfigSource::Defaults(path) => {
                write!(f, "defaults (no file at {})", path.display())
            }
        }
    }
}

impl AppConfig {
    /// Load from the path in `DAYCARE_CONFIG`, or the default path
    pub fn load() -> Result<(Self, ConfigSource)> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_with_source(Path::new(&path))
    }

    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }
        Ok((Self::load_from(path)?, ConfigSource::File(path.to_path_buf())))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.late_cutoff_minutes >= MINUTES_PER_DAY {
            bail!(
                "late_cutoff_minutes must be below {}, got {}",
                MINUTES_PER_DAY,
                self.late_cutoff_minutes
            );
        }
        if self.site_utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            bail!(
                "site_utc_offset_minutes must be within ±{}, got {}",
                MAX_OFFSET_MINUTES,
                self.site_utc_offset_minutes
            );
        }
        self.bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid bind_address '{}'", self.bind_address))?;
        Ok(())
    }

    pub fn attendance_policy(&self) -> Result<AttendancePolicy> {
        let offset = FixedOffset::east_opt(self.site_utc_offset_minutes * 60).with_context(|| {
            format!(
                "Invalid site_utc_offset_minutes: {}",
                self.site_utc_offset_minutes
            )
        })?;
        Ok(AttendancePolicy::new(self.late_cutoff_minutes, offset))
    }

    /// None when the background sweeper is disabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        match self.sweep_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
