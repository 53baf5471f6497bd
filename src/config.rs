use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::paths;

/// When to prefix service-manager commands with the elevation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationPolicy {
    /// Always prefix (matches plain `sudo systemctl ...` usage)
    #[default]
    Always,
    /// Never prefix; the caller already has the needed privileges
    Never,
    /// Prefix unless the effective uid is already root
    Auto,
}

/// Privilege elevation settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Elevation {
    pub policy: ElevationPolicy,
    /// Command and arguments placed in front of the service manager (e.g. `["doas"]`)
    pub command: Vec<String>,
}

impl Default for Elevation {
    fn default() -> Self {
        Self {
            policy: ElevationPolicy::Always,
            command: vec!["sudo".into()],
        }
    }
}

impl Elevation {
    /// No prefix at all
    pub fn none() -> Self {
        Self {
            policy: ElevationPolicy::Never,
            command: Vec::new(),
        }
    }

    /// Whether commands get prefixed on this host
    pub fn applies(&self) -> bool {
        match self.policy {
            ElevationPolicy::Always => true,
            ElevationPolicy::Never => false,
            ElevationPolicy::Auto => !nix::unistd::Uid::effective().is_root(),
        }
    }

    /// Arguments to prepend to every service-manager command
    pub fn prefix(&self) -> Vec<String> {
        if self.applies() {
            self.command.clone()
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub elevation: Elevation,
    /// Command whose stdout identifies PID 1
    pub probe: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elevation: Elevation::default(),
            probe: paths::PID1_PROBE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load from a file (TOML, YAML or JSON)
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config = match extension {
            "toml" => parse_toml(&content)?,
            "yaml" | "yml" => parse_yaml(&content)?,
            "json" => parse_json(&content)?,
            _ => parse_auto(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from `$SVCCTL_CONFIG` or the default location.
    ///
    /// A missing file at the default location gives `Config::default()`;
    /// a path named explicitly through the environment must exist.
    pub fn load_default() -> Result<Self> {
        Self::load_or_default(
            std::env::var_os(paths::CONFIG_ENV),
            Path::new(paths::DEFAULT_CONFIG_PATH),
        )
    }

    fn load_or_default(explicit: Option<OsString>, fallback: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(&PathBuf::from(path)),
            None if fallback.exists() => Self::load(fallback),
            None => {
                tracing::debug!("No config at {}, using defaults", fallback.display());
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.probe.is_empty() {
            bail!("probe command must not be empty");
        }

        if self.elevation.applies() {
            let Some(program) = self.elevation.command.first() else {
                bail!(
                    "elevation command must not be empty when policy is {:?}",
                    self.elevation.policy
                );
            };
            which::which(program)
                .with_context(|| format!("Elevation command not found: {}", program))?;
        }

        Ok(())
    }
}

fn parse_toml(content: &str) -> Result<Config> {
    toml::from_str(content).context("Failed to parse TOML config")
}

fn parse_yaml(content: &str) -> Result<Config> {
    serde_yaml::from_str(content).context("Failed to parse YAML config")
}

fn parse_json(content: &str) -> Result<Config> {
    serde_json::from_str(content).context("Failed to parse JSON config")
}

/// Try each format in turn when the extension says nothing
fn parse_auto(content: &str) -> Result<Config> {
    if let Ok(config) = toml::from_str(content) {
        return Ok(config);
    }
    if let Ok(config) = serde_json::from_str(content) {
        return Ok(config);
    }
    parse_yaml(content).context("Config is not valid TOML, JSON or YAML")
}
