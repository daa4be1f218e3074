//! Build parameters, read from a TOML file and overridden by CLI flags.
//!
//! ```toml
//! output_directory = "out"
//! modes            = ["private_car", "foot", "bicycle"]
//! parallelize      = true
//! locator          = "rtree"
//! write_coords     = false
//!
//! [[switch_rules]]
//! switch_type = "car_parking"
//! from_mode   = "private_car"
//! to_mode     = "foot"
//! cost        = 3.0
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] value.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mmg_core::{Mode, SwitchType};
use mmg_graph::{LocatorKind, Pipeline, SwitchRule};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failure reading {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failure decoding {}: {source}", path.display())]
    Decode { path: PathBuf, source: toml::de::Error },

    #[error("unsupported configuration file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("at least one mode is required")]
    NoModes,

    #[error("switch type {0} has more than one rule")]
    DuplicateSwitchRule(SwitchType),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub output_directory: PathBuf,
    pub modes:            Vec<Mode>,
    pub parallelize:      bool,
    pub locator:          LocatorKind,
    /// Also dump the coordinate table to `coords.csv`.
    pub write_coords:     bool,
    pub switch_rules:     Vec<SwitchRule>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("out"),
            modes:            Mode::STREET.to_vec(),
            parallelize:      true,
            locator:          LocatorKind::default(),
            write_coords:     false,
            switch_rules:     SwitchRule::defaults(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modes.is_empty() {
            return Err(ConfigError::NoModes);
        }
        let mut seen = BTreeSet::new();
        if let Some(rule) = self.switch_rules.iter().find(|r| !seen.insert(r.switch_type)) {
            return Err(ConfigError::DuplicateSwitchRule(rule.switch_type));
        }
        Ok(())
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new()
            .modes(self.modes.iter().copied())
            .rules(self.switch_rules.clone())
            .locator(self.locator)
            .parallel(self.parallelize)
    }
}

impl TryFrom<&Path> for BuildConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
        }
        let s = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: BuildConfig = toml::from_str(&s)
            .map_err(|source| ConfigError::Decode { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }
}
