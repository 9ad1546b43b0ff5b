use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::decode::DisplayLimits;
use crate::error::EditorError;
use crate::settings::Step;

const CONFIG_FILE_NAME: &str = "config.toml";

/// User-tunable editor settings, read once at start-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Parity picks the snapping step: even gives 2, odd gives 3.
    pub roll_suffix: u32,
    /// Explicit step; overrides `roll_suffix` when set.
    pub step: Option<i32>,
    pub max_display_width: u32,
    pub max_display_height: u32,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            roll_suffix: 4,
            step: None,
            max_display_width: 700,
            max_display_height: 450,
            export_file_name: "edited-image.png".into(),
        }
    }
}

impl EditorConfig {
    /// `<config dir>/retouch/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("retouch").join(CONFIG_FILE_NAME))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        config.resolve_step()?;
        info!(?path, step = ?config.step, roll_suffix = config.roll_suffix, "config loaded");
        Ok(config)
    }

    /// Load from the default location, or defaults when there is none.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn resolve_step(&self) -> Result<Step, EditorError> {
        match self.step {
            Some(step) => Step::new(step),
            None => Ok(Step::from_roll_suffix(self.roll_suffix)),
        }
    }

    pub fn display_limits(&self) -> DisplayLimits {
        DisplayLimits {
            max_width: self.max_display_width.max(1),
            max_height: self.max_display_height.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_give_step_two() {
        let config = EditorConfig::default();
        assert_eq!(config.resolve_step().unwrap(), Step::TWO);
        assert_eq!(config.display_limits(), DisplayLimits::default());
        assert_eq!(config.export_file_name, "edited-image.png");
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn odd_roll_suffix_gives_step_three() {
        let file = write_config("roll_suffix = 17\n");
        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.resolve_step().unwrap(), Step::THREE);
        assert_eq!(config.max_display_width, 700);
    }

    #[test]
    fn explicit_step_overrides_suffix() {
        let file = write_config("roll_suffix = 4\nstep = 3\nmax_display_width = 320\n");
        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.resolve_step().unwrap(), Step::THREE);
        assert_eq!(config.display_limits().max_width, 320);
    }

    #[test]
    fn invalid_step_is_rejected() {
        let file = write_config("step = 5\n");
        let err = EditorConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("step must be 2 or 3"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let file = write_config("roll_suffix = \"four\"\n");
        assert!(EditorConfig::load(file.path()).is_err());
    }
}
