/*

`genesis-display` is free software: you can redistribute it and/or modify it under the terms of one
of the following licenses:

* GNU Lesser General Public License as published by the Free Software Foundation, either
  version 3 of the License, or (at your option) any later version.
* Mozilla Public License as published by the Mozilla Foundation, version 2.

`genesis-display` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
GNU Lesser General Public License and the Mozilla Public License for more details.

You should have received a copy of the GNU Lesser General Public License and the Mozilla
Public License along with `genesis-display`. If not, see <https://www.gnu.org/licenses/>.

*/

//! Configuration, read from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```
//! use genesis_display::config::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     [fullscreen]
//!     cutout_mode = "never"
//!
//!     [log]
//!     level = "info"
//! "#).unwrap();
//!
//! assert!(config.fullscreen.enabled);
//! assert_eq!(config.libraries, ["aaudio"]);
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::fullscreen::{BarsBehavior, CutoutMode};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Native libraries loaded by name before anything else runs.
    pub libraries: Vec<String>,
    pub fullscreen: FullscreenConfig,
    pub report: ReportConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            libraries: vec!["aaudio".to_string()],
            fullscreen: FullscreenConfig::default(),
            report: ReportConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }
}

/// Fullscreen settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FullscreenConfig {
    /// Configure fullscreen when the window is created.
    pub enabled: bool,
    pub cutout_mode: CutoutMode,
    /// Only used on hosts with an inset controller.
    pub bars_behavior: BarsBehavior,
    /// Apply fullscreen again whenever the window regains focus.
    pub reapply_on_focus: bool,
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cutout_mode: CutoutMode::ShortEdges,
            bars_behavior: BarsBehavior::TransientBySwipe,
            reapply_on_focus: true,
        }
    }
}

/// Which lifecycle events trigger a fresh display report besides window creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub on_window_resized: bool,
    pub on_config_changed: bool,
    pub on_insets_changed: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            on_window_resized: true,
            on_config_changed: true,
            on_insets_changed: true,
        }
    }
}

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// A `log` level filter: `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// The logcat tag on Android.
    pub tag: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            tag: "genesis".to_string(),
        }
    }
}

impl LogConfig {
    /// The configured level, or `Debug` if it doesn't parse.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Debug)
    }
}
