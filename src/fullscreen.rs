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

//! Immersive fullscreen configuration.
//!
//! There are two ways to hide the system bars, depending on the host's API level:
//!
//! - On API 30 and later, the window's `WindowInsetsController` hides them and decides how they
//!   come back ([`FullscreenStrategy::InsetsController`]).
//! - Before that, a bitmask of [`SystemUiFlags`] is set on the decor view
//!   ([`FullscreenStrategy::LegacyFlags`]).
//!
//! The strategy is picked once per [`Shell`] and reused for every later call.
//!
//! [`Shell`]: crate::shell::Shell

use std::fmt;

use bitflags::bitflags;
use serde::Deserialize;

use crate::config::FullscreenConfig;
use crate::error::{Error, Result};
use crate::host::{ApiLevel, Component, DisplayHost};

/// `WindowManager.LayoutParams.layoutInDisplayCutoutMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CutoutMode {
    /// Extend into the cutout only when it is contained in a system bar.
    Default,

    /// Extend into cutouts on the short edges of the screen.
    #[default]
    ShortEdges,

    /// Never extend into the cutout area.
    Never,

    /// Always extend into cutouts on every edge.
    Always,
}

impl CutoutMode {
    /// The `LAYOUT_IN_DISPLAY_CUTOUT_MODE_*` constant.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Default => 0,
            Self::ShortEdges => 1,
            Self::Never => 2,
            Self::Always => 3,
        }
    }
}

/// `WindowInsetsController` system bar behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarsBehavior {
    /// Hidden bars reappear on a swipe and stay.
    Default,

    /// Hidden bars reappear transiently on a swipe and hide again on their own.
    #[default]
    TransientBySwipe,
}

impl BarsBehavior {
    /// The `BEHAVIOR_*` constant.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Default => 1,
            Self::TransientBySwipe => 2,
        }
    }
}

bitflags! {
    /// `View.SYSTEM_UI_FLAG_*` visibility flags used before API 30.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SystemUiFlags: i32 {
        const LOW_PROFILE = 0x0000_0001;
        const HIDE_NAVIGATION = 0x0000_0002;
        const FULLSCREEN = 0x0000_0004;
        const LAYOUT_STABLE = 0x0000_0100;
        const LAYOUT_HIDE_NAVIGATION = 0x0000_0200;
        const LAYOUT_FULLSCREEN = 0x0000_0400;
        const IMMERSIVE = 0x0000_0800;
        const IMMERSIVE_STICKY = 0x0000_1000;
    }
}

impl SystemUiFlags {
    /// Hide both bars and let a swipe show them transiently.
    pub const IMMERSIVE_FULLSCREEN: Self = Self::FULLSCREEN
        .union(Self::HIDE_NAVIGATION)
        .union(Self::IMMERSIVE_STICKY);
}

/// How the system bars get hidden on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenStrategy {
    /// Hide the bars through the window's inset controller.
    InsetsController { behavior: BarsBehavior },

    /// Set legacy visibility flags on the decor view.
    LegacyFlags(SystemUiFlags),
}

impl FullscreenStrategy {
    /// Pick a strategy from the host's capabilities.
    pub fn select(api_level: ApiLevel, config: &FullscreenConfig) -> Self {
        if api_level.has_insets_controller() {
            Self::InsetsController {
                behavior: config.bars_behavior,
            }
        } else {
            Self::LegacyFlags(SystemUiFlags::IMMERSIVE_FULLSCREEN)
        }
    }
}

impl fmt::Display for FullscreenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsetsController { behavior } => {
                write!(f, "insets controller ({:?})", behavior)
            }
            Self::LegacyFlags(flags) => write!(f, "system UI flags {:#x}", flags.bits()),
        }
    }
}

/// Put the host window into immersive fullscreen.
///
/// A missing window, decor view or inset controller is reported as
/// [`Error::Unavailable`] and nothing further is changed. A host that predates cutout layout
/// modes only skips that step.
pub fn configure<H: DisplayHost + ?Sized>(
    host: &H,
    strategy: FullscreenStrategy,
    cutout_mode: CutoutMode,
) -> Result<()> {
    log::debug!("Configuring fullscreen mode");

    match host.set_cutout_mode(cutout_mode) {
        Ok(()) => log::debug!("Set display cutout mode to {:?}", cutout_mode),
        Err(err @ Error::Unsupported { .. }) => {
            log::debug!("Leaving display cutout mode alone: {}", err)
        }
        Err(err) => return Err(err),
    }

    match strategy {
        FullscreenStrategy::InsetsController { behavior } => {
            host.hide_system_bars(behavior)?;
            log::debug!("Using WindowInsetsController for fullscreen");
        }
        FullscreenStrategy::LegacyFlags(flags) => {
            host.set_system_ui_visibility(flags)?;
            log::debug!("Using setSystemUiVisibility({:#x}) for compatibility", flags.bits());
        }
    }

    Ok(())
}

/// Whether an error from [`configure`] is an expected no-op rather than a failure.
pub(crate) fn is_benign(err: &Error) -> bool {
    matches!(err.unavailable(), Some(Component::InsetsController))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immersive_flags_match_platform_constants() {
        assert_eq!(SystemUiFlags::IMMERSIVE_FULLSCREEN.bits(), 0x1006);
    }

    #[test]
    fn strategy_follows_api_level() {
        let config = FullscreenConfig::default();

        assert_eq!(
            FullscreenStrategy::select(ApiLevel(29), &config),
            FullscreenStrategy::LegacyFlags(SystemUiFlags::IMMERSIVE_FULLSCREEN)
        );
        assert_eq!(
            FullscreenStrategy::select(ApiLevel::R, &config),
            FullscreenStrategy::InsetsController {
                behavior: BarsBehavior::TransientBySwipe
            }
        );
    }

    #[test]
    fn raw_constants() {
        assert_eq!(CutoutMode::ShortEdges.as_raw(), 1);
        assert_eq!(CutoutMode::default(), CutoutMode::ShortEdges);
        assert_eq!(BarsBehavior::TransientBySwipe.as_raw(), 2);
    }
}
