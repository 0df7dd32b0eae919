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

//! The window-management surface that the rest of the crate is written against.
//!
//! A [`DisplayHost`] is a set of single-shot queries and mutations on host-owned window state.
//! Every method is synchronous and is expected to be called on the thread the host lifecycle
//! runs on. On Android this is implemented over JNI by [`JniHost`]; tests use an in-memory host.
//!
//! [`JniHost`]: crate::platform::android::JniHost

use std::fmt;

use crate::error::Result;
use crate::fullscreen::{BarsBehavior, CutoutMode, SystemUiFlags};
use crate::geometry::{DisplaySize, SafeInsets};

/// The platform API level of the host, e.g. Android's `Build.VERSION.SDK_INT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiLevel(pub i32);

impl ApiLevel {
    /// Android 9. Display cutouts and cutout layout modes appear here.
    pub const P: Self = Self(28);

    /// Android 11. `WindowInsetsController` replaces the system UI visibility flags.
    pub const R: Self = Self(30);

    /// Whether the host has an inset controller for hiding system bars.
    pub fn has_insets_controller(self) -> bool {
        self >= Self::R
    }

    /// Whether the host knows about display cutouts at all.
    pub fn has_display_cutout(self) -> bool {
        self >= Self::P
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A host object that may be missing when we go looking for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    WindowManager,
    Window,
    DecorView,
    WindowInsets,
    DisplayCutout,
    InsetsController,
}

impl Component {
    /// Whether a missing instance of this component means something is wrong, rather than the
    /// display simply having no cutout (yet).
    pub fn is_unexpected(self) -> bool {
        matches!(self, Self::WindowManager | Self::Window | Self::DecorView)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WindowManager => "window manager",
            Self::Window => "window",
            Self::DecorView => "decor view",
            Self::WindowInsets => "window insets",
            Self::DisplayCutout => "display cutout",
            Self::InsetsController => "insets controller",
        })
    }
}

/// Window-management operations provided by the host.
pub trait DisplayHost {
    /// The host's platform API level. Queried once when a fullscreen strategy is picked.
    fn api_level(&self) -> ApiLevel;

    /// Whether the window-manager service can be reached.
    fn has_window_manager(&self) -> bool;

    /// The hardware size of the default display, including system decorations.
    fn real_display_size(&self) -> Result<DisplaySize>;

    /// The size of the default display, which may exclude system decorations.
    fn display_size(&self) -> Result<DisplaySize>;

    /// Safe-area insets of the current window's display cutout.
    ///
    /// Fails with [`Error::Unavailable`] naming the first missing link in the chain
    /// window → decor view → window insets → display cutout.
    ///
    /// [`Error::Unavailable`]: crate::error::Error::Unavailable
    fn cutout_insets(&self) -> Result<SafeInsets>;

    /// Set how the window lays out around a display cutout.
    fn set_cutout_mode(&self, mode: CutoutMode) -> Result<()>;

    /// Hide the system bars through the window's inset controller.
    fn hide_system_bars(&self, behavior: BarsBehavior) -> Result<()>;

    /// Set the legacy system UI visibility flags on the decor view.
    fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()>;
}

impl<H: DisplayHost + ?Sized> DisplayHost for &H {
    fn api_level(&self) -> ApiLevel {
        (**self).api_level()
    }

    fn has_window_manager(&self) -> bool {
        (**self).has_window_manager()
    }

    fn real_display_size(&self) -> Result<DisplaySize> {
        (**self).real_display_size()
    }

    fn display_size(&self) -> Result<DisplaySize> {
        (**self).display_size()
    }

    fn cutout_insets(&self) -> Result<SafeInsets> {
        (**self).cutout_insets()
    }

    fn set_cutout_mode(&self, mode: CutoutMode) -> Result<()> {
        (**self).set_cutout_mode(mode)
    }

    fn hide_system_bars(&self, behavior: BarsBehavior) -> Result<()> {
        (**self).hide_system_bars(behavior)
    }

    fn set_system_ui_visibility(&self, flags: SystemUiFlags) -> Result<()> {
        (**self).set_system_ui_visibility(flags)
    }
}
