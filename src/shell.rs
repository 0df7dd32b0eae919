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

//! The [`Shell`]: what the host lifecycle talks to.
//!
//! The shell owns a [`DisplayHost`] and turns lifecycle events into fullscreen configuration and
//! display reports. The embedding application never sees an error from it: failures are logged
//! and replaced with a default, and listeners registered on [`Shell::display_ready`] get exactly
//! one notification per report.
//!
//! ```
//! use genesis_display::config::Config;
//! use genesis_display::error::{Error, Result};
//! use genesis_display::fullscreen::{BarsBehavior, CutoutMode, SystemUiFlags};
//! use genesis_display::geometry::{DisplaySize, SafeInsets};
//! use genesis_display::host::{ApiLevel, Component, DisplayHost};
//! use genesis_display::shell::{Lifecycle, Shell};
//!
//! struct Phone;
//!
//! impl DisplayHost for Phone {
//!     fn api_level(&self) -> ApiLevel { ApiLevel(34) }
//!     fn has_window_manager(&self) -> bool { true }
//!     fn real_display_size(&self) -> Result<DisplaySize> { Ok(DisplaySize::new(2400, 1080)) }
//!     fn display_size(&self) -> Result<DisplaySize> { Ok(DisplaySize::new(2400, 1080)) }
//!     fn cutout_insets(&self) -> Result<SafeInsets> { Ok(SafeInsets::new(0, 48, 0, 0)) }
//!     fn set_cutout_mode(&self, _: CutoutMode) -> Result<()> { Ok(()) }
//!     fn hide_system_bars(&self, _: BarsBehavior) -> Result<()> { Ok(()) }
//!     fn set_system_ui_visibility(&self, _: SystemUiFlags) -> Result<()> {
//!         Err(Error::Unavailable(Component::DecorView))
//!     }
//! }
//!
//! let shell = Shell::new(Phone, Config::default());
//! let next = shell.display_ready().wait_once();
//!
//! shell.handle(Lifecycle::WindowCreated);
//!
//! let info = futures_lite::future::block_on(next).unwrap();
//! assert_eq!(info.into_raw(), [2400, 1080, 2400, 1032, 0, 48]);
//! ```

use std::fmt;

use once_cell::unsync::OnceCell;

use crate::config::Config;
use crate::fullscreen::{self, FullscreenStrategy};
use crate::geometry::DisplayInfo;
use crate::handler::{Handler, ListenerId};
use crate::host::DisplayHost;
use crate::native::{self, NativeCallback};
use crate::reporter;

/// Lifecycle events the host delivers to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// A window exists and can be configured.
    WindowCreated,
    WindowResized,
    /// The device configuration changed, e.g. on rotation.
    ConfigChanged,
    InsetsChanged,
    FocusGained,
    Destroyed,
}

/// Event handlers exposed by a [`Shell`].
struct Registration {
    /// A display report finished.
    display_ready: Handler<DisplayInfo>,

    /// Fullscreen was applied with the given strategy.
    fullscreen_configured: Handler<FullscreenStrategy>,
}

/// Adapter between a [`DisplayHost`] and the native side.
pub struct Shell<H> {
    host: H,
    config: Config,

    /// Picked the first time fullscreen is configured.
    strategy: OnceCell<FullscreenStrategy>,

    registration: Registration,
}

impl<H> fmt::Debug for Shell<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("strategy", &self.strategy.get())
            .finish_non_exhaustive()
    }
}

impl<H: DisplayHost> Shell<H> {
    pub fn new(host: H, config: Config) -> Self {
        Self {
            host,
            config,
            strategy: OnceCell::new(),
            registration: Registration {
                display_ready: Handler::new(),
                fullscreen_configured: Handler::new(),
            },
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Notified once per successful display report.
    pub fn display_ready(&self) -> &Handler<DisplayInfo> {
        &self.registration.display_ready
    }

    /// Notified whenever fullscreen has been applied.
    pub fn fullscreen_configured(&self) -> &Handler<FullscreenStrategy> {
        &self.registration.fullscreen_configured
    }

    /// Forward every display report to a C callback.
    pub fn connect_native(&self, callback: NativeCallback) -> ListenerId {
        self.display_ready()
            .connect(move |info| native::deliver(callback, info))
    }

    /// The fullscreen strategy for this host, picked on first use.
    pub fn strategy(&self) -> FullscreenStrategy {
        *self.strategy.get_or_init(|| {
            let api_level = self.host.api_level();
            let strategy = FullscreenStrategy::select(api_level, &self.config.fullscreen);
            log::info!("API level {}, using {} for fullscreen", api_level, strategy);
            strategy
        })
    }

    /// Put the window into immersive fullscreen.
    ///
    /// Returns whether fullscreen was applied. Nothing happens beyond a log line if the window or
    /// its inset controller is missing.
    pub fn configure_fullscreen(&self) -> bool {
        let strategy = self.strategy();

        match fullscreen::configure(&self.host, strategy, self.config.fullscreen.cutout_mode) {
            Ok(()) => {
                self.registration.fullscreen_configured.run_with(&strategy);
                true
            }
            Err(err) if fullscreen::is_benign(&err) => {
                log::debug!("Not configuring fullscreen: {}", err);
                false
            }
            Err(err) => {
                log::error!("Failed to configure fullscreen: {}", err);
                false
            }
        }
    }

    /// Measure the display and notify [`display_ready`](Self::display_ready) listeners.
    ///
    /// Returns the reported info, or `None` if nothing was reported because the window manager
    /// or the display size could not be reached.
    pub fn report_display_info(&self) -> Option<DisplayInfo> {
        match reporter::query_display_info(&self.host) {
            Ok(info) => {
                log::info!("Display info ready: {}", info);
                self.registration.display_ready.run_with(&info);
                Some(info)
            }
            Err(err) => {
                log::error!("Not reporting display info: {}", err);
                None
            }
        }
    }

    /// React to a lifecycle event.
    pub fn handle(&self, event: Lifecycle) {
        log::trace!("Lifecycle event: {:?}", event);

        let report = &self.config.report;
        match event {
            Lifecycle::WindowCreated => {
                if self.config.fullscreen.enabled {
                    self.configure_fullscreen();
                }
                self.report_display_info();
            }
            Lifecycle::WindowResized if report.on_window_resized => {
                self.report_display_info();
            }
            Lifecycle::ConfigChanged if report.on_config_changed => {
                self.report_display_info();
            }
            Lifecycle::InsetsChanged if report.on_insets_changed => {
                self.report_display_info();
            }
            Lifecycle::FocusGained
                if self.config.fullscreen.enabled && self.config.fullscreen.reapply_on_focus =>
            {
                self.configure_fullscreen();
            }
            Lifecycle::Destroyed => log::debug!("Window destroyed"),
            _ => {}
        }
    }
}
