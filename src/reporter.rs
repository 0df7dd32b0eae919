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

//! Display size and usable-area queries.

use crate::error::{Error, Result};
use crate::geometry::{DisplayInfo, DisplaySize};
use crate::host::{Component, DisplayHost};

/// Work out the display extent and the part of it not covered by a cutout.
///
/// Only two things make this fail: the window manager is gone, or neither size query works.
/// Everything that goes wrong while looking for the cutout degrades to reporting the full
/// display as usable.
pub fn query_display_info<H: DisplayHost + ?Sized>(host: &H) -> Result<DisplayInfo> {
    log::debug!("Getting display info");

    if !host.has_window_manager() {
        log::error!("Failed to get window manager");
        return Err(Error::Unavailable(Component::WindowManager));
    }

    let size = display_size(host)?;
    Ok(usable_area(host, size))
}

/// The real display size, or the approximate one if that fails.
fn display_size<H: DisplayHost + ?Sized>(host: &H) -> Result<DisplaySize> {
    match host.real_display_size() {
        Ok(size) => {
            log::debug!("Real display size: {}", size);
            Ok(size)
        }
        Err(real_err) => match host.display_size() {
            Ok(size) => {
                log::debug!("Display size (fallback after {}): {}", real_err, size);
                Ok(size)
            }
            Err(err) => {
                log::error!("Failed to get display size: {}", err);
                Err(err)
            }
        },
    }
}

fn usable_area<H: DisplayHost + ?Sized>(host: &H, size: DisplaySize) -> DisplayInfo {
    let insets = match host.cutout_insets() {
        Ok(insets) => insets,
        Err(Error::Unavailable(component)) if component.is_unexpected() => {
            log::error!("The {} is unavailable, using full display", component);
            return DisplayInfo::full(size);
        }
        Err(Error::Unavailable(Component::DisplayCutout)) => {
            log::debug!("No display cutout found");
            return DisplayInfo::full(size);
        }
        Err(err) => {
            log::debug!("{}, using full display", err);
            return DisplayInfo::full(size);
        }
    };

    let info = DisplayInfo::with_insets(size, insets);
    log::debug!("Display cutout insets - {}", insets);
    log::debug!(
        "Usable area: {}x{} at offset ({}, {})",
        info.usable_width,
        info.usable_height,
        info.usable_x_offset,
        info.usable_y_offset
    );

    info
}
