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

//! The C-ABI side of the display-ready notification.
//!
//! Native code that is not written in Rust registers a plain function pointer, either per shell
//! through [`Shell::connect_native`] or process-wide through the exported
//! [`genesis_display_set_callback`]. The arguments are, in order: display width, display height,
//! usable width, usable height, usable x-offset, usable y-offset.
//!
//! [`Shell::connect_native`]: crate::shell::Shell::connect_native

use std::sync::{Mutex, PoisonError};

use crate::geometry::DisplayInfo;

/// `onDisplayInfoReady(displayWidth, displayHeight, usableWidth, usableHeight, usableXOffset,
/// usableYOffset)`.
pub type NativeCallback = extern "C" fn(i32, i32, i32, i32, i32, i32);

static REGISTERED: Mutex<Option<NativeCallback>> = Mutex::new(None);

/// Call `callback` with the six fields of `info`.
pub fn deliver(callback: NativeCallback, info: &DisplayInfo) {
    let [display_width, display_height, usable_width, usable_height, x_offset, y_offset] =
        info.into_raw();
    callback(
        display_width,
        display_height,
        usable_width,
        usable_height,
        x_offset,
        y_offset,
    );
}

/// The callback registered with [`genesis_display_set_callback`], if any.
pub fn registered_callback() -> Option<NativeCallback> {
    *REGISTERED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Forward `info` to the process-wide callback. Returns `false` if none is registered.
pub fn forward_to_registered(info: &DisplayInfo) -> bool {
    match registered_callback() {
        Some(callback) => {
            deliver(callback, info);
            true
        }
        None => {
            log::trace!("No native display callback registered");
            false
        }
    }
}

/// Register (or, with a null pointer, clear) the process-wide display-ready callback.
#[no_mangle]
pub extern "C" fn genesis_display_set_callback(callback: Option<NativeCallback>) {
    *REGISTERED.lock().unwrap_or_else(PoisonError::into_inner) = callback;
    log::debug!(
        "Native display callback {}",
        if callback.is_some() { "registered" } else { "cleared" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicI32, Ordering};

    static LAST_Y_OFFSET: AtomicI32 = AtomicI32::new(-1);

    extern "C" fn record(_: i32, _: i32, _: i32, _: i32, _: i32, y_offset: i32) {
        LAST_Y_OFFSET.store(y_offset, Ordering::SeqCst);
    }

    #[test]
    fn registered_callback_receives_fields_in_order() {
        genesis_display_set_callback(Some(record));
        let info = DisplayInfo::from_raw([2400, 1080, 2400, 1032, 0, 48]);

        assert!(forward_to_registered(&info));
        assert_eq!(LAST_Y_OFFSET.load(Ordering::SeqCst), 48);

        genesis_display_set_callback(None);
        assert!(registered_callback().is_none());
        assert!(!forward_to_registered(&info));
    }
}
