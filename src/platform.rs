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

//! Platform specific code.
//!
//! Only Android has a window system with cutouts and hideable system bars that this crate knows
//! how to drive. Elsewhere, bring your own [`DisplayHost`].
//!
//! [`DisplayHost`]: crate::host::DisplayHost

#[cfg(android_platform)]
pub mod android;

cfg_if::cfg_if! {
    if #[cfg(android_platform)] {
        /// The [`DisplayHost`](crate::host::DisplayHost) for the current platform.
        pub type PlatformHost = android::JniHost;
    }
}
