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

#![doc = include_str!("../README.md")]

// Private modules.
mod handler;
mod oneoff;
mod reporter;

pub mod config;
pub mod error;
pub mod fullscreen;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod native;
pub mod platform;
pub mod shell;

pub use handler::{Handler, ListenerId, WaitMany};
pub use reporter::query_display_info;
pub use shell::{Lifecycle, Shell};
