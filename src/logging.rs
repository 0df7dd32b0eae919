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

//! Logger setup. Logs go to logcat on Android and to stderr everywhere else.

use crate::config::LogConfig;

/// Install the process-wide logger.
///
/// Safe to call more than once; only the first call has any effect.
pub fn init(config: &LogConfig) {
    let level = config.level_filter();

    cfg_if::cfg_if! {
        if #[cfg(android_platform)] {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(level)
                    .with_tag(config.tag.as_str()),
            );
        } else {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(level.as_str()),
            )
            .try_init();
        }
    }

    log::debug!("Logging initialized at {}", level);
}
