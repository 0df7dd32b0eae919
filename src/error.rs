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

//! Error type shared by the host, reporter and configuration layers.

use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::host::{ApiLevel, Component};

/// Convenient result type for this crate.
pub type Result<T> = StdResult<T, Error>;

/// Everything that can go wrong while talking to the host.
///
/// None of these escape the [`Shell`]; it turns them into log lines and default geometry.
///
/// [`Shell`]: crate::shell::Shell
#[derive(Debug, Error)]
pub enum Error {
    /// A host object the operation depends on does not exist right now.
    #[error("{0} is unavailable")]
    Unavailable(Component),

    /// The host is too old for the requested feature.
    #[error("{feature} requires API level {required}, host is at {actual}")]
    Unsupported {
        feature: &'static str,
        required: ApiLevel,
        actual: ApiLevel,
    },

    /// The host could not tell us how big the display is.
    #[error("display size query failed: {0}")]
    SizeQuery(String),

    /// The configuration file is not valid TOML or has invalid values.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JNI call failed or left a Java exception pending.
    #[error("JNI call failed: {0}")]
    Jni(String),
}

#[cfg(android_platform)]
impl From<jni::errors::Error> for Error {
    fn from(err: jni::errors::Error) -> Self {
        Self::Jni(err.to_string())
    }
}

impl Error {
    /// The missing component, if this error is about one.
    pub fn unavailable(&self) -> Option<Component> {
        match self {
            Self::Unavailable(component) => Some(*component),
            _ => None,
        }
    }
}
