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

//! One-off channel, used to hand a single event to a waiting future.

use std::future::Future;

use async_channel::{Receiver, Sender};

/// The receiving end of a oneoff channel.
pub(crate) struct Oneoff<T> {
    /// The channel used to receive the event.
    rx: Receiver<T>,
}

impl<T> Oneoff<T> {
    /// Wait for the event to be sent.
    ///
    /// Resolves to `None` if the sender was dropped without sending.
    pub(crate) fn recv(self) -> impl Future<Output = Option<T>> {
        async move { self.rx.recv().await.ok() }
    }
}

/// The sender end of the oneoff channel.
pub(crate) struct Complete<T> {
    /// The channel used to send the event.
    tx: Sender<T>,
}

impl<T> Complete<T> {
    /// Send the event.
    pub(crate) fn send(self, event: T) {
        self.tx.try_send(event).ok();
    }

    /// Whether the receiving future has been dropped.
    pub(crate) fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Create a pair of oneoff channels.
pub(crate) fn oneoff<T>() -> (Complete<T>, Oneoff<T>) {
    let (tx, rx) = async_channel::bounded(1);

    (Complete { tx }, Oneoff { rx })
}
