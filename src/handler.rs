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

//! Handle incoming events.
//!
//! A [`Handler`] is where the embedding application registers interest in an event. There are
//! three ways to listen:
//!
//! - [`Handler::connect`] registers a callback that runs synchronously every time the event
//!   fires, until it is [disconnected](Handler::disconnect).
//! - [`Handler::wait_once`] returns a future that resolves with the next event.
//! - [`Handler::wait_many`] returns a stream of every following event.
//!
//! ```
//! use genesis_display::geometry::DisplayInfo;
//! use genesis_display::Handler;
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use std::sync::Arc;
//!
//! let handler = Handler::<DisplayInfo>::new();
//! let width = Arc::new(AtomicI32::new(0));
//!
//! let seen = width.clone();
//! handler.connect(move |info: &DisplayInfo| {
//!     seen.store(info.usable_width, Ordering::SeqCst);
//! });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use async_channel::{Receiver, Sender};
use futures_lite::Stream;
use slab::Slab;

use crate::oneoff::{oneoff, Complete};

type Listener<T> = Box<dyn FnMut(&T) + Send>;

/// Identifies a callback registered with [`Handler::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// A registration point for one kind of event.
pub struct Handler<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    /// Callbacks that run on every event.
    listeners: Slab<Listener<T>>,

    /// Futures waiting for the next event.
    once: Vec<Complete<T>>,

    /// Streams receiving every event.
    many: Vec<Sender<T>>,
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Handler")
            .field("listeners", &inner.listeners.len())
            .field("once", &inner.once.len())
            .field("many", &inner.many.len())
            .finish()
    }
}

impl<T> Default for Handler<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                listeners: Slab::new(),
                once: Vec::new(),
                many: Vec::new(),
            }),
        }
    }
}

impl<T> Handler<T> {
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone + Send + 'static> Handler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `listener` every time the event fires.
    ///
    /// The listener runs on the thread that fires the event, while the handler is locked, so it
    /// must not connect or disconnect listeners on the same handler.
    pub fn connect(&self, listener: impl FnMut(&T) + Send + 'static) -> ListenerId {
        ListenerId(self.lock().listeners.insert(Box::new(listener)))
    }

    /// Stop calling a listener. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ListenerId) -> bool {
        self.lock().listeners.try_remove(id.0).is_some()
    }

    /// The number of connected listeners.
    pub fn len(&self) -> usize {
        self.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait for the next event.
    ///
    /// Resolves to `None` only if the handler is dropped before the event fires.
    pub fn wait_once(&self) -> impl Future<Output = Option<T>> + Send + 'static {
        let (complete, oneoff) = oneoff();
        self.lock().once.push(complete);
        oneoff.recv()
    }

    /// Receive every event from now on.
    pub fn wait_many(&self) -> WaitMany<T> {
        let (tx, rx) = async_channel::unbounded();
        self.lock().many.push(tx);
        WaitMany { recv: Box::pin(rx) }
    }

    /// Deliver an event to everyone who is listening.
    ///
    /// Returns the number of connected listeners that were called.
    pub(crate) fn run_with(&self, event: &T) -> usize {
        let mut inner = self.lock();
        let Inner {
            listeners,
            once,
            many,
        } = &mut *inner;

        for (_, listener) in listeners.iter_mut() {
            listener(event);
        }

        for complete in once.drain(..) {
            if !complete.is_abandoned() {
                complete.send(event.clone());
            }
        }

        many.retain(|tx| tx.try_send(event.clone()).is_ok());

        listeners.len()
    }
}

/// A stream of events from a [`Handler`].
pub struct WaitMany<T> {
    recv: Pin<Box<Receiver<T>>>,
}

impl<T> fmt::Debug for WaitMany<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WaitMany { .. }")
    }
}

impl<T> Stream for WaitMany<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.recv.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures_lite::{future, StreamExt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn listeners_run_until_disconnected() {
        let handler = Handler::<u32>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let id = handler.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(handler.run_with(&1), 1);
        assert_eq!(handler.run_with(&2), 1);
        assert!(handler.disconnect(id));
        assert!(!handler.disconnect(id));
        assert_eq!(handler.run_with(&3), 0);

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(handler.is_empty());
    }

    #[test]
    fn wait_once_gets_the_next_event_only() {
        let handler = Handler::<u32>::new();
        let first = handler.wait_once();

        handler.run_with(&7);
        handler.run_with(&8);

        assert_eq!(future::block_on(first), Some(7));
    }

    #[test]
    fn wait_once_resolves_none_when_dropped() {
        let handler = Handler::<u32>::new();
        let waiter = handler.wait_once();
        drop(handler);

        assert_eq!(future::block_on(waiter), None);
    }

    #[test]
    fn wait_many_sees_every_event() {
        let handler = Handler::<u32>::new();
        let stream = handler.wait_many();

        for i in 0..3 {
            handler.run_with(&i);
        }
        drop(handler);

        let seen: Vec<u32> = future::block_on(stream.collect());
        assert_eq!(seen, [0, 1, 2]);
    }

    #[test]
    fn dropped_streams_are_pruned() {
        let handler = Handler::<u32>::new();
        drop(handler.wait_many());
        handler.run_with(&1);

        assert_eq!(handler.lock().many.len(), 0);
    }
}
