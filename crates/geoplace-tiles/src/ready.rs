//! One-shot readiness notification.
//!
//! The loader holds a [`ReadySignal`] and hands the loaded object over when it
//! is ready; the placement side holds the matching [`ReadyListener`]. Both
//! halves are consumed on use, so the notification fires and is observed at
//! most once.

use crate::error::{Error, Result};

/// Create a connected signal/listener pair.
#[must_use]
pub fn ready_signal<T>() -> (ReadySignal<T>, ReadyListener<T>) {
    let (tx, rx) = async_channel::bounded(1);
    (ReadySignal { tx }, ReadyListener { rx })
}

/// The sending half, held by whoever loads the object.
#[derive(Debug)]
pub struct ReadySignal<T> {
    tx: async_channel::Sender<T>,
}

impl<T> ReadySignal<T> {
    /// Announce that `object` is ready, handing it to the listener.
    ///
    /// If the listener has already gone away the object is dropped.
    pub fn notify(self, object: T) {
        if self.tx.try_send(object).is_err() {
            tracing::debug!("ready notification had no listener");
        }
    }
}

/// The receiving half, held by the placement side.
#[derive(Debug)]
pub struct ReadyListener<T> {
    rx: async_channel::Receiver<T>,
}

impl<T> ReadyListener<T> {
    /// Block until the object is ready.
    ///
    /// Returns [`Error::NotReady`] if the signal was dropped without firing,
    /// for example because loading failed.
    pub fn wait(self) -> Result<T> {
        self.rx.recv_blocking().map_err(|_| Error::NotReady)
    }
}
