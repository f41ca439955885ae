// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred release of native object handles.
//!
//! Interop layers may retire objects from threads that must not call the
//! releasing API themselves: a finalizer thread queues the handle here, and
//! the owning thread drains the queue before its next resource acquisition
//! and once more on shutdown.

use std::sync::Mutex;

/// A thread-safe bag of handles awaiting release on their owning thread.
///
/// [`defer`](Self::defer) may be called from any thread;
/// [`drain`](Self::drain) is meant for the single owning thread. Handles
/// are moved out while the lock is held and released after it is dropped,
/// so a release callback may itself defer further handles.
#[derive(Debug, Default)]
pub struct ReclaimQueue<H> {
    pending: Mutex<Vec<H>>,
}

impl<H> ReclaimQueue<H> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Queue a handle for release by the owning thread.
    pub fn defer(&self, handle: H) {
        self.pending.lock().unwrap().push(handle);
    }

    /// The number of handles currently awaiting release.
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Release every queued handle on the calling thread.
    ///
    /// Returns how many handles were released. Call before acquiring a new
    /// resource, and on shutdown.
    pub fn drain(&self, mut release: impl FnMut(H)) -> usize {
        let handles = std::mem::take(&mut *self.pending.lock().unwrap());
        let count = handles.len();
        for handle in handles {
            release(handle);
        }
        count
    }
}
