// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted by the queue engine
#[derive(Debug, Clone)]
pub enum QueueEvent {
    /// The caller's view of the download list is stale and should be
    /// redrawn. Emitted exactly once per successful reload, never when the
    /// reload was skipped or failed.
    ViewUpdateRequired,

    /// The queue file exists but could not be read; the reload continued
    /// with the in-memory entries only.
    QueueFileUnreadable { path: PathBuf, reason: String },

    /// The local file of a pruned download could not be removed. The
    /// queue file has already been rewritten at this point, so this is a
    /// cleanliness problem rather than lost state.
    FileRemovalFailed { path: PathBuf, reason: String },
}

/// Trait for observing queue engine events.
///
/// Implementations can use this to refresh a view, print diagnostics,
/// or collect statistics.
pub trait QueueObserver: Send + Sync {
    /// Handle a queue event
    fn notify(&self, event: QueueEvent);
}

/// A shared reference to a queue observer
pub type SharedQueueObserver = Arc<dyn QueueObserver>;

/// A no-op observer that silently ignores all events.
/// Useful for tests or headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl QueueObserver for NoopObserver {
    fn notify(&self, _event: QueueEvent) {
        // Intentionally empty
    }
}

impl NoopObserver {
    /// Create a new NoopObserver wrapped in an Arc
    pub fn shared() -> SharedQueueObserver {
        Arc::new(Self)
    }
}
