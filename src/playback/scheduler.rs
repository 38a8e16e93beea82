use std::collections::BTreeSet;

/// Handle of one pending display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Display-refresh scheduling capability (`requestAnimationFrame` of a browser host).
///
/// A request asks for exactly one callback before the next repaint. Hosts deliver a fired
/// request by passing its id back to whoever requested it.
pub trait FrameScheduler {
    /// Request one callback before the next refresh.
    fn request(&mut self) -> RequestId;
    /// Cancel a pending request. Cancelling an unknown or already-fired id is a no-op.
    fn cancel(&mut self, id: RequestId);
}

/// Scheduler driven explicitly by the host: every call to [`ManualScheduler::fire`] is one
/// display refresh.
///
/// Used for headless playback (fixed-rate previews) and as the fake clock in tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: BTreeSet<RequestId>,
    fired: u64,
}

impl ManualScheduler {
    /// New scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests waiting for the next refresh, in request order.
    pub fn pending(&self) -> impl Iterator<Item = RequestId> + '_ {
        self.pending.iter().copied()
    }

    /// Number of pending requests.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Refreshes fired so far.
    pub fn refreshes(&self) -> u64 {
        self.fired
    }

    /// Run one refresh: drain and return every pending request in request order.
    ///
    /// Requests made while the host dispatches these callbacks wait for the following refresh.
    pub fn fire(&mut self) -> Vec<RequestId> {
        self.fired += 1;
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id);
        id
    }

    fn cancel(&mut self, id: RequestId) {
        self.pending.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
