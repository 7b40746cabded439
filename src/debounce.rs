//! Debounce-run keyed on a caller-owned timer slot
//!
//! A [`TimerSlot`] holds at most one pending run. While it is pending,
//! further calls are dropped (not queued, not rescheduled). The slot is
//! released once the scheduled callback has finished.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::callback::Callback;
use crate::error::{HelperError, Result};

/// Wait used when `debounce_run` gets no explicit duration
pub const DEFAULT_WAIT: Duration = Duration::from_millis(10);

#[derive(Debug, Default)]
struct SlotState {
    /// Incremented on every schedule, so stale tasks can't clear newer entries
    next_ticket: u64,
    pending: Option<Pending>,
}

impl SlotState {
    fn is_busy(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.handle.is_finished())
    }
}

#[derive(Debug)]
struct Pending {
    ticket: u64,
    handle: JoinHandle<()>,
}

/// Single-slot holder for a pending debounced run
///
/// Dropping the slot aborts whatever is still pending.
#[derive(Debug, Default)]
pub struct TimerSlot {
    state: Arc<Mutex<SlotState>>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a scheduled run has not finished
    pub fn is_pending(&self) -> bool {
        self.state.lock().is_busy()
    }

    /// Abort the pending run, if any
    ///
    /// Returns whether something was pending.
    pub fn cancel(&self) -> bool {
        let taken = self.state.lock().pending.take();
        match taken {
            Some(pending) => {
                debug!(ticket = pending.ticket, "debounce: pending run cancelled");
                pending.handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Clears the slot when the scheduled task ends, including on panic or abort
struct SlotRelease {
    state: Weak<Mutex<SlotState>>,
    ticket: u64,
}

impl Drop for SlotRelease {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = state.lock();
        if state.pending.as_ref().is_some_and(|p| p.ticket == self.ticket) {
            state.pending = None;
        }
    }
}

/// Schedule `callback` after `wait` unless `slot` already has a pending run
///
/// Returns `Ok(true)` when the callback was scheduled and `Ok(false)` when it
/// was dropped because the slot was busy. Must be called inside a Tokio runtime.
pub fn debounce_run<T>(slot: &TimerSlot, callback: Callback<T>, wait: Option<Duration>) -> Result<bool>
where
    T: Send + 'static,
{
    let runtime = Handle::try_current().map_err(|_| HelperError::NoRuntime)?;

    // Held across spawn + store so the task can't release before it is recorded
    let mut state = slot.state.lock();
    if state.is_busy() {
        debug!(kind = ?callback.kind(), "debounce: run already pending, call dropped");
        return Ok(false);
    }

    let wait = wait.unwrap_or(DEFAULT_WAIT);
    let ticket = state.next_ticket;
    state.next_ticket += 1;

    let weak = Arc::downgrade(&slot.state);
    let mut callback = callback;
    let handle = runtime.spawn(async move {
        let _release = SlotRelease { state: weak, ticket };
        tokio::time::sleep(wait).await;
        callback.call().await;
    });

    debug!(ticket, ?wait, "debounce: run scheduled");
    state.pending = Some(Pending { ticket, handle });
    Ok(true)
}
