//! Observable state slices shared by every hook.
//!
//! Each hook owns one cell. A cell wraps a [`watch`] channel holding the
//! current snapshot and a sequence counter. Every invocation takes a
//! ticket when it starts; a resolution is applied only if its ticket is
//! still the latest, so an older request finishing late never overwrites
//! the outcome of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use torreblanca_client::ClientError;

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// State of a read hook.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadState<T> {
    /// Last successfully fetched value. Kept on failure.
    pub data: T,
    pub loading: bool,
    /// Message of the last failure, cleared when a new invocation starts.
    pub error: Option<String>,
}

/// State of a mutation hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

// ---------------------------------------------------------------------------
// ReadCell
// ---------------------------------------------------------------------------

pub(crate) struct ReadCell<T> {
    tx: watch::Sender<ReadState<T>>,
    seq: AtomicU64,
}

impl<T: Clone> ReadCell<T> {
    pub(crate) fn new(data: T, loading: bool) -> Self {
        let (tx, _) = watch::channel(ReadState {
            data,
            loading,
            error: None,
        });
        Self {
            tx,
            seq: AtomicU64::new(0),
        }
    }

    /// Mark an invocation as started and return its ticket.
    pub(crate) fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.tx.send_modify(|state| {
            ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
        });
        ticket
    }

    /// Apply the outcome of invocation `ticket` unless a newer one started.
    pub(crate) fn finish(&self, ticket: u64, result: Result<T, ClientError>) {
        self.tx.send_if_modified(|state| {
            if self.seq.load(Ordering::SeqCst) != ticket {
                tracing::debug!(ticket, "Discarding stale read resolution");
                return false;
            }
            state.loading = false;
            match result {
                Ok(data) => state.data = data,
                Err(e) => state.error = Some(e.to_string()),
            }
            true
        });
    }

    pub(crate) fn snapshot(&self) -> ReadState<T> {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ReadState<T>> {
        self.tx.subscribe()
    }
}

// ---------------------------------------------------------------------------
// MutationCell
// ---------------------------------------------------------------------------

pub(crate) struct MutationCell {
    tx: watch::Sender<MutationState>,
    seq: AtomicU64,
}

impl MutationCell {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(MutationState::default());
        Self {
            tx,
            seq: AtomicU64::new(0),
        }
    }

    pub(crate) fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.tx.send_modify(|state| {
            ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.error = None;
            state.success = false;
        });
        ticket
    }

    /// Apply the outcome of invocation `ticket` and report whether that
    /// invocation succeeded, whether or not it was still current.
    pub(crate) fn finish(&self, ticket: u64, result: Result<(), ClientError>) -> bool {
        let succeeded = result.is_ok();
        self.tx.send_if_modified(|state| {
            if self.seq.load(Ordering::SeqCst) != ticket {
                tracing::debug!(ticket, "Discarding stale mutation resolution");
                return false;
            }
            state.loading = false;
            match result {
                Ok(()) => state.success = true,
                Err(e) => state.error = Some(e.to_string()),
            }
            true
        });
        succeeded
    }

    /// Clear `error`, `success` and `loading`. Any invocation still in
    /// flight is detached from the state.
    pub(crate) fn reset(&self) {
        self.tx.send_modify(|state| {
            self.seq.fetch_add(1, Ordering::SeqCst);
            *state = MutationState::default();
        });
    }

    pub(crate) fn snapshot(&self) -> MutationState {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.tx.subscribe()
    }
}
