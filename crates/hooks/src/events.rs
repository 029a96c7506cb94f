//! Read hook for the events feed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use torreblanca_client::EventsApi;
use torreblanca_core::events::{partition_events, Event};

use crate::state::{ReadCell, ReadState};

/// Events in server order, with an upcoming/past split for display.
pub struct EventsHook {
    api: Arc<dyn EventsApi>,
    cell: ReadCell<Vec<Event>>,
    mounted: AtomicBool,
}

impl EventsHook {
    /// Create the hook. It starts in `loading` state until mounted.
    pub fn new(api: Arc<dyn EventsApi>) -> Self {
        Self {
            api,
            cell: ReadCell::new(Vec::new(), true),
            mounted: AtomicBool::new(false),
        }
    }

    /// Run the first fetch. Later calls do nothing.
    pub async fn mount(&self) {
        if !self.mounted.swap(true, Ordering::SeqCst) {
            self.refetch().await;
        }
    }

    pub async fn refetch(&self) {
        let ticket = self.cell.begin();
        let result = self.api.list_events().await;
        self.cell.finish(ticket, result);
    }

    pub fn state(&self) -> ReadState<Vec<Event>> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReadState<Vec<Event>>> {
        self.cell.subscribe()
    }

    /// Current events split into `(upcoming, past)` relative to `now`.
    pub fn split_at(&self, now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
        partition_events(&self.cell.snapshot().data, now)
    }

    /// Current events split relative to the wall clock.
    pub fn split(&self) -> (Vec<Event>, Vec<Event>) {
        self.split_at(Utc::now())
    }
}
