//! Read hooks over the records resource: full list, primary record, and
//! a single record by id.
//!
//! Each hook auto-invokes once through [`mount`](RecordsHook::mount) and
//! can be re-run with `refetch`. Nothing is cached across hooks; every
//! invocation goes back to the server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use torreblanca_client::RecordApi;
use torreblanca_core::record::Record;
use torreblanca_core::types::DbId;

use crate::state::{ReadCell, ReadState};

// ---------------------------------------------------------------------------
// RecordsHook
// ---------------------------------------------------------------------------

/// All records in server order.
pub struct RecordsHook {
    api: Arc<dyn RecordApi>,
    cell: ReadCell<Vec<Record>>,
    mounted: AtomicBool,
}

impl RecordsHook {
    /// Create the hook. It starts in `loading` state until mounted.
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
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

    /// Fetch the collection again.
    pub async fn refetch(&self) {
        let ticket = self.cell.begin();
        let result = self.api.list_all().await.map(|envelope| envelope.results);
        self.cell.finish(ticket, result);
    }

    pub fn state(&self) -> ReadState<Vec<Record>> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReadState<Vec<Record>>> {
        self.cell.subscribe()
    }
}

// ---------------------------------------------------------------------------
// PrimaryRecordHook
// ---------------------------------------------------------------------------

/// The first record of the collection, shown on the landing page.
pub struct PrimaryRecordHook {
    api: Arc<dyn RecordApi>,
    cell: ReadCell<Option<Record>>,
    mounted: AtomicBool,
}

impl PrimaryRecordHook {
    /// Create the hook. It starts in `loading` state until mounted.
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        Self {
            api,
            cell: ReadCell::new(None, true),
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
        let result = self.api.get_primary().await;
        self.cell.finish(ticket, result);
    }

    pub fn state(&self) -> ReadState<Option<Record>> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReadState<Option<Record>>> {
        self.cell.subscribe()
    }
}

// ---------------------------------------------------------------------------
// RecordHook
// ---------------------------------------------------------------------------

/// A single record, fetched whenever its id becomes available or changes.
pub struct RecordHook {
    api: Arc<dyn RecordApi>,
    cell: ReadCell<Option<Record>>,
    id: Mutex<Option<DbId>>,
    mounted: AtomicBool,
}

impl RecordHook {
    /// Create the hook for `id`. Nothing is fetched until [`mount`](Self::mount)
    /// or [`set_id`](Self::set_id).
    pub fn new(api: Arc<dyn RecordApi>, id: Option<DbId>) -> Self {
        Self {
            api,
            cell: ReadCell::new(None, false),
            id: Mutex::new(id),
            mounted: AtomicBool::new(false),
        }
    }

    /// Currently selected id.
    pub fn id(&self) -> Option<DbId> {
        *self.id.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the current id once, if one is set.
    pub async fn mount(&self) {
        if !self.mounted.swap(true, Ordering::SeqCst) {
            if let Some(id) = self.id() {
                self.fetch(id).await;
            }
        }
    }

    /// Select a different id. Fetches when the id changed to a new value
    /// or nothing has been fetched yet; clearing it to `None` keeps the
    /// last record and fetches nothing.
    pub async fn set_id(&self, id: Option<DbId>) {
        let changed = {
            let mut current = self.id.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = *current != id;
            *current = id;
            changed
        };
        let first = !self.mounted.swap(true, Ordering::SeqCst);

        if let (true, Some(id)) = (changed || first, id) {
            self.fetch(id).await;
        }
    }

    /// Fetch the current id again. Returns `false` without fetching when
    /// no id is set.
    pub async fn refetch(&self) -> bool {
        match self.id() {
            Some(id) => {
                self.fetch(id).await;
                true
            }
            None => false,
        }
    }

    async fn fetch(&self, id: DbId) {
        let ticket = self.cell.begin();
        let result = self.api.get_by_id(id).await.map(Some);
        self.cell.finish(ticket, result);
    }

    pub fn state(&self) -> ReadState<Option<Record>> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ReadState<Option<Record>>> {
        self.cell.subscribe()
    }
}
