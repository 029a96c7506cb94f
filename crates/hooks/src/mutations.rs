//! Mutation hooks: create, update, delete.
//!
//! Mutations never run on their own. The caller triggers them and reads
//! `success`/`error` from the state afterwards. Create and update check
//! the payload first; a rejected payload sets `error` and sends nothing.

use std::sync::Arc;

use tokio::sync::watch;
use torreblanca_client::{ClientError, RecordApi};
use torreblanca_core::record::{NewRecord, RecordPatch};
use torreblanca_core::types::DbId;
use torreblanca_core::validation::validate_submission;

use crate::state::{MutationCell, MutationState};

macro_rules! mutation_state_accessors {
    () => {
        pub fn state(&self) -> MutationState {
            self.cell.snapshot()
        }

        pub fn subscribe(&self) -> watch::Receiver<MutationState> {
            self.cell.subscribe()
        }

        /// Clear `error`, `success` and `loading` without sending anything.
        pub fn reset_state(&self) {
            self.cell.reset();
        }
    };
}

// ---------------------------------------------------------------------------
// CreateRecordHook
// ---------------------------------------------------------------------------

pub struct CreateRecordHook {
    api: Arc<dyn RecordApi>,
    cell: MutationCell,
}

impl CreateRecordHook {
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        Self {
            api,
            cell: MutationCell::new(),
        }
    }

    /// Validate and create a record. Returns `true` on success.
    pub async fn create(&self, payload: &NewRecord) -> bool {
        let ticket = self.cell.begin();
        let result = match validate_submission(payload) {
            Ok(()) => self.api.create(payload).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };
        self.cell.finish(ticket, result)
    }

    /// Create a record from a form draft. A draft missing required fields
    /// fails validation without sending a request.
    pub async fn create_from_draft(&self, draft: RecordPatch) -> bool {
        match NewRecord::try_from(draft) {
            Ok(payload) => self.create(&payload).await,
            Err(e) => {
                let ticket = self.cell.begin();
                self.cell.finish(ticket, Err(ClientError::from(e)))
            }
        }
    }

    mutation_state_accessors!();
}

// ---------------------------------------------------------------------------
// UpdateRecordHook
// ---------------------------------------------------------------------------

pub struct UpdateRecordHook {
    api: Arc<dyn RecordApi>,
    cell: MutationCell,
}

impl UpdateRecordHook {
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        Self {
            api,
            cell: MutationCell::new(),
        }
    }

    /// Validate and update record `id`. The server replaces the whole
    /// resource, so `payload` must carry at least name, email and phone.
    pub async fn update(&self, id: DbId, payload: &RecordPatch) -> bool {
        let ticket = self.cell.begin();
        let result = match validate_submission(payload) {
            Ok(()) => self.api.update(id, payload).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };
        self.cell.finish(ticket, result)
    }

    mutation_state_accessors!();
}

// ---------------------------------------------------------------------------
// DeleteRecordHook
// ---------------------------------------------------------------------------

pub struct DeleteRecordHook {
    api: Arc<dyn RecordApi>,
    cell: MutationCell,
}

impl DeleteRecordHook {
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        Self {
            api,
            cell: MutationCell::new(),
        }
    }

    /// Delete record `id`. Returns `true` on success.
    pub async fn delete(&self, id: DbId) -> bool {
        let ticket = self.cell.begin();
        let result = self.api.delete(id).await;
        self.cell.finish(ticket, result)
    }

    mutation_state_accessors!();
}
