//! Admin controller for the records screen.
//!
//! [`RecordManagement`] wires the list, primary, and mutation hooks to a
//! form: start a new draft or edit an existing record, save it through
//! the matching mutation, and refetch the list after every successful
//! change.

use std::sync::Arc;

use tokio::sync::watch;
use torreblanca_client::RecordApi;
use torreblanca_core::record::{Record, RecordField, RecordPatch};
use torreblanca_core::types::DbId;

use crate::mutations::{CreateRecordHook, DeleteRecordHook, UpdateRecordHook};
use crate::records::{PrimaryRecordHook, RecordsHook};

/// Country preset on new drafts.
pub const DEFAULT_COUNTRY: &str = "Chile";

/// Form state of the admin screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    /// Record being edited; `None` while drafting a new one.
    pub selected: Option<Record>,
    pub editing: bool,
    pub draft: RecordPatch,
}

pub struct RecordManagement {
    records: RecordsHook,
    primary: PrimaryRecordHook,
    create: CreateRecordHook,
    update: UpdateRecordHook,
    delete: DeleteRecordHook,
    form: watch::Sender<RecordForm>,
}

impl RecordManagement {
    pub fn new(api: Arc<dyn RecordApi>) -> Self {
        let (form, _) = watch::channel(RecordForm::default());
        Self {
            records: RecordsHook::new(api.clone()),
            primary: PrimaryRecordHook::new(api.clone()),
            create: CreateRecordHook::new(api.clone()),
            update: UpdateRecordHook::new(api.clone()),
            delete: DeleteRecordHook::new(api),
            form,
        }
    }

    /// Mount the list and primary hooks.
    pub async fn mount(&self) {
        tokio::join!(self.records.mount(), self.primary.mount());
    }

    pub fn records(&self) -> &RecordsHook {
        &self.records
    }

    pub fn primary(&self) -> &PrimaryRecordHook {
        &self.primary
    }

    pub fn create_hook(&self) -> &CreateRecordHook {
        &self.create
    }

    pub fn update_hook(&self) -> &UpdateRecordHook {
        &self.update
    }

    pub fn delete_hook(&self) -> &DeleteRecordHook {
        &self.delete
    }

    pub fn form(&self) -> RecordForm {
        self.form.borrow().clone()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<RecordForm> {
        self.form.subscribe()
    }

    /// Open an empty draft for a new record.
    pub fn begin_create(&self) {
        let draft = RecordPatch {
            name: Some(String::new()),
            address: Some(String::new()),
            email: Some(String::new()),
            phone: Some(String::new()),
            country: Some(DEFAULT_COUNTRY.to_string()),
            logo: Some(String::new()),
            logo_url: Some(String::new()),
            ..Default::default()
        };
        self.form.send_replace(RecordForm {
            selected: None,
            editing: true,
            draft,
        });
    }

    /// Open `record` for editing.
    pub fn begin_edit(&self, record: Record) {
        self.form.send_replace(RecordForm {
            draft: RecordPatch::from(&record),
            selected: Some(record),
            editing: true,
        });
    }

    pub fn set_field(&self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        self.form.send_modify(|form| form.draft.set(field, value));
    }

    /// Leave editing and drop the draft.
    pub fn cancel(&self) {
        self.form.send_replace(RecordForm::default());
    }

    /// Save the draft: update the selected record, or create a new one.
    /// On success editing ends and the list is refetched.
    pub async fn save(&self) -> bool {
        let form = self.form();
        let saved = match &form.selected {
            Some(record) => self.update.update(record.id, &form.draft).await,
            None => self.create.create_from_draft(form.draft.clone()).await,
        };

        if saved {
            let created = form.selected.is_none();
            self.form.send_modify(|form| {
                form.editing = false;
                if created {
                    form.draft = RecordPatch::default();
                }
            });
            self.records.refetch().await;
        }
        saved
    }

    /// Delete `id` and refetch the list on success. Confirmation is the
    /// caller's job.
    pub async fn delete(&self, id: DbId) -> bool {
        let deleted = self.delete.delete(id).await;
        if deleted {
            self.records.refetch().await;
        }
        deleted
    }
}
