//! Observable state containers over the records and events services.
//!
//! One hook per operation family. Read hooks (`RecordsHook`,
//! `PrimaryRecordHook`, `RecordHook`, `EventsHook`) expose
//! `{data, loading, error}`; mutation hooks (`CreateRecordHook`,
//! `UpdateRecordHook`, `DeleteRecordHook`) expose `{loading, error,
//! success}`. Errors reach consumers only as message strings. Nothing is
//! retried automatically.

pub mod events;
pub mod management;
pub mod mutations;
pub mod records;
pub mod state;

pub use events::EventsHook;
pub use management::{RecordForm, RecordManagement};
pub use mutations::{CreateRecordHook, DeleteRecordHook, UpdateRecordHook};
pub use records::{PrimaryRecordHook, RecordHook, RecordsHook};
pub use state::{MutationState, ReadState};
