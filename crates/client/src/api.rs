//! Service traits consumed by the hook layer.

use async_trait::async_trait;
use torreblanca_core::events::Event;
use torreblanca_core::query;
use torreblanca_core::record::{ListEnvelope, NewRecord, Record, RecordPatch};
use torreblanca_core::types::DbId;

use crate::error::ClientError;

/// Operations on the school records resource.
///
/// Derived reads (`get_primary`, `search_by_name`, `filter_by_*`) re-fetch
/// the whole collection through [`list_all`](Self::list_all) on every call
/// and filter client-side. There is no shared cache.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// `GET {base}/` -- the full collection envelope.
    async fn list_all(&self) -> Result<ListEnvelope, ClientError>;

    /// `GET {base}/{id}/`. A 404 surfaces as [`ClientError::NotFound`].
    async fn get_by_id(&self, id: DbId) -> Result<Record, ClientError>;

    /// `POST {base}/`. Callers validate the payload beforehand.
    async fn create(&self, payload: &NewRecord) -> Result<Record, ClientError>;

    /// `PUT {base}/{id}/`. PUT is a full replace on the server, so callers
    /// should send the complete representation.
    async fn update(&self, id: DbId, payload: &RecordPatch) -> Result<Record, ClientError>;

    /// `DELETE {base}/{id}/`. The response body is ignored.
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;

    /// First record of the collection, or `None` when it is empty.
    async fn get_primary(&self) -> Result<Option<Record>, ClientError> {
        Ok(self.list_all().await?.first().cloned())
    }

    /// Records whose name contains `term`, ignoring case.
    async fn search_by_name(&self, term: &str) -> Result<Vec<Record>, ClientError> {
        let records = self.list_all().await?.results;
        Ok(query::search_by_name(records, term))
    }

    /// Records in `region`, ignoring case.
    async fn filter_by_region(&self, region: &str) -> Result<Vec<Record>, ClientError> {
        let records = self.list_all().await?.results;
        Ok(query::filter_by_region(records, region))
    }

    /// Records in `country`, ignoring case.
    async fn filter_by_country(&self, country: &str) -> Result<Vec<Record>, ClientError> {
        let records = self.list_all().await?.results;
        Ok(query::filter_by_country(records, country))
    }
}

/// Read-only access to the events feed.
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// `GET {root}/eventos/`, tolerant of the known body shapes.
    async fn list_events(&self) -> Result<Vec<Event>, ClientError>;
}
