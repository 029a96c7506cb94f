//! HTTP client for the school records and events API.
//!
//! [`RecordService`] and [`EventsService`] wrap the remote REST resources
//! using [`reqwest`]. Both are stateless: every call is one round trip and
//! nothing is cached between calls. The [`RecordApi`] and [`EventsApi`]
//! traits are the seam the hook layer programs against.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
mod http;
pub mod records;

pub use api::{EventsApi, RecordApi};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use events::EventsService;
pub use records::RecordService;
