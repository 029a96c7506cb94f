//! Domain types and pure logic for the school records API.
//!
//! Nothing in this crate performs I/O: the HTTP client lives in
//! `torreblanca-client` and the observable state containers in
//! `torreblanca-hooks`.

pub mod error;
pub mod events;
pub mod query;
pub mod record;
pub mod types;
pub mod validation;
