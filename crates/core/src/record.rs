//! School record entity models and DTOs.
//!
//! The remote API uses Spanish field names on the wire (`nombre`,
//! `direccion`, `telefono`, `pais`, `horario`). The structs here expose
//! English names and map them with `serde(rename)`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::validate_submission;

// ---------------------------------------------------------------------------
// Entity structs (match API resources)
// ---------------------------------------------------------------------------

/// A school record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: DbId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default, deserialize_with = "null_as_empty")]
    pub address: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "pais", default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logo: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logo_url: String,
    #[serde(rename = "horario", default)]
    pub schedule: Option<String>,
}

/// Paginated wrapper returned by the collection endpoint.
///
/// `results` keeps the order the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Record>,
}

impl ListEnvelope {
    /// First record of the page, if any.
    pub fn first(&self) -> Option<&Record> {
        self.results.first()
    }
}

// ---------------------------------------------------------------------------
// Create / Update DTOs
// ---------------------------------------------------------------------------

/// Payload for creating a record. Carries no `id`; the server assigns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "pais", default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// Payload for updating a record. All fields are optional; `None` fields
/// are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "pais", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// Editable fields of a record, used by form-style editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Name,
    Address,
    Email,
    Phone,
    Country,
    Region,
    Logo,
    LogoUrl,
    Schedule,
}

impl RecordPatch {
    /// Set a single field to `value`.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            RecordField::Name => self.name = value,
            RecordField::Address => self.address = value,
            RecordField::Email => self.email = value,
            RecordField::Phone => self.phone = value,
            RecordField::Country => self.country = value,
            RecordField::Region => self.region = value,
            RecordField::Logo => self.logo = value,
            RecordField::LogoUrl => self.logo_url = value,
            RecordField::Schedule => self.schedule = value,
        }
    }

    /// Overlay every field that is set in `other` onto `self`.
    pub fn apply(&mut self, other: RecordPatch) {
        let RecordPatch {
            name,
            address,
            email,
            phone,
            country,
            region,
            logo,
            logo_url,
            schedule,
        } = other;
        overlay(&mut self.name, name);
        overlay(&mut self.address, address);
        overlay(&mut self.email, email);
        overlay(&mut self.phone, phone);
        overlay(&mut self.country, country);
        overlay(&mut self.region, region);
        overlay(&mut self.logo, logo);
        overlay(&mut self.logo_url, logo_url);
        overlay(&mut self.schedule, schedule);
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn overlay(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}

impl From<&Record> for RecordPatch {
    fn from(record: &Record) -> Self {
        Self {
            name: Some(record.name.clone()),
            address: Some(record.address.clone()),
            email: Some(record.email.clone()),
            phone: Some(record.phone.clone()),
            country: Some(record.country.clone()),
            region: record.region.clone(),
            logo: Some(record.logo.clone()),
            logo_url: Some(record.logo_url.clone()),
            schedule: record.schedule.clone(),
        }
    }
}

impl From<NewRecord> for RecordPatch {
    fn from(record: NewRecord) -> Self {
        Self {
            name: Some(record.name),
            address: Some(record.address),
            email: Some(record.email),
            phone: Some(record.phone),
            country: Some(record.country),
            region: record.region,
            logo: Some(record.logo),
            logo_url: Some(record.logo_url),
            schedule: record.schedule,
        }
    }
}

impl TryFrom<RecordPatch> for NewRecord {
    type Error = CoreError;

    /// Build a create payload from a draft. Fails when the draft is not
    /// valid for submission; unset free-text fields become empty strings.
    fn try_from(patch: RecordPatch) -> Result<Self, Self::Error> {
        validate_submission(&patch)?;
        Ok(Self {
            name: patch.name.unwrap_or_default(),
            address: patch.address.unwrap_or_default(),
            email: patch.email.unwrap_or_default(),
            phone: patch.phone.unwrap_or_default(),
            country: patch.country.unwrap_or_default(),
            region: patch.region,
            logo: patch.logo.unwrap_or_default(),
            logo_url: patch.logo_url.unwrap_or_default(),
            schedule: patch.schedule,
        })
    }
}

/// Deserialize a string that the server may send as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
