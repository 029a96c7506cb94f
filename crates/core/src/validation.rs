//! Client-side submission checks for record payloads.
//!
//! Pure functions, no I/O. Passing these checks does not replace
//! server-side validation; responses from the API stay authoritative.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::record::{NewRecord, Record, RecordPatch};

/// `local@domain.tld`, no whitespace, exactly one `@`.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Read access to the fields checked before submission.
pub trait SubmissionFields {
    fn name(&self) -> Option<&str>;
    fn email(&self) -> Option<&str>;
    fn phone(&self) -> Option<&str>;
}

impl SubmissionFields for Record {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }
}

impl SubmissionFields for NewRecord {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }
}

impl SubmissionFields for RecordPatch {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

/// Check that `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a payload, returning the first failing reason.
///
/// Checks run in order: name, email, phone.
pub fn validate_submission(payload: &impl SubmissionFields) -> Result<(), CoreError> {
    if is_blank(payload.name()) {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    if !payload.email().is_some_and(is_valid_email) {
        return Err(CoreError::Validation(
            "a valid email is required".to_string(),
        ));
    }
    if is_blank(payload.phone()) {
        return Err(CoreError::Validation("phone is required".to_string()));
    }
    Ok(())
}

/// Boolean form of [`validate_submission`]. The rejection reason is
/// logged, not returned.
pub fn is_valid_submission(payload: &impl SubmissionFields) -> bool {
    match validate_submission(payload) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Record payload rejected");
            false
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
