/// Server-assigned record identifiers.
pub type DbId = i64;
