//! Client-side filters over a fetched record collection.
//!
//! The API offers no server-side filtering; callers fetch the whole
//! collection and narrow it here. Input order is preserved.

use crate::record::Record;

/// Records whose name contains `term`, ignoring case.
pub fn search_by_name(records: Vec<Record>, term: &str) -> Vec<Record> {
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .collect()
}

/// Records whose region equals `region`, ignoring case. Records without a
/// region never match.
pub fn filter_by_region(records: Vec<Record>, region: &str) -> Vec<Record> {
    let wanted = region.to_lowercase();
    records
        .into_iter()
        .filter(|r| {
            r.region
                .as_deref()
                .is_some_and(|value| value.to_lowercase() == wanted)
        })
        .collect()
}

/// Records whose country equals `country`, ignoring case.
pub fn filter_by_country(records: Vec<Record>, country: &str) -> Vec<Record> {
    let wanted = country.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.country.to_lowercase() == wanted)
        .collect()
}
