//! Field whitelist for comment reads
//!
//! Callers name the top-level fields they want; only names on a closed
//! allow-list survive, and `id` plus `tags` are always returned.

use std::collections::BTreeSet;

/// Fields returned on every read regardless of the request
pub const ALWAYS_INCLUDED: [&str; 2] = ["id", "tags"];

/// Closed set of fields a caller may ask for
pub const REQUESTABLE: [&str; 12] = [
    "name",
    "commentNumber",
    "comment",
    "internal",
    "dateAdded",
    "commentAuthor",
    "documents",
    "review",
    "addedBy",
    "commentPeriodRef",
    "commentStatus",
    "isDeleted",
];

/// Set of root fields that will be read from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: BTreeSet<&'static str>,
}

impl Projection {
    /// always-included ∪ (requested ∩ allow-list).
    ///
    /// Unknown names are dropped rather than rejected.
    pub fn from_requested<I, S>(requested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields: BTreeSet<&'static str> = ALWAYS_INCLUDED.into_iter().collect();

        for name in requested {
            let name = name.as_ref().trim();
            match REQUESTABLE.iter().find(|allowed| **allowed == name) {
                Some(allowed) => {
                    fields.insert(*allowed);
                }
                None if ALWAYS_INCLUDED.iter().any(|always| *always == name) => {}
                None => tracing::debug!(field = name, "dropping field outside whitelist"),
            }
        }

        Projection { fields }
    }

    /// Projection with every requestable field
    pub fn full() -> Self {
        Self::from_requested(REQUESTABLE)
    }

    pub fn includes(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }
}
