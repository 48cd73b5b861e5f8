//! Tag sets, tag fields and caller role sets
//!
//! A [`TagSet`] is a conjunction of roles; a [`TagsField`] is a disjunction of
//! tag sets. A caller presenting a [`RoleSet`] is authorized against a node
//! when at least one tag set on that node is fully contained in its roles.
//!
//! # Examples
//!
//! ```
//! use commentgate::domain::tags::{RoleSet, TagsField};
//!
//! let tags = TagsField::admin_and_public();
//! assert!(tags.any_authorized(&RoleSet::public()));
//! assert!(!TagsField::admin_only().any_authorized(&RoleSet::public()));
//! ```

use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Administrative role; every protected node carries it.
pub const SYSADMIN: &str = "sysadmin";

/// Role held by anonymous callers and toggled by publish/unpublish.
pub const PUBLIC: &str = "public";

/// Roles presented by a caller for a single authorization decision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    /// Role set of an unauthenticated caller
    pub fn public() -> Self {
        Self::from_iter([PUBLIC])
    }

    /// Parse a comma-separated role list (e.g. "sysadmin, reviewer").
    /// Blank entries are ignored.
    pub fn parse(input: &str) -> Self {
        input
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .collect()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RoleSet(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<&str> = self.0.iter().map(String::as_str).collect();
        write!(f, "{{{}}}", roles.join(", "))
    }
}

/// A non-empty set of roles that must all be held by the caller
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Build a tag set, rejecting an empty collection.
    ///
    /// An empty set would be a subset of every role set and grant access to
    /// everyone, so it is not representable.
    pub fn new<I, S>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: BTreeSet<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(GateError::EmptyTagSet);
        }
        Ok(TagSet(roles))
    }

    /// Single-role tag set
    pub fn single(role: impl Into<String>) -> Self {
        TagSet(BTreeSet::from([role.into()]))
    }

    pub fn sysadmin() -> Self {
        Self::single(SYSADMIN)
    }

    pub fn public() -> Self {
        Self::single(PUBLIC)
    }

    /// True iff every role in this tag set appears in `roles`
    pub fn is_subset_of(&self, roles: &RoleSet) -> bool {
        self.0.iter().all(|role| roles.contains(role))
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<&str> = self.roles().collect();
        write!(f, "{{{}}}", roles.join(", "))
    }
}

/// Ordered list of tag sets attached to a protected node.
///
/// Stored as an array of string arrays, e.g. `[["sysadmin"], ["public"]]`.
/// Loading never fails: an entry that is not a non-empty array of strings is
/// discarded, and a value that is not an array at all loads as an empty
/// field. Malformed data can only narrow visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct TagsField(Vec<TagSet>);

impl TagsField {
    pub fn new(sets: Vec<TagSet>) -> Self {
        let mut field = TagsField::default();
        for set in sets {
            field.insert(set);
        }
        field
    }

    /// `[{"sysadmin"}]`
    pub fn admin_only() -> Self {
        TagsField(vec![TagSet::sysadmin()])
    }

    /// `[{"sysadmin"}, {"public"}]`
    pub fn admin_and_public() -> Self {
        TagsField(vec![TagSet::sysadmin(), TagSet::public()])
    }

    /// True iff at least one tag set is contained in `roles`.
    /// An empty field authorizes nobody.
    pub fn any_authorized(&self, roles: &RoleSet) -> bool {
        self.0.iter().any(|set| set.is_subset_of(roles))
    }

    pub fn contains(&self, set: &TagSet) -> bool {
        self.0.contains(set)
    }

    /// Whether the `{"public"}` tag set is attached
    pub fn is_public(&self) -> bool {
        self.contains(&TagSet::public())
    }

    /// Append `set` unless already present. Returns whether it was added.
    pub fn insert(&mut self, set: TagSet) -> bool {
        if self.contains(&set) {
            return false;
        }
        self.0.push(set);
        true
    }

    /// Remove `set` if present. Returns whether it was removed.
    pub fn remove(&mut self, set: &TagSet) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != set);
        self.0.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagSet> {
        self.0.iter()
    }
}

fn tag_set_from_value(value: Value) -> Option<TagSet> {
    let Value::Array(entries) = value else {
        return None;
    };
    let roles = entries
        .into_iter()
        .map(|entry| match entry {
            Value::String(role) => Some(role),
            _ => None,
        })
        .collect::<Option<Vec<String>>>()?;
    TagSet::new(roles).ok()
}

impl From<Value> for TagsField {
    fn from(raw: Value) -> Self {
        let mut field = TagsField::default();
        let Value::Array(sets) = raw else {
            tracing::warn!("discarding stored tags that are not a list of tag sets");
            return field;
        };
        for value in sets {
            match tag_set_from_value(value) {
                Some(set) => {
                    field.insert(set);
                }
                None => tracing::warn!("discarding malformed tag set from stored tags"),
            }
        }
        field
    }
}
