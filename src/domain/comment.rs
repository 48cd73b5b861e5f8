//! Comment document tree
//!
//! A comment is a root document with three protected sub-objects:
//! `review`, `commentAuthor` and `commentAuthor.internal`. Each protected
//! node carries its own [`TagsField`].

use crate::domain::tags::TagsField;
use crate::domain::whitelist::Projection;
use crate::error::{GateError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[0-9a-f]{32}$").unwrap())
}

/// Identifier of a stored comment (32 lowercase hex characters)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        CommentId(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Validate and normalize a caller-supplied id
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        if !id_regex().is_match(&normalized) {
            return Err(GateError::InvalidId(input.to_string()));
        }
        Ok(CommentId(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root comment document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub tags: TagsField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Free-form staff note. Not tag protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_author: Option<CommentAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_period_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

impl Comment {
    /// Empty comment carrying only an id and tags
    pub fn new(id: CommentId, tags: TagsField) -> Self {
        Comment {
            id,
            tags,
            name: None,
            comment_number: None,
            comment: None,
            internal: None,
            date_added: None,
            comment_author: None,
            documents: None,
            review: None,
            added_by: None,
            comment_period_ref: None,
            comment_status: None,
            is_deleted: None,
        }
    }

    /// Clear every root field the projection does not include.
    /// `id` and `tags` always survive.
    pub fn project(&mut self, projection: &Projection) {
        fn keep<T>(field: &mut Option<T>, projection: &Projection, name: &str) {
            if !projection.includes(name) {
                *field = None;
            }
        }

        keep(&mut self.name, projection, "name");
        keep(&mut self.comment_number, projection, "commentNumber");
        keep(&mut self.comment, projection, "comment");
        keep(&mut self.internal, projection, "internal");
        keep(&mut self.date_added, projection, "dateAdded");
        keep(&mut self.comment_author, projection, "commentAuthor");
        keep(&mut self.documents, projection, "documents");
        keep(&mut self.review, projection, "review");
        keep(&mut self.added_by, projection, "addedBy");
        keep(&mut self.comment_period_ref, projection, "commentPeriodRef");
        keep(&mut self.comment_status, projection, "commentStatus");
        keep(&mut self.is_deleted, projection, "isDeleted");
    }
}

/// Moderation state of a comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: TagsField,
}

/// Identifying details of whoever submitted the comment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub requested_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<AuthorInternal>,
    #[serde(default)]
    pub tags: TagsField,
}

/// Author contact details that only administrators may read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInternal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub tags: TagsField,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tags::TagsField;

    fn sample() -> Comment {
        let mut comment = Comment::new(
            CommentId::parse("0123456789abcdef0123456789abcdef").unwrap(),
            TagsField::admin_only(),
        );
        comment.name = Some("Jane".to_string());
        comment.comment = Some("Please reconsider the haul road".to_string());
        comment.internal = Some("flagged".to_string());
        comment.review = Some(Review::default());
        comment
    }

    #[test]
    fn test_generated_ids_are_valid() {
        let id = CommentId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert_eq!(CommentId::parse(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = CommentId::parse(" 0123456789ABCDEF0123456789abcdef ").unwrap();
        assert_eq!(id.as_str(), "0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for bad in [
            "",
            "xyz",
            "../../etc/passwd",
            "0123456789abcdef",
            "g123456789abcdef0123456789abcdef",
        ] {
            assert!(matches!(CommentId::parse(bad), Err(GateError::InvalidId(_))));
        }
    }

    #[test]
    fn test_project_clears_unrequested_fields() {
        let mut comment = sample();
        comment.project(&Projection::from_requested(["name"]));

        assert_eq!(comment.name.as_deref(), Some("Jane"));
        assert!(comment.comment.is_none());
        assert!(comment.internal.is_none());
        assert!(comment.review.is_none());
        assert_eq!(comment.tags, TagsField::admin_only());
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_absent() {
        let mut comment = sample();
        comment.comment_period_ref = Some("period-1".to_string());
        let value = serde_json::to_value(&comment).unwrap();

        assert_eq!(value["commentPeriodRef"], "period-1");
        assert_eq!(value["tags"], serde_json::json!([["sysadmin"]]));
        assert_eq!(value["review"]["tags"], serde_json::json!([]));
        assert!(value.get("commentAuthor").is_none());
    }

    #[test]
    fn test_missing_tags_deserialize_as_empty() {
        let comment: Comment = serde_json::from_str(
            r#"{"id": "0123456789abcdef0123456789abcdef", "review": {"reviewer": "sam"}}"#,
        )
        .unwrap();
        assert!(comment.tags.is_empty());
        assert!(comment.review.unwrap().tags.is_empty());
    }
}
