//! Comment lifecycle: creation defaults, updates and publication
//!
//! Payloads are parsed into [`CommentPayload`], which has no tag fields at
//! all. Any `tags` key a caller sends is ignored by the parser, so tags can
//! only be set here at creation and toggled by [`publish`]/[`unpublish`].

use crate::domain::comment::{AuthorInternal, Comment, CommentAuthor, CommentId, Review};
use crate::domain::tags::{TagSet, TagsField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A leaf field in a payload.
///
/// `None` means the key was absent (leave the stored value alone),
/// `Some(None)` means an explicit `null` (clear it).
pub type Patch<T> = Option<Option<T>>;

fn nullable<'de, D, T>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Caller-controlled fields of a comment, used for both create and update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment_number: Patch<u64>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub internal: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub date_added: Patch<DateTime<Utc>>,
    pub comment_author: Option<AuthorPayload>,
    #[serde(default, deserialize_with = "nullable")]
    pub documents: Patch<Vec<String>>,
    pub review: Option<ReviewPayload>,
    #[serde(default, deserialize_with = "nullable")]
    pub added_by: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment_period_ref: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment_status: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_deleted: Patch<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub reviewer: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub reviewer_notes: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub reviewer_date: Patch<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub user_id: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_name: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub org_name: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Patch<String>,
    pub requested_anonymous: Option<bool>,
    pub internal: Option<AuthorInternalPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInternalPayload {
    #[serde(default, deserialize_with = "nullable")]
    pub email: Patch<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Patch<String>,
}

fn merge<T>(target: &mut Option<T>, value: Patch<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl ReviewPayload {
    fn apply_to(self, review: &mut Review) {
        merge(&mut review.reviewer, self.reviewer);
        merge(&mut review.reviewer_notes, self.reviewer_notes);
        merge(&mut review.reviewer_date, self.reviewer_date);
    }

    fn into_node(self, tags: TagsField) -> Review {
        let mut review = Review {
            tags,
            ..Review::default()
        };
        self.apply_to(&mut review);
        review
    }
}

impl AuthorInternalPayload {
    fn apply_to(self, internal: &mut AuthorInternal) {
        merge(&mut internal.email, self.email);
        merge(&mut internal.phone, self.phone);
    }

    fn into_node(self) -> AuthorInternal {
        let mut internal = AuthorInternal {
            tags: TagsField::admin_only(),
            ..AuthorInternal::default()
        };
        self.apply_to(&mut internal);
        internal
    }
}

impl AuthorPayload {
    fn apply_to(self, author: &mut CommentAuthor) {
        merge(&mut author.user_id, self.user_id);
        merge(&mut author.contact_name, self.contact_name);
        merge(&mut author.org_name, self.org_name);
        merge(&mut author.location, self.location);
        if let Some(anonymous) = self.requested_anonymous {
            author.requested_anonymous = anonymous;
        }
        if let Some(internal) = self.internal {
            match author.internal.as_mut() {
                Some(existing) => internal.apply_to(existing),
                None => author.internal = Some(internal.into_node()),
            }
        }
    }

    fn into_node(mut self, tags: TagsField) -> CommentAuthor {
        let internal = self.internal.take().unwrap_or_default().into_node();
        let mut author = CommentAuthor {
            tags,
            internal: Some(internal),
            ..CommentAuthor::default()
        };
        self.apply_to(&mut author);
        author
    }
}

/// Build a new comment from an untrusted payload, assigning all tags.
///
/// Root and review start admin-only. The author block is also public unless
/// the author asked to stay anonymous; that holds even while the root is
/// unpublished. The author's internal block is always admin-only.
pub fn establish(id: CommentId, payload: CommentPayload, now: DateTime<Utc>) -> Comment {
    let author = payload.comment_author.unwrap_or_default();
    let author_tags = if author.requested_anonymous.unwrap_or(false) {
        TagsField::admin_only()
    } else {
        TagsField::admin_and_public()
    };

    let mut comment = Comment::new(id, TagsField::admin_only());
    comment.name = payload.name.flatten();
    comment.comment_number = payload.comment_number.flatten();
    comment.comment = payload.comment.flatten();
    comment.internal = payload.internal.flatten();
    comment.date_added = Some(payload.date_added.flatten().unwrap_or(now));
    comment.documents = payload.documents.flatten();
    comment.added_by = payload.added_by.flatten();
    comment.comment_period_ref = payload.comment_period_ref.flatten();
    comment.comment_status = payload.comment_status.flatten();
    comment.is_deleted = payload.is_deleted.flatten();
    comment.review = Some(
        payload
            .review
            .unwrap_or_default()
            .into_node(TagsField::admin_only()),
    );
    comment.comment_author = Some(author.into_node(author_tags));
    comment
}

/// Merge `payload` into `comment` field by field. Tags are never touched.
///
/// An explicit `null` clears a leaf field. Protected sub-objects cannot be
/// removed this way; `null` there leaves them as they are. A protected sub-object the stored comment lacks is created admin-only.
pub fn apply_update(comment: &mut Comment, payload: CommentPayload) {
    merge(&mut comment.name, payload.name);
    merge(&mut comment.comment_number, payload.comment_number);
    merge(&mut comment.comment, payload.comment);
    merge(&mut comment.internal, payload.internal);
    merge(&mut comment.date_added, payload.date_added);
    merge(&mut comment.documents, payload.documents);
    merge(&mut comment.added_by, payload.added_by);
    merge(&mut comment.comment_period_ref, payload.comment_period_ref);
    merge(&mut comment.comment_status, payload.comment_status);
    merge(&mut comment.is_deleted, payload.is_deleted);

    if let Some(review) = payload.review {
        match comment.review.as_mut() {
            Some(existing) => review.apply_to(existing),
            None => comment.review = Some(review.into_node(TagsField::admin_only())),
        }
    }

    if let Some(author) = payload.comment_author {
        match comment.comment_author.as_mut() {
            Some(existing) => author.apply_to(existing),
            None => comment.comment_author = Some(author.into_node(TagsField::admin_only())),
        }
    }
}

/// Make the root visible to public callers. Returns whether tags changed.
pub fn publish(comment: &mut Comment) -> bool {
    comment.tags.insert(TagSet::public())
}

/// Hide the root from public callers. Returns whether tags changed.
pub fn unpublish(comment: &mut Comment) -> bool {
    comment.tags.remove(&TagSet::public())
}
