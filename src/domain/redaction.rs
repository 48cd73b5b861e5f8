//! Tag-based redaction of comment trees
//!
//! Every protected node is checked against the caller's roles using its own
//! tags. An authorized node is kept and its protected children are checked in
//! turn; an unauthorized node is dropped together with everything beneath it,
//! whatever the children's own tags say.
//!
//! # Examples
//!
//! ```
//! use commentgate::domain::comment::{Comment, CommentId};
//! use commentgate::domain::redaction::redact;
//! use commentgate::domain::tags::{RoleSet, TagsField};
//!
//! let draft = Comment::new(CommentId::generate(), TagsField::admin_only());
//! assert!(redact(draft, &RoleSet::public()).is_none());
//! ```

use crate::domain::comment::{AuthorInternal, Comment, CommentAuthor, Review};
use crate::domain::tags::{RoleSet, TagsField};
use std::fmt;

/// Which protected node a check applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Review,
    CommentAuthor,
    AuthorInternal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Root => "root",
            NodeKind::Review => "review",
            NodeKind::CommentAuthor => "commentAuthor",
            NodeKind::AuthorInternal => "commentAuthor.internal",
        };
        f.write_str(name)
    }
}

/// A node that carries its own tags and may have protected children
pub trait Guarded: Sized {
    const KIND: NodeKind;

    fn tags(&self) -> &TagsField;

    /// Redact the protected children of an already authorized node
    fn descend(self, roles: &RoleSet) -> Self;
}

/// Keep `node` (with its children redacted) if `roles` may see it
pub fn redact<N: Guarded>(node: N, roles: &RoleSet) -> Option<N> {
    if node.tags().any_authorized(roles) {
        Some(node.descend(roles))
    } else {
        let kind = N::KIND;
        tracing::debug!(node = %kind, "pruning unauthorized node");
        None
    }
}

/// Redact each candidate independently, dropping unauthorized documents.
///
/// Callers must not rely on the output order.
pub fn redact_all(candidates: Vec<Comment>, roles: &RoleSet) -> Vec<Comment> {
    let total = candidates.len();
    let visible: Vec<Comment> = candidates
        .into_iter()
        .filter_map(|comment| {
            let id = comment.id.clone();
            let kept = redact(comment, roles);
            if kept.is_none() {
                tracing::debug!(comment = %id, "comment not visible to caller");
            }
            kept
        })
        .collect();
    tracing::debug!(total, visible = visible.len(), "redacted candidates");
    visible
}

fn redact_child<N: Guarded>(child: Option<N>, roles: &RoleSet) -> Option<N> {
    child.and_then(|node| redact(node, roles))
}

impl Guarded for Comment {
    const KIND: NodeKind = NodeKind::Root;

    fn tags(&self) -> &TagsField {
        &self.tags
    }

    fn descend(mut self, roles: &RoleSet) -> Self {
        self.review = redact_child(self.review, roles);
        self.comment_author = redact_child(self.comment_author, roles);
        self
    }
}

impl Guarded for Review {
    const KIND: NodeKind = NodeKind::Review;

    fn tags(&self) -> &TagsField {
        &self.tags
    }

    fn descend(self, _roles: &RoleSet) -> Self {
        self
    }
}

impl Guarded for CommentAuthor {
    const KIND: NodeKind = NodeKind::CommentAuthor;

    fn tags(&self) -> &TagsField {
        &self.tags
    }

    fn descend(mut self, roles: &RoleSet) -> Self {
        self.internal = redact_child(self.internal, roles);
        self
    }
}

impl Guarded for AuthorInternal {
    const KIND: NodeKind = NodeKind::AuthorInternal;

    fn tags(&self) -> &TagsField {
        &self.tags
    }

    fn descend(self, _roles: &RoleSet) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comment::CommentId;
    use crate::domain::tags::TagSet;

    fn public_only() -> TagsField {
        TagsField::new(vec![TagSet::public()])
    }

    fn roles(list: &[&str]) -> RoleSet {
        list.iter().copied().collect()
    }

    fn comment(root: TagsField) -> Comment {
        let mut comment = Comment::new(CommentId::generate(), root);
        comment.name = Some("Jane".to_string());
        comment.review = Some(Review {
            reviewer_notes: Some("needs follow-up".to_string()),
            tags: TagsField::admin_only(),
            ..Review::default()
        });
        comment.comment_author = Some(CommentAuthor {
            contact_name: Some("Jane Doe".to_string()),
            tags: TagsField::admin_and_public(),
            internal: Some(AuthorInternal {
                email: Some("jane@example.com".to_string()),
                tags: TagsField::admin_only(),
                ..AuthorInternal::default()
            }),
            ..CommentAuthor::default()
        });
        comment
    }

    #[test]
    fn test_unauthorized_root_drops_document() {
        let doc = comment(TagsField::admin_only());
        assert!(redact(doc, &RoleSet::public()).is_none());
    }

    #[test]
    fn test_pruned_ancestor_hides_public_child() {
        let mut doc = comment(TagsField::admin_only());
        doc.review.as_mut().unwrap().tags = public_only();

        let result = redact_all(vec![doc], &RoleSet::public());
        assert!(result.is_empty());
    }

    #[test]
    fn test_children_checked_independently() {
        let doc = comment(TagsField::admin_and_public());
        let visible = redact(doc, &RoleSet::public()).unwrap();

        assert_eq!(visible.name.as_deref(), Some("Jane"));
        assert!(visible.review.is_none());
        let author = visible.comment_author.unwrap();
        assert_eq!(author.contact_name.as_deref(), Some("Jane Doe"));
        assert!(author.internal.is_none());
    }

    #[test]
    fn test_admin_sees_everything() {
        let doc = comment(TagsField::admin_only());
        let visible = redact(doc.clone(), &roles(&["sysadmin"])).unwrap();
        assert_eq!(visible, doc);
    }

    #[test]
    fn test_pruned_author_hides_internal_even_if_internal_is_public() {
        let mut doc = comment(TagsField::admin_and_public());
        let author = doc.comment_author.as_mut().unwrap();
        author.tags = TagsField::admin_only();
        author.internal.as_mut().unwrap().tags = public_only();

        let visible = redact(doc, &RoleSet::public()).unwrap();
        assert!(visible.comment_author.is_none());
    }

    #[test]
    fn test_visibility_is_not_inherited() {
        let mut doc = comment(public_only());
        doc.review.as_mut().unwrap().tags = TagsField::default();

        let visible = redact(doc, &RoleSet::public()).unwrap();
        assert!(visible.review.is_none());
    }

    #[test]
    fn test_empty_root_tags_fail_closed() {
        let doc = comment(TagsField::default());
        assert!(redact(doc, &roles(&["sysadmin", "public"])).is_none());
    }

    #[test]
    fn test_multi_role_tag_set_requires_all_roles() {
        let mut doc = comment(TagsField::admin_and_public());
        doc.review.as_mut().unwrap().tags =
            TagsField::new(vec![TagSet::new(["reviewer", "public"]).unwrap()]);

        let public = redact(doc.clone(), &RoleSet::public()).unwrap();
        assert!(public.review.is_none());

        let reviewer = redact(doc, &roles(&["public", "reviewer"])).unwrap();
        assert!(reviewer.review.is_some());
    }

    #[test]
    fn test_redact_all_filters_rows_independently() {
        let hidden = comment(TagsField::admin_only());
        let shown = comment(TagsField::admin_and_public());
        let shown_id = shown.id.clone();

        let result = redact_all(vec![hidden, shown], &RoleSet::public());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, shown_id);
    }

    #[test]
    fn test_absent_children_stay_absent() {
        let doc = Comment::new(CommentId::generate(), public_only());
        let visible = redact(doc, &RoleSet::public()).unwrap();
        assert!(visible.review.is_none());
        assert!(visible.comment_author.is_none());
    }
}
