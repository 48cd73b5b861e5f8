//! Update comment use case

use crate::domain::comment::{Comment, CommentId};
use crate::domain::lifecycle::{apply_update, CommentPayload};
use crate::error::Result;
use crate::infrastructure::CommentRepository;

/// Service for editing comment payload fields
pub struct UpdateCommentService<R> {
    repository: R,
}

impl<R: CommentRepository> UpdateCommentService<R> {
    /// Create a new update service
    pub fn new(repository: R) -> Self {
        UpdateCommentService { repository }
    }

    /// Merge `payload` into the stored comment.
    ///
    /// Returns `Ok(None)` when no comment has this id. Tags are never
    /// changed here.
    pub fn execute(&self, id: &CommentId, payload: CommentPayload) -> Result<Option<Comment>> {
        let Some(mut comment) = self.repository.get(id)? else {
            tracing::info!(comment = %id, "update target not found");
            return Ok(None);
        };

        apply_update(&mut comment, payload);

        if !self.repository.replace(&comment)? {
            return Ok(None);
        }
        tracing::info!(comment = %id, "updated comment");
        Ok(Some(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CreateCommentService;
    use crate::infrastructure::InMemoryRepository;

    #[test]
    fn test_update_missing_comment() {
        let repo = InMemoryRepository::new();
        let service = UpdateCommentService::new(&repo);

        let result = service
            .execute(&CommentId::generate(), CommentPayload::default())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_persists_payload_but_not_tags() {
        let repo = InMemoryRepository::new();
        let created = CreateCommentService::new(&repo)
            .execute(CommentPayload::default())
            .unwrap();

        let patch: CommentPayload = serde_json::from_str(
            r#"{"tags": [["public"]], "commentStatus": "Accepted",
                "review": {"tags": [["public"]], "reviewerNotes": "fine"}}"#,
        )
        .unwrap();
        let updated = UpdateCommentService::new(&repo)
            .execute(&created.id, patch)
            .unwrap()
            .unwrap();

        assert_eq!(updated.comment_status.as_deref(), Some("Accepted"));
        assert_eq!(updated.tags, created.tags);
        assert_eq!(
            updated.review.as_ref().unwrap().tags,
            created.review.as_ref().unwrap().tags
        );
        assert_eq!(repo.get(&created.id).unwrap(), Some(updated));
    }
}
