//! Publish/unpublish use case

use crate::domain::comment::{Comment, CommentId};
use crate::domain::lifecycle::{publish, unpublish};
use crate::error::Result;
use crate::infrastructure::CommentRepository;

/// Service toggling public visibility of a comment's root
pub struct PublishService<R> {
    repository: R,
}

impl<R: CommentRepository> PublishService<R> {
    /// Create a new publish service
    pub fn new(repository: R) -> Self {
        PublishService { repository }
    }

    /// Add `{"public"}` to the root tags. Publishing twice is a no-op.
    pub fn publish(&self, id: &CommentId) -> Result<Option<Comment>> {
        self.toggle(id, "publish", publish)
    }

    /// Remove `{"public"}` from the root tags. Unpublishing twice is a no-op.
    pub fn unpublish(&self, id: &CommentId) -> Result<Option<Comment>> {
        self.toggle(id, "unpublish", unpublish)
    }

    fn toggle(
        &self,
        id: &CommentId,
        action: &'static str,
        transition: fn(&mut Comment) -> bool,
    ) -> Result<Option<Comment>> {
        let Some(mut comment) = self.repository.get(id)? else {
            tracing::info!(comment = %id, action, "target not found");
            return Ok(None);
        };

        if !transition(&mut comment) {
            tracing::debug!(comment = %id, action, "tags already in target state");
            return Ok(Some(comment));
        }

        if !self.repository.replace(&comment)? {
            return Ok(None);
        }
        tracing::info!(comment = %id, action, "changed comment visibility");
        Ok(Some(comment))
    }
}
