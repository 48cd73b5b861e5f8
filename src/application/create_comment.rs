//! Create comment use case

use crate::domain::comment::{Comment, CommentId};
use crate::domain::lifecycle::{establish, CommentPayload};
use crate::error::Result;
use crate::infrastructure::CommentRepository;
use chrono::Utc;

/// Service for submitting new comments
pub struct CreateCommentService<R> {
    repository: R,
}

impl<R: CommentRepository> CreateCommentService<R> {
    /// Create a new create-comment service
    pub fn new(repository: R) -> Self {
        CreateCommentService { repository }
    }

    /// Store a new comment with lifecycle-assigned tags and return it.
    ///
    /// The comment is visible only to administrators until published.
    pub fn execute(&self, payload: CommentPayload) -> Result<Comment> {
        let comment = establish(CommentId::generate(), payload, Utc::now());
        self.repository.insert(&comment)?;

        tracing::info!(comment = %comment.id, "created comment");
        Ok(comment)
    }
}
