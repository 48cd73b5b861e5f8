//! Fetch comments use case
//!
//! Narrows the candidate set, projects whitelisted fields and redacts what the
//! caller's roles do not cover.

use crate::domain::comment::Comment;
use crate::domain::query::CandidateFilter;
use crate::domain::redaction::redact_all;
use crate::domain::tags::RoleSet;
use crate::domain::whitelist::Projection;
use crate::error::Result;
use crate::infrastructure::CommentRepository;

/// Service for authorized comment reads
pub struct FetchCommentsService<R> {
    repository: R,
}

impl<R: CommentRepository> FetchCommentsService<R> {
    /// Create a new fetch service
    pub fn new(repository: R) -> Self {
        FetchCommentsService { repository }
    }

    /// Return the comments matching `filter` that `roles` may see.
    ///
    /// An unauthorized comment is simply missing from the result, exactly as
    /// if it did not exist.
    pub fn execute<S: AsRef<str>>(
        &self,
        filter: &CandidateFilter,
        requested_fields: &[S],
        roles: &RoleSet,
    ) -> Result<Vec<Comment>> {
        let projection = Projection::from_requested(requested_fields);
        tracing::info!(%filter, fields = projection.fields().count(), "fetching comments");

        let candidates = self.repository.find(filter, &projection)?;
        Ok(redact_all(candidates, roles))
    }
}
