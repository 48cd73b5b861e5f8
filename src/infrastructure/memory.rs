//! In-memory comment store for tests and embedding

use crate::domain::comment::{Comment, CommentId};
use crate::domain::query::CandidateFilter;
use crate::domain::whitelist::Projection;
use crate::error::{GateError, Result};
use crate::infrastructure::repository::CommentRepository;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    comments: Mutex<BTreeMap<CommentId, Comment>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-tagged comments
    pub fn with_comments(comments: impl IntoIterator<Item = Comment>) -> Self {
        let map = comments
            .into_iter()
            .map(|comment| (comment.id.clone(), comment))
            .collect();
        InMemoryRepository {
            comments: Mutex::new(map),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<CommentId, Comment>>> {
        self.comments
            .lock()
            .map_err(|_| GateError::Storage("comment store lock poisoned".to_string()))
    }
}

impl CommentRepository for InMemoryRepository {
    fn find(&self, filter: &CandidateFilter, projection: &Projection) -> Result<Vec<Comment>> {
        let comments = self.lock()?;
        Ok(comments
            .values()
            .filter(|comment| filter.matches(comment))
            .cloned()
            .map(|mut comment| {
                comment.project(projection);
                comment
            })
            .collect())
    }

    fn get(&self, id: &CommentId) -> Result<Option<Comment>> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn insert(&self, comment: &Comment) -> Result<()> {
        let mut comments = self.lock()?;
        if comments.contains_key(&comment.id) {
            return Err(GateError::Storage(format!(
                "Comment already exists: {}",
                comment.id
            )));
        }
        comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    fn replace(&self, comment: &Comment) -> Result<bool> {
        let mut comments = self.lock()?;
        match comments.get_mut(&comment.id) {
            Some(existing) => {
                *existing = comment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
