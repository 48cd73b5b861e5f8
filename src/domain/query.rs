//! Candidate selection for comment reads
//!
//! A [`CandidateFilter`] only decides which stored comments are looked at.
//! Whether the caller may see them is decided afterwards by redaction.

use crate::domain::comment::{Comment, CommentId};
use std::collections::BTreeSet;
use std::fmt;

/// Logical predicate handed to the storage layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    /// Every stored comment
    All,
    /// The single comment with this id
    ById(CommentId),
    /// Comments whose comment period is one of these ids
    ByCommentPeriods(BTreeSet<String>),
}

impl CandidateFilter {
    /// Build a filter from the request parameters.
    ///
    /// A non-empty period list takes precedence over an id.
    pub fn from_request<I, S>(id: Option<CommentId>, periods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let periods: BTreeSet<String> = periods
            .into_iter()
            .map(Into::into)
            .filter(|period| !period.trim().is_empty())
            .collect();

        if !periods.is_empty() {
            return CandidateFilter::ByCommentPeriods(periods);
        }

        match id {
            Some(id) => CandidateFilter::ById(id),
            None => CandidateFilter::All,
        }
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        match self {
            CandidateFilter::All => true,
            CandidateFilter::ById(id) => &comment.id == id,
            CandidateFilter::ByCommentPeriods(periods) => comment
                .comment_period_ref
                .as_ref()
                .is_some_and(|period| periods.contains(period)),
        }
    }
}

impl fmt::Display for CandidateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateFilter::All => write!(f, "all"),
            CandidateFilter::ById(id) => write!(f, "id={}", id),
            CandidateFilter::ByCommentPeriods(periods) => {
                let list: Vec<&str> = periods.iter().map(String::as_str).collect();
                write!(f, "commentPeriodRef in [{}]", list.join(", "))
            }
        }
    }
}
