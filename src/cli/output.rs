//! Output formatting utilities

use crate::domain::comment::Comment;
use crate::error::Result;

/// Format a list of comments as a pretty JSON array
pub fn format_comment_list(comments: &[Comment]) -> Result<String> {
    Ok(serde_json::to_string_pretty(comments)?)
}

/// Format a single comment as pretty JSON
pub fn format_comment(comment: &Comment) -> Result<String> {
    Ok(serde_json::to_string_pretty(comment)?)
}
