//! Domain layer - Comment model and visibility rules

pub mod comment;
pub mod lifecycle;
pub mod query;
pub mod redaction;
pub mod tags;
pub mod whitelist;

pub use comment::{AuthorInternal, Comment, CommentAuthor, CommentId, Review};
pub use lifecycle::{AuthorInternalPayload, AuthorPayload, CommentPayload, Patch, ReviewPayload};
pub use query::CandidateFilter;
pub use redaction::{redact, redact_all, Guarded, NodeKind};
pub use tags::{RoleSet, TagSet, TagsField};
pub use whitelist::Projection;
