//! Tag system

pub mod tag_set;

// Re-export main types
pub use tag_set::{RoleSet, TagSet, TagsField, PUBLIC, SYSADMIN};
