//! Application layer - Use cases and orchestration

pub mod create_comment;
pub mod fetch_comments;
pub mod init;
pub mod manage_config;
pub mod publish;
pub mod update_comment;

pub use create_comment::CreateCommentService;
pub use fetch_comments::FetchCommentsService;
pub use manage_config::ConfigService;
pub use publish::PublishService;
pub use update_comment::UpdateCommentService;
