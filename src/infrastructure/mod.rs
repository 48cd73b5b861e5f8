//! Infrastructure layer - Persistence, configuration and logging

pub mod config;
pub mod logging;
pub mod memory;
pub mod repository;

pub use config::Config;
pub use logging::init_logging;
pub use memory::InMemoryRepository;
pub use repository::{CommentRepository, FileSystemRepository};
