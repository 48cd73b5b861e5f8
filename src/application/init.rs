//! Initialize store use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository};
use std::path::Path;

/// Initialize a new comment store at the specified path.
pub fn init(path: &Path) -> Result<FileSystemRepository> {
    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize(&Config::new())?;

    tracing::info!(root = %path.display(), "initialized comment store");
    Ok(repo)
}
