//! File system comment store

use crate::domain::comment::{Comment, CommentId};
use crate::domain::query::CandidateFilter;
use crate::domain::whitelist::Projection;
use crate::error::{GateError, Result};
use crate::infrastructure::config::META_DIR;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding one JSON document per comment
pub const COMMENTS_DIR: &str = "comments";

/// Storage operations the comment services depend on
pub trait CommentRepository {
    /// Comments matching `filter`, with root fields outside `projection` cleared
    fn find(&self, filter: &CandidateFilter, projection: &Projection) -> Result<Vec<Comment>>;

    /// Full comment by id
    fn get(&self, id: &CommentId) -> Result<Option<Comment>>;

    /// Store a new comment. Fails if the id is taken.
    fn insert(&self, comment: &Comment) -> Result<()>;

    /// Overwrite an existing comment. Returns false if there is no such id.
    fn replace(&self, comment: &Comment) -> Result<bool>;
}

impl<T: CommentRepository + ?Sized> CommentRepository for &T {
    fn find(&self, filter: &CandidateFilter, projection: &Projection) -> Result<Vec<Comment>> {
        (**self).find(filter, projection)
    }

    fn get(&self, id: &CommentId) -> Result<Option<Comment>> {
        (**self).get(id)
    }

    fn insert(&self, comment: &Comment) -> Result<()> {
        (**self).insert(comment)
    }

    fn replace(&self, comment: &Comment) -> Result<bool> {
        (**self).replace(comment)
    }
}

/// Store rooted at a directory containing `.commentgate/` and `comments/`
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the store root.
    /// First checks COMMENTGATE_ROOT, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("COMMENTGATE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_meta_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(GateError::Config(format!(
                    "COMMENTGATE_ROOT is set to '{}' but no .commentgate directory found. \
                    Run 'commentgate init' in that directory or unset COMMENTGATE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the store root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_meta_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(GateError::NotInitialized(start.to_path_buf())),
            }
        }
    }

    fn has_meta_dir(path: &Path) -> bool {
        path.join(META_DIR).is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_meta_dir(&self.root)
    }

    /// Create `.commentgate/config.toml` and the comments directory
    pub fn initialize(&self, config: &Config) -> Result<()> {
        if self.is_initialized() {
            return Err(GateError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&self.root)?;
        config.save_to_dir(&self.root)?;
        fs::create_dir_all(self.comments_dir())?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn comments_dir(&self) -> PathBuf {
        self.root.join(COMMENTS_DIR)
    }

    fn comment_path(&self, id: &CommentId) -> PathBuf {
        self.comments_dir().join(format!("{}.json", id))
    }

    /// Read a stored comment. A document whose `id` does not match its
    /// file name is skipped, so reads and writes always agree on the path.
    fn read_comment(path: &Path) -> Result<Option<Comment>> {
        let contents = fs::read_to_string(path)?;
        let comment: Comment = serde_json::from_str(&contents).map_err(|e| {
            GateError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let stem = path.file_stem().and_then(|stem| stem.to_str());
        if stem != Some(comment.id.as_str()) {
            tracing::warn!(
                path = %path.display(),
                comment = %comment.id,
                "skipping comment stored under another id"
            );
            return Ok(None);
        }
        Ok(Some(comment))
    }

    /// Write using a best-effort atomic replace:
    /// write to a temp file in the same directory, then rename into place.
    fn write_comment(&self, comment: &Comment) -> Result<()> {
        let path = self.comment_path(&comment.id);
        fs::create_dir_all(self.comments_dir())?;

        let contents = serde_json::to_string_pretty(comment)?;
        let tmp_path = path.with_file_name(format!(
            "{}.json.tmp-{}",
            comment.id,
            std::process::id()
        ));

        fs::write(&tmp_path, contents)?;

        // On Windows, `rename` does not overwrite existing files.
        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl CommentRepository for FileSystemRepository {
    fn find(&self, filter: &CandidateFilter, projection: &Projection) -> Result<Vec<Comment>> {
        if let CandidateFilter::ById(id) = filter {
            return Ok(self
                .get(id)?
                .into_iter()
                .map(|mut comment| {
                    comment.project(projection);
                    comment
                })
                .collect());
        }

        let dir = self.comments_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut comments = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| GateError::Storage(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_json = entry
                .path()
                .extension()
                .is_some_and(|ext| ext == "json");
            if !is_json {
                continue;
            }

            let Some(mut comment) = Self::read_comment(entry.path())? else {
                continue;
            };
            if filter.matches(&comment) {
                comment.project(projection);
                comments.push(comment);
            }
        }

        Ok(comments)
    }

    fn get(&self, id: &CommentId) -> Result<Option<Comment>> {
        let path = self.comment_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read_comment(&path)
    }

    fn insert(&self, comment: &Comment) -> Result<()> {
        if self.comment_path(&comment.id).exists() {
            return Err(GateError::Storage(format!(
                "Comment already exists: {}",
                comment.id
            )));
        }
        self.write_comment(comment)
    }

    fn replace(&self, comment: &Comment) -> Result<bool> {
        if !self.comment_path(&comment.id).exists() {
            return Ok(false);
        }
        self.write_comment(comment)?;
        Ok(true)
    }
}
