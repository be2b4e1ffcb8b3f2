use crate::common::{DomainError, DomainResult};
use crate::domains::grid::{Grid, MapSource};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads ASCII maps from `<base>/<name>`.
pub struct FilesystemMapSource {
    base: PathBuf,
}

impl FilesystemMapSource {
    /// Precedence: explicit base -> SEARCH_ARENA_MAP_DIR -> ./resources/maps
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| match env::var("SEARCH_ARENA_MAP_DIR") {
            Ok(v) => PathBuf::from(v),
            Err(_) => Path::new("resources").join("maps"),
        });
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl MapSource for FilesystemMapSource {
    fn load_map(&self, name: &str) -> DomainResult<Grid> {
        let path = self.base.join(name);
        let text = fs::read_to_string(&path)
            .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", path.display(), e)))?;
        Grid::from_ascii(&text)
    }
}
