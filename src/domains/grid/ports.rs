use super::grid::Grid;
use crate::common::DomainResult;

/// Port for loading prepared boards (filesystem, embedded fixtures, ...).
pub trait MapSource: Send + Sync {
    fn load_map(&self, name: &str) -> DomainResult<Grid>;
}
