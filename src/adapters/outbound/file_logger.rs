use crate::domains::logger::{DynLogger, FileLogger};
use std::sync::Arc;

/// Installs the global `fast_log` file sink and returns a logger that feeds it.
/// Only one global sink can exist per process, so a second call fails.
pub fn init_file_logger(path: &str, level: log::LevelFilter) -> Result<DynLogger, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}
