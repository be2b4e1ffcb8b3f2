pub mod map_files;

pub use map_files::*;
