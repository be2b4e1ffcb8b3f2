pub mod benchmark;
pub mod grid;
pub mod logger;
pub mod search;

pub use benchmark::*;
pub use grid::*;
pub use logger::*;
pub use search::*;
