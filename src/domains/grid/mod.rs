pub mod grid;
pub mod ports;
pub mod terrain;
pub mod types;

pub use grid::Grid;
pub use ports::*;
pub use terrain::*;
pub use types::*;
