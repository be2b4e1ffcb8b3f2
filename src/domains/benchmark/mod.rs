pub mod ports;
pub mod report;

pub use ports::*;
pub use report::*;
