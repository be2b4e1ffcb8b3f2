pub mod arena;
pub mod benchmark_service;

pub use arena::*;
pub use benchmark_service::*;
