pub mod adaptive_radius;
pub mod agent;
pub mod annealing;
pub mod base;
pub mod best_first;
pub mod bidirectional;
pub mod events;
pub mod greedy;
pub mod params;
pub mod projections;
pub mod strategy;

pub use adaptive_radius::*;
pub use agent::*;
pub use annealing::*;
pub use base::*;
pub use best_first::*;
pub use bidirectional::*;
pub use events::*;
pub use greedy::*;
pub use params::*;
pub use projections::*;
pub use strategy::*;
