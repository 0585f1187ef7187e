//! Batch orchestration: turns quad submissions into as few draw calls as
//! the arena and texture slot table allow.

mod renderer;
mod types;


pub use renderer::*;
pub use types::{quad_transform, BatchLimits, BatchStats};
