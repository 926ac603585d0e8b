//! Point rendering and hit-testing.

pub mod export;
pub mod program;
pub mod renderer;

pub use hit_test::{find_nearest, Hit};
pub use program::PointProgram;
pub use renderer::{PointRenderer, RenderStats};
