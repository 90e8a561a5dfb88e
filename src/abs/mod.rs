//! Thin owners for the handful of GPU and windowing objects the demo needs:
//! the application window, shader programs and meshes.

pub mod app;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use mesh::*;
pub use shader::*;
