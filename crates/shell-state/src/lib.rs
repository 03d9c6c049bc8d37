//! Debounced, crash-safe persistence of window geometry.

mod error;
mod store;
mod window_geometry;

pub use error::{StateError, StateResult};
pub use store::WindowStateStore;
pub use window_geometry::WindowGeometry;

#[cfg(test)]
mod tests;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
