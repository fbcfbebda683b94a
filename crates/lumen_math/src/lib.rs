// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// RGB color with components conventionally in [0, 1].
pub type Color = Vec3;
