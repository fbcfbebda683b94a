//! Lumen Core - Scene data and camera for the interactive path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Material`
//! - **Camera**: the `RayCamera` contract consumed by the renderer and a
//!   perspective `Camera` that precomputes one ray direction per pixel
//!
//! # Example
//!
//! ```
//! use lumen_core::{Material, Scene, Sphere};
//! use lumen_math::{Color, Vec3};
//!
//! let mut scene = Scene::new();
//! let red = scene.add_material(Material::new(Color::new(1.0, 0.0, 0.0)));
//! scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, red));
//! assert!(scene.validate().is_ok());
//! ```

pub mod camera;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, RayCamera};
pub use scene::{Material, Scene, SceneError, SceneResult, Sphere};
