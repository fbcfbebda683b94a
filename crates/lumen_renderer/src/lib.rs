//! Lumen Renderer - Interactive CPU Path Tracing
//!
//! A progressive path tracer for scenes made of spheres. Every call to
//! [`Renderer::render`] traces one sample per pixel, adds it to a running
//! sum and publishes the averaged result as an RGBA8 image, so a static
//! view converges frame after frame.

mod hit;
mod image;
mod random;
mod renderer;

pub use hit::{closest_hit, miss, trace_ray, HitPayload};
pub use image::{color_to_rgba, FinalImage};
pub use random::{pcg_hash, Sampler};
pub use renderer::{RenderError, RenderResult, Renderer, Settings, MAX_BOUNCES};

/// Re-export the scene and camera types the renderer consumes
pub use lumen_core::{Camera, Material, RayCamera, Scene, Sphere};
pub use lumen_math::{Color, Ray, Vec3, Vec4};
