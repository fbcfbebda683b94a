//! Progressive path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - One sample per pixel per frame, averaged across frames
//! - Configurable bounce depth
//! - Per-pixel parallel dispatch over rayon's work-stealing pool

use std::time::{Duration, Instant};

use lumen_core::{RayCamera, Scene};
use lumen_math::{Color, Ray, Vec3, Vec4};
use rayon::prelude::*;
use thiserror::Error;

use crate::hit::trace_ray;
use crate::image::{color_to_rgba, FinalImage};
use crate::random::Sampler;

/// Upper bound for `Settings::bounces`.
pub const MAX_BOUNCES: u32 = 100;

/// Offset along the normal for bounce rays, so they don't re-hit their own surface.
const SURFACE_EPSILON: f32 = 0.0001;

/// Errors that can occur when starting a render pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Render called before the first resize")]
    NotResized,

    #[error("Camera supplied {actual} ray directions for a viewport of {expected} pixels")]
    ViewportMismatch { expected: usize, actual: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render settings.
///
/// Changing any of these (or the scene, or the camera) invalidates the
/// running average; the caller is expected to follow up with
/// [`Renderer::reset_accumulation_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Average samples across frames
    pub accumulate: bool,
    /// Maximum path depth, clamped to 1..=MAX_BOUNCES
    pub bounces: u32,
    /// Shade pixels on the rayon thread pool
    pub multithreaded: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accumulate: true,
            bounces: 5,
            multithreaded: true,
        }
    }
}

/// Buffers that exist once the renderer has been sized.
#[derive(Debug)]
struct FrameBuffers {
    image: FinalImage,
    accumulation: Vec<Vec4>,
}

impl FrameBuffers {
    fn new(width: u32, height: u32) -> Self {
        let image = FinalImage::new(width, height);
        let accumulation = vec![Vec4::ZERO; image.pixel_count()];
        Self {
            image,
            accumulation,
        }
    }
}

/// Inputs shared read-only by every pixel of one frame.
struct FrameContext<'a> {
    scene: &'a Scene,
    origin: Vec3,
    directions: &'a [Vec3],
    frame_index: u32,
    bounces: u32,
}

/// CPU path tracer with temporal accumulation.
#[derive(Debug)]
pub struct Renderer {
    settings: Settings,
    buffers: Option<FrameBuffers>,
    frame_index: u32,
    last_render_time: Duration,
}

impl Renderer {
    /// Create a renderer with default settings and no buffers.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            buffers: None,
            frame_index: 1,
            last_render_time: Duration::ZERO,
        }
    }

    /// Set render settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Accumulation frame the next render will contribute (starts at 1).
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Wall time of the previous render call.
    pub fn last_render_time(&self) -> Duration {
        self.last_render_time
    }

    /// The most recent image, or `None` before the first resize.
    pub fn final_image(&self) -> Option<&FinalImage> {
        self.buffers.as_ref().map(|buffers| &buffers.image)
    }

    /// Restart the running average on the next render.
    pub fn reset_accumulation_frame(&mut self) {
        self.frame_index = 1;
        log::debug!("Accumulation reset");
    }

    /// Reallocate the image and accumulation buffers for a new viewport.
    ///
    /// Unchanged dimensions are a no-op and keep the running average.
    /// A zero-sized viewport is valid and renders nothing.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(buffers) = &self.buffers {
            if buffers.image.width == width && buffers.image.height == height {
                return;
            }
        }

        self.buffers = Some(FrameBuffers::new(width, height));
        self.frame_index = 1;
        log::debug!("Render buffers resized to {}x{}", width, height);
    }

    /// Trace one sample per pixel, fold it into the running average and
    /// refresh the final image.
    ///
    /// The scene and camera are only borrowed for the duration of the call.
    pub fn render<C>(&mut self, scene: &Scene, camera: &C) -> RenderResult<()>
    where
        C: RayCamera + ?Sized,
    {
        let start = Instant::now();
        let buffers = self.buffers.as_mut().ok_or(RenderError::NotResized)?;

        let directions = camera.ray_directions();
        let pixel_count = buffers.image.pixel_count();
        if directions.len() != pixel_count {
            return Err(RenderError::ViewportMismatch {
                expected: pixel_count,
                actual: directions.len(),
            });
        }
        if pixel_count == 0 {
            return Ok(());
        }

        if self.frame_index == 1 {
            buffers.accumulation.fill(Vec4::ZERO);
        }

        let frame = FrameContext {
            scene,
            origin: camera.position(),
            directions,
            frame_index: self.frame_index,
            bounces: self.settings.bounces.clamp(1, MAX_BOUNCES),
        };
        let inv_frame = 1.0 / self.frame_index as f32;

        let shade = |(i, (accumulated, pixel)): (usize, (&mut Vec4, &mut u32))| {
            *accumulated += ray_gen(&frame, i);
            *pixel = color_to_rgba(*accumulated * inv_frame);
        };

        // Index order is row-major; pixels are independent so any schedule works
        let FrameBuffers {
            image,
            accumulation,
        } = buffers;
        if self.settings.multithreaded {
            accumulation
                .par_iter_mut()
                .zip(image.pixels_mut().par_iter_mut())
                .enumerate()
                .for_each(shade);
        } else {
            accumulation
                .iter_mut()
                .zip(image.pixels_mut().iter_mut())
                .enumerate()
                .for_each(shade);
        }

        if self.settings.accumulate {
            self.frame_index += 1;
        } else {
            self.frame_index = 1;
        }

        self.last_render_time = start.elapsed();
        log::trace!(
            "Rendered frame {} in {:.3}ms",
            frame.frame_index,
            self.last_render_time.as_secs_f64() * 1000.0
        );

        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Trace the primary ray of pixel `pixel_index` and return the light it gathers.
///
/// The sky contributes nothing: a path that escapes the scene keeps only
/// the emission collected before it left.
fn ray_gen(frame: &FrameContext, pixel_index: usize) -> Vec4 {
    let mut ray = Ray::new(frame.origin, frame.directions[pixel_index]);
    let mut sampler = Sampler::for_pixel(pixel_index, frame.frame_index);

    let mut light = Color::ZERO;
    let mut contribution = Color::ONE;

    for bounce in 0..frame.bounces {
        sampler.advance(bounce);

        let payload = trace_ray(frame.scene, &ray);
        if !payload.is_hit() {
            break;
        }

        let sphere = &frame.scene.spheres[payload.object_index];
        let material = frame.scene.sphere_material(sphere);

        contribution *= material.albedo;
        light += material.emission() * contribution;

        let scatter = payload.world_normal + material.roughness * sampler.in_unit_sphere();
        ray.origin = payload.world_position + payload.world_normal * SURFACE_EPSILON;
        ray.direction = scatter.try_normalize().unwrap_or(payload.world_normal);
    }

    light.extend(1.0)
}
