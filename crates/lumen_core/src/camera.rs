//! Camera collaborator for the path tracer.
//!
//! The renderer does not build primary rays itself. It asks a [`RayCamera`]
//! for the ray origin and for one precomputed direction per pixel. The
//! perspective [`Camera`] here keeps that array current whenever the
//! viewport, position or orientation changes.

use lumen_math::{Mat4, Quat, Vec3, Vec4};
use rayon::prelude::*;

/// Largest allowed `|forward.y|`; `look_at_rh` degenerates when looking along world up.
const MAX_VERTICAL: f32 = 0.999;

/// Source of primary rays for a render pass.
pub trait RayCamera: Sync {
    /// Origin shared by every primary ray.
    fn position(&self) -> Vec3;

    /// One unit direction per pixel, row-major, `width * height` entries.
    fn ray_directions(&self) -> &[Vec3];
}

/// Perspective camera with cached per-pixel ray directions.
///
/// Pixel `(x, y)` maps to normalized device coordinates
/// `(x / width * 2 - 1, y / height * 2 - 1)`, so row 0 is the bottom of
/// the image.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward_direction: Vec3,

    vertical_fov: f32, // Degrees
    near_clip: f32,
    far_clip: f32,

    viewport_width: u32,
    viewport_height: u32,

    // Cached computed values
    projection: Mat4,
    inverse_projection: Mat4,
    view: Mat4,
    inverse_view: Mat4,
    ray_directions: Vec<Vec3>,
}

impl Camera {
    /// Create a new camera at (0, 0, 6) looking down -Z.
    ///
    /// The camera has no viewport until [`Camera::on_resize`] is called.
    pub fn new(vertical_fov: f32, near_clip: f32, far_clip: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            forward_direction: Vec3::NEG_Z,
            vertical_fov,
            near_clip,
            far_clip,
            viewport_width: 0,
            viewport_height: 0,
            projection: Mat4::IDENTITY,
            inverse_projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            ray_directions: Vec::new(),
        };
        camera.recalculate_view();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.recalculate_view();
        self.recalculate_ray_directions();
        self
    }

    /// Set the direction the camera looks in.
    ///
    /// Zero vectors and directions (nearly) parallel to world up are
    /// ignored and the current direction is kept.
    pub fn with_forward(mut self, forward: Vec3) -> Self {
        match forward.try_normalize() {
            Some(forward) if forward.y.abs() < MAX_VERTICAL => self.forward_direction = forward,
            _ => {
                log::warn!("Ignoring camera forward direction {:?}", forward);
                return self;
            }
        }
        self.recalculate_view();
        self.recalculate_ray_directions();
        self
    }

    /// Resize the viewport.
    ///
    /// Unchanged dimensions are a no-op. A zero-sized viewport leaves the
    /// camera with no ray directions.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == self.viewport_width && height == self.viewport_height {
            return;
        }

        self.viewport_width = width;
        self.viewport_height = height;
        log::debug!("Camera viewport resized to {}x{}", width, height);

        self.recalculate_projection();
        self.recalculate_ray_directions();
    }

    /// Move the camera by a world-space offset.
    pub fn translate(&mut self, delta: Vec3) {
        if delta == Vec3::ZERO {
            return;
        }

        self.position += delta;
        self.recalculate_view();
        self.recalculate_ray_directions();
    }

    /// Rotate the view direction by `pitch` (about the right axis) and
    /// `yaw` (about world up), both in radians.
    ///
    /// A pitch that would point the camera straight up or down is dropped;
    /// the yaw still applies.
    pub fn rotate(&mut self, pitch: f32, yaw: f32) {
        if pitch == 0.0 && yaw == 0.0 {
            return;
        }

        let yawed = (Quat::from_axis_angle(Vec3::Y, -yaw) * self.forward_direction).normalize();
        let right = yawed.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let pitched = (Quat::from_axis_angle(right, -pitch) * yawed).normalize();

        self.forward_direction = if pitched.y.abs() < MAX_VERTICAL {
            pitched
        } else {
            yawed
        };

        self.recalculate_view();
        self.recalculate_ray_directions();
    }

    pub fn forward_direction(&self) -> Vec3 {
        self.forward_direction
    }

    /// Unit vector to the right of the view direction.
    pub fn right_direction(&self) -> Vec3 {
        self.forward_direction
            .cross(Vec3::Y)
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    fn recalculate_projection(&mut self) {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            self.projection = Mat4::IDENTITY;
            self.inverse_projection = Mat4::IDENTITY;
            return;
        }

        let aspect = self.viewport_width as f32 / self.viewport_height as f32;
        self.projection = Mat4::perspective_rh(
            self.vertical_fov.to_radians(),
            aspect,
            self.near_clip,
            self.far_clip,
        );
        self.inverse_projection = self.projection.inverse();
    }

    fn recalculate_view(&mut self) {
        self.view = Mat4::look_at_rh(
            self.position,
            self.position + self.forward_direction,
            Vec3::Y,
        );
        self.inverse_view = self.view.inverse();
    }

    fn recalculate_ray_directions(&mut self) {
        let width = self.viewport_width as usize;
        let height = self.viewport_height as usize;
        let inverse_projection = self.inverse_projection;
        let inverse_view = self.inverse_view;

        self.ray_directions.resize(width * height, Vec3::ZERO);
        self.ray_directions
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, direction)| {
                let x = (i % width) as f32 / width as f32;
                let y = (i / width) as f32 / height as f32;

                // Remap from 0..1 to -1..1
                let target = inverse_projection * Vec4::new(x * 2.0 - 1.0, y * 2.0 - 1.0, 1.0, 1.0);
                let local = (target.truncate() / target.w).normalize();
                *direction = inverse_view.transform_vector3(local);
            });
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(45.0, 0.1, 100.0)
    }
}

impl RayCamera for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn ray_directions(&self) -> &[Vec3] {
        &self.ray_directions
    }
}
