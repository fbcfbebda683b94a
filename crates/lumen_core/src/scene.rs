//! Scene data for the path tracer.
//!
//! A scene is an ordered list of spheres and an ordered list of materials.
//! Spheres reference materials by index. The renderer only reads a scene
//! for the duration of a single render call; the host may edit it freely
//! between calls.

use lumen_math::{Color, Vec3};
use thiserror::Error;

/// Errors reported when validating a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere {sphere} references material {index}, but the scene has {material_count} materials")]
    InvalidMaterialIndex {
        sphere: usize,
        index: usize,
        material_count: usize,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Material used when a sphere's material index does not resolve.
static FALLBACK_MATERIAL: Material = Material::DEFAULT;

/// A surface material.
///
/// Metallic is stored for authoring but the current shading model only uses
/// albedo, roughness and emission.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Base color multiplied into the path on every bounce (RGB, 0-1)
    pub albedo: Color,

    /// Roughness factor (0=smooth, 1=rough)
    pub roughness: f32,

    /// Metallic factor (0=dielectric, 1=metal)
    pub metallic: f32,

    /// Emissive color (RGB, for light-emitting surfaces)
    pub emission_color: Color,

    /// Scale applied to the emissive color
    pub emission_power: f32,
}

impl Material {
    /// White, fully rough, non-emissive.
    pub const DEFAULT: Material = Material {
        albedo: Vec3::ONE,
        roughness: 1.0,
        metallic: 0.0,
        emission_color: Vec3::ZERO,
        emission_power: 0.0,
    };

    /// Create a new material with an albedo and default properties.
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo,
            ..Self::DEFAULT
        }
    }

    /// Set the roughness, clamped to [0, 1].
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the metallic factor, clamped to [0, 1].
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Make this material emit `color * power`.
    pub fn with_emission(mut self, color: Color, power: f32) -> Self {
        self.emission_color = color;
        self.emission_power = power.max(0.0);
        self
    }

    /// Light emitted by the surface.
    #[inline]
    pub fn emission(&self) -> Color {
        self.emission_color * self.emission_power
    }

    /// Check if this material is emissive.
    pub fn is_emissive(&self) -> bool {
        self.emission().length_squared() > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A sphere primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Center in world space
    pub position: Vec3,

    /// Radius (positive)
    pub radius: f32,

    /// Index into `Scene::materials`
    pub material_index: usize,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(position: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            material_index,
        }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            radius: 0.5,
            material_index: 0,
        }
    }
}

/// A complete scene containing spheres and the materials they reference.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Spheres, scanned in order during intersection
    pub spheres: Vec<Sphere>,

    /// Materials referenced by `Sphere::material_index`
    pub materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material to the scene and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        let index = self.materials.len();
        self.materials.push(material);
        index
    }

    /// Add a sphere to the scene and return its index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        let index = self.spheres.len();
        self.spheres.push(sphere);
        index
    }

    /// Get a material by index.
    ///
    /// Never fails: an index that does not resolve yields the default
    /// material so a badly authored scene still renders.
    #[inline]
    pub fn material(&self, index: usize) -> &Material {
        self.materials.get(index).unwrap_or(&FALLBACK_MATERIAL)
    }

    /// Get the material a sphere is shaded with.
    #[inline]
    pub fn sphere_material(&self, sphere: &Sphere) -> &Material {
        self.material(sphere.material_index)
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Check that every sphere references an existing material.
    pub fn validate(&self) -> SceneResult<()> {
        for (i, sphere) in self.spheres.iter().enumerate() {
            if sphere.material_index >= self.materials.len() {
                return Err(SceneError::InvalidMaterialIndex {
                    sphere: i,
                    index: sphere.material_index,
                    material_count: self.materials.len(),
                });
            }
        }
        Ok(())
    }
}
