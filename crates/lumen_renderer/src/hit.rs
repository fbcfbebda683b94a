//! Ray-scene intersection.
//!
//! Spheres are scanned linearly. The closest hit strictly in front of the
//! ray origin wins, independent of the order spheres appear in the scene.

use lumen_core::Scene;
use lumen_math::{Interval, Ray, Vec3};

/// Record of the nearest intersection along a ray, or its absence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPayload {
    /// Distance along the ray; negative means the ray missed
    pub hit_distance: f32,
    /// Point of intersection
    pub world_position: Vec3,
    /// Unit outward surface normal
    pub world_normal: Vec3,
    /// Index of the sphere that was hit
    pub object_index: usize,
}

impl HitPayload {
    /// Distance reported for a miss.
    pub const MISS_DISTANCE: f32 = -1.0;

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit_distance >= 0.0
    }
}

/// Find the closest sphere hit by `ray`.
pub fn trace_ray(scene: &Scene, ray: &Ray) -> HitPayload {
    let mut window = Interval::POSITIVE;
    let mut closest_sphere = None;

    for (i, sphere) in scene.spheres.iter().enumerate() {
        let origin = ray.origin - sphere.position;

        // (bx^2 + by^2 + bz^2)t^2 + 2(axbx + ayby + azbz)t + (ax^2 + ay^2 + az^2 - r^2) = 0
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * origin.dot(ray.direction);
        let c = origin.dot(origin) - sphere.radius * sphere.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            continue;
        }

        // Only the near root; hits from inside the sphere are ignored
        let closest_t = (-b - discriminant.sqrt()) / (2.0 * a);
        if window.surrounds(closest_t) {
            window.max = closest_t;
            closest_sphere = Some(i);
        }
    }

    match closest_sphere {
        Some(i) => closest_hit(scene, ray, window.max, i),
        None => miss(),
    }
}

/// Build the shading point for a hit on sphere `object_index`.
///
/// `object_index` must come from `scene.spheres`.
pub fn closest_hit(scene: &Scene, ray: &Ray, hit_distance: f32, object_index: usize) -> HitPayload {
    let sphere = &scene.spheres[object_index];
    let local = ray.relative_to(sphere.position);
    let local_hit = local.at(hit_distance);

    HitPayload {
        hit_distance,
        world_position: local_hit + sphere.position,
        world_normal: local_hit.normalize_or_zero(),
        object_index,
    }
}

/// Payload for a ray that hit nothing.
pub fn miss() -> HitPayload {
    HitPayload {
        hit_distance: HitPayload::MISS_DISTANCE,
        world_position: Vec3::ZERO,
        world_normal: Vec3::ZERO,
        object_index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Material, Sphere};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scene_with(spheres: Vec<Sphere>) -> Scene {
        let mut scene = Scene::new();
        scene.add_material(Material::default());
        for sphere in spheres {
            scene.add_sphere(sphere);
        }
        scene
    }

    #[test]
    fn test_hit_distance_along_negative_z() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 0.5, 0)]);

        for d in [1.0, 2.0, 6.0, 40.0] {
            let ray = Ray::new(Vec3::new(0.0, 0.0, d), Vec3::NEG_Z);
            let payload = trace_ray(&scene, &ray);

            assert!(payload.is_hit());
            assert!((payload.hit_distance - (d - 0.5)).abs() < 1e-4, "d = {}", d);
            assert!((payload.world_position - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-4);
            assert!((payload.world_normal - Vec3::Z).length() < 1e-4);
            assert_eq!(payload.object_index, 0);
        }
    }

    #[test]
    fn test_unnormalized_direction_scales_distance() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 1.0, 0)]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));

        let payload = trace_ray(&scene, &ray);

        // t is measured in units of the direction vector
        assert!((payload.hit_distance - 2.0).abs() < 1e-4);
        assert!((payload.world_position - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn test_miss() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 0.5, 0)]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::Y);

        let payload = trace_ray(&scene, &ray);
        assert!(!payload.is_hit());
        assert!(payload.hit_distance < 0.0);
        assert_eq!(payload, miss());
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let payload = trace_ray(&scene, &Ray::default());
        assert_eq!(payload.hit_distance, HitPayload::MISS_DISTANCE);
    }

    #[test]
    fn test_sphere_behind_origin_is_ignored() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(!trace_ray(&scene, &ray).is_hit());
    }

    #[test]
    fn test_origin_inside_sphere_is_ignored() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 2.0, 0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert!(!trace_ray(&scene, &ray).is_hit());
    }

    #[test]
    fn test_closest_hit_wins_regardless_of_order() {
        let near = Sphere::new(Vec3::new(0.0, 0.0, 1.0), 0.5, 0);
        let far = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, 0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z);

        let near_first = scene_with(vec![near.clone(), far.clone()]);
        let far_first = scene_with(vec![far, near]);

        let a = trace_ray(&near_first, &ray);
        let b = trace_ray(&far_first, &ray);

        assert!((a.hit_distance - 2.5).abs() < 1e-4);
        assert!((b.hit_distance - 2.5).abs() < 1e-4);
        assert_eq!(a.object_index, 0);
        assert_eq!(b.object_index, 1);
        assert_eq!(a.world_position, b.world_position);
    }

    #[test]
    fn test_normals_are_unit_and_outward() {
        let center = Vec3::new(1.0, -2.0, -6.0);
        let scene = scene_with(vec![Sphere::new(center, 1.5, 0)]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut hits = 0;
        for _ in 0..500 {
            let target = center
                + Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
            let ray = Ray::new(Vec3::ZERO, target);
            let payload = trace_ray(&scene, &ray);
            if !payload.is_hit() {
                continue;
            }
            hits += 1;

            let radial = payload.world_position - center;
            assert!((radial.length() - 1.5).abs() < 1e-3);
            assert!((payload.world_normal.length() - 1.0).abs() < 1e-4);
            assert!(payload.world_normal.dot(radial) > 0.0);
            // Facing the ray origin
            assert!(payload.world_normal.dot(ray.direction) < 0.0);
        }
        assert!(hits > 0);
    }
}
