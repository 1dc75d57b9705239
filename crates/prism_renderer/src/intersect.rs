//! Ray-scene intersection.
//!
//! Spheres use the geometric (projection) test; the floor is an analytic
//! horizontal plane. The nearest hit inside `HIT_RANGE` wins.

use prism_core::{Checkerboard, Material, Scene, Sphere};
use prism_math::{Interval, Ray, Vec3};

/// Minimum accepted hit distance and surface offset for secondary rays.
pub const EPSILON: f32 = 1e-3;

/// Hits at or beyond this distance count as misses.
pub const FAR_CUTOFF: f32 = 1000.0;

/// Accepted ray parameter window.
pub const HIT_RANGE: Interval = Interval::new(EPSILON, FAR_CUTOFF);

/// Record of a ray-surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal, always pointing against the ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: Material,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
}

impl HitRecord {
    fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: Material) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            t,
            point: ray.at(t),
            normal,
            material,
            front_face,
        }
    }

    /// The geometric normal pointing out of the surface.
    pub fn outward_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

/// Distance along `ray` to `sphere`, if within `ray_t`.
///
/// Prefers the near root; falls back to the far root when the near one is
/// behind the origin (the origin is inside the sphere).
pub fn ray_sphere(ray: &Ray, sphere: &Sphere, ray_t: Interval) -> Option<f32> {
    let l = sphere.center() - ray.origin;
    let tca = l.dot(ray.direction);
    let d2 = l.dot(l) - tca * tca;
    let r2 = sphere.radius() * sphere.radius();
    if d2 > r2 {
        return None;
    }

    let thc = (r2 - d2).sqrt();
    let t0 = tca - thc;
    if ray_t.surrounds(t0) {
        return Some(t0);
    }
    let t1 = tca + thc;
    if ray_t.surrounds(t1) {
        return Some(t1);
    }
    None
}

/// Intersect `ray` with the checkerboard floor.
pub fn ray_floor(ray: &Ray, floor: &Checkerboard, ray_t: Interval) -> Option<HitRecord> {
    // Parallel to the plane
    if ray.direction.y.abs() <= EPSILON {
        return None;
    }

    let t = -(ray.origin.y - floor.height) / ray.direction.y;
    if !ray_t.surrounds(t) {
        return None;
    }

    let point = ray.at(t);
    if !floor.in_footprint(point) {
        return None;
    }

    Some(HitRecord::new(ray, t, Vec3::Y, floor.material_at(point)))
}

/// Find the nearest surface hit by `ray` in `scene`.
pub fn scene_intersect(ray: &Ray, scene: &Scene) -> Option<HitRecord> {
    let mut closest = scene
        .floor
        .as_ref()
        .and_then(|floor| ray_floor(ray, floor, HIT_RANGE));

    for sphere in &scene.spheres {
        let ray_t = HIT_RANGE.with_max(closest.map_or(FAR_CUTOFF, |hit| hit.t));
        if let Some(t) = ray_sphere(ray, sphere, ray_t) {
            let outward_normal = (ray.at(t) - sphere.center()) / sphere.radius();
            closest = Some(HitRecord::new(ray, t, outward_normal, *sphere.material()));
        }
    }

    closest
}
