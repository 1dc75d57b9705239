//! Recursive Whitted-style shading.
//!
//! Each hit gathers Phong diffuse and specular light from every unshadowed
//! point light, then recurses along the mirror and refracted directions.
//! The four terms are blended by the material's albedo weights.

use prism_core::{Color, EnvironmentMap, Light, Scene};
use prism_math::{reflect, refract, Ray, Vec3};

use crate::intersect::{scene_intersect, HitRecord, EPSILON};

/// Recursion levels traced before falling back to the background.
pub const MAX_DEPTH: u32 = 4;

/// Refractive index of the medium surrounding every object.
const AIR_IOR: f32 = 1.0;

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy)]
pub enum Background<'a> {
    /// Single color regardless of direction
    Flat(Color),
    /// Panoramic lookup by direction
    Environment(&'a EnvironmentMap),
}

impl Background<'_> {
    pub fn sample(&self, direction: Vec3) -> Color {
        match self {
            Background::Flat(color) => *color,
            Background::Environment(map) => map.sample(direction),
        }
    }
}

/// Nudge `point` off the surface to the side `dir` is heading.
#[inline]
pub fn offset_origin(dir: Vec3, point: Vec3, normal: Vec3) -> Vec3 {
    if dir.dot(normal) < 0.0 {
        point - normal * EPSILON
    } else {
        point + normal * EPSILON
    }
}

/// Diffuse and specular intensity received from `light`, or `None` when
/// something blocks the path to it.
pub fn light_contribution(
    hit: &HitRecord,
    view_dir: Vec3,
    light: &Light,
    scene: &Scene,
) -> Option<(f32, f32)> {
    let to_light = light.position() - hit.point;
    let light_distance = to_light.length();
    let light_dir = to_light.normalize_or_zero();

    let shadow_origin = offset_origin(light_dir, hit.point, hit.normal);
    let shadow_ray = Ray::new(shadow_origin, light_dir);
    if let Some(blocker) = scene_intersect(&shadow_ray, scene) {
        if (blocker.point - shadow_origin).length() < light_distance {
            return None;
        }
    }

    let diffuse = light.intensity() * light_dir.dot(hit.normal).max(0.0);
    let specular = light.intensity()
        * reflect(light_dir, hit.normal)
            .dot(view_dir)
            .max(0.0)
            .powf(hit.material.specular_exponent);

    Some((diffuse, specular))
}

/// Sum of diffuse and specular intensity over all visible lights.
pub fn local_illumination(hit: &HitRecord, view_dir: Vec3, scene: &Scene) -> (f32, f32) {
    scene
        .lights
        .iter()
        .filter_map(|light| light_contribution(hit, view_dir, light, scene))
        .fold((0.0, 0.0), |(d, s), (dl, sl)| (d + dl, s + sl))
}

/// Compute the color seen along `ray`.
///
/// `depth` counts the bounces taken so far; once it exceeds `max_depth` the
/// background is returned even if something would be hit.
pub fn cast_ray(
    ray: &Ray,
    scene: &Scene,
    background: &Background,
    depth: u32,
    max_depth: u32,
) -> Color {
    let hit = match scene_intersect(ray, scene) {
        Some(hit) if depth <= max_depth => hit,
        _ => return background.sample(ray.direction),
    };

    let material = hit.material;
    let albedo = material.albedo;

    let reflect_color = if albedo.z != 0.0 {
        let dir = reflect(ray.direction, hit.normal).normalize_or_zero();
        let origin = offset_origin(dir, hit.point, hit.normal);
        cast_ray(&Ray::new(origin, dir), scene, background, depth + 1, max_depth)
    } else {
        Color::ZERO
    };

    // Under total internal reflection refract() hands back a fixed
    // direction, which is still traced.
    let refract_color = if albedo.w != 0.0 {
        let dir = refract(
            ray.direction,
            hit.outward_normal(),
            material.refractive_index,
            AIR_IOR,
        )
        .normalize_or_zero();
        let origin = offset_origin(dir, hit.point, hit.normal);
        cast_ray(&Ray::new(origin, dir), scene, background, depth + 1, max_depth)
    } else {
        Color::ZERO
    };

    let (diffuse, specular) = local_illumination(&hit, ray.direction, scene);

    let color = material.diffuse_color * (diffuse * albedo.x)
        + Color::ONE * (specular * albedo.y)
        + reflect_color * albedo.z
        + refract_color * albedo.w;

    if color.is_finite() {
        color
    } else {
        log::warn!("Non-finite shade at {:?}, using background", hit.point);
        background.sample(ray.direction)
    }
}
