//! Prism Renderer - CPU Whitted-style ray tracing.
//!
//! Traces primary rays from a fixed pinhole camera into a scene of spheres
//! and a checkerboard floor, with Phong lighting, hard shadows, mirror
//! reflection and refraction. Rays that escape sample an environment map
//! (or a flat color). Rows are rendered in parallel with rayon.

mod camera;
mod intersect;
mod renderer;
mod shading;

pub use camera::Camera;
pub use intersect::{
    ray_floor, ray_sphere, scene_intersect, HitRecord, EPSILON, FAR_CUTOFF, HIT_RANGE,
};
pub use renderer::{render, render_pixel, RenderConfig, RenderError, RenderResult};
pub use shading::{
    cast_ray, light_contribution, local_illumination, offset_origin, Background, MAX_DEPTH,
};

/// Re-export common types from prism_core and prism_math
pub use prism_core::{Color, EnvironmentMap, PixelBuffer, Scene};
pub use prism_math::{Ray, Vec3};
