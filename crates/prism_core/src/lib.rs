//! Prism Core - pixel storage and scene description for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Pixel buffer**: `PixelBuffer`, an RGBA8 grid with bounds-checked access
//! - **Environment map**: `EnvironmentMap`, a panoramic image sampled by direction
//! - **Scene types**: `Scene`, `Sphere`, `Light`, `Material`, `Checkerboard`
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{EnvironmentMap, Scene};
//!
//! let envmap = EnvironmentMap::load("envmap.jpg")?;
//! let scene = Scene::default_scene();
//! println!("{} spheres, {} lights", scene.spheres.len(), scene.lights.len());
//! ```

pub mod environment;
pub mod pixel_buffer;
pub mod scene;

/// Color type alias (RGB values typically 0-1)
pub type Color = prism_math::Vec3;

// Re-export commonly used types
pub use environment::{EnvironmentError, EnvironmentMap, EnvironmentResult};
pub use pixel_buffer::{
    byte_to_float, float_to_byte, PixelBuffer, PixelBufferError, PixelBufferResult, RowMut,
};
pub use scene::{
    Checkerboard, Footprint, Light, Material, MaterialKind, Scene, SceneError, SceneResult, Sphere,
};
