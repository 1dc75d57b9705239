//! Row-parallel frame renderer.
//!
//! Every image row is an independent unit of work handed to rayon. Rows
//! share the scene read-only and write only into their own slice of the
//! output buffer, so no locking is needed. `render` returns only after all
//! rows are done.

use std::f32::consts::FRAC_PI_2;
use std::time::Instant;

use prism_core::{Color, EnvironmentMap, PixelBuffer, PixelBufferError, Scene};
use rayon::prelude::*;
use thiserror::Error;

use crate::shading::{cast_ray, Background, MAX_DEPTH};
use crate::Camera;

/// Errors that abort a render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer error: {0}")]
    Buffer(#[from] PixelBufferError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Field of view in radians
    pub fov: f32,
    /// Maximum recursion depth for reflection/refraction
    pub max_depth: u32,
    /// Background color used when no environment map is supplied
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            fov: FRAC_PI_2,
            max_depth: MAX_DEPTH,
            background: Color::new(0.2, 0.7, 0.8),
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set field of view (radians).
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Shade a single pixel.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    background: &Background,
    i: u32,
    j: u32,
    max_depth: u32,
) -> Color {
    let ray = camera.get_ray(i, j);
    cast_ray(&ray, scene, background, 0, max_depth)
}

/// Render the scene to a new RGBA buffer.
///
/// Escaped rays sample `environment` when given, otherwise the flat
/// `config.background`.
pub fn render(
    scene: &Scene,
    environment: Option<&EnvironmentMap>,
    config: &RenderConfig,
) -> RenderResult<PixelBuffer> {
    if config.width == 0 || config.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: config.width,
            height: config.height,
        });
    }

    let camera = Camera::new(config.width, config.height, config.fov);
    let background = match environment {
        Some(map) => Background::Environment(map),
        None => Background::Flat(config.background),
    };

    log::info!(
        "Rendering {}x{}: {} spheres, {} lights, max depth {}",
        config.width,
        config.height,
        scene.spheres.len(),
        scene.lights.len(),
        config.max_depth
    );
    log::debug!("Worker threads: {}", rayon::current_num_threads());

    let start = Instant::now();
    let mut image = PixelBuffer::new(config.width, config.height);

    image
        .rows_mut()
        .into_par_iter()
        .try_for_each(|mut row| -> RenderResult<()> {
            let j = row.y();
            for i in 0..row.width() {
                let color = render_pixel(&camera, scene, &background, i, j, config.max_depth);
                row.set_pixel(i, color)?;
            }
            Ok(())
        })?;

    log::info!("Rendered in {:.2?}", start.elapsed());

    Ok(image)
}
