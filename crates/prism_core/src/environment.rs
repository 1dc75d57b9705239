//! Environment map loading and directional lookup.
//!
//! The map is decoded once, up front, into an RGBA8 `PixelBuffer`. Rays that
//! escape the scene look up their color by direction.

use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

use crate::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::Color;

/// Errors that can occur while loading an environment map.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Failed to load environment map: {0}")]
    LoadError(String),

    #[error("Environment map has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Malformed environment map: {0}")]
    Malformed(#[from] PixelBufferError),
}

pub type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// A panoramic background image indexed by ray direction.
#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    pixels: PixelBuffer,
}

impl EnvironmentMap {
    /// Wrap an already-decoded buffer. Zero-sized buffers are rejected.
    pub fn from_buffer(pixels: PixelBuffer) -> EnvironmentResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(EnvironmentError::Empty {
                width: pixels.width(),
                height: pixels.height(),
            });
        }
        Ok(Self { pixels })
    }

    /// Build from raw RGBA bytes, validating the length against the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> EnvironmentResult<Self> {
        Self::from_buffer(PixelBuffer::from_raw(width, height, data)?)
    }

    /// Load and decode an image file (PNG or JPEG).
    pub fn load(path: impl AsRef<Path>) -> EnvironmentResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            EnvironmentError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let map = Self::from_rgba(width, height, rgba.into_raw())?;

        log::debug!(
            "Loaded environment map: {} ({}x{}, {:.1} KB)",
            path.display(),
            width,
            height,
            map.pixels.as_bytes().len() as f32 / 1024.0
        );

        Ok(map)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Map a direction to pixel coordinates.
    ///
    /// Horizontal covers half the map width across x in [-1, 1]; vertical
    /// covers the full height across y in [1, -1]. The result is clamped to
    /// the last row/column so `y = -1` stays addressable.
    pub fn texel_coords(&self, direction: Vec3) -> (u32, u32) {
        let d = direction.normalize_or_zero();
        let u = (d.x / 2.0 + 0.5) * 0.5 * self.width() as f32;
        let v = (1.0 - (d.y / 2.0 + 0.5)) * self.height() as f32;
        let x = (u.max(0.0) as u32).min(self.width() - 1);
        let y = (v.max(0.0) as u32).min(self.height() - 1);
        (x, y)
    }

    /// Color seen along `direction`.
    pub fn sample(&self, direction: Vec3) -> Color {
        let (x, y) = self.texel_coords(direction);
        // texel_coords never leaves the map
        self.pixels.get_pixel(x, y).unwrap_or(Color::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_map(width: u32, height: u32) -> EnvironmentMap {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buf.set(x, y, 0, (x * 10) as u8).unwrap();
                buf.set(x, y, 1, (y * 10) as u8).unwrap();
            }
        }
        EnvironmentMap::from_buffer(buf).unwrap()
    }

    #[test]
    fn test_empty_map_rejected() {
        let err = EnvironmentMap::from_buffer(PixelBuffer::new(0, 4)).unwrap_err();
        assert!(matches!(err, EnvironmentError::Empty { width: 0, height: 4 }));
    }

    #[test]
    fn test_wrong_byte_length_rejected() {
        let err = EnvironmentMap::from_rgba(4, 4, vec![0; 10]).unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::Malformed(PixelBufferError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EnvironmentMap::load("/definitely/not/here.jpg").unwrap_err();
        assert!(matches!(err, EnvironmentError::LoadError(_)));
    }

    #[test]
    fn test_texel_coords() {
        let map = gradient_map(8, 4);

        // Straight ahead lands a quarter of the way across, mid-height
        assert_eq!(map.texel_coords(Vec3::new(0.0, 0.0, -1.0)), (2, 2));
        // Straight up is the top row
        assert_eq!(map.texel_coords(Vec3::Y), (2, 0));
        // Straight down is clamped onto the last row
        assert_eq!(map.texel_coords(-Vec3::Y), (2, 3));
        // +X reaches the middle column of the map
        assert_eq!(map.texel_coords(Vec3::X), (4, 2));
        // Degenerate direction still yields a valid texel
        let (x, y) = map.texel_coords(Vec3::ZERO);
        assert!(x < 8 && y < 4);
    }

    #[test]
    fn test_sample_reads_pixel() {
        let map = gradient_map(8, 4);
        let color = map.sample(Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(color, Color::new(20.0 / 255.0, 20.0 / 255.0, 0.0));
    }
}
