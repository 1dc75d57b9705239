//! RGBA8 pixel storage.
//!
//! Pixels are stored row-major with 4 bytes per pixel; channel `c` of pixel
//! `(x, y)` lives at `(y * width + x) * 4 + c`. Every accessor validates its
//! coordinates and reports `PixelBufferError::OutOfRange` instead of clamping.

use prism_math::Interval;
use thiserror::Error;

use crate::Color;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Valid range of a byte channel before truncation.
const BYTE_RANGE: Interval = Interval::new(0.0, 255.0);

/// Errors from pixel buffer access and construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelBufferError {
    #[error("pixel ({x}, {y}) channel {channel} out of range for {width}x{height} buffer")]
    OutOfRange {
        x: u32,
        y: u32,
        channel: usize,
        width: u32,
        height: u32,
    },

    #[error("expected {expected} bytes for a {width}x{height} RGBA buffer, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type PixelBufferResult<T> = Result<T, PixelBufferError>;

/// Convert a float channel to a byte, rounding to nearest and clamping to [0, 255].
#[inline]
pub fn float_to_byte(value: f32) -> u8 {
    // NaN falls through clamp unchanged and `as u8` maps it to 0
    BYTE_RANGE.clamp(value * 255.0 + 0.5) as u8
}

/// Convert a byte channel to a float in [0, 1].
#[inline]
pub fn byte_to_float(value: u8) -> f32 {
    value as f32 / 255.0
}

/// A width x height grid of RGBA byte pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Wrap existing RGBA bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PixelBufferResult<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its RGBA bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, x: u32, y: u32, channel: usize) -> PixelBufferResult<usize> {
        if x >= self.width || y >= self.height || channel >= CHANNELS {
            return Err(PixelBufferError::OutOfRange {
                x,
                y,
                channel,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS + channel)
    }

    /// Read one channel of a pixel.
    pub fn get(&self, x: u32, y: u32, channel: usize) -> PixelBufferResult<u8> {
        let idx = self.index(x, y, channel)?;
        Ok(self.data[idx])
    }

    /// Write one channel of a pixel.
    pub fn set(&mut self, x: u32, y: u32, channel: usize, value: u8) -> PixelBufferResult<()> {
        let idx = self.index(x, y, channel)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Read a pixel's RGB channels as floats in [0, 1].
    pub fn get_pixel(&self, x: u32, y: u32) -> PixelBufferResult<Color> {
        let idx = self.index(x, y, 0)?;
        let px = &self.data[idx..idx + 3];
        Ok(Color::new(
            byte_to_float(px[0]),
            byte_to_float(px[1]),
            byte_to_float(px[2]),
        ))
    }

    /// Write a float color to a pixel, forcing alpha to fully opaque.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> PixelBufferResult<()> {
        let idx = self.index(x, y, 0)?;
        write_rgba(&mut self.data[idx..idx + CHANNELS], color);
        Ok(())
    }

    /// Split the buffer into disjoint mutable rows.
    ///
    /// Each row can be handed to a different worker; no two views alias.
    pub fn rows_mut(&mut self) -> Vec<RowMut<'_>> {
        let (width, height) = (self.width, self.height);
        let stride = width as usize * CHANNELS;
        if stride == 0 {
            return Vec::new();
        }
        self.data
            .chunks_exact_mut(stride)
            .enumerate()
            .map(|(y, data)| RowMut {
                y: y as u32,
                width,
                height,
                data,
            })
            .collect()
    }
}

/// Exclusive view of one row of a [`PixelBuffer`].
pub struct RowMut<'a> {
    y: u32,
    width: u32,
    height: u32,
    data: &'a mut [u8],
}

impl RowMut<'_> {
    /// Row index within the parent buffer.
    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Write a float color at column `x`, forcing alpha to fully opaque.
    pub fn set_pixel(&mut self, x: u32, color: Color) -> PixelBufferResult<()> {
        if x >= self.width {
            return Err(PixelBufferError::OutOfRange {
                x,
                y: self.y,
                channel: 0,
                width: self.width,
                height: self.height,
            });
        }
        let idx = x as usize * CHANNELS;
        write_rgba(&mut self.data[idx..idx + CHANNELS], color);
        Ok(())
    }
}

#[inline]
fn write_rgba(px: &mut [u8], color: Color) {
    px[0] = float_to_byte(color.x);
    px[1] = float_to_byte(color.y);
    px[2] = float_to_byte(color.z);
    px[3] = 0xFF;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_layout() {
        let mut buf = PixelBuffer::new(3, 2);
        buf.set(2, 1, 1, 42).unwrap();

        // (y * width + x) * 4 + c
        assert_eq!(buf.as_bytes()[(1 * 3 + 2) * 4 + 1], 42);
        assert_eq!(buf.get(2, 1, 1).unwrap(), 42);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut buf = PixelBuffer::new(4, 4);

        assert!(matches!(
            buf.get(4, 0, 0),
            Err(PixelBufferError::OutOfRange { x: 4, .. })
        ));
        assert!(buf.get(0, 4, 0).is_err());
        assert!(buf.get(0, 0, 4).is_err());
        assert!(buf.set(0, 0, 4, 1).is_err());
        assert!(buf.set_pixel(10, 10, Color::ONE).is_err());
        assert!(buf.get_pixel(0, 9).is_err());

        // Nothing was written by the failed calls
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            PixelBufferError::LengthMismatch {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15,
            }
        );
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_set_pixel_forces_alpha() {
        let mut buf = PixelBuffer::new(1, 1);
        buf.set_pixel(0, 0, Color::new(1.0, 0.5, 0.0)).unwrap();
        assert_eq!(buf.as_bytes(), &[255, 128, 0, 255]);
    }

    #[test]
    fn test_float_to_byte_clamps_and_rounds() {
        assert_eq!(float_to_byte(-1.0), 0);
        assert_eq!(float_to_byte(0.0), 0);
        assert_eq!(float_to_byte(1.0), 255);
        assert_eq!(float_to_byte(7.5), 255);
        assert_eq!(float_to_byte(0.5), 128);
        assert_eq!(float_to_byte(f32::NAN), 0);
    }

    #[test]
    fn test_byte_float_round_trip() {
        for b in 0..=255u8 {
            let back = float_to_byte(byte_to_float(b));
            assert!((back as i32 - b as i32).abs() <= 1, "{} -> {}", b, back);
        }
    }

    #[test]
    fn test_get_pixel() {
        let buf = PixelBuffer::from_raw(1, 1, vec![255, 0, 51, 255]).unwrap();
        let color = buf.get_pixel(0, 0).unwrap();
        assert_eq!(color, Color::new(1.0, 0.0, 0.2));
    }

    #[test]
    fn test_rows_are_disjoint() {
        let mut buf = PixelBuffer::new(2, 3);
        {
            let mut rows = buf.rows_mut();
            assert_eq!(rows.len(), 3);
            for row in rows.iter_mut() {
                let shade = row.y() as f32 / 2.0;
                row.set_pixel(1, Color::splat(shade)).unwrap();
                assert!(row.set_pixel(2, Color::ONE).is_err());
            }
        }

        assert_eq!(buf.get(1, 0, 0).unwrap(), 0);
        assert_eq!(buf.get(1, 1, 0).unwrap(), 128);
        assert_eq!(buf.get(1, 2, 0).unwrap(), 255);
        // Untouched column keeps its zero alpha
        assert_eq!(buf.get(0, 2, 3).unwrap(), 0);
    }
}
