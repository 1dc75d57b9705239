//! Fixed pinhole camera for primary ray generation.

use prism_math::{Ray, Vec3};

/// Pinhole camera at the origin looking down -Z with +Y up.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    /// Horizontal half-extent of the image plane at z = -1
    half_width: f32,
    /// Vertical half-extent of the image plane at z = -1
    half_height: f32,
}

impl Camera {
    /// Create a camera with the given resolution and field of view (radians).
    pub fn new(image_width: u32, image_height: u32, fov: f32) -> Self {
        let half_height = (fov / 2.0).tan();
        let aspect = image_width as f32 / image_height.max(1) as f32;
        Self {
            image_width,
            image_height,
            half_width: half_height * aspect,
            half_height,
        }
    }

    /// Unit direction through the center of pixel (i, j); j = 0 is the top row.
    pub fn direction(&self, i: u32, j: u32) -> Vec3 {
        let x = (2.0 * (i as f32 + 0.5) / self.image_width as f32 - 1.0) * self.half_width;
        let y = -(2.0 * (j as f32 + 0.5) / self.image_height as f32 - 1.0) * self.half_height;
        Vec3::new(x, y, -1.0).normalize()
    }

    /// Primary ray for pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        Ray::new(Vec3::ZERO, self.direction(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_single_pixel_looks_straight_ahead() {
        let camera = Camera::new(1, 1, FRAC_PI_2);
        let ray = camera.get_ray(0, 0);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - -Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_corner_directions() {
        // 90 degree fov: image plane spans [-1, 1] at z = -1
        let camera = Camera::new(2, 2, FRAC_PI_2);

        let top_left = camera.direction(0, 0);
        assert!((top_left - Vec3::new(-0.5, 0.5, -1.0).normalize()).length() < 1e-6);

        let bottom_right = camera.direction(1, 1);
        assert!((bottom_right - Vec3::new(0.5, -0.5, -1.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_aspect_ratio_widens_horizontal() {
        let camera = Camera::new(4, 2, FRAC_PI_2);
        let right = camera.direction(3, 0);
        let expected = Vec3::new((2.0 * 3.5 / 4.0 - 1.0) * 2.0, 0.5, -1.0).normalize();
        assert!((right - expected).length() < 1e-6);
        assert!((right.length() - 1.0).abs() < 1e-6);
    }
}
