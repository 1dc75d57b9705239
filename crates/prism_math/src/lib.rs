// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod optics;
mod ray;
pub use interval::Interval;
pub use optics::{reflect, refract, TIR_SENTINEL};
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_degenerate_normalize() {
        // Zero-length vectors normalize to zero instead of NaN
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
        assert!((Vec3::new(3.0, 0.0, 4.0).normalize().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec4_albedo_channels() {
        let albedo = Vec4::new(0.6, 0.3, 0.1, 0.0);
        assert_eq!(albedo.x + albedo.y + albedo.z + albedo.w, 1.0);
        assert_eq!(Vec2::new(1.0, 2.0).dot(Vec2::new(3.0, 4.0)), 11.0);
    }
}
