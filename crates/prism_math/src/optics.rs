//! Reflection and refraction of direction vectors.

use crate::Vec3;

/// Direction substituted for the refracted ray under total internal reflection.
pub const TIR_SENTINEL: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

/// Refract `incident` through a surface with normal `n` using Snell's law.
///
/// `eta_t` is the index of the medium on the far side of `n`, `eta_i` the
/// index on the incident side. A ray arriving from inside the medium
/// (`incident · n > 0`) swaps the two. Total internal reflection returns
/// [`TIR_SENTINEL`].
pub fn refract(incident: Vec3, n: Vec3, eta_t: f32, eta_i: f32) -> Vec3 {
    let cos_i = -incident.dot(n).clamp(-1.0, 1.0);
    if cos_i < 0.0 {
        return refract(incident, -n, eta_i, eta_t);
    }

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return TIR_SENTINEL;
    }

    incident * eta + n * (eta * cos_i - k.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        // Normal incidence does not bend
        let out = refract(-Vec3::Z, Vec3::Z, 1.5, 1.0);
        assert!((out - -Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(incident, Vec3::Y, 1.5, 1.0);

        // sin(theta_t) = sin(45deg) / 1.5
        let sin_t = out.normalize().x;
        assert!((sin_t - (0.5f32.sqrt() / 1.5)).abs() < 1e-5);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_refract_from_inside_swaps_indices() {
        // Leaving glass at a shallow angle bends away from the normal
        let incident = Vec3::new(0.3, 1.0, 0.0).normalize();
        let out = refract(incident, Vec3::Y, 1.5, 1.0);
        assert!(out.normalize().x > incident.x);
        assert!(out.y > 0.0);
    }

    #[test]
    fn test_total_internal_reflection_sentinel() {
        // Grazing exit from a dense medium cannot refract
        let incident = Vec3::new(1.0, 0.2, 0.0).normalize();
        let out = refract(incident, Vec3::Y, 1.5, 1.0);
        assert_eq!(out, TIR_SENTINEL);
        assert!(out.is_finite());
    }
}
