//! Conversions between glam (used by the renderer and scene) and rapier's nalgebra types

use glam::{Quat, Vec3};
use rapier3d::na::{UnitQuaternion, Vector3};

/// Convert a [`glam::Vec3`] into a [`rapier3d::na::Vector3`]
#[inline]
pub fn na_vector_from_glam(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

/// Convert a [`rapier3d::na::Vector3`] into a [`glam::Vec3`]
#[inline]
pub fn glam_vec_from_na(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert a rapier rotation into a [`glam::Quat`]
#[inline]
pub fn glam_quat_from_na(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_conversion() {
        let v = Vec3::new(1.0, -2.0, 3.5);
        let na = na_vector_from_glam(v);
        assert_eq!(na.x, 1.0);
        assert_eq!(na.y, -2.0);
        assert_eq!(na.z, 3.5);
        assert_eq!(glam_vec_from_na(&na), v);
    }

    #[test]
    fn test_identity_rotation() {
        let q = glam_quat_from_na(&UnitQuaternion::identity());
        assert_relative_eq!(q.w, 1.0);
        assert_relative_eq!(q.x, 0.0);
    }

    #[test]
    fn test_axis_angle_rotation() {
        let na = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::FRAC_PI_2);
        let q = glam_quat_from_na(&na);
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(q.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(q.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(q.z, expected.z, epsilon = 1e-6);
        assert_relative_eq!(q.w, expected.w, epsilon = 1e-6);
    }
}
