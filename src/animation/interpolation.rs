// Interpolation utilities shared by the mixer and the camera ease

use nalgebra_glm as glm;

/// Shortest-path spherical interpolation between two rotations.
/// Falls back to normalized lerp when the rotations are nearly equal.
pub fn quat_slerp(q1: &glm::Quat, q2: &glm::Quat, t: f32) -> glm::Quat {
    let mut cos_half = glm::quat_dot(q1, q2);
    let q2 = if cos_half < 0.0 {
        cos_half = -cos_half;
        -*q2
    } else {
        *q2
    };

    if cos_half > 0.9995 {
        return glm::quat_normalize(&(*q1 * (1.0 - t) + q2 * t));
    }

    let half = cos_half.acos();
    let sin_half = half.sin();
    let a = ((1.0 - t) * half).sin() / sin_half;
    let b = (t * half).sin() / sin_half;
    glm::quat_normalize(&(*q1 * a + q2 * b))
}

/// Linear interpolation for vectors
pub fn lerp_vec3(v1: &glm::Vec3, v2: &glm::Vec3, t: f32) -> glm::Vec3 {
    glm::lerp(v1, v2, t)
}

/// Linear interpolation for scalars
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-in/ease-out on [0, 1]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
