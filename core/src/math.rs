//! Math type aliases and helper functions.
//!
//! Property values and uniform uploads use these aliases. Conversions to the
//! flat arrays handed to a graphics context go through `bytemuck`, so the
//! memory layout is the one nalgebra stores (column-major for matrices).

pub use nalgebra;

// ===== Float vectors and matrices =====

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32), column-major.
pub type Mat4 = nalgebra::Matrix4<f32>;

// ===== Integer and boolean vectors =====

/// 2D integer vector.
pub type IVec2 = nalgebra::Vector2<i32>;

/// 3D integer vector.
pub type IVec3 = nalgebra::Vector3<i32>;

/// 4D integer vector.
pub type IVec4 = nalgebra::Vector4<i32>;

/// 2D boolean vector.
pub type BVec2 = nalgebra::Vector2<bool>;

/// 3D boolean vector.
pub type BVec3 = nalgebra::Vector3<bool>;

/// 4D boolean vector.
pub type BVec4 = nalgebra::Vector4<bool>;

// ===== Flattening =====

/// Flatten a 4x4 matrix into 16 column-major floats.
pub fn mat4_to_array(m: &Mat4) -> [f32; 16] {
    bytemuck::cast(*m)
}

/// Flatten a float vector of any supported size into its components.
pub fn vec_to_array<const N: usize>(v: &nalgebra::SVector<f32, N>) -> [f32; N] {
    v.data.0[0]
}

/// Flatten an integer vector of any supported size into its components.
pub fn ivec_to_array<const N: usize>(v: &nalgebra::SVector<i32, N>) -> [i32; N] {
    v.data.0[0]
}

/// Flatten a boolean vector of any supported size into its components.
pub fn bvec_to_array<const N: usize>(v: &nalgebra::SVector<bool, N>) -> [bool; N] {
    v.data.0[0]
}

// ===== Transform helpers =====

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Build a rotation around the Y axis.
pub fn mat4_from_rotation_y(angle: f32) -> Mat4 {
    nalgebra::Rotation3::from_axis_angle(&nalgebra::Vector3::y_axis(), angle).to_homogeneous()
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    let eye_point = nalgebra::Point3::from(*eye);
    let target_point = nalgebra::Point3::from(*target);
    nalgebra::Isometry3::look_at_rh(&eye_point, &target_point, up).to_homogeneous()
}

/// Right-handed perspective projection with depth range [0, 1].
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (yfov / 2.0).tan();
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        f / aspect, 0.0,  0.0,              0.0,
        0.0,        f,    0.0,              0.0,
        0.0,        0.0,  zfar * nf,        znear * zfar * nf,
        0.0,        0.0,  -1.0,             0.0,
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn mat4_flattens_column_major() {
        let m = mat4_from_translation(Vec3::new(1.0, 2.0, 3.0));
        let a = mat4_to_array(&m);
        // Translation lives in the last column.
        assert_eq!(&a[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(a[15], 1.0);
        assert_eq!(a[0], 1.0);
    }

    #[test]
    fn vectors_flatten_in_component_order() {
        assert_eq!(vec_to_array(&Vec4::new(1.0, 0.0, 0.5, 1.0)), [1.0, 0.0, 0.5, 1.0]);
        assert_eq!(ivec_to_array(&IVec3::new(-1, 2, 3)), [-1, 2, 3]);
        assert_eq!(bvec_to_array(&BVec2::new(true, false)), [true, false]);
    }

    #[test]
    fn rotation_y_quarter_turn() {
        let m = mat4_from_rotation_y(FRAC_PI_2);
        let v = m.transform_vector(&Vec3::new(1.0, 0.0, 0.0));
        assert!((v - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn perspective_maps_near_plane_to_zero() {
        let m = perspective_rh(FRAC_PI_2, 1.0, 0.1, 100.0);
        let p = m * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((p.z / p.w).abs() < 1e-5);
    }

    #[test]
    fn look_at_moves_target_onto_negative_z() {
        let view = look_at_rh(
            &Vec3::new(0.0, 0.0, 3.0),
            &Vec3::zeros(),
            &Vec3::new(0.0, 1.0, 0.0),
        );
        let p = view.transform_point(&nalgebra::Point3::origin());
        assert!((p.z + 3.0).abs() < 1e-5);
    }
}
