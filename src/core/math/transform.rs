use crate::core::math::vector::normalize_or_zero;
use nalgebra::{Matrix4, Point3, Vector3};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the pipeline.
///
/// All matrices follow the row-vector convention: a point is transformed as
/// `(x, y, z, 1) · M`, so composed transforms read left to right
/// (`world * view * projection`). Entries are passed to `Matrix4::new`
/// row by row, exactly as they appear in that convention.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation built from Euler angles in z-y-x (Tait-Bryan) order,
    /// going through an intermediate quaternion.
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Matrix4<f32> {
        let (sin_roll, cos_roll) = (roll * 0.5).sin_cos();
        let (sin_pitch, cos_pitch) = (pitch * 0.5).sin_cos();
        let (sin_yaw, cos_yaw) = (yaw * 0.5).sin_cos();

        let x = cos_yaw * sin_pitch * cos_roll + sin_yaw * cos_pitch * sin_roll;
        let y = sin_yaw * cos_pitch * cos_roll - cos_yaw * sin_pitch * sin_roll;
        let z = cos_yaw * cos_pitch * sin_roll - sin_yaw * sin_pitch * cos_roll;
        let w = cos_yaw * cos_pitch * cos_roll + sin_yaw * sin_pitch * sin_roll;

        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, zw, zx) = (x * y, z * w, z * x);
        let (yw, yz, xw) = (y * w, y * z, x * w);

        Matrix4::new(
            1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw),       2.0 * (zx - yw),       0.0,
            2.0 * (xy - zw),       1.0 - 2.0 * (zz + xx), 2.0 * (yz + xw),       0.0,
            2.0 * (zx + yw),       2.0 * (yz - xw),       1.0 - 2.0 * (yy + xx), 0.0,
            0.0,                   0.0,                   0.0,                   1.0,
        )
    }

    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix. The offset lives in the bottom row.
    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0,      0.0,      0.0,      0.0,
            0.0,      1.0,      0.0,      0.0,
            0.0,      0.0,      1.0,      0.0,
            offset.x, offset.y, offset.z, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Creates a view matrix looking from `eye` towards `target`.
    ///
    /// The basis is `z = target - eye`, `x = up × z`, `y = z × x`, each
    /// normalized; the bottom row carries the eye projected onto that basis.
    pub fn look_at(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = normalize_or_zero(&(target - eye));
        let x_axis = normalize_or_zero(&up.cross(&z_axis));
        let y_axis = normalize_or_zero(&z_axis.cross(&x_axis));

        let ex = -x_axis.dot(&eye.coords);
        let ey = -y_axis.dot(&eye.coords);
        let ez = -z_axis.dot(&eye.coords);

        Matrix4::new(
            x_axis.x, y_axis.x, z_axis.x, 0.0,
            x_axis.y, y_axis.y, z_axis.y, 0.0,
            x_axis.z, y_axis.z, z_axis.z, 0.0,
            ex,       ey,       ez,       1.0,
        )
    }

    /// Creates a perspective projection matrix.
    ///
    /// The view-space depth is copied into `w` through the third row's last
    /// column, so the divide in [`transform_coordinates`] performs the
    /// perspective foreshortening.
    pub fn perspective_fov(fov_rad: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
        let tan = 1.0 / (fov_rad * 0.5).tan();
        let nf = near - far;

        Matrix4::new(
            tan / aspect_ratio, 0.0, 0.0,                0.0,
            0.0,                tan, 0.0,                0.0,
            0.0,                0.0, -far / nf,          1.0,
            0.0,                0.0, (near * far) / nf,  0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Full homogeneous transform `(v, 1) · M` followed by the divide by `w`.
///
/// A transform that yields `w == 0` produces non-finite output; callers are
/// expected to keep geometry in front of the eye.
#[inline]
pub fn transform_coordinates(v: &Vector3<f32>, m: &Matrix4<f32>) -> Vector3<f32> {
    let x = v.x * m[(0, 0)] + v.y * m[(1, 0)] + v.z * m[(2, 0)] + m[(3, 0)];
    let y = v.x * m[(0, 1)] + v.y * m[(1, 1)] + v.z * m[(2, 1)] + m[(3, 1)];
    let z = v.x * m[(0, 2)] + v.y * m[(1, 2)] + v.z * m[(2, 2)] + m[(3, 2)];
    let w = v.x * m[(0, 3)] + v.y * m[(1, 3)] + v.z * m[(2, 3)] + m[(3, 3)];

    Vector3::new(x / w, y / w, z / w)
}

/// Transforms a direction with the upper-left 3x3 block only:
/// no translation and no perspective divide.
#[inline]
pub fn transform_normal(n: &Vector3<f32>, m: &Matrix4<f32>) -> Vector3<f32> {
    Vector3::new(
        n.x * m[(0, 0)] + n.y * m[(1, 0)] + n.z * m[(2, 0)],
        n.x * m[(0, 1)] + n.y * m[(1, 1)] + n.z * m[(2, 1)],
        n.x * m[(0, 2)] + n.y * m[(1, 2)] + n.z * m[(2, 2)],
    )
}

/// Maps centered device coordinates to top-left-origin pixel coordinates.
/// Y is flipped (device +Y is up, pixel rows grow downward); depth passes through.
#[inline]
pub fn device_to_screen(device: &Vector3<f32>, width: f32, height: f32) -> Point3<f32> {
    Point3::new(
        device.x * width + width / 2.0,
        -device.y * height + height / 2.0,
        device.z,
    )
}
