use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// Camera described by an eye position and a look-at target.
/// The up direction is always world +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

/// The fixed world up direction used for every view matrix.
#[inline]
pub fn world_up() -> Vector3<f32> {
    Vector3::y()
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 10.0),
            target: Point3::origin(),
        }
    }
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        Self { position, target }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::look_at(&self.position, &self.target, &world_up())
    }
}
