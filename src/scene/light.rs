use crate::core::math::vector::normalize_or_zero;
use nalgebra::{Point3, Vector3};

/// A single point light. No attenuation, no color: it only scales the
/// diffuse term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 10.0),
        }
    }
}

impl PointLight {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    /// Lambertian diffuse factor at a surface point, in `[0, 1]`.
    pub fn ndotl(&self, surface_point: &Vector3<f32>, normal: &Vector3<f32>) -> f32 {
        let light_direction = normalize_or_zero(&(self.position.coords - surface_point));
        let normal = normalize_or_zero(normal);

        normal.dot(&light_direction).max(0.0)
    }
}
