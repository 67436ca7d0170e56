use nalgebra::Vector3;

const EPSILON: f32 = 1e-8;

/// Normalizes `v`, returning the zero vector when its length is (near) zero
/// instead of dividing by zero.
#[inline]
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(EPSILON).unwrap_or_else(Vector3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vector_stays_zero() {
        assert_eq!(normalize_or_zero(&Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn non_zero_vector_has_unit_length() {
        let n = normalize_or_zero(&Vector3::new(3.0, 0.0, 4.0));
        assert!((n.norm() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }
}
