/// Clamps `value` into `[min, max]`.
#[inline(always)]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Linear interpolation between `min` and `max`.
///
/// The gradient is always clamped to `[0, 1]`, so callers that step slightly
/// past an edge saturate at the end value instead of extrapolating.
#[inline(always)]
pub fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    min + (max - min) * clamp(gradient, 0.0, 1.0)
}

/// Position of `value` along `[start, end]` as a fraction.
/// A zero-length range yields `1.0`.
#[inline(always)]
pub fn gradient(value: f32, start: f32, end: f32) -> f32 {
    if start != end {
        (value - start) / (end - start)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_hits_endpoints_and_midpoint() {
        assert_eq!(interpolate(2.0, 4.0, 0.0), 2.0);
        assert_eq!(interpolate(2.0, 4.0, 1.0), 4.0);
        assert_eq!(interpolate(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn interpolate_saturates_outside_unit_range() {
        assert_eq!(interpolate(2.0, 4.0, -3.0), 2.0);
        assert_eq!(interpolate(2.0, 4.0, 7.5), 4.0);
        assert_eq!(interpolate(4.0, 2.0, 2.0), 2.0);
    }

    #[test]
    fn gradient_of_flat_range_is_one() {
        assert_eq!(gradient(5.0, 3.0, 3.0), 1.0);
        assert_eq!(gradient(4.0, 3.0, 5.0), 0.5);
    }
}
