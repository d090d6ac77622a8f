//! Small numeric helpers shared by the scale and coordinate modules.

/// Normalize a value from `[min, max]` to `[0, 1]`.
///
/// A degenerate interval (`max == min`) maps everything to 0 rather than
/// dividing by zero. Downstream scales rely on this to survive zero-width
/// domains produced by single-sample auto-scaling.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// Denormalize a value from `[0, 1]` to `[min, max]`.
pub fn denormalize(value: f64, min: f64, max: f64) -> f64 {
    value * (max - min) + min
}

/// Clamp a value to `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Compute the (min, max) of a slice of values.
///
/// Returns `None` for an empty slice so callers can decide how to handle the
/// no-data case (auto-scaling treats it as a no-op).
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = values.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for &v in rest {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert!((normalize(5.0, 0.0, 10.0) - 0.5).abs() < 1e-9);
        assert!((normalize(0.0, 0.0, 10.0) - 0.0).abs() < 1e-9);
        assert!((normalize(10.0, 0.0, 10.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_degenerate_interval() {
        // max == min must not divide by zero
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.0);
        assert_eq!(normalize(-1.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_denormalize_inverts_normalize() {
        let v = 7.25;
        let t = normalize(v, 2.0, 12.0);
        assert!((denormalize(t, 2.0, 12.0) - v).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_and_lerp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert!((lerp(0.0, 10.0, 0.3) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range(&[]), None);
        assert_eq!(value_range(&[4.0]), Some((4.0, 4.0)));
        assert_eq!(value_range(&[3.0, -1.0, 7.0, 2.0]), Some((-1.0, 7.0)));
    }
}
