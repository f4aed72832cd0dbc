use crate::CoreError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Widest interval accepted by [`ensure_range`]. Uniform sampling scales the
/// width by slightly more than one, so it must stay well below `f64::MAX`.
pub const MAX_RANGE_WIDTH: f64 = f64::MAX / 2.0;

/// Check that `(min, max)` is a finite, non-inverted closed interval no wider
/// than [`MAX_RANGE_WIDTH`].
pub fn ensure_range(range: (f64, f64), what: &'static str) -> Result<(f64, f64), CoreError> {
    let (min, max) = range;
    ensure_finite(min, what)?;
    ensure_finite(max, what)?;
    if min > max || !(max - min <= MAX_RANGE_WIDTH) {
        return Err(CoreError::InvalidRange { what, min, max });
    }
    Ok(range)
}

/// Infinity norm of a slice (0.0 for an empty slice, NaN if any entry is NaN).
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| {
        if v.is_nan() || acc.is_nan() {
            f64::NAN
        } else {
            acc.max(v.abs())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_range_rejects_inverted_and_infinite() {
        assert!(ensure_range((0.0, 1.0), "flow").is_ok());
        assert!(ensure_range((2.0, 2.0), "flow").is_ok());
        assert!(matches!(
            ensure_range((1.0, 0.0), "flow"),
            Err(CoreError::InvalidRange { .. })
        ));
        assert!(matches!(
            ensure_range((0.0, f64::INFINITY), "flow"),
            Err(CoreError::NonFinite { .. })
        ));
        let err = ensure_range((f64::NAN, 1.0), "flow").unwrap_err();
        assert!(err.to_string().contains("Non-finite"));
    }

    #[test]
    fn ensure_range_rejects_overflowing_width() {
        assert!(matches!(
            ensure_range((-f64::MAX, f64::MAX), "pressure"),
            Err(CoreError::InvalidRange { .. })
        ));
        assert!(ensure_range((0.0, f64::MAX), "pressure").is_err());
        assert!(ensure_range((-1e300, 1e300), "pressure").is_ok());
    }

    #[test]
    fn max_abs_propagates_nan() {
        assert_eq!(max_abs(&[]), 0.0);
        assert_eq!(max_abs(&[1.0, -3.0, 2.0]), 3.0);
        assert!(max_abs(&[1.0, f64::NAN]).is_nan());
    }
}
