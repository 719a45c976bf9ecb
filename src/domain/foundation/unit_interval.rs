//! UnitInterval value object (0.0-1.0 scale).

use super::ValidationError;

/// A value between 0.0 and 1.0 inclusive.
///
/// Task-context inputs are checked through this type; computed scores are
/// clipped with [`clip_unit`] instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitInterval(f64);

impl UnitInterval {
    /// Creates a UnitInterval, returning error if out of range.
    pub fn try_new(field: &str, value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Clips a raw score into `[0, 1]`, mapping NaN to `0`.
pub fn clip_unit(value: f64) -> f64 {
    clip_range(value, 0.0, 1.0)
}

/// Clips a raw score into `[min, max]`, mapping NaN to `min`.
pub fn clip_range(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_interval_try_new_accepts_bounds() {
        assert_eq!(UnitInterval::try_new("x", 0.0).unwrap().value(), 0.0);
        assert_eq!(UnitInterval::try_new("x", 0.42).unwrap().value(), 0.42);
        assert_eq!(UnitInterval::try_new("x", 1.0).unwrap().value(), 1.0);
    }

    #[test]
    fn unit_interval_try_new_rejects_out_of_range() {
        match UnitInterval::try_new("time_factor", 1.2) {
            Err(ValidationError::OutOfRange { field, actual, .. }) => {
                assert_eq!(field, "time_factor");
                assert_eq!(actual, 1.2);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(UnitInterval::try_new("x", f64::NAN).is_err());
        assert!(UnitInterval::try_new("x", -0.01).is_err());
    }

    #[test]
    fn clip_unit_handles_nan_and_bounds() {
        assert_eq!(clip_unit(-0.3), 0.0);
        assert_eq!(clip_unit(1.7), 1.0);
        assert_eq!(clip_unit(f64::NAN), 0.0);
        assert_eq!(clip_unit(f64::INFINITY), 1.0);
    }

    #[test]
    fn clip_range_handles_nan_and_bounds() {
        assert_eq!(clip_range(3.0, 0.0, 2.0), 2.0);
        assert_eq!(clip_range(-1.0, 0.0, 2.0), 0.0);
        assert_eq!(clip_range(f64::NAN, 0.0, 2.0), 0.0);
        assert_eq!(clip_range(1.5, 0.0, 2.0), 1.5);
    }
}
