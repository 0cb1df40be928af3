//! Derived maximum pressure
//!
//! `pmax = round(pbuf * temp * 0.85, 2)`, rounding half away from zero.

use thiserror::Error;

/// Engineering safety ceiling for buffer pressure
pub const MAX_PRESSURE: f64 = 1000.0;

/// Efficiency factor applied to pressure * temperature
pub const EFFICIENCY_FACTOR: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalculationError {
    #[error("invalid input: pressure must be positive (got {0})")]
    InvalidInput(f64),

    #[error("range exceeded: pressure {0} is above the maximum of {MAX_PRESSURE}")]
    RangeExceeded(f64),

    #[error("result overflow: pressure {pressure} and temperature {temperature} give a non-finite value")]
    NonFinite { pressure: f64, temperature: f64 },
}

/// Compute the derived maximum pressure
///
/// # Errors
///
/// - [`CalculationError::InvalidInput`] when `pressure` is not strictly
///   positive (NaN included)
/// - [`CalculationError::RangeExceeded`] when `pressure > 1000`
/// - [`CalculationError::NonFinite`] when the rounded result is not finite
pub fn calculate(pressure: f64, temperature: f64) -> Result<f64, CalculationError> {
    if !(pressure > 0.0) {
        return Err(CalculationError::InvalidInput(pressure));
    }
    if pressure > MAX_PRESSURE {
        return Err(CalculationError::RangeExceeded(pressure));
    }

    // rounding scales by 100, which can overflow a finite product
    let result = round_2(pressure * temperature * EFFICIENCY_FACTOR);
    if !result.is_finite() {
        return Err(CalculationError::NonFinite {
            pressure,
            temperature,
        });
    }
    Ok(result)
}

/// Round to two decimals, ties away from zero (`f64::round` semantics)
fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_value() {
        assert_eq!(calculate(100.0, 20.0), Ok(1700.0));
    }

    #[test]
    fn test_formula_over_valid_range() {
        for &(p, t) in &[(0.5, 20.0), (12.34, 56.78), (999.99, -40.0), (1000.0, 15.5), (1.0, 0.0)] {
            let expected = (p * t * 0.85 * 100.0_f64).round() / 100.0;
            assert_eq!(calculate(p, t), Ok(expected), "p={p} t={t}");
        }
    }

    #[test]
    fn test_non_positive_pressure_is_invalid() {
        for t in [-50.0, 0.0, 20.0, 150.0] {
            assert_eq!(calculate(0.0, t), Err(CalculationError::InvalidInput(0.0)));
            assert_eq!(calculate(-5.0, t), Err(CalculationError::InvalidInput(-5.0)));
        }
        assert!(matches!(calculate(f64::NAN, 20.0), Err(CalculationError::InvalidInput(_))));
    }

    #[test]
    fn test_pressure_ceiling() {
        assert_eq!(calculate(1500.0, 20.0), Err(CalculationError::RangeExceeded(1500.0)));
        assert!(calculate(1000.0, 20.0).is_ok());
    }

    #[test]
    fn test_overflowing_result_is_rejected() {
        assert_eq!(
            calculate(1000.0, 1e306),
            Err(CalculationError::NonFinite {
                pressure: 1000.0,
                temperature: 1e306
            })
        );
        assert!(matches!(calculate(1.0, -f64::MAX), Err(CalculationError::NonFinite { .. })));
        assert!(matches!(calculate(1.0, f64::INFINITY), Err(CalculationError::NonFinite { .. })));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_2(0.125), 0.13);
        assert_eq!(round_2(-0.125), -0.13);
        assert_eq!(round_2(2.5), 2.5);
        assert_eq!(round_2(-1.234), -1.23);
    }
}
