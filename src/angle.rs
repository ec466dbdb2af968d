//! Angle utilities shared by the regression and prism-diopter stages.

/// Converts a deviation angle in degrees to prism diopters (`100·tan θ`).
#[inline]
pub fn degrees_to_prism_diopters(degrees: f64) -> f64 {
    degrees.to_radians().tan() * 100.0
}

/// Rounds to one decimal place, the precision reported to clinicians.
///
/// Rounding works on the exact decimal expansion of `value`, so `0.15`
/// (stored as `0.1499…`) becomes `0.1`. Exact ties, which for binary floats
/// are the odd multiples of `0.25`, go away from zero. Non-finite inputs are
/// returned unchanged so NaN keeps propagating.
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn forty_five_degrees_is_one_hundred_pd() {
        assert!(approx_eq(degrees_to_prism_diopters(45.0), 100.0));
        assert!(approx_eq(degrees_to_prism_diopters(0.0), 0.0));
        assert!(degrees_to_prism_diopters(-10.0) < 0.0);
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert!(approx_eq(round_to_tenth(6.254_175_551), 6.3));
        assert!(approx_eq(round_to_tenth(2.349), 2.3));
        assert!(approx_eq(round_to_tenth(-0.366), -0.4));
        assert!(round_to_tenth(f64::NAN).is_nan());
    }

    #[test]
    fn rounding_follows_the_decimal_expansion() {
        assert_eq!(round_to_tenth(0.15), 0.1);
        assert_eq!(round_to_tenth(1.005), 1.0);
        assert_eq!(round_to_tenth(0.35), 0.3);
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(0.75), 0.8);
        assert_eq!(round_to_tenth(-0.25), -0.3);
        assert_eq!(round_to_tenth(2.0), 2.0);
    }
}
