//! Display units and significant-digit formatting.

use crate::duration::Duration;
use std::fmt;

/// Display unit chosen from a representative duration's magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scale {
    /// `[0, 1e3)` ns
    Nanoseconds,
    /// `[1e3, 1e6)` ns
    Microseconds,
    /// `[1e6, 1e9)` ns
    Milliseconds,
    /// `[1e9, ∞)` ns
    Seconds,
}

impl Scale {
    /// Classify an absolute nanosecond value
    pub fn for_nanos(nanos: f64) -> Self {
        let magnitude = nanos.abs();
        if magnitude < 1e3 {
            Scale::Nanoseconds
        } else if magnitude < 1e6 {
            Scale::Microseconds
        } else if magnitude < 1e9 {
            Scale::Milliseconds
        } else {
            Scale::Seconds
        }
    }

    /// Classify a duration
    pub fn of(duration: Duration) -> Self {
        Self::for_nanos(duration.nanoseconds())
    }

    /// Nanoseconds per unit
    pub const fn factor(self) -> f64 {
        match self {
            Scale::Nanoseconds => 1.0,
            Scale::Microseconds => 1e3,
            Scale::Milliseconds => 1e6,
            Scale::Seconds => 1e9,
        }
    }

    /// Unit suffix
    pub const fn label(self) -> &'static str {
        match self {
            Scale::Nanoseconds => "ns",
            Scale::Microseconds => "us",
            Scale::Milliseconds => "ms",
            Scale::Seconds => "s",
        }
    }

    /// `duration` expressed in this unit
    pub fn apply(self, duration: Duration) -> f64 {
        duration.nanoseconds() / self.factor()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format `value` with a fixed number of significant digits.
///
/// Follows C's `%#.Ng`: trailing zeros are kept so every value shows the same
/// precision, and scientific notation is used when the decimal exponent is
/// below -4 or at least `digits`. A decimal point with nothing after it is
/// dropped.
///
/// ```
/// use chronos_core::format_significant;
/// assert_eq!(format_significant(0.2, 4), "0.2000");
/// assert_eq!(format_significant(1234.4, 4), "1234");
/// assert_eq!(format_significant(98766.0, 4), "9.877e+04");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    // Let the formatter do the rounding, then read back the exponent so that
    // values like 9999.6 roll over into the next decade correctly.
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        format!("{:.*}", decimals, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_boundaries() {
        assert_eq!(Scale::for_nanos(0.0), Scale::Nanoseconds);
        assert_eq!(Scale::for_nanos(500.0), Scale::Nanoseconds);
        assert_eq!(Scale::for_nanos(999.999), Scale::Nanoseconds);
        assert_eq!(Scale::for_nanos(1_000.0), Scale::Microseconds);
        assert_eq!(Scale::for_nanos(1_500_000.0), Scale::Milliseconds);
        assert_eq!(Scale::for_nanos(1e9), Scale::Seconds);
        assert_eq!(Scale::for_nanos(3.6e12), Scale::Seconds);
    }

    #[test]
    fn test_scale_uses_magnitude() {
        assert_eq!(Scale::for_nanos(-2_000.0), Scale::Microseconds);
    }

    #[test]
    fn test_apply_and_label() {
        let d = Duration::from_nanos(1_500_000.0);
        let scale = Scale::of(d);
        assert_eq!(scale.label(), "ms");
        assert_eq!(scale.factor(), 1e6);
        assert!((scale.apply(d) - 1.5).abs() < 1e-12);
        assert_eq!(Scale::Seconds.to_string(), "s");
    }

    #[test]
    fn test_significant_fixed_notation() {
        assert_eq!(format_significant(0.2, 4), "0.2000");
        assert_eq!(format_significant(2.0, 4), "2.000");
        assert_eq!(format_significant(500.0, 4), "500.0");
        assert_eq!(format_significant(0.0816497, 4), "0.08165");
        assert_eq!(format_significant(1234.4, 4), "1234");
        assert_eq!(format_significant(-1.5, 4), "-1.500");
    }

    #[test]
    fn test_significant_drops_bare_decimal_point() {
        // %#.4g would print "1000." and "1234."
        assert_eq!(format_significant(1000.0, 4), "1000");
        assert_eq!(format_significant(1234.4, 4), "1234");
        assert_eq!(format_significant(-4000.0, 4), "-4000");
        assert!(!format_significant(9999.0, 4).ends_with('.'));
    }

    #[test]
    fn test_significant_rounding_rolls_over() {
        assert_eq!(format_significant(999.96, 4), "1000");
        assert_eq!(format_significant(9999.6, 4), "1.000e+04");
    }

    #[test]
    fn test_significant_scientific_notation() {
        assert_eq!(format_significant(98766.0, 4), "9.877e+04");
        assert_eq!(format_significant(0.0001, 4), "0.0001000");
        assert_eq!(format_significant(0.00001234, 4), "1.234e-05");
    }

    #[test]
    fn test_significant_zero_and_special() {
        assert_eq!(format_significant(0.0, 4), "0.000");
        assert_eq!(format_significant(f64::NAN, 4), "NaN");
        assert_eq!(format_significant(f64::INFINITY, 4), "inf");
    }
}
