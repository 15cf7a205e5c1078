//! Numeric text rendering for CSV output
//!
//! Every floating-point column has a fixed number of decimals. Values that
//! are not finite (a corrupted record can hold any bit pattern) still render
//! as a token instead of failing the conversion.

/// Decimals used for the `LogHours` column
pub const LOG_HOURS_PRECISION: usize = 6;
/// Decimals used for the `HzHours` column
pub const HZ_HOURS_PRECISION: usize = 4;
/// Decimals used for the per-channel volt/watt/VA hour columns
pub const CHANNEL_PRECISION: usize = 3;

pub const NAN_TOKEN: &str = "NaN";
pub const POS_INF_TOKEN: &str = "+Inf";
pub const NEG_INF_TOKEN: &str = "-Inf";

/// Format a value with exactly `precision` digits after the decimal point
pub fn format_fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        NAN_TOKEN.to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            POS_INF_TOKEN.to_string()
        } else {
            NEG_INF_TOKEN.to_string()
        }
    } else {
        format!("{value:.precision$}")
    }
}

pub fn format_log_hours(value: f64) -> String {
    format_fixed(value, LOG_HOURS_PRECISION)
}

pub fn format_hz_hours(value: f64) -> String {
    format_fixed(value, HZ_HOURS_PRECISION)
}

pub fn format_channel_hours(value: f64) -> String {
    format_fixed(value, CHANNEL_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_per_column_group() {
        assert_eq!(format_log_hours(1.0), "1.000000");
        assert_eq!(format_hz_hours(60.0), "60.0000");
        assert_eq!(format_channel_hours(3.5), "3.500");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_channel_hours(0.0004), "0.000");
        assert_eq!(format_channel_hours(2.0007), "2.001");
        assert_eq!(format_hz_hours(3600.25), "3600.2500");
        assert_eq!(format_log_hours(12.5), "12.500000");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_channel_hours(-1.25), "-1.250");
        assert_eq!(format_log_hours(-0.5), "-0.500000");
    }

    #[test]
    fn test_large_values_are_not_exponential() {
        assert_eq!(format_channel_hours(1e12), "1000000000000.000");
    }

    #[test]
    fn test_non_finite_tokens() {
        assert_eq!(format_log_hours(f64::NAN), "NaN");
        assert_eq!(format_hz_hours(f64::INFINITY), "+Inf");
        assert_eq!(format_channel_hours(f64::NEG_INFINITY), "-Inf");
    }
}
