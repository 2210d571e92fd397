//! Display rendering for calculator values

/// Renders a value the way the display shows it.
///
/// Integral values print without a fractional part (`8`, not `8.0`), other
/// finite values use the shortest text that parses back to the same `f64`,
/// and non-finite values print as `inf`, `-inf` or `NaN`. Every string this
/// returns parses back with `str::parse::<f64>()`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well
        return "0".to_string();
    }
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
