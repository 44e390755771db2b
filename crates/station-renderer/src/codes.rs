//! Plot-code formatting for numeric station-model fields.
//!
//! Pure functions, kept separate from the slot rules so each WMO encoding
//! can be tested against the code tables in isolation.

use station_common::ValueMode;

/// Wind symbol index from speed and reporting unit.
///
/// The smallest real wind glyph represents 2.5 m/s (5 kt), so indices 0 and
/// 1 both mean "calm marker".
pub fn wind_symbol_index(speed: f64, unit: &str) -> i64 {
    let divisor = if unit == "KT" { 5.0 } else { 2.5 };
    (speed / divisor).round() as i64
}

/// Two-digit wind icon key, e.g. 12 m/s -> "05".
pub fn wind_speed_match(speed: f64, unit: &str) -> String {
    format!("{:02}", wind_symbol_index(speed, unit))
}

/// Three-digit sea-level pressure plot code.
///
/// Whole hectopascals keep their last two digits with a trailing zero for
/// the tenths place; fractional values plot the last three digits of the
/// value in tenths.
pub fn pressure_plot_code(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:02}0", (value.abs() as i64) % 100)
    } else {
        let tenths = (value.abs() * 10.0).round() as i64;
        format!("{:03}", tenths % 1000)
    }
}

/// Pressure-change plot text plus whether color carries the sign.
///
/// Changes within +-9.9 hPa plot as two digits of tenths; a negative change
/// keeps its leading minus unless polychromatic mode drops the glyph and
/// conveys the sign by color instead. Larger changes plot as raw tenths,
/// unsigned.
pub fn tendency_plot(change: f64, poly_chromatic: bool) -> (String, bool) {
    let tenths = (change.abs() * 10.0).round() as i64;
    if change.abs() <= 9.9 {
        let digits = format!("{:02}", tenths);
        if change < 0.0 {
            if poly_chromatic {
                (digits, true)
            } else {
                (format!("-{}", digits), false)
            }
        } else {
            (digits, false)
        }
    } else {
        (tenths.to_string(), false)
    }
}

/// Precipitation amount text; the leading zero is dropped below 1 mm.
pub fn precip_amount_text(amount: f64) -> String {
    let text = amount.to_string();
    if amount > 0.0 && amount < 1.0 {
        text.trim_start_matches('0').to_string()
    } else {
        text
    }
}

/// Temperature or dewpoint text in the requested mode.
pub fn temperature_text(value: f64, mode: ValueMode) -> String {
    match mode {
        ValueMode::Raw => value.to_string(),
        ValueMode::Rounded => value.round().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_speed_match_ms() {
        assert_eq!(wind_speed_match(12.0, "m/s"), "05");
        assert_eq!(wind_speed_match(37.5, "m/s"), "15");
    }

    #[test]
    fn test_wind_speed_match_knots() {
        assert_eq!(wind_speed_match(16.0, "KT"), "03");
        assert_eq!(wind_speed_match(124.0, "KT"), "25");
    }

    #[test]
    fn test_wind_calm_indices() {
        assert_eq!(wind_symbol_index(0.0, "m/s"), 0);
        assert_eq!(wind_symbol_index(1.2, "m/s"), 0);
        assert_eq!(wind_symbol_index(2.0, "m/s"), 1);
        assert_eq!(wind_symbol_index(4.0, "KT"), 1);
    }

    #[test]
    fn test_pressure_plot_code() {
        assert_eq!(pressure_plot_code(1013.4), "134");
        assert_eq!(pressure_plot_code(1005.0), "050");
        assert_eq!(pressure_plot_code(992.5), "925");
    }

    #[test]
    fn test_tendency_plot_positive() {
        assert_eq!(tendency_plot(4.7, false), ("47".to_string(), false));
        assert_eq!(tendency_plot(9.9, true), ("99".to_string(), false));
    }

    #[test]
    fn test_tendency_plot_large_magnitude_unsigned() {
        assert_eq!(tendency_plot(12.2, false), ("122".to_string(), false));
        assert_eq!(tendency_plot(-12.2, true), ("122".to_string(), false));
    }

    #[test]
    fn test_tendency_plot_negative_sign_vs_color() {
        assert_eq!(tendency_plot(-9.9, false), ("-99".to_string(), false));
        assert_eq!(tendency_plot(-9.9, true), ("99".to_string(), true));
    }

    #[test]
    fn test_precip_amount_text() {
        assert_eq!(precip_amount_text(0.5), ".5");
        assert_eq!(precip_amount_text(0.25), ".25");
        assert_eq!(precip_amount_text(2.0), "2");
        assert_eq!(precip_amount_text(13.4), "13.4");
        assert_eq!(precip_amount_text(0.0), "0");
    }

    #[test]
    fn test_temperature_text_modes() {
        assert_eq!(temperature_text(-3.2, ValueMode::Raw), "-3.2");
        assert_eq!(temperature_text(-3.2, ValueMode::Rounded), "-3");
        assert_eq!(temperature_text(11.0, ValueMode::Raw), "11");
        assert_eq!(temperature_text(11.6, ValueMode::Rounded), "12");
    }
}
