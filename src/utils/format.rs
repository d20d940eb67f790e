//! Fixed-precision display formatting. The aggregators stay numeric; these
//! helpers are applied only at the response boundary.

pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn format_seconds(millis: f64) -> String {
    format!("{:.2}", millis / 1000.0)
}

pub fn format_minutes(millis: f64) -> String {
    format!("{:.2}", millis / 60_000.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_has_one_decimal_place() {
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(2.0 / 3.0), "66.7%");
    }

    #[test]
    fn seconds_and_minutes_have_two_decimal_places() {
        assert_eq!(format_seconds(8000.0), "8.00");
        assert_eq!(format_seconds(2666.666), "2.67");
        assert_eq!(format_minutes(90_000.0), "1.50");
    }

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(2666.666), 2666.67);
        assert_eq!(round2(0.005), 0.01);
    }
}
