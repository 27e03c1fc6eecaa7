/// Legal deliveries in one over
pub const BALLS_PER_OVER: u32 = 6;

/// Length of a full T20 innings
pub const FULL_INNINGS_OVERS: f64 = 20.0;

/// Convert cricket notation (17.4 = 17 overs, 4 balls) to true decimal overs
pub fn overs_to_decimal(overs: f64) -> f64 {
    let complete_overs = overs.floor();
    complete_overs + balls_component(overs) / f64::from(BALLS_PER_OVER)
}

/// Convert true decimal overs back to cricket notation
pub fn decimal_to_overs(decimal: f64) -> f64 {
    let mut complete_overs = decimal.floor();
    let mut balls = ((decimal - complete_overs) * f64::from(BALLS_PER_OVER)).round();

    if balls >= f64::from(BALLS_PER_OVER) {
        complete_overs += 1.0;
        balls = 0.0;
    }

    complete_overs + balls / 10.0
}

/// Whether an overs value is a legal T20 innings length in cricket notation
pub fn validate_overs(overs: f64) -> bool {
    let balls = balls_component(overs);
    overs >= 0.0 && overs <= FULL_INNINGS_OVERS && (0.0..=5.0).contains(&balls)
}

/// Cricket notation with one decimal, e.g. "18.3"
pub fn format_overs(decimal: f64) -> String {
    format!("{:.1}", decimal_to_overs(decimal))
}

/// Signed NRR with three decimals, e.g. "+0.132"
pub fn format_nrr(nrr: f64) -> String {
    // Avoid printing "-0.000"
    let nrr = if nrr.abs() < 0.0005 { 0.0 } else { nrr };
    format!("{:+.3}", nrr)
}

/// Digit after the decimal point, read as balls within the current over
fn balls_component(overs: f64) -> f64 {
    ((overs - overs.floor()) * 10.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overs_to_decimal() {
        assert!((overs_to_decimal(17.4) - (17.0 + 4.0 / 6.0)).abs() < 1e-9);
        assert_eq!(overs_to_decimal(17.0), 17.0);
        assert!((overs_to_decimal(18.3) - 18.5).abs() < 1e-9);
        assert_eq!(overs_to_decimal(0.0), 0.0);
    }

    #[test]
    fn test_decimal_to_overs() {
        assert!((decimal_to_overs(18.5) - 18.3).abs() < 1e-9);
        assert_eq!(decimal_to_overs(20.0), 20.0);
        assert!((decimal_to_overs(overs_to_decimal(17.4)) - 17.4).abs() < 1e-9);
        // 37.99.. rounds up to a whole over
        assert_eq!(decimal_to_overs(37.999), 38.0);
    }

    #[test]
    fn test_validate_overs() {
        assert!(validate_overs(20.0));
        assert!(validate_overs(0.0));
        assert!(validate_overs(17.5));
        assert!(!validate_overs(20.1));
        assert!(!validate_overs(5.6));
        assert!(!validate_overs(-1.0));
        assert!(!validate_overs(f64::NAN));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_nrr(0.13157), "+0.132");
        assert_eq!(format_nrr(-0.5), "-0.500");
        assert_eq!(format_nrr(0.0), "+0.000");
        assert_eq!(format_nrr(-0.0001), "+0.000");
        assert_eq!(format_overs(18.5), "18.3");
        assert_eq!(format_overs(40.0), "40.0");
    }
}
