//! American/decimal odds conversions and expected value.
//!
//! Every function here is total: degenerate input maps to a documented
//! sentinel instead of NaN or infinity, so nothing undefined ever reaches a
//! formatted output field.

/// Decimal odds returned for the undefined `american == 0` input. Large but
/// finite, so downstream arithmetic stays well behaved.
pub const ZERO_ODDS_DECIMAL: f64 = 101.0;

/// Convert American odds to decimal odds.
pub fn american_to_decimal(american: f64) -> f64 {
    if !american.is_finite() || american == 0.0 {
        return ZERO_ODDS_DECIMAL;
    }
    if american > 0.0 {
        1.0 + american / 100.0
    } else {
        1.0 + 100.0 / american.abs()
    }
}

/// Convert decimal odds to American odds. Non-finite or sub-even-money
/// degenerate input collapses to the +100 sentinel.
pub fn decimal_to_american(decimal: f64) -> i64 {
    if !decimal.is_finite() || decimal <= 1.0 {
        return 100;
    }
    if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round() as i64
    } else {
        (-100.0 / (decimal - 1.0)).round() as i64
    }
}

/// Win probability implied by an American price, ignoring bookmaker margin.
/// Zero or non-finite input reads as a coin flip.
pub fn implied_probability(american: f64) -> f64 {
    if !american.is_finite() || american == 0.0 {
        return 0.5;
    }
    if american > 0.0 {
        100.0 / (american + 100.0)
    } else {
        american.abs() / (american.abs() + 100.0)
    }
}

/// Expected profit/loss in stake units for a bet at `american` odds with true
/// win probability `win_prob`.
pub fn expected_value(american: f64, win_prob: f64, stake: f64) -> f64 {
    let profit = (american_to_decimal(american) - 1.0) * stake;
    win_prob * profit - (1.0 - win_prob) * stake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn american_to_decimal_both_signs() {
        assert!((american_to_decimal(150.0) - 2.5).abs() < 1e-12);
        assert!((american_to_decimal(-110.0) - (1.0 + 100.0 / 110.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_odds_do_not_divide_by_zero() {
        let dec = american_to_decimal(0.0);
        assert!(dec.is_finite());
        assert_eq!(dec, ZERO_ODDS_DECIMAL);
        assert_eq!(implied_probability(0.0), 0.5);
    }

    #[test]
    fn decimal_to_american_sentinels() {
        assert_eq!(decimal_to_american(f64::NAN), 100);
        assert_eq!(decimal_to_american(1.0), 100);
        assert_eq!(decimal_to_american(0.5), 100);
    }

    #[test]
    fn round_trips_within_rounding_tolerance() {
        for odds in [-450.0, -200.0, -110.0, -105.0, 100.0, 120.0, 250.0, 900.0] {
            let back = decimal_to_american(american_to_decimal(odds)) as f64;
            assert!(
                (back - odds).abs() <= 1.0,
                "round trip drifted: {odds} -> {back}"
            );
        }
    }

    #[test]
    fn implied_probability_in_open_unit_interval() {
        for odds in [-10_000.0, -250.0, -110.0, 100.0, 110.0, 10_000.0] {
            let p = implied_probability(odds);
            assert!(p > 0.0 && p < 1.0, "p out of range for {odds}: {p}");
        }
        assert!((implied_probability(-110.0) - 110.0 / 210.0).abs() < 1e-12);
    }

    #[test]
    fn expected_value_matches_hand_computation() {
        // 0.55 * (100/110) * 5 - 0.45 * 5
        let ev = expected_value(-110.0, 0.55, 5.0);
        let expect = 0.55 * (100.0 / 110.0) * 5.0 - 0.45 * 5.0;
        assert!((ev - expect).abs() < 1e-12);
        // ~0.2045, i.e. 0.20 at two decimals.
        assert_eq!(format!("{ev:.2}"), "0.20");
    }
}
