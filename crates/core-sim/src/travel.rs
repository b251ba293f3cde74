use crate::config::PositionSide;

/// Signed percentage distance of `current_price` from the effective
/// reference price, normalized by the distance from that reference to the
/// liquidation price. Adverse movement is negative regardless of side.
///
/// A zero denominator (reference coinciding with liquidation) is a
/// degenerate but valid state and yields 0.0.
pub fn travel_percent(
    current_price: f64,
    reference_price: f64,
    liquidation_price: f64,
    side: PositionSide,
) -> f64 {
    let direction = side.direction();
    let denominator = direction * (reference_price - liquidation_price);
    if denominator == 0.0 {
        return 0.0;
    }

    let numerator = direction * (current_price - reference_price);
    (numerator / denominator) * 100.0
}

#[cfg(test)]
mod tests {
    use super::travel_percent;
    use crate::config::PositionSide;

    #[test]
    fn long_price_falling_toward_liquidation_is_negative() {
        let travel = travel_percent(9_000.0, 10_000.0, 8_000.0, PositionSide::Long);

        assert_eq!(travel, -50.0);
    }

    #[test]
    fn long_price_rising_away_from_liquidation_is_positive() {
        let travel = travel_percent(11_000.0, 10_000.0, 8_000.0, PositionSide::Long);

        assert_eq!(travel, 50.0);
    }

    #[test]
    fn short_price_rising_toward_liquidation_is_negative() {
        let travel = travel_percent(11_000.0, 10_000.0, 12_000.0, PositionSide::Short);

        assert_eq!(travel, -50.0);
    }

    #[test]
    fn short_price_falling_away_from_liquidation_is_positive() {
        let travel = travel_percent(9_000.0, 10_000.0, 12_000.0, PositionSide::Short);

        assert_eq!(travel, 50.0);
    }

    #[test]
    fn reference_equal_to_liquidation_yields_zero_for_any_price() {
        assert_eq!(
            travel_percent(1.0, 8_000.0, 8_000.0, PositionSide::Long),
            0.0
        );
        assert_eq!(
            travel_percent(1_000_000.0, 8_000.0, 8_000.0, PositionSide::Long),
            0.0
        );
        assert_eq!(
            travel_percent(9_500.0, 8_000.0, 8_000.0, PositionSide::Short),
            0.0
        );
    }

    #[test]
    fn price_at_reference_is_zero_travel() {
        let travel = travel_percent(10_000.0, 10_000.0, 8_000.0, PositionSide::Long);

        assert_eq!(travel, 0.0);
    }
}
