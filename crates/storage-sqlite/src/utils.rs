//! Conversion helpers between domain and storage representations.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// SQLite stores money as REAL; the domain works in 2-decimal fixed point.
/// Rounding here keeps float noise out of the domain.
pub fn decimal_from_db(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

pub fn decimal_to_db(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_trips_two_decimals() {
        for value in [dec!(0.00), dec!(19.99), dec!(110.00), dec!(12345.67)] {
            assert_eq!(decimal_from_db(decimal_to_db(value)), value);
        }
    }

    #[test]
    fn test_float_noise_is_rounded_away() {
        assert_eq!(decimal_from_db(0.1 + 0.2), dec!(0.30));
    }
}
