//! Rolling resistance savings model.

use crate::quantity::{
    cost::Cost,
    distance::Kilometres,
    fuel::{Consumption, LitrePrice},
    rrc::Rrc,
};

/// Empirical rule: reducing the RRC by 10% reduces the fuel consumption by about 2%.
pub const FUEL_TO_RRC_ELASTICITY: f64 = 0.2;

/// Annual fuel cost.
pub fn fuel_cost_per_year(
    distance: Kilometres,
    fuel_price: LitrePrice,
    consumption: Consumption,
) -> Cost {
    (distance * consumption) * fuel_price
}

/// Fraction of the fuel saved when switching from `base` to `compared`.
///
/// Positive when `compared` is lower (better) than `base`, negative when switching costs fuel.
/// Zero for a non-positive `base`.
#[must_use]
pub fn savings_fraction(base: Rrc, compared: Rrc) -> f64 {
    if base <= Rrc::ZERO {
        return 0.0;
    }
    ((base - compared) / base) * FUEL_TO_RRC_ELASTICITY
}

/// Annual money saved when switching from `base` to `compared`.
pub fn annual_savings(
    base: Rrc,
    compared: Rrc,
    distance: Kilometres,
    fuel_price: LitrePrice,
    consumption: Consumption,
) -> Cost {
    fuel_cost_per_year(distance, fuel_price, consumption) * savings_fraction(base, compared)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_fuel_cost_per_year() {
        let cost = fuel_cost_per_year(Kilometres(15000.0), LitrePrice(7.0), Consumption(6.5));
        assert_eq!(cost, Cost(6825.0));
    }

    #[test]
    fn test_fuel_cost_with_zero_inputs() {
        assert_eq!(
            fuel_cost_per_year(Kilometres(0.0), LitrePrice(7.0), Consumption(6.5)),
            Cost::ZERO,
        );
        assert_eq!(
            fuel_cost_per_year(Kilometres(15000.0), LitrePrice(0.0), Consumption(6.5)),
            Cost::ZERO,
        );
    }

    #[test]
    #[expect(clippy::float_cmp)]
    fn test_savings_fraction_of_equal_coefficients() {
        for rrc in [0.1, 6.0, 8.4, 15.0] {
            assert_eq!(savings_fraction(Rrc(rrc), Rrc(rrc)), 0.0);
        }
    }

    #[test]
    fn test_savings_fraction_elasticity() {
        assert_abs_diff_eq!(savings_fraction(Rrc(10.0), Rrc(5.0)), 0.1);
    }

    #[test]
    fn test_savings_fraction_sign() {
        assert!(savings_fraction(Rrc(8.4), Rrc(6.0)) > 0.0);
        assert!(savings_fraction(Rrc(6.0), Rrc(8.4)) < 0.0);
    }

    #[test]
    #[expect(clippy::float_cmp)]
    fn test_savings_fraction_of_non_positive_base() {
        assert_eq!(savings_fraction(Rrc(0.0), Rrc(5.0)), 0.0);
        assert_eq!(savings_fraction(Rrc(-1.0), Rrc(5.0)), 0.0);
    }

    #[test]
    fn test_annual_savings() {
        let savings = annual_savings(
            Rrc(8.4),
            Rrc(6.0),
            Kilometres(15000.0),
            LitrePrice(7.0),
            Consumption(6.5),
        );
        assert_abs_diff_eq!(savings.0, 390.0, epsilon = 1.0);
    }

    #[test]
    fn test_annual_savings_of_worse_tyres() {
        let savings = annual_savings(
            Rrc(6.0),
            Rrc(8.4),
            Kilometres(15000.0),
            LitrePrice(7.0),
            Consumption(6.5),
        );
        assert!(savings < Cost::ZERO);
    }

    #[test]
    fn test_annual_savings_of_equal_coefficients() {
        let savings = annual_savings(
            Rrc(8.4),
            Rrc(8.4),
            Kilometres(15000.0),
            LitrePrice(7.0),
            Consumption(6.5),
        );
        assert_eq!(savings, Cost::ZERO);
    }
}
