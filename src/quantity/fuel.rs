use std::ops::Mul;

use crate::quantity::{cost::Cost, distance::Kilometres};

quantity!(Litres, suffix: "l", precision: 1);

quantity!(
    /// Fuel consumption in litres per 100 kilometres.
    Consumption, suffix: "l/100km", precision: 1
);

quantity!(
    /// Fuel price per litre.
    LitrePrice, suffix: "/l", precision: 2
);

implement_mul!(Litres, LitrePrice, Cost);

impl Mul<Consumption> for Kilometres {
    type Output = Litres;

    fn mul(self, consumption: Consumption) -> Self::Output {
        Litres((self.0 / 100.0) * consumption.0)
    }
}
