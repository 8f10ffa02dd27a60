//! Values derived from a point the user hovers on the savings chart.

use std::str::FromStr;

use crate::{
    band::{ClassProjection, Direction},
    label::LabelClass,
    prelude::*,
    projection::{BreakEven, cumulative_savings, implied_annual_savings},
    projector::Projection,
    quantity::{cost::Cost, rrc::Rrc, time::Months},
};

/// Fractional month and cumulative savings under the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueryPoint {
    pub month: Months,
    pub value: Cost,
}

impl FromStr for QueryPoint {
    type Err = Error;

    /// Parse `MONTH:VALUE`, for example, `18.5:240`.
    fn from_str(s: &str) -> Result<Self> {
        let (month, value) =
            s.split_once(':').with_context(|| format!("expected `MONTH:VALUE`, got `{s}`"))?;
        let month: f64 =
            month.trim().parse().with_context(|| format!("invalid month `{month}`"))?;
        let value: f64 =
            value.trim().parse().with_context(|| format!("invalid value `{value}`"))?;
        ensure!(month.is_finite() && value.is_finite(), "`{s}` is not finite");
        Ok(Self { month: Months(month), value: Cost(value) })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BracketValues {
    pub high: Cost,
    pub low: Cost,
}

/// Detail panel values for one compared class.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reading<'a> {
    pub class: &'a LabelClass,

    /// The query point lies inside this class band and the values are derived from it.
    pub in_band: bool,

    pub cumulative: Cost,
    pub annual_savings: Cost,
    pub break_even: BreakEven,
    pub implied_rrc: Rrc,

    /// Cumulative savings at the adjusted fuel prices, when the variation is set.
    pub fuel_brackets: Option<BracketValues>,
}

impl Projection {
    /// First compared class whose band contains the point.
    #[must_use]
    pub fn active_class(&self, point: QueryPoint) -> Option<&ClassProjection> {
        self.classes.iter().find(|class| class.band.contains(point.month, point.value))
    }

    /// Readings for every compared class.
    ///
    /// Only the active class derives its values from the point, the others report their central
    /// projection at the point month. Without a point, every class reports the horizon values.
    #[must_use]
    pub fn query(&self, point: Option<QueryPoint>) -> Vec<Reading<'_>> {
        let active = point.and_then(|point| self.active_class(point));
        self.classes
            .iter()
            .map(|class| match point {
                Some(point) if active.is_some_and(|active| std::ptr::eq(active, class)) => {
                    class.derive(point)
                }
                _ => class.static_reading(point.map(|point| point.month)),
            })
            .collect()
    }
}

impl ClassProjection {
    /// Treat the point as the realized cumulative savings and derive the rest from it.
    fn derive(&self, point: QueryPoint) -> Reading<'_> {
        let QueryPoint { month, value } = point;
        let annual_savings = if month > Months::ZERO {
            implied_annual_savings(value, month, self.upfront_delta)
        } else {
            self.annual_savings
        };
        let fuel_brackets = self.fuel_brackets.as_ref().map(|brackets| {
            if month > Months::ZERO {
                let at = |direction: Direction| {
                    let annual_savings = annual_savings * direction.factor(brackets.variation);
                    cumulative_savings(annual_savings, month, self.upfront_delta)
                };
                BracketValues { high: at(Direction::High), low: at(Direction::Low) }
            } else {
                BracketValues {
                    high: brackets.high.series.at(month),
                    low: brackets.low.series.at(month),
                }
            }
        });
        Reading {
            class: &self.class,
            in_band: true,
            cumulative: value,
            annual_savings,
            break_even: BreakEven::new(annual_savings, self.upfront_delta),
            implied_rrc: self.implied_rrc(point),
            fuel_brackets,
        }
    }

    /// Coefficient at the same relative position within the class range
    /// as the point within the band.
    fn implied_rrc(&self, point: QueryPoint) -> Rrc {
        let (worst, best) = self.band.bounds_at(point.month);
        if best > worst {
            let fraction = (point.value - worst) / (best - worst);
            self.class.min + (self.class.max - self.class.min) * fraction
        } else {
            self.class.midpoint
        }
    }

    /// Precomputed central values at the month, or at the horizon.
    fn static_reading(&self, month: Option<Months>) -> Reading<'_> {
        let month = month.unwrap_or_else(|| self.horizon());
        Reading {
            class: &self.class,
            in_band: false,
            cumulative: self.central.at(month),
            annual_savings: self.annual_savings,
            break_even: self.break_even,
            implied_rrc: self.class.midpoint,
            fuel_brackets: self.fuel_brackets.as_ref().map(|brackets| BracketValues {
                high: brackets.high.series.at(month),
                low: brackets.low.series.at(month),
            }),
        }
    }
}

/// Last query point that landed inside a band.
///
/// Owned by the caller and replaced on every pointer move.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Crosshair(Option<QueryPoint>);

impl Crosshair {
    pub const fn point(self) -> Option<QueryPoint> {
        self.0
    }

    /// Move to the candidate if it lands inside any band, otherwise stay put.
    ///
    /// The candidate month is clamped to the projection horizon first.
    pub fn track(self, projection: &Projection, candidate: QueryPoint) -> Self {
        let candidate = QueryPoint {
            month: candidate.month.clamp(Months::ZERO, projection.horizon()),
            ..candidate
        };
        if projection.active_class(candidate).is_some() {
            Self(Some(candidate))
        } else {
            debug!(month = %candidate.month, value = %candidate.value, "outside of the bands");
            self
        }
    }

    pub fn readings(self, projection: &Projection) -> Vec<Reading<'_>> {
        projection.query(self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        label::LabelSet,
        parameters::UsageParameters,
        projector::Projector,
        quantity::{
            distance::Kilometres,
            fuel::{Consumption, LitrePrice},
            ratios::Percentage,
        },
        selection::TirePrices,
    };

    fn projection(fuel_price_variation: f64, tire_prices: &[(&str, f64)]) -> Projection {
        let usage = UsageParameters {
            annual_distance: Kilometres(15000.0),
            fuel_price: LitrePrice(7.0),
            consumption: Consumption(6.5),
            projection_years: 5,
            fuel_price_variation: Percentage(fuel_price_variation),
        };
        let tire_prices: TirePrices = tire_prices
            .iter()
            .map(|(label, price)| ((*label).to_string(), Cost(*price)))
            .collect();
        Projector::builder()
            .label_set(&LabelSet::eu_2020_740_c1())
            .selection(&[String::from("A"), String::from("C"), String::from("E")])
            .usage(&usage)
            .tire_prices(&tire_prices)
            .project()
            .into_projection()
            .unwrap()
    }

    #[test]
    fn test_parse_query_point() -> Result {
        let point: QueryPoint = "18.5:-240".parse()?;
        assert_eq!(point, QueryPoint { month: Months(18.5), value: Cost(-240.0) });
        assert!("18.5".parse::<QueryPoint>().is_err());
        assert!("x:1".parse::<QueryPoint>().is_err());
        assert!("1:NaN".parse::<QueryPoint>().is_err());
        Ok(())
    }

    #[test]
    fn test_no_point_reports_horizon_values() {
        let projection = projection(10.0, &[]);
        let readings = projection.query(None);
        assert_eq!(readings.len(), 2);
        for (reading, class) in readings.iter().zip(&projection.classes) {
            assert!(!reading.in_band);
            assert_eq!(reading.cumulative, class.central.last_value());
            assert_eq!(reading.annual_savings, class.annual_savings);
            assert_eq!(reading.break_even, class.break_even);
            assert_eq!(reading.implied_rrc, class.class.midpoint);
            let brackets = class.fuel_brackets.as_ref().unwrap();
            assert_eq!(
                reading.fuel_brackets,
                Some(BracketValues {
                    high: brackets.high.series.last_value(),
                    low: brackets.low.series.last_value(),
                }),
            );
        }
    }

    #[test]
    fn test_out_of_band_point() {
        let projection = projection(0.0, &[]);
        let point = QueryPoint { month: Months(30.5), value: Cost(1_000_000.0) };
        assert!(projection.active_class(point).is_none());
        for (reading, class) in projection.query(Some(point)).iter().zip(&projection.classes) {
            assert!(!reading.in_band);
            assert_eq!(reading.cumulative, class.central.at(point.month));
            assert_eq!(reading.annual_savings, class.annual_savings);
            assert_eq!(reading.fuel_brackets, None);
        }
    }

    #[test]
    fn test_only_first_containing_class_is_active() {
        let projection = projection(0.0, &[]);
        let e = projection.get("E").unwrap();
        let point = QueryPoint { month: Months(30.0), value: e.central.at(Months(30.0)) };
        assert!(e.band.contains(point.month, point.value));
        let active = projection.active_class(point).map(|class| class.class.label.as_str());
        assert_eq!(active, Some("C"));

        let readings = projection.query(Some(point));
        assert!(readings[0].in_band);
        assert_eq!(readings[0].class.label, "C");
        assert!(!readings[1].in_band);
        assert_eq!(readings[1].annual_savings, e.annual_savings);
    }

    #[test]
    fn test_round_trip() {
        let projection = projection(10.0, &[("A", 700.0), ("C", 450.0)]);
        let c = projection.get("C").unwrap();
        for month in [0.5, 7.25, 18.0, 33.3, 60.0] {
            let month = Months(month);
            let (worst, best) = c.band.bounds_at(month);
            for value in [worst, (worst + best) / 2.0, best] {
                let reading = projection.query(Some(QueryPoint { month, value }))[0];
                assert!(reading.in_band);
                assert_eq!(reading.cumulative, value);
                assert_abs_diff_eq!(
                    cumulative_savings(reading.annual_savings, month, c.upfront_delta).0,
                    value.0,
                    epsilon = 1e-6,
                );
            }
        }
    }

    #[test]
    fn test_derived_break_even_follows_the_point() {
        let projection = projection(0.0, &[("A", 700.0), ("C", 450.0)]);
        let c = projection.get("C").unwrap();
        let month = Months(24.0);
        let (_, best) = c.band.bounds_at(month);
        let reading = projection.query(Some(QueryPoint { month, value: best }))[0];
        assert!(reading.annual_savings > c.annual_savings);
        assert!(reading.break_even.as_f64() < c.break_even.as_f64());
        assert_abs_diff_eq!(
            reading.break_even.as_f64(),
            (c.upfront_delta / reading.annual_savings) * 12.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_implied_rrc_spans_the_class_range() {
        let projection = projection(0.0, &[]);
        let c = projection.get("C").unwrap();
        let month = Months(12.0);
        let (worst, best) = c.band.bounds_at(month);

        let at_worst = projection.query(Some(QueryPoint { month, value: worst }))[0];
        assert_abs_diff_eq!(at_worst.implied_rrc.0, 7.8, epsilon = 1e-9);
        let at_best = projection.query(Some(QueryPoint { month, value: best }))[0];
        assert_abs_diff_eq!(at_best.implied_rrc.0, 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_month_falls_back_to_central_rate() {
        let projection = projection(10.0, &[]);
        let c = projection.get("C").unwrap();
        let point = QueryPoint { month: Months::ZERO, value: Cost::ZERO };
        let reading = projection.query(Some(point))[0];
        assert!(reading.in_band);
        assert_eq!(reading.annual_savings, c.annual_savings);
        assert_eq!(reading.break_even, BreakEven::Never);
        assert_eq!(reading.implied_rrc, c.class.midpoint);
        assert_eq!(
            reading.fuel_brackets,
            Some(BracketValues { high: Cost::ZERO, low: Cost::ZERO }),
        );
    }

    #[test]
    fn test_fuel_brackets_are_derived_from_the_point() {
        let projection = projection(10.0, &[("A", 600.0)]);
        let c = projection.get("C").unwrap();
        let month = Months(20.0);
        let value = c.central.at(month) + Cost(50.0);
        let reading = projection.query(Some(QueryPoint { month, value }))[0];
        let brackets = reading.fuel_brackets.unwrap();
        assert_abs_diff_eq!(
            brackets.high.0,
            (reading.annual_savings.0 * 1.1 / 12.0) * 20.0 - 600.0,
            epsilon = 1e-9,
        );
        assert_abs_diff_eq!(
            brackets.low.0,
            (reading.annual_savings.0 * 0.9 / 12.0) * 20.0 - 600.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_crosshair_keeps_last_in_band_point() {
        let projection = projection(0.0, &[]);
        let c = projection.get("C").unwrap();
        let inside = QueryPoint { month: Months(10.0), value: c.central.at(Months(10.0)) };
        let outside = QueryPoint { month: Months(11.0), value: Cost(1_000_000.0) };

        let crosshair = Crosshair::default().track(&projection, outside);
        assert_eq!(crosshair.point(), None);
        let crosshair = crosshair.track(&projection, inside);
        assert_eq!(crosshair.point(), Some(inside));
        let crosshair = crosshair.track(&projection, outside);
        assert_eq!(crosshair.point(), Some(inside));
        assert!(crosshair.readings(&projection)[0].in_band);
    }

    #[test]
    fn test_crosshair_clamps_month() {
        let projection = projection(0.0, &[]);
        let c = projection.get("C").unwrap();
        let value = c.central.last_value();
        let crosshair =
            Crosshair::default().track(&projection, QueryPoint { month: Months(75.0), value });
        assert_eq!(crosshair.point(), Some(QueryPoint { month: Months(60.0), value }));
    }
}
