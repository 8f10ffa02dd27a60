//! Per-class projections: central line, RRC uncertainty band and fuel price brackets.

use std::fmt::{Display, Formatter};

use crate::{
    label::LabelClass,
    model::annual_savings,
    parameters::UsageParameters,
    projection::{BreakEven, SavingsSeries},
    quantity::{cost::Cost, fuel::LitrePrice, ratios::Percentage, time::Months},
};

/// Envelope between the worst-case and best-case cumulative savings.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Band {
    pub worst: SavingsSeries,
    pub best: SavingsSeries,
}

impl Band {
    /// Interpolated `(worst, best)` pair at the month.
    pub fn bounds_at(&self, month: Months) -> (Cost, Cost) {
        (self.worst.at(month), self.best.at(month))
    }

    /// Whether the point lies inside the band, bounds included.
    #[must_use]
    pub fn contains(&self, month: Months, value: Cost) -> bool {
        let (worst, best) = self.bounds_at(month);
        worst <= value && value <= best
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Fuel gets more expensive.
    High,

    /// Fuel gets cheaper.
    Low,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "+"),
            Self::Low => write!(f, "−"),
        }
    }
}

impl Direction {
    /// Multiplier applied to the fuel price or to a savings rate.
    #[must_use]
    pub const fn factor(self, variation: Percentage) -> f64 {
        match self {
            Self::High => 1.0 + variation.to_ratio(),
            Self::Low => 1.0 - variation.to_ratio(),
        }
    }
}

/// Central projection at an adjusted fuel price.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bracket {
    pub fuel_price: LitrePrice,
    pub annual_savings: Cost,
    pub series: SavingsSeries,
    pub break_even: BreakEven,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuelBrackets {
    pub variation: Percentage,
    pub high: Bracket,
    pub low: Bracket,
}

impl FuelBrackets {
    pub const fn get(&self, direction: Direction) -> &Bracket {
        match direction {
            Direction::High => &self.high,
            Direction::Low => &self.low,
        }
    }
}

/// Everything the chart and the summary need for one compared class.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassProjection {
    pub class: LabelClass,

    /// Extra price paid for the baseline tyres, subtracted at every month.
    pub upfront_delta: Cost,

    /// Central annual savings when switching from this class to the baseline.
    pub annual_savings: Cost,

    pub central: SavingsSeries,
    pub break_even: BreakEven,
    pub band: Band,
    pub fuel_brackets: Option<FuelBrackets>,
}

impl ClassProjection {
    pub fn build(
        baseline: &LabelClass,
        class: &LabelClass,
        usage: &UsageParameters,
        upfront_delta: Cost,
    ) -> Self {
        let years = usage.projection_years;
        let savings_at = |base, compared, fuel_price| {
            annual_savings(base, compared, usage.annual_distance, fuel_price, usage.consumption)
        };

        let central = savings_at(class.midpoint, baseline.midpoint, usage.fuel_price);
        let worst = savings_at(class.min, baseline.max, usage.fuel_price).min(central);
        let best = savings_at(class.max, baseline.min, usage.fuel_price).max(central);

        let fuel_brackets = usage.has_fuel_price_variation().then(|| {
            let bracket = |direction: Direction| {
                let fuel_price = usage.fuel_price * direction.factor(usage.fuel_price_variation);
                let annual_savings = savings_at(class.midpoint, baseline.midpoint, fuel_price);
                Bracket {
                    fuel_price,
                    annual_savings,
                    series: SavingsSeries::project(annual_savings, years, upfront_delta),
                    break_even: BreakEven::new(annual_savings, upfront_delta),
                }
            };
            FuelBrackets {
                variation: usage.fuel_price_variation,
                high: bracket(Direction::High),
                low: bracket(Direction::Low),
            }
        });

        Self {
            class: class.clone(),
            upfront_delta,
            annual_savings: central,
            central: SavingsSeries::project(central, years, upfront_delta),
            break_even: BreakEven::new(central, upfront_delta),
            band: Band {
                worst: SavingsSeries::project(worst, years, upfront_delta),
                best: SavingsSeries::project(best, years, upfront_delta),
            },
            fuel_brackets,
        }
    }

    pub fn horizon(&self) -> Months {
        self.central.horizon()
    }

    /// Chart datasets in drawing order: band, central line, then the fuel brackets.
    pub fn chart_series(&self) -> Vec<ChartSeries<'_>> {
        let horizon = self.horizon();
        let mut series = vec![
            ChartSeries::Band { worst: &self.band.worst, best: &self.band.best },
            ChartSeries::Central {
                series: &self.central,
                break_even: self.break_even.within(horizon),
            },
        ];
        if let Some(brackets) = &self.fuel_brackets {
            for direction in [Direction::High, Direction::Low] {
                let bracket = brackets.get(direction);
                series.push(ChartSeries::FuelBracket {
                    variation: brackets.variation,
                    direction,
                    series: &bracket.series,
                    break_even: bracket.break_even.within(horizon),
                });
            }
        }
        series
    }
}

/// Dataset handed to a chart, the break-even marker only set when it falls within the horizon.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChartSeries<'a> {
    Central {
        series: &'a SavingsSeries,
        break_even: Option<Months>,
    },

    Band {
        worst: &'a SavingsSeries,
        best: &'a SavingsSeries,
    },

    FuelBracket {
        variation: Percentage,
        direction: Direction,
        series: &'a SavingsSeries,
        break_even: Option<Months>,
    },
}
