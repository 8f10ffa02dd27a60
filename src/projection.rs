//! Monthly cumulative savings series, break-even and interpolation.

use std::fmt::{Display, Formatter};

use crate::{
    fmt::FormattedMonths,
    quantity::{cost::Cost, time::Months},
};

/// Cumulative savings after `month` months.
///
/// The upfront delta is subtracted at every month, month zero included.
pub fn cumulative_savings(annual_savings: Cost, month: Months, upfront_delta: Cost) -> Cost {
    (annual_savings / Months::PER_YEAR) * month.0 - upfront_delta
}

/// Annual savings rate that makes the projection pass through `cumulative` at `month`.
///
/// Exact inverse of [`cumulative_savings`], undefined for a non-positive `month`.
pub fn implied_annual_savings(cumulative: Cost, month: Months, upfront_delta: Cost) -> Cost {
    (cumulative + upfront_delta) * Months::PER_YEAR / month.0
}

/// Cumulative savings per whole month, from month zero up to the horizon inclusive.
#[must_use]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    derive_more::Deref,
    derive_more::From,
    derive_more::IntoIterator,
)]
pub struct SavingsSeries(Vec<Cost>);

impl SavingsSeries {
    /// Expand the annual savings into `years * 12 + 1` monthly points.
    pub fn project(annual_savings: Cost, years: u32, upfront_delta: Cost) -> Self {
        let n_months = years.saturating_mul(12);
        (0..=n_months)
            .map(|month| {
                cumulative_savings(annual_savings, Months(f64::from(month)), upfront_delta)
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Horizon month, that is, the last index.
    #[expect(clippy::cast_precision_loss)]
    pub fn horizon(&self) -> Months {
        Months::from(self.0.len().saturating_sub(1) as f64)
    }

    /// Value at the last month, zero for an empty series.
    pub fn last_value(&self) -> Cost {
        self.0.last().copied().unwrap_or(Cost::ZERO)
    }

    /// Value at a fractional month, see [`interpolate`].
    pub fn at(&self, month: Months) -> Cost {
        interpolate(&self.0, month)
    }
}

/// Linearly interpolate the whole-month values at a fractional month.
///
/// Clamps to the first and last values outside the series, and gives zero for an empty one.
pub fn interpolate(values: &[Cost], month: Months) -> Cost {
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return Cost::ZERO;
    };
    if month.0.is_nan() || month <= Months::ZERO {
        return *first;
    }
    #[expect(clippy::cast_precision_loss)]
    let last_index = (values.len() - 1) as f64;
    if month.0 >= last_index {
        return *last;
    }

    let floor = month.0.floor();
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = floor as usize;
    let (from, to) = (values[index], values[index + 1]);
    from + (to - from) * (month.0 - floor)
}

/// Month at which the cumulative savings recover the upfront delta.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BreakEven {
    After(Months),

    /// Nothing to recover, or the savings never do.
    Never,
}

impl BreakEven {
    pub fn new(annual_savings: Cost, upfront_delta: Cost) -> Self {
        if annual_savings <= Cost::ZERO || upfront_delta <= Cost::ZERO {
            Self::Never
        } else {
            Self::After(Months((upfront_delta / annual_savings) * Months::PER_YEAR))
        }
    }

    /// Break-even month when it falls within the horizon.
    #[must_use]
    pub fn within(self, horizon: Months) -> Option<Months> {
        match self {
            Self::After(month) if month <= horizon => Some(month),
            Self::After(_) | Self::Never => None,
        }
    }

    /// Months as `f64`, infinite for [`BreakEven::Never`].
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::After(month) => month.0,
            Self::Never => f64::INFINITY,
        }
    }
}

impl Display for BreakEven {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::After(month) => write!(f, "{}", FormattedMonths(*month)),
            Self::Never => write!(f, "never"),
        }
    }
}
