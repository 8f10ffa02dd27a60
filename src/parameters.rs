use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, PickFirst, serde_as};

use crate::quantity::{
    distance::Kilometres,
    fuel::{Consumption, LitrePrice},
    ratios::Percentage,
};

/// Vehicle usage the savings are estimated for.
///
/// Deserialization never fails on a bad field: a missing, non-numeric, non-finite
/// or negative value falls back to the field default.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LenientUsageParameters")]
pub struct UsageParameters {
    #[serde(rename = "km")]
    pub annual_distance: Kilometres,

    #[serde(rename = "fp")]
    pub fuel_price: LitrePrice,

    #[serde(rename = "fc")]
    pub consumption: Consumption,

    /// Projection horizon in whole years.
    #[serde(rename = "y")]
    pub projection_years: u32,

    /// Fuel price sensitivity, zero disables the fuel price brackets.
    #[serde(rename = "fv")]
    pub fuel_price_variation: Percentage,
}

impl UsageParameters {
    pub const DEFAULT_ANNUAL_DISTANCE: Kilometres = Kilometres(15000.0);
    pub const DEFAULT_FUEL_PRICE: LitrePrice = LitrePrice(6.5);
    pub const DEFAULT_CONSUMPTION: Consumption = Consumption(7.0);
    pub const DEFAULT_PROJECTION_YEARS: u32 = 5;
    pub const DEFAULT_FUEL_PRICE_VARIATION: Percentage = Percentage(0.0);

    /// Longest supported projection horizon.
    pub const MAX_PROJECTION_YEARS: u32 = 100;

    #[must_use]
    pub const fn has_fuel_price_variation(&self) -> bool {
        self.fuel_price_variation.0 > 0.0
    }
}

impl Default for UsageParameters {
    fn default() -> Self {
        Self {
            annual_distance: Self::DEFAULT_ANNUAL_DISTANCE,
            fuel_price: Self::DEFAULT_FUEL_PRICE,
            consumption: Self::DEFAULT_CONSUMPTION,
            projection_years: Self::DEFAULT_PROJECTION_YEARS,
            fuel_price_variation: Self::DEFAULT_FUEL_PRICE_VARIATION,
        }
    }
}

/// Raw form input: numbers or numeric strings, anything else is dropped.
#[serde_as]
#[derive(Deserialize)]
struct LenientUsageParameters {
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    km: Option<f64>,

    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    fp: Option<f64>,

    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    fc: Option<f64>,

    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    y: Option<f64>,

    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    fv: Option<f64>,
}

impl From<LenientUsageParameters> for UsageParameters {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(raw: LenientUsageParameters) -> Self {
        Self {
            annual_distance: sanitize(raw.km).map_or(Self::DEFAULT_ANNUAL_DISTANCE, Kilometres),
            fuel_price: sanitize(raw.fp).map_or(Self::DEFAULT_FUEL_PRICE, LitrePrice),
            consumption: sanitize(raw.fc).map_or(Self::DEFAULT_CONSUMPTION, Consumption),
            projection_years: sanitize(raw.y)
                .filter(|years| *years < f64::from(Self::MAX_PROJECTION_YEARS + 1))
                .map_or(Self::DEFAULT_PROJECTION_YEARS, |years| years as u32),
            fuel_price_variation: sanitize(raw.fv)
                .map_or(Self::DEFAULT_FUEL_PRICE_VARIATION, Percentage),
        }
    }
}

fn sanitize(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite() && *value >= 0.0)
}
