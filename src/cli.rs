use std::{path::PathBuf, str::FromStr};

use clap::{Parser, Subcommand};
use rrc_savings::{
    currency::Currency,
    label::LabelSets,
    parameters::UsageParameters,
    prelude::*,
    quantity::{
        cost::Cost,
        distance::Kilometres,
        fuel::{Consumption, LitrePrice},
        ratios::Percentage,
    },
    query::QueryPoint,
    share,
    state::AppState,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub state: StateArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project the savings of the selected classes against the best of them.
    #[clap(name = "project")]
    Project,

    /// Feed the pointer positions through the crosshair and print the derived values.
    #[clap(name = "query")]
    Query(QueryArgs),

    /// Print the share token of the effective state.
    #[clap(name = "share")]
    Share(ShareArgs),

    /// Print the classes of the active label set.
    #[clap(name = "classes")]
    Classes,
}

#[must_use]
#[derive(Parser)]
pub struct QueryArgs {
    /// Pointer positions as `MONTH:VALUE`, for example, `18.5:240`.
    #[clap(required = true, allow_hyphen_values = true)]
    pub points: Vec<QueryPoint>,
}

#[must_use]
#[derive(Parser)]
pub struct ShareArgs {
    /// Also write the effective state to the state file.
    #[clap(long)]
    pub save: bool,
}

/// Where the state comes from, and the overrides applied on top of it.
#[must_use]
#[derive(Parser)]
pub struct StateArgs {
    /// TOML file with the saved state.
    #[clap(long, env = "STATE_FILE", default_value = "rrc-savings.toml")]
    pub state_file: PathBuf,

    /// Share token to start from instead of the state file.
    #[clap(long, env = "STATE_TOKEN")]
    pub token: Option<String>,

    /// TOML file with the label sets, the built-in EU 2020/740 set is used by default.
    #[clap(long, env = "LABEL_SETS_FILE")]
    pub label_sets_file: Option<PathBuf>,

    /// Label set ID.
    #[clap(long, env = "LABEL_SET")]
    pub label_set: Option<String>,

    /// Annual distance in kilometres.
    #[clap(long = "annual-km", env = "ANNUAL_KM")]
    pub annual_distance: Option<Kilometres>,

    /// Fuel price per litre.
    #[clap(long, env = "FUEL_PRICE")]
    pub fuel_price: Option<LitrePrice>,

    /// Fuel consumption in litres per 100 km.
    #[clap(long, env = "CONSUMPTION")]
    pub consumption: Option<Consumption>,

    /// Projection horizon in years.
    #[clap(long, env = "YEARS")]
    pub years: Option<u32>,

    /// Fuel price variation percentage for the price brackets.
    #[clap(long, env = "FUEL_PRICE_VARIATION")]
    pub fuel_price_variation: Option<Percentage>,

    /// Selected label classes, for example, `A,C,E`.
    #[clap(long, env = "CLASSES", value_delimiter = ',')]
    pub classes: Option<Vec<String>>,

    /// Tyre price per class as `LABEL=PRICE`, repeatable.
    #[clap(long = "tire-price")]
    pub tire_prices: Vec<TirePrice>,

    #[clap(long, env = "CURRENCY", ignore_case = true)]
    pub currency: Option<Currency>,
}

impl StateArgs {
    pub fn label_sets(&self) -> Result<LabelSets> {
        self.label_sets_file.as_ref().map_or_else(|| Ok(LabelSets::default()), LabelSets::read_from)
    }

    /// Load the state from the token or the state file, and apply the overrides.
    pub fn load(&self) -> Result<AppState> {
        let mut state = match &self.token {
            Some(token) => share::decode(token).unwrap_or_default(),
            None => AppState::read_from(&self.state_file)?,
        };
        self.apply_to(&mut state)?;
        debug!(?state, "loaded");
        Ok(state)
    }

    fn apply_to(&self, state: &mut AppState) -> Result {
        if let Some(label_set) = &self.label_set {
            state.label_set_id.clone_from(label_set);
        }
        if let Some(annual_distance) = self.annual_distance {
            ensure_non_negative("annual distance", annual_distance.0)?;
            state.usage.annual_distance = annual_distance;
        }
        if let Some(fuel_price) = self.fuel_price {
            ensure_non_negative("fuel price", fuel_price.0)?;
            state.usage.fuel_price = fuel_price;
        }
        if let Some(consumption) = self.consumption {
            ensure_non_negative("consumption", consumption.0)?;
            state.usage.consumption = consumption;
        }
        if let Some(years) = self.years {
            ensure!(
                years <= UsageParameters::MAX_PROJECTION_YEARS,
                "years must not exceed {}, got {years}",
                UsageParameters::MAX_PROJECTION_YEARS,
            );
            state.usage.projection_years = years;
        }
        if let Some(variation) = self.fuel_price_variation {
            ensure_non_negative("fuel price variation", variation.0)?;
            state.usage.fuel_price_variation = variation;
        }
        if let Some(classes) = &self.classes {
            state.selected_classes.clone_from(classes);
        }
        for TirePrice(label, price) in &self.tire_prices {
            state.tire_prices.insert(label.clone(), *price);
        }
        if let Some(currency) = self.currency {
            state.currency = currency;
        }
        Ok(())
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result {
    ensure!(value.is_finite() && value >= 0.0, "{name} must be a non-negative number, got {value}");
    Ok(())
}

/// `LABEL=PRICE` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TirePrice(pub String, pub Cost);

impl FromStr for TirePrice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (label, price) =
            s.split_once('=').with_context(|| format!("expected `LABEL=PRICE`, got `{s}`"))?;
        let price: f64 = price.trim().parse().with_context(|| format!("invalid price `{price}`"))?;
        ensure!(price.is_finite(), "invalid price `{price}`");
        Ok(Self(label.trim().to_string(), Cost(price)))
    }
}
