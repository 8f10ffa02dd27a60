//! Complete working state the projection can be rebuilt from.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};

use crate::{
    currency::Currency,
    label::LabelSets,
    parameters::UsageParameters,
    prelude::*,
    projector::{ProjectionResult, Projector},
    selection::TirePrices,
};

/// Form state with the compact keys used by the share tokens.
///
/// Unknown keys are ignored. A missing field takes the value from [`AppState::default`],
/// while a malformed one is reset to the empty value of its type.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    #[serde(rename = "l")]
    #[serde_as(as = "DefaultOnError")]
    pub locale: String,

    #[serde(rename = "c")]
    #[serde_as(as = "DefaultOnError")]
    pub currency: Currency,

    #[serde(rename = "s")]
    #[serde_as(as = "DefaultOnError")]
    pub label_set_id: String,

    #[serde(rename = "cl")]
    #[serde_as(as = "DefaultOnError")]
    pub selected_classes: Vec<String>,

    #[serde(flatten)]
    pub usage: UsageParameters,

    #[serde(rename = "tp")]
    #[serde_as(as = "DefaultOnError")]
    pub tire_prices: TirePrices,

    /// Chart colors per class label, kept as entered.
    #[serde(rename = "cc", skip_serializing_if = "BTreeMap::is_empty")]
    #[serde_as(as = "DefaultOnError")]
    pub custom_colors: BTreeMap<String, String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            locale: String::from("pl"),
            currency: Currency::default(),
            label_set_id: String::from("eu-2020-740-c1"),
            selected_classes: vec![String::from("C"), String::from("E")],
            usage: UsageParameters::default(),
            tire_prices: TirePrices::default(),
            custom_colors: BTreeMap::new(),
        }
    }
}

impl AppState {
    /// Read the state file, a missing file gives the default state.
    #[instrument(skip_all, fields(path = %path.display()), name = "reading state…")]
    pub fn read_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            info!("no state file, starting from the defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse `{}`", path.display()))
    }

    #[instrument(skip_all, fields(path = %path.display()), name = "writing state…")]
    pub fn write_to(&self, path: &Path) -> Result {
        let contents = toml::to_string_pretty(self).context("failed to serialize the state")?;
        fs::write(path, contents).with_context(|| format!("failed to write `{}`", path.display()))
    }

    /// Project the savings with the selected label set, or the first one if it is unknown.
    pub fn project(&self, label_sets: &LabelSets) -> ProjectionResult {
        Projector::builder()
            .label_set(label_sets.get(&self.label_set_id))
            .selection(&self.selected_classes)
            .usage(&self.usage)
            .tire_prices(&self.tire_prices)
            .project()
    }
}
