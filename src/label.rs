//! Tyre label classes and the registry of label sets.

use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::rrc::Rrc};

/// Regulatory class with its rolling resistance coefficient range.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelClass {
    pub label: String,
    pub min: Rrc,
    pub max: Rrc,

    /// Representative coefficient used for the central projection.
    pub midpoint: Rrc,
}

impl LabelClass {
    pub fn new(label: impl Into<String>, min: f64, max: f64, midpoint: f64) -> Self {
        Self { label: label.into(), min: Rrc(min), max: Rrc(max), midpoint: Rrc(midpoint) }
    }

    pub fn validate(&self) -> Result {
        ensure!(
            self.min.is_finite() && self.max.is_finite() && self.midpoint.is_finite(),
            "class {} has a non-finite coefficient",
            self.label,
        );
        ensure!(
            self.min <= self.midpoint && self.midpoint <= self.max,
            "class {} violates `min ≤ midpoint ≤ max`: {} ≤ {} ≤ {}",
            self.label,
            self.min,
            self.midpoint,
            self.max,
        );
        Ok(())
    }
}

#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelSet {
    pub id: String,
    pub name: String,

    /// Tyre type the regulation applies to, for example, `C1` for passenger cars.
    #[serde(rename = "type")]
    pub tyre_type: String,

    pub classes: Vec<LabelClass>,
}

impl LabelSet {
    pub fn eu_2020_740_c1() -> Self {
        Self {
            id: String::from("eu-2020-740-c1"),
            name: String::from("EU 2020/740"),
            tyre_type: String::from("C1"),
            classes: vec![
                LabelClass::new("A", 0.0, 6.5, 6.0),
                LabelClass::new("B", 6.6, 7.7, 7.15),
                LabelClass::new("C", 7.8, 9.0, 8.4),
                LabelClass::new("D", 9.1, 10.5, 9.8),
                LabelClass::new("E", 10.6, 15.0, 11.0),
            ],
        }
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&LabelClass> {
        self.classes.iter().find(|class| class.label == label)
    }

    pub fn validate(&self) -> Result {
        ensure!(!self.classes.is_empty(), "label set `{}` has no classes", self.id);
        for class in &self.classes {
            class.validate().with_context(|| format!("invalid label set `{}`", self.id))?;
        }
        Ok(())
    }
}

/// Registry of the known label sets, never empty.
#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawLabelSets")]
pub struct LabelSets {
    #[serde(rename = "label_sets")]
    sets: Vec<LabelSet>,
}

/// Registry as it is written in the file, before the validation.
#[derive(Deserialize)]
struct RawLabelSets {
    label_sets: Vec<LabelSet>,
}

impl TryFrom<RawLabelSets> for LabelSets {
    type Error = Error;

    fn try_from(raw: RawLabelSets) -> Result<Self> {
        Self::try_new(raw.label_sets)
    }
}

impl Default for LabelSets {
    fn default() -> Self {
        Self { sets: vec![LabelSet::eu_2020_740_c1()] }
    }
}

impl LabelSets {
    pub fn try_new(sets: Vec<LabelSet>) -> Result<Self> {
        ensure!(!sets.is_empty(), "at least one label set is required");
        for set in &sets {
            set.validate()?;
        }
        Ok(Self { sets })
    }

    #[instrument(name = "reading label sets…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let registry: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(n_sets = registry.sets.len(), "loaded");
        Ok(registry)
    }

    /// Look the set up by its ID, falling back to the first one.
    pub fn get(&self, id: &str) -> &LabelSet {
        self.sets.iter().find(|set| set.id == id).unwrap_or_else(|| {
            warn!(id, fallback = %self.sets[0].id, "unknown label set");
            &self.sets[0]
        })
    }
}
