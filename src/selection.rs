use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    label::{LabelClass, LabelSet},
    prelude::*,
    quantity::cost::Cost,
};

/// Tyre prices per class label.
///
/// Zero or negative prices are kept as entered but count as absent.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TirePrices(BTreeMap<String, Cost>);

impl FromIterator<(String, Cost)> for TirePrices {
    fn from_iter<T: IntoIterator<Item = (String, Cost)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TirePrices {
    pub fn insert(&mut self, label: impl Into<String>, price: Cost) {
        self.0.insert(label.into(), price);
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<Cost> {
        self.0.get(label).copied().filter(|price| price.is_positive())
    }

    /// Extra money paid upfront for the baseline tyres, never negative.
    pub fn upfront_delta(&self, baseline: &str, compared: &str) -> Cost {
        let baseline = self.get(baseline).unwrap_or(Cost::ZERO);
        let compared = self.get(compared).unwrap_or(Cost::ZERO);
        (baseline - compared).max(Cost::ZERO)
    }

    /// Entered prices, positive ones only.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Cost)> {
        self.0
            .iter()
            .filter(|(_, price)| price.is_positive())
            .map(|(label, price)| (label.as_str(), *price))
    }
}

/// Selected classes split into the baseline and the compared ones.
#[must_use]
#[derive(Debug)]
pub struct Selection<'a> {
    /// Selected class with the lowest midpoint.
    pub baseline: &'a LabelClass,

    /// Remaining classes in the ascending midpoint order.
    pub compared: Vec<&'a LabelClass>,
}

impl<'a> Selection<'a> {
    /// Resolve the labels against the set, `None` when fewer than two classes remain.
    pub fn resolve<S: AsRef<str>>(label_set: &'a LabelSet, labels: &[S]) -> Option<Self> {
        let mut classes = labels
            .iter()
            .map(|label| label.as_ref())
            .unique()
            .filter_map(|label| {
                let class = label_set.get(label);
                if class.is_none() {
                    debug!(label, label_set = %label_set.id, "skipping unknown class");
                }
                class
            })
            .sorted_by_key(|class| class.midpoint);
        let baseline = classes.next()?;
        let compared = classes.collect_vec();
        if compared.is_empty() {
            return None;
        }
        Some(Self { baseline, compared })
    }
}
