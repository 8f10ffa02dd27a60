use bon::Builder;

use crate::{
    band::ClassProjection,
    label::{LabelClass, LabelSet},
    model::fuel_cost_per_year,
    parameters::UsageParameters,
    prelude::*,
    quantity::{cost::Cost, time::Months},
    selection::{Selection, TirePrices},
};

/// Projects the savings of the selected classes against the best of them.
#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Projector<'a> {
    label_set: &'a LabelSet,

    /// Selected labels, unknown ones and duplicates are ignored.
    selection: &'a [String],

    usage: &'a UsageParameters,
    tire_prices: &'a TirePrices,
}

impl<S: projector_builder::IsComplete> ProjectorBuilder<'_, S> {
    pub fn project(self) -> ProjectionResult {
        self.build().project()
    }
}

impl Projector<'_> {
    #[instrument(
        skip_all,
        name = "projecting…",
        fields(label_set = %self.label_set.id, years = self.usage.projection_years),
    )]
    fn project(self) -> ProjectionResult {
        let Some(selection) = Selection::resolve(self.label_set, self.selection) else {
            info!("insufficient selection");
            return ProjectionResult::InsufficientSelection;
        };
        let baseline = selection.baseline;
        let classes = selection
            .compared
            .into_iter()
            .map(|class| {
                let upfront_delta = self.tire_prices.upfront_delta(&baseline.label, &class.label);
                let projection =
                    ClassProjection::build(baseline, class, self.usage, upfront_delta);
                debug!(
                    class = %class.label,
                    annual_savings = %projection.annual_savings,
                    upfront_delta = %upfront_delta,
                    break_even = %projection.break_even,
                );
                projection
            })
            .collect::<Vec<_>>();
        info!(baseline = %baseline.label, n_compared = classes.len(), "done");

        ProjectionResult::Ready(Projection {
            baseline: baseline.clone(),
            baseline_fuel_cost: fuel_cost_per_year(
                self.usage.annual_distance,
                self.usage.fuel_price,
                self.usage.consumption,
            ),
            years: self.usage.projection_years,
            classes,
        })
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectionResult {
    /// Fewer than two known classes are selected, nothing to compare.
    InsufficientSelection,

    Ready(Projection),
}

impl ProjectionResult {
    pub fn into_projection(self) -> Option<Projection> {
        match self {
            Self::Ready(projection) => Some(projection),
            Self::InsufficientSelection => None,
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub baseline: LabelClass,

    /// Annual fuel cost at the baseline usage.
    pub baseline_fuel_cost: Cost,

    pub years: u32,

    /// Compared classes in the ascending midpoint order.
    pub classes: Vec<ClassProjection>,
}

impl Projection {
    /// Last projected month.
    pub fn horizon(&self) -> Months {
        Months::from_years(self.years)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&ClassProjection> {
        self.classes.iter().find(|class| class.class.label == label)
    }
}
