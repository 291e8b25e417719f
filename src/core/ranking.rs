use crate::{
    catalog::{charges::RegulatedCharges, provider::Provider},
    core::{InputError, cost::monthly_cost, distribution::ColorDistribution},
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Costs of a single provider, measured against the comparison baseline.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct ProviderCost<'a> {
    pub provider: &'a Provider,

    pub monthly_cost: Cost,

    pub annual_cost: Cost,

    /// Positive when this provider is cheaper than the baseline.
    pub savings_vs_current: Cost,

    pub annual_savings: Cost,
}

/// Price every provider and rank the list from cheapest to priciest.
///
/// An unknown baseline id is a valid state (a filtered-out provider) and
/// yields a zero baseline. Ties keep their input order.
pub fn compare_providers<'a>(
    providers: &'a [Provider],
    consumption: KilowattHours,
    baseline_id: &str,
    distribution: Option<&ColorDistribution>,
    charges: &RegulatedCharges,
) -> Result<Vec<ProviderCost<'a>>, InputError> {
    let baseline_cost = providers
        .iter()
        .find(|provider| provider.id == baseline_id)
        .map(|provider| monthly_cost(provider, consumption, distribution, charges))
        .transpose()?
        .unwrap_or(Cost::ZERO);

    let mut costs = providers
        .iter()
        .map(|provider| {
            let cost = monthly_cost(provider, consumption, distribution, charges)?;
            let savings = baseline_cost - cost;
            Ok(ProviderCost {
                provider,
                monthly_cost: cost,
                annual_cost: cost.per_year(),
                savings_vs_current: savings,
                annual_savings: savings.per_year(),
            })
        })
        .collect::<Result<Vec<_>, InputError>>()?;

    // `sort_by_key` is stable, so equally-priced providers keep the catalog order.
    costs.sort_by_key(|cost| cost.monthly_cost);
    Ok(costs)
}

/// Annual savings of switching from the baseline to the cheapest offer,
/// floored at zero. `None` when there is nothing to compare.
pub fn max_annual_savings(costs: &[ProviderCost<'_>]) -> Option<Cost> {
    costs.first().map(|cheapest| cheapest.annual_savings.max(Cost::ZERO))
}
