use crate::{
    catalog::{
        charges::RegulatedCharges,
        provider::{Pricing, Provider},
        zone::Zone,
    },
    core::{InputError, distribution::ColorDistribution},
    quantity::{cost::Cost, energy::KilowattHours},
};

/// All-inclusive monthly bill for one provider.
///
/// The evaluation order is fixed: rates times energy, then the flat fees,
/// then VAT on the whole subtotal. Identical inputs always reproduce the
/// same amount bit-for-bit.
pub fn monthly_cost(
    provider: &Provider,
    consumption: KilowattHours,
    distribution: Option<&ColorDistribution>,
    charges: &RegulatedCharges,
) -> Result<Cost, InputError> {
    if !consumption.is_finite() || consumption < KilowattHours::ZERO {
        return Err(InputError::Consumption);
    }
    if let Some(distribution) = distribution {
        distribution.validate()?;
    }

    let (supply_cost, regulated_cost) = match &provider.pricing {
        Pricing::Fixed { supply_rate } | Pricing::Variable { supply_rate } => {
            (consumption * *supply_rate, consumption * charges.energy_rate)
        }
        Pricing::Colored { rates } => {
            let distribution = distribution.copied().unwrap_or(ColorDistribution::TYPICAL);
            let supply: Cost = Zone::ALL
                .into_iter()
                .map(|zone| consumption * distribution.fraction(zone) * rates.get(zone))
                .sum();
            let regulated: Cost = Zone::ALL
                .into_iter()
                .map(|zone| consumption * distribution.fraction(zone) * charges.zone_rates.get(zone))
                .sum();
            (supply, regulated)
        }
    };

    let subtotal = supply_cost + regulated_cost + provider.monthly_fee + charges.monthly_fee;
    Ok(subtotal * (1.0 + charges.vat))
}

#[cfg(test)]
pub mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::catalog::{provider::ProviderInfo, zone::ZoneRates};

    pub fn charges() -> RegulatedCharges {
        RegulatedCharges {
            energy_rate: 0.07.into(),
            zone_rates: ZoneRates {
                blue: 0.07.into(),
                green: 0.07.into(),
                yellow: 0.07.into(),
                red: 0.07.into(),
            },
            monthly_fee: 2.50.into(),
            vat: 0.13,
        }
    }

    pub fn flat_provider(id: &str, supply_rate: f64, monthly_fee: f64) -> Provider {
        Provider {
            id: id.to_owned(),
            name: id.to_owned(),
            full_name: id.to_owned(),
            pricing: Pricing::Fixed { supply_rate: supply_rate.into() },
            monthly_fee: monthly_fee.into(),
            contract_months: 0,
            green_energy: false,
            green_energy_percent: 0,
            is_program: false,
            program_eligibility: None,
            info: ProviderInfo::default(),
        }
    }

    pub fn zoned_provider(id: &str, rates: ZoneRates, monthly_fee: f64) -> Provider {
        Provider { pricing: Pricing::Colored { rates }, ..flat_provider(id, 1.0, monthly_fee) }
    }

    #[test]
    fn test_flat_scenario() -> Result<(), InputError> {
        // (250 × 0.12 + 250 × 0.07 + 2.00 + 2.50) × 1.13 = 58.76.
        let cost =
            monthly_cost(&flat_provider("a", 0.12, 2.00), 250.0.into(), None, &charges())?;
        assert_abs_diff_eq!(cost.0.0, 58.76, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_monotonic_in_consumption() -> Result<(), InputError> {
        let provider = flat_provider("a", 0.12, 2.00);
        let charges = charges();
        let mut previous = Cost::ZERO;
        for kwh in [0.0, 1.0, 49.9, 100.0, 250.0, 799.0, 800.0, 5000.0] {
            let cost = monthly_cost(&provider, kwh.into(), None, &charges)?;
            assert!(cost >= previous, "{cost:?} < {previous:?} at {kwh} kWh");
            previous = cost;
        }
        Ok(())
    }

    #[test]
    fn test_zoned_equals_weighted_average() -> Result<(), InputError> {
        let rates = ZoneRates {
            blue: 0.098.into(),
            green: 0.118.into(),
            yellow: 0.139.into(),
            red: 0.165.into(),
        };
        let distribution = ColorDistribution::EVENING;
        let zoned = monthly_cost(
            &zoned_provider("zoned", rates, 4.0),
            420.0.into(),
            Some(&distribution),
            &charges(),
        )?;
        let flat = monthly_cost(
            &flat_provider("flat", distribution.weighted_rate(&rates).0.0, 4.0),
            420.0.into(),
            None,
            &charges(),
        )?;
        assert_abs_diff_eq!(zoned.0.0, flat.0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_zoned_defaults_to_typical_profile() -> Result<(), InputError> {
        let rates = ZoneRates {
            blue: 0.098.into(),
            green: 0.118.into(),
            yellow: 0.139.into(),
            red: 0.165.into(),
        };
        let provider = zoned_provider("zoned", rates, 4.0);
        let defaulted = monthly_cost(&provider, 300.0.into(), None, &charges())?;
        let explicit = monthly_cost(
            &provider,
            300.0.into(),
            Some(&ColorDistribution::TYPICAL),
            &charges(),
        )?;
        assert_eq!(defaulted, explicit);
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_consumption() {
        let provider = flat_provider("a", 0.12, 2.00);
        for kwh in [-1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                monthly_cost(&provider, kwh.into(), None, &charges()),
                Err(InputError::Consumption),
            );
        }
    }

    #[test]
    fn test_rejects_malformed_distribution() {
        let distribution = ColorDistribution { blue: 0.9, green: 0.9, yellow: 0.0, red: 0.0 };
        assert_eq!(
            monthly_cost(
                &flat_provider("a", 0.12, 2.00),
                250.0.into(),
                Some(&distribution),
                &charges(),
            ),
            Err(InputError::Distribution),
        );
    }
}
