pub mod charges;
pub mod provider;
pub mod zone;

use std::{fs, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        charges::RegulatedCharges,
        provider::{Pricing, Provider},
        zone::Zone,
    },
    prelude::*,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

/// Reference data: the tariff catalog and the regulated charges.
///
/// Parsed once at startup and read-only afterwards.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Catalog {
    regulated: RegulatedCharges,
    providers: Vec<Provider>,
}

impl Catalog {
    /// Load the built-in catalog, embedded at compile time.
    pub fn load() -> Result<Self> {
        Self::parse(include_str!("catalog/catalog.toml"))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let document = fs::read_to_string(path)
            .with_context(|| format!("failed to read the catalog from `{}`", path.display()))?;
        Self::parse(&document)
    }

    fn parse(document: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(document).context("failed to parse the catalog")?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result {
        ensure!(
            (0.0..1.0).contains(&self.regulated.vat),
            "VAT must be a fraction in [0, 1): {}",
            self.regulated.vat,
        );
        ensure!(self.regulated.energy_rate > KilowattHourRate::ZERO, "regulated rate must be positive");
        for zone in Zone::ALL {
            ensure!(
                self.regulated.zone_rates.get(zone) > KilowattHourRate::ZERO,
                "regulated {zone:?} rate must be positive",
            );
        }
        if let Some(id) = self.providers.iter().map(|provider| provider.id.as_str()).duplicates().next()
        {
            bail!("duplicate provider id: `{id}`");
        }
        for provider in &self.providers {
            provider_invariants(provider)?;
        }
        Ok(())
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub const fn regulated(&self) -> &RegulatedCharges {
        &self.regulated
    }

    pub fn find(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|provider| provider.id == id)
    }
}

fn provider_invariants(provider: &Provider) -> Result {
    let id = &provider.id;
    match &provider.pricing {
        Pricing::Fixed { supply_rate } | Pricing::Variable { supply_rate } => {
            ensure!(*supply_rate > KilowattHourRate::ZERO, "`{id}`: supply rate must be positive");
        }
        Pricing::Colored { rates } => {
            for zone in Zone::ALL {
                ensure!(
                    rates.get(zone) > KilowattHourRate::ZERO,
                    "`{id}`: {zone:?} rate must be positive",
                );
            }
        }
    }
    ensure!(provider.monthly_fee >= Cost::ZERO, "`{id}`: monthly fee must not be negative");
    ensure!(
        provider.green_energy_percent <= 100,
        "`{id}`: green energy percent must not exceed 100",
    );
    Ok(())
}
