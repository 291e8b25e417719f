use serde::{Deserialize, Serialize};

use crate::{
    catalog::zone::ZoneRates,
    core::distribution::ColorDistribution,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

/// One tariff offering of an electricity supplier.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Provider {
    /// Stable identifier, unique within the catalog.
    pub id: String,

    pub name: String,

    pub full_name: String,

    pub pricing: Pricing,

    /// Fixed recurring supplier charge.
    pub monthly_fee: Cost,

    /// Zero means no lock-in.
    #[serde(default)]
    pub contract_months: u32,

    #[serde(default)]
    pub green_energy: bool,

    #[serde(default)]
    pub green_energy_percent: u8,

    /// Marks a named sub-package rather than a standard tariff.
    #[serde(default)]
    pub is_program: bool,

    #[serde(default)]
    pub program_eligibility: Option<Eligibility>,

    /// Descriptive payload, carried through untouched.
    #[serde(default)]
    pub info: ProviderInfo,
}

impl Provider {
    pub const fn tariff_kind(&self) -> TariffKind {
        match self.pricing {
            Pricing::Fixed { .. } => TariffKind::Fixed,
            Pricing::Variable { .. } => TariffKind::Variable,
            Pricing::Colored { .. } => TariffKind::Colored,
        }
    }

    /// Headline rate: the flat supply rate, or the profile-weighted zone average.
    pub fn display_rate(&self, distribution: &ColorDistribution) -> KilowattHourRate {
        match &self.pricing {
            Pricing::Fixed { supply_rate } | Pricing::Variable { supply_rate } => *supply_rate,
            Pricing::Colored { rates } => distribution.weighted_rate(rates),
        }
    }
}

/// Pricing payload per tariff kind. A zoned tariff always carries its rates table.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Pricing {
    Fixed { supply_rate: KilowattHourRate },
    Variable { supply_rate: KilowattHourRate },
    Colored { rates: ZoneRates },
}

#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum TariffKind {
    Fixed,
    Variable,
    Colored,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Eligibility {
    Students,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderInfo {
    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub new_customer_offer: Option<String>,
}
