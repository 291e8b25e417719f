use std::path::PathBuf;

use clap::{Parser, Subcommand};
use enumset::EnumSet;

use crate::{catalog::provider::TariffKind, core::distribution::ColorDistribution, quantity::energy::KilowattHours};

/// Manual-entry bounds of the consumption form. The floor deliberately
/// differs from the extraction floor in [`crate::bill::normalize`].
const MIN_MANUAL_KILOWATT_HOURS: f64 = 50.0;
const MAX_MANUAL_KILOWATT_HOURS: f64 = 800.0;

#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Tariff catalog override; the built-in catalog is used when omitted.
    #[clap(long, env = "REVMA_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank all providers by monthly cost for a given consumption.
    Compare(Box<CompareArgs>),

    /// Print the tariff catalog.
    Catalog,

    /// Read the consumption off an electricity bill and compare.
    Bill(Box<BillArgs>),
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Monthly consumption in kilowatt-hours.
    #[clap(long, default_value = "250", env = "MONTHLY_KWH")]
    pub kwh: KilowattHours,

    /// Household preset, overrides `--kwh`.
    #[clap(long, value_enum)]
    pub household: Option<Household>,

    /// Current provider the savings are measured against.
    #[clap(long = "current", default_value = "dei", env = "CURRENT_PROVIDER")]
    pub current_provider: String,

    /// Usage profile for the zoned tariffs.
    #[clap(long, value_enum)]
    pub profile: Option<UsageProfile>,

    /// Tariff kinds to include.
    #[clap(
        long = "tariff-kinds",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "fixed,variable,colored",
    )]
    pub tariff_kinds: Vec<TariffKind>,

    /// Only green-energy offerings.
    #[clap(long)]
    pub green_only: bool,

    /// Include eligibility-restricted programs.
    #[clap(long)]
    pub include_programs: bool,
}

impl CompareArgs {
    /// Effective consumption: the preset, or the flag clamped to the form bounds.
    pub fn consumption(&self) -> KilowattHours {
        self.household.map_or_else(
            || {
                self.kwh.clamp(
                    KilowattHours::from(MIN_MANUAL_KILOWATT_HOURS),
                    KilowattHours::from(MAX_MANUAL_KILOWATT_HOURS),
                )
            },
            Household::consumption,
        )
    }

    #[must_use]
    pub fn tariff_kinds(&self) -> EnumSet<TariffKind> {
        self.tariff_kinds.iter().copied().collect()
    }

    pub fn distribution(&self) -> Option<ColorDistribution> {
        self.profile.map(UsageProfile::distribution)
    }
}

/// Typical monthly consumption by household size.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Household {
    /// Small home or studio, ~50-100 m².
    Studio,

    /// 2-3 room apartment, ~80-120 m².
    Apartment,

    /// Large apartment, ~120-180 m².
    LargeApartment,

    /// Detached house, 180+ m².
    House,
}

impl Household {
    pub fn consumption(self) -> KilowattHours {
        KilowattHours::from(match self {
            Self::Studio => 100.0,
            Self::Apartment => 200.0,
            Self::LargeApartment => 350.0,
            Self::House => 500.0,
        })
    }
}

/// Named zone-usage profiles for the zoned tariffs.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum UsageProfile {
    /// Average household.
    Typical,

    /// Consumption concentrated after working hours.
    Evening,

    /// Off-peak heavy: storage heating, overnight EV charging.
    Night,

    /// Somebody is home all day.
    HomeAllDay,
}

impl UsageProfile {
    pub const fn distribution(self) -> ColorDistribution {
        match self {
            Self::Typical => ColorDistribution::TYPICAL,
            Self::Evening => ColorDistribution::EVENING,
            Self::Night => ColorDistribution::NIGHT,
            Self::HomeAllDay => ColorDistribution::HOME_ALL_DAY,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BillArgs {
    /// Bill file: PDF, JPEG, PNG or WEBP, up to 10 MB.
    pub path: PathBuf,

    /// Treat the file as already-extracted collaborator JSON instead.
    #[clap(long)]
    pub pre_extracted: bool,

    /// Extraction model API key; without it the command falls back to
    /// manual entry.
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the supplier detected on the bill.
    #[clap(long = "current")]
    pub current_provider: Option<String>,

    /// Override the usage profile derived from the bill.
    #[clap(long, value_enum)]
    pub profile: Option<UsageProfile>,
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn compare_args(arguments: &[&str]) -> CompareArgs {
        match Args::try_parse_from(
            ["revma", "compare"].iter().copied().chain(arguments.iter().copied()),
        )
        .unwrap()
        .command
        {
            Command::Compare(args) => *args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_manual_consumption_is_clamped() {
        // The manual form floor (50) deliberately differs from the
        // extraction floor (10).
        assert_eq!(compare_args(&["--kwh", "20"]).consumption(), 50.0.into());
        assert_eq!(compare_args(&["--kwh", "250"]).consumption(), 250.0.into());
        assert_eq!(compare_args(&["--kwh", "9000"]).consumption(), 800.0.into());
    }

    #[test]
    fn test_household_preset_overrides_kwh() {
        let args = compare_args(&["--kwh", "700", "--household", "studio"]);
        assert_eq!(args.consumption(), 100.0.into());
    }

    #[test]
    fn test_tariff_kind_filter() {
        let args = compare_args(&["--tariff-kinds", "fixed,colored"]);
        let kinds = args.tariff_kinds();
        assert!(kinds.contains(TariffKind::Fixed));
        assert!(!kinds.contains(TariffKind::Variable));
        assert!(kinds.contains(TariffKind::Colored));
    }

    #[test]
    fn test_unknown_tariff_kind_is_rejected() {
        let error = Args::try_parse_from(["revma", "compare", "--tariff-kinds", "rainbow"])
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
    }
}
