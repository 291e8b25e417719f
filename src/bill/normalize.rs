use crate::{
    bill::extracted::{Confidence, ExtractedBill, ZoneEnergy},
    core::distribution::ColorDistribution,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Plausible household range for a month of extracted consumption.
/// Out-of-band values are clamped, not rejected.
const MIN_KILOWATT_HOURS: f64 = 10.0;
const MAX_KILOWATT_HOURS: f64 = 800.0;

const FULL_MONTH_DAYS: f64 = 30.0;

/// Periods at most this long are taken as-is; only longer ones are scaled
/// to the 30-day month.
const SCALING_THRESHOLD_DAYS: u32 = 15;

/// Calculator-ready inputs distilled from one extracted bill.
#[derive(Clone, Debug)]
pub struct NormalizedBill {
    /// 30-day-equivalent consumption, clamped to the plausible range.
    pub monthly_kwh: Option<KilowattHours>,

    /// Consumption as printed, before scaling and clamping.
    pub raw_kwh: Option<f64>,

    pub billing_days: Option<u32>,

    /// Canonical catalog id, when the free-text supplier name matched an alias.
    pub provider_id: Option<&'static str>,

    pub provider_name: Option<String>,

    pub tariff_name: Option<String>,

    pub student_tariff: bool,

    pub bill_amount: Option<Cost>,

    /// Usage profile derived from the per-zone consumption, when present.
    pub distribution: Option<ColorDistribution>,

    pub confidence: Confidence,
}

/// Convert untrusted extraction output into calculator-ready inputs.
///
/// Total function: every field degrades independently, nothing here fails.
pub fn normalize(extracted: ExtractedBill) -> NormalizedBill {
    let billing_days = billing_days(&extracted);
    NormalizedBill {
        monthly_kwh: extracted.kwh.and_then(|kwh| monthly_kwh(kwh, billing_days)),
        raw_kwh: extracted.kwh,
        billing_days,
        provider_id: extracted.provider.as_deref().and_then(resolve_provider_id),
        provider_name: extracted.provider,
        student_tariff: extracted.tariff_name.as_deref().is_some_and(is_student_tariff),
        tariff_name: extracted.tariff_name,
        bill_amount: extracted
            .bill_amount
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .map(Cost::from),
        distribution: extracted.color_zones.and_then(zone_distribution),
        confidence: extracted.confidence,
    }
}

fn billing_days(extracted: &ExtractedBill) -> Option<u32> {
    extracted.billing_days.or_else(|| {
        let (start, end) = (extracted.period_start?, extracted.period_end?);
        u32::try_from((end - start).num_days()).ok().filter(|days| *days > 0)
    })
}

fn monthly_kwh(kwh: f64, billing_days: Option<u32>) -> Option<KilowattHours> {
    if !kwh.is_finite() || kwh <= 0.0 {
        return None;
    }
    let monthly = match billing_days {
        Some(days) if days > SCALING_THRESHOLD_DAYS => {
            (kwh / f64::from(days) * FULL_MONTH_DAYS).round()
        }
        _ => kwh,
    };
    Some(KilowattHours::from(monthly.clamp(MIN_KILOWATT_HOURS, MAX_KILOWATT_HOURS)))
}

/// Resolve a free-text supplier name to a catalog id, tolerating Greek and
/// Latin spellings. `None` means the caller falls back to manual selection.
pub fn resolve_provider_id(name: &str) -> Option<&'static str> {
    let name = name.trim().to_lowercase();
    if ["δεη", "dei", "δημόσια επιχείρηση"].iter().any(|alias| name.contains(alias)) {
        return Some("dei");
    }
    if name.contains("elpedison") || name.contains("ελπεδίσ") {
        return Some("elpedison");
    }
    if name == "nrg" || name.starts_with("nrg ") {
        return Some("nrg");
    }
    if name.contains("protergia") || name.contains("προτέρ") {
        return Some("protergia");
    }
    if name.contains("volton") {
        return Some("volton");
    }
    if name.contains("zenith") || name.contains("zeniθ") || name.contains("ζενίθ") {
        return Some("zenith");
    }
    if name.contains("watt") || name.contains("w+v") {
        return Some("watt-volt");
    }
    None
}

/// Student packages are recognised from the tariff name on the bill.
pub fn is_student_tariff(tariff_name: &str) -> bool {
    let tariff_name = tariff_name.to_lowercase();
    ["4students", "4 students", "φοιτητ"].iter().any(|marker| tariff_name.contains(marker))
}

fn zone_distribution(zones: ZoneEnergy) -> Option<ColorDistribution> {
    ColorDistribution::from_zone_energy(
        zones.blue.unwrap_or_default(),
        zones.green.unwrap_or_default(),
        zones.yellow.unwrap_or_default(),
        zones.red.unwrap_or_default(),
    )
}
