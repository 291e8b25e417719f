use serde::{Deserialize, Serialize};

use crate::{
    catalog::zone::ZoneRates,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

/// Network and levy charges mandated by the regulator, identical across all providers.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegulatedCharges {
    /// Flat regulated rate, applied to non-zoned tariffs.
    pub energy_rate: KilowattHourRate,

    /// Per-zone regulated rates, applied to zoned tariffs.
    pub zone_rates: ZoneRates,

    /// Flat regulated monthly fee.
    pub monthly_fee: Cost,

    /// VAT fraction applied to the whole subtotal.
    pub vat: f64,
}
