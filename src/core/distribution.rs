use serde::{Deserialize, Serialize};

use crate::{
    catalog::zone::{Zone, ZoneRates},
    core::InputError,
    quantity::rate::KilowattHourRate,
};

const SUM_TOLERANCE: f64 = 1e-6;

/// Fractions of the monthly consumption falling into each time-of-use zone.
///
/// Each fraction lies in [0, 1] and the four of them sum up to 1.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ColorDistribution {
    pub blue: f64,
    pub green: f64,
    pub yellow: f64,
    pub red: f64,
}

impl ColorDistribution {
    /// Average household profile.
    ///
    /// This is the default used whenever a zoned tariff is priced without an
    /// explicit profile.
    pub const TYPICAL: Self = Self { blue: 0.35, green: 0.30, yellow: 0.20, red: 0.15 };

    /// Consumption concentrated after working hours.
    pub const EVENING: Self = Self { blue: 0.20, green: 0.25, yellow: 0.25, red: 0.30 };

    /// Off-peak heavy: storage heating, overnight EV charging.
    pub const NIGHT: Self = Self { blue: 0.55, green: 0.25, yellow: 0.12, red: 0.08 };

    /// Somebody is home all day.
    pub const HOME_ALL_DAY: Self = Self { blue: 0.25, green: 0.30, yellow: 0.30, red: 0.15 };

    pub const fn fraction(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Blue => self.blue,
            Zone::Green => self.green,
            Zone::Yellow => self.yellow,
            Zone::Red => self.red,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        let fractions = [self.blue, self.green, self.yellow, self.red];
        if fractions.iter().any(|fraction| !(0.0..=1.0).contains(fraction)) {
            return Err(InputError::Distribution);
        }
        let sum: f64 = fractions.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(InputError::Distribution);
        }
        Ok(())
    }

    /// Zone-weighted average rate: `Σ rate[z] · fraction[z]`.
    pub fn weighted_rate(&self, rates: &ZoneRates) -> KilowattHourRate {
        Zone::ALL.into_iter().map(|zone| rates.get(zone) * self.fraction(zone)).sum()
    }

    /// Derive a profile from measured per-zone energy.
    ///
    /// `None` when the total is not a positive finite amount.
    pub fn from_zone_energy(blue: f64, green: f64, yellow: f64, red: f64) -> Option<Self> {
        let total = blue + green + yellow + red;
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        let distribution =
            Self { blue: blue / total, green: green / total, yellow: yellow / total, red: red / total };
        distribution.validate().ok().map(|()| distribution)
    }
}
