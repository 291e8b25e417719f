use serde::{Deserialize, Serialize};

use crate::quantity::rate::KilowattHourRate;

/// Time-of-use band of the zoned («colored») tariffs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Off-peak.
    Blue,

    Green,

    Yellow,

    /// Peak.
    Red,
}

impl Zone {
    pub const ALL: [Self; 4] = [Self::Blue, Self::Green, Self::Yellow, Self::Red];
}

/// One euro-per-kilowatt-hour rate per zone.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ZoneRates {
    pub blue: KilowattHourRate,
    pub green: KilowattHourRate,
    pub yellow: KilowattHourRate,
    pub red: KilowattHourRate,
}

impl ZoneRates {
    pub const fn get(&self, zone: Zone) -> KilowattHourRate {
        match zone {
            Zone::Blue => self.blue,
            Zone::Green => self.green,
            Zone::Yellow => self.yellow,
            Zone::Red => self.red,
        }
    }
}
