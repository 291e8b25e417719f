use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Euro amount.
pub type Cost = Quantity<0, 1>;

impl Cost {
    /// Annualise a monthly amount (12 billing months).
    pub fn per_year(self) -> Self {
        self * 12.0
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::{energy::KilowattHours, rate::KilowattHourRate};

    #[test]
    fn test_energy_times_rate() {
        let cost = KilowattHours::from(250.0) * KilowattHourRate::from(0.12);
        assert_abs_diff_eq!(cost.0.0, 30.0);
    }

    #[test]
    fn test_per_year() {
        assert_abs_diff_eq!(Cost::from(10.0).per_year().0.0, 120.0);
    }
}
