use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{cost::Cost, rate::KilowattHourRate};

quantity!(KilowattHours);

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.round_to_hundredths().0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kWh", self.0)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_energy_cost() {
        assert_eq!(KilowattHours(dec!(2.0)) * KilowattHourRate(dec!(0.20)), Cost(dec!(0.4)));
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHours(dec!(3.5)).to_string(), "3.50 kWh");
        assert_eq!(KilowattHours(dec!(0.125)).to_string(), "0.13 kWh");
    }
}
