use clap::Parser;

use crate::{
    core::tariff::Tariff,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct TariffArgs {
    /// Unit price in pounds per kilowatt-hour.
    #[clap(long = "unit-price", default_value = "0.2017", env = "UNIT_PRICE")]
    pub unit_price: KilowattHourRate,

    /// Standing charge in pounds per day.
    #[clap(long = "daily-standing-charge", default_value = "0.2330", env = "DAILY_STANDING_CHARGE")]
    pub daily_standing_charge: Cost,
}

impl TariffArgs {
    pub fn tariff(self) -> Tariff {
        Tariff::builder()
            .unit_price(self.unit_price)
            .daily_standing_charge(self.daily_standing_charge)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rust_decimal_macros::dec;

    use super::*;

    #[derive(Parser)]
    struct TestArgs {
        #[clap(flatten)]
        tariff: TariffArgs,
    }

    #[test]
    fn test_defaults() {
        let tariff = TestArgs::parse_from(["test"]).tariff.tariff();
        assert_eq!(tariff.unit_price, KilowattHourRate(dec!(0.2017)));
        assert_eq!(tariff.daily_standing_charge, Cost(dec!(0.2330)));
    }

    #[test]
    fn test_overrides() {
        let args = ["test", "--unit-price", "0.25", "--daily-standing-charge", "0.5"];
        let tariff = TestArgs::parse_from(args).tariff.tariff();
        assert_eq!(tariff.unit_price, KilowattHourRate(dec!(0.25)));
        assert_eq!(tariff.daily_standing_charge, Cost(dec!(0.5)));
    }
}
