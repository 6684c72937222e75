use bon::Builder;
use rust_decimal::Decimal;

use crate::{
    core::granularity::Granularity,
    quantity::{cost::Cost, rate::KilowattHourRate},
};

#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct Tariff {
    pub unit_price: KilowattHourRate,
    pub daily_standing_charge: Cost,
}

impl Tariff {
    /// Decimal places kept for the pro-rated standing charge.
    ///
    /// Bounds the scale of every per-interval cost, so that sums over years of half-hours
    /// stay exact.
    const STANDING_CHARGE_SCALE: u32 = 12;

    /// Standing charge allocated to a single record of the granularity.
    pub fn standing_charge(&self, granularity: Granularity) -> Cost {
        let daily = self.daily_standing_charge;
        let share = match granularity {
            Granularity::HalfHour => daily / Decimal::from(48),
            Granularity::Hour => daily / Decimal::from(24),
            Granularity::Day => daily,
            Granularity::Week => daily * Decimal::from(7),
            Granularity::Month => daily * Decimal::from(30),
        };
        Cost(share.0.round_dp(Self::STANDING_CHARGE_SCALE))
    }
}
