//! Test helpers shared by the core modules.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    core::{
        granularity::Granularity,
        series::{ConsumptionSeries, RawRecord},
        tariff::Tariff,
    },
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// 0.20 per kWh, 0.00486 per half-hour.
pub fn tariff() -> Tariff {
    Tariff::builder()
        .unit_price(KilowattHourRate(dec!(0.20)))
        .daily_standing_charge(Cost(dec!(0.23328)))
        .build()
}

pub fn raw(start: &str, end: &str, consumption: Decimal) -> RawRecord {
    RawRecord {
        consumption: KilowattHours(consumption),
        interval_start: start.to_string(),
        interval_end: end.to_string(),
    }
}

/// Half-hour series in UTC from `(start, consumption)` pairs.
pub fn half_hours(points: &[(&str, Decimal)]) -> ConsumptionSeries<Utc> {
    let records = points.iter().map(|(start, consumption)| {
        let start = chrono::DateTime::parse_from_rfc3339(start).unwrap();
        let end = start + chrono::TimeDelta::minutes(30);
        raw(&start.to_rfc3339(), &end.to_rfc3339(), *consumption)
    });
    ConsumptionSeries::try_normalize(records, Granularity::HalfHour, &tariff(), &Utc).unwrap()
}
