use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Local, TimeZone};

use crate::{
    core::{granularity::Granularity, tariff::Tariff},
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Single billed metering slot.
#[must_use]
#[derive(Clone)]
pub struct ConsumptionInterval<Tz: TimeZone = Local> {
    /// Inclusive.
    pub start: DateTime<Tz>,

    /// Exclusive.
    pub end: DateTime<Tz>,

    pub consumption: KilowattHours,
    pub energy_cost: Cost,
    pub standing_charge: Cost,
}

impl<Tz: TimeZone> ConsumptionInterval<Tz> {
    pub fn new(
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        consumption: KilowattHours,
        granularity: Granularity,
        tariff: &Tariff,
    ) -> Self {
        Self {
            start,
            end,
            consumption,
            energy_cost: consumption * tariff.unit_price,
            standing_charge: tariff.standing_charge(granularity),
        }
    }

    pub fn total_cost(&self) -> Cost {
        self.energy_cost + self.standing_charge
    }
}

impl<Tz: TimeZone> Debug for ConsumptionInterval<Tz> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}..{:?}: {:?} ({:?} + {:?})",
            self.start, self.end, self.consumption, self.energy_cost, self.standing_charge,
        )
    }
}
