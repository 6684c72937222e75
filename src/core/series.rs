use chrono::{DateTime, Local, TimeZone};
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    core::{Error, granularity::Granularity, interval::ConsumptionInterval, tariff::Tariff},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Metering record as delivered by the provider.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRecord {
    pub consumption: KilowattHours,
    pub interval_start: String,
    pub interval_end: String,
}

/// Non-empty, chronologically ordered and non-overlapping intervals of the same granularity.
#[must_use]
#[derive(Clone, Debug)]
pub struct ConsumptionSeries<Tz: TimeZone = Local> {
    intervals: Vec<ConsumptionInterval<Tz>>,
}

impl<Tz: TimeZone> ConsumptionSeries<Tz> {
    /// Price the raw records and order them, expressing the timestamps in the time zone.
    #[instrument(skip_all, fields(granularity = %granularity))]
    pub fn try_normalize(
        records: impl IntoIterator<Item = RawRecord>,
        granularity: Granularity,
        tariff: &Tariff,
        time_zone: &Tz,
    ) -> Result<Self, Error> {
        let mut intervals: Vec<ConsumptionInterval<Tz>> = records
            .into_iter()
            .map(|record| {
                let start = parse_timestamp(record.interval_start, time_zone)?;
                let end = parse_timestamp(record.interval_end, time_zone)?;
                if record.consumption < KilowattHours::ZERO {
                    return Err(Error::NegativeConsumption {
                        start: start.fixed_offset().to_rfc3339(),
                        consumption: record.consumption,
                    });
                }
                if end <= start {
                    let start = start.fixed_offset().to_rfc3339();
                    return Err(Error::InvertedInterval { start });
                }
                Ok(ConsumptionInterval::new(start, end, record.consumption, granularity, tariff))
            })
            .try_collect()?;
        if intervals.is_empty() {
            return Err(Error::EmptySeries);
        }

        intervals.sort_by(|lhs, rhs| lhs.start.cmp(&rhs.start));
        if let Some((_, next)) =
            intervals.iter().tuple_windows().find(|(previous, next)| next.start < previous.end)
        {
            let start = next.start.fixed_offset().to_rfc3339();
            return Err(Error::OverlappingIntervals { start });
        }

        debug!(n_intervals = intervals.len(), "normalized");
        Ok(Self { intervals })
    }

    #[must_use]
    pub fn intervals(&self) -> &[ConsumptionInterval<Tz>] {
        &self.intervals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConsumptionInterval<Tz>> {
        self.intervals.iter()
    }

    /// Total consumption over the entire series, also known as the life-to-date consumption
    /// for a day-granularity series.
    pub fn total_consumption(&self) -> KilowattHours {
        self.iter().map(|interval| interval.consumption).sum()
    }

    pub fn total_cost(&self) -> Cost {
        self.iter().map(ConsumptionInterval::total_cost).sum()
    }
}

fn parse_timestamp<Tz: TimeZone>(value: String, time_zone: &Tz) -> Result<DateTime<Tz>, Error> {
    match DateTime::parse_from_rfc3339(&value) {
        Ok(timestamp) => Ok(timestamp.with_timezone(time_zone)),
        Err(source) => Err(Error::MalformedTimestamp { value, source }),
    }
}
