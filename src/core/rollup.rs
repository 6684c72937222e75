use chrono::{Datelike, Days, Local, NaiveDate, TimeZone};
use itertools::Itertools;
use rust_decimal::Decimal;

use crate::{
    core::{
        Error,
        interval::ConsumptionInterval,
        period::{Period, PeriodIndex, YearMonth},
        series::ConsumptionSeries,
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours},
};

/// Aggregate over a single period.
#[must_use]
#[derive(Clone, Debug)]
pub struct Rollup<Tz: TimeZone = Local> {
    pub period: Period,
    pub consumption: KilowattHours,
    pub cost: Cost,
    pub n_intervals: usize,

    /// Busiest intervals, busiest first.
    pub top: Vec<ConsumptionInterval<Tz>>,
}

impl<Tz: TimeZone> Rollup<Tz> {
    /// Sum the intervals and keep the `n_top` busiest of them.
    ///
    /// Intervals rank by consumption, then by total cost. Equal ones keep the chronological order.
    pub fn over(period: Period, intervals: &[ConsumptionInterval<Tz>], n_top: usize) -> Self {
        Self {
            period,
            consumption: intervals.iter().map(|interval| interval.consumption).sum(),
            cost: intervals.iter().map(ConsumptionInterval::total_cost).sum(),
            n_intervals: intervals.len(),
            top: intervals
                .iter()
                .sorted_by(|lhs, rhs| {
                    (rhs.consumption, rhs.total_cost()).cmp(&(lhs.consumption, lhs.total_cost()))
                })
                .take(n_top)
                .cloned()
                .collect(),
        }
    }

    /// No intervals fell within the period.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n_intervals == 0
    }

    /// Combined cost of the busiest intervals.
    pub fn top_cost(&self) -> Cost {
        self.top.iter().map(ConsumptionInterval::total_cost).sum()
    }
}

/// Rollups relative to a reference date, which is «today» in the series' time zone.
pub struct Calculator<'a, Tz: TimeZone = Local> {
    index: PeriodIndex<'a, Tz>,
    today: NaiveDate,
}

impl<'a, Tz: TimeZone> Calculator<'a, Tz> {
    pub const N_BUSIEST: usize = 3;

    pub fn new(series: &'a ConsumptionSeries<Tz>, today: NaiveDate) -> Self {
        Self { index: PeriodIndex::new(series), today }
    }

    pub fn yesterday(&self) -> Result<NaiveDate, Error> {
        self.today.checked_sub_days(Days::new(1)).ok_or(Error::DateOutOfRange(self.today))
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::of(self.today)
    }

    /// Yesterday's totals with the busiest intervals.
    #[instrument(skip_all, fields(today = %self.today))]
    pub fn yesterday_snapshot(&self) -> Result<Rollup<Tz>, Error> {
        let period = Period::Day(self.yesterday()?);
        let rollup = Rollup::over(period, self.index.select(period), Self::N_BUSIEST);
        debug!(
            period = %rollup.period,
            n_intervals = rollup.n_intervals,
            consumption = ?rollup.consumption,
            cost = ?rollup.cost,
            "yesterday",
        );
        Ok(rollup)
    }

    /// Everything in the current month up to the latest available interval.
    pub fn month_to_date(&self) -> Rollup<Tz> {
        self.month(self.current_month())
    }

    pub fn prior_month(&self) -> Rollup<Tz> {
        self.month(self.current_month().previous())
    }

    /// Whether the series reaches back to the first day of the prior month.
    ///
    /// Otherwise, the prior month total only covers the days that are present.
    pub fn is_prior_month_complete(&self) -> bool {
        let Some(first_day) = self.current_month().previous().first_day() else {
            return false;
        };
        self.index.first_day().is_some_and(|start| start <= first_day)
    }

    /// Month-to-date cost spread over the days elapsed until yesterday.
    pub fn daily_average(&self, month_to_date: Cost) -> Result<Cost, Error> {
        let n_elapsed_days = self.today.day() - 1;
        if n_elapsed_days == 0 {
            return Err(Error::DivisionUndefined(self.current_month()));
        }
        Ok(month_to_date / Decimal::from(n_elapsed_days))
    }

    /// Current month's cost if the daily average holds for all of its days.
    pub fn month_end_projection(&self, daily_average: Cost) -> Cost {
        daily_average * Decimal::from(self.current_month().n_days())
    }

    fn month(&self, month: YearMonth) -> Rollup<Tz> {
        let period = Period::Month(month);
        let rollup = Rollup::over(period, self.index.select(period), 0);
        debug!(
            period = %rollup.period,
            n_intervals = rollup.n_intervals,
            consumption = ?rollup.consumption,
            cost = ?rollup.cost,
            "month",
        );
        rollup
    }
}

/// Consumption since the meter went live, from a day-granularity series.
pub fn life_to_date<Tz: TimeZone>(series: &ConsumptionSeries<Tz>) -> KilowattHours {
    series.total_consumption()
}
