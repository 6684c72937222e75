use std::{
    collections::BTreeMap,
    fmt::{Debug, Display, Formatter},
    ops::Range,
};

use chrono::{Datelike, Local, NaiveDate, TimeZone};

use crate::core::{interval::ConsumptionInterval, series::ConsumptionSeries};

/// Calendar month of a specific year.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct YearMonth {
    year: i32,

    /// One-based.
    month: u32,
}

impl YearMonth {
    pub fn of(date: impl Datelike) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    #[must_use]
    pub const fn is_leap_year(self) -> bool {
        (self.year % 4 == 0 && self.year % 100 != 0) || self.year % 400 == 0
    }

    /// Gregorian number of days in the month.
    #[must_use]
    pub const fn n_days(self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year() => 29,
            2 => 28,
            _ => 31,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match chrono::Month::try_from(u8::try_from(self.month).unwrap_or_default()) {
            Ok(month) => month.name(),
            Err(_) => "Unknown",
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

impl Debug for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Period {
    Day(NaiveDate),
    Month(YearMonth),
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{date}"),
            Self::Month(month) => write!(f, "{month}"),
        }
    }
}

/// Day and month lookup over a series.
///
/// Intervals are sorted by their start, so every calendar day and month occupies
/// a contiguous run of the series, and the index only needs to remember the bounds.
pub struct PeriodIndex<'a, Tz: TimeZone = Local> {
    series: &'a ConsumptionSeries<Tz>,
    days: BTreeMap<NaiveDate, Range<usize>>,
    months: BTreeMap<YearMonth, Range<usize>>,
}

impl<'a, Tz: TimeZone> PeriodIndex<'a, Tz> {
    pub fn new(series: &'a ConsumptionSeries<Tz>) -> Self {
        let mut days = BTreeMap::<NaiveDate, Range<usize>>::new();
        let mut months = BTreeMap::<YearMonth, Range<usize>>::new();
        for (position, interval) in series.iter().enumerate() {
            let date = interval.start.date_naive();
            days.entry(date).or_insert(position..position).end = position + 1;
            months.entry(YearMonth::of(date)).or_insert(position..position).end = position + 1;
        }
        Self { series, days, months }
    }

    /// Intervals starting on the calendar day, in the series' time zone.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> &'a [ConsumptionInterval<Tz>] {
        self.slice(self.days.get(&date))
    }

    /// Intervals starting within the calendar month, in the series' time zone.
    #[must_use]
    pub fn month(&self, month: YearMonth) -> &'a [ConsumptionInterval<Tz>] {
        self.slice(self.months.get(&month))
    }

    #[must_use]
    pub fn select(&self, period: Period) -> &'a [ConsumptionInterval<Tz>] {
        match period {
            Period::Day(date) => self.day(date),
            Period::Month(month) => self.month(month),
        }
    }

    /// Days present in the series along with their intervals, in order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &'a [ConsumptionInterval<Tz>])> + '_ {
        self.days.iter().map(|(date, range)| (*date, self.slice(Some(range))))
    }

    /// Earliest day present in the series.
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Days present in the series within the month, in order.
    #[cfg(test)]
    pub fn days_of(&self, month: YearMonth) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied().filter(move |date| YearMonth::of(*date) == month)
    }

    fn slice(&self, range: Option<&Range<usize>>) -> &'a [ConsumptionInterval<Tz>] {
        match range {
            Some(range) => &self.series.intervals()[range.clone()],
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        core::{
            fixtures::{half_hours, raw, tariff},
            granularity::Granularity,
        },
        prelude::*,
        quantity::cost::Cost,
    };

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_previous_month() {
        assert_eq!(YearMonth::of(date(2024, 1, 15)).previous(), YearMonth::of(date(2023, 12, 1)));
        assert_eq!(YearMonth::of(date(2024, 3, 1)).previous(), YearMonth::of(date(2024, 2, 29)));
    }

    #[test]
    fn test_n_days() {
        assert_eq!(YearMonth::of(date(2024, 2, 1)).n_days(), 29);
        assert_eq!(YearMonth::of(date(2023, 2, 1)).n_days(), 28);
        assert_eq!(YearMonth::of(date(2000, 2, 1)).n_days(), 29);
        assert_eq!(YearMonth::of(date(1900, 2, 1)).n_days(), 28);
        assert_eq!(YearMonth::of(date(2024, 4, 1)).n_days(), 30);
        assert_eq!(YearMonth::of(date(2024, 12, 1)).n_days(), 31);
    }

    #[test]
    fn test_first_day() {
        assert_eq!(YearMonth::of(date(2024, 2, 29)).first_day(), Some(date(2024, 2, 1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(YearMonth::of(date(2024, 7, 4)).to_string(), "July 2024");
        assert_eq!(Period::Day(date(2024, 7, 4)).to_string(), "2024-07-04");
    }

    #[test]
    fn test_day_and_month_selection() {
        let series = half_hours(&[
            ("2024-02-29T23:30:00Z", dec!(1.0)),
            ("2024-03-01T00:00:00Z", dec!(2.0)),
            ("2024-03-01T00:30:00Z", dec!(3.0)),
            ("2024-03-04T10:00:00Z", dec!(4.0)),
        ]);
        let index = PeriodIndex::new(&series);

        assert_eq!(index.day(date(2024, 2, 29)).len(), 1);
        assert_eq!(index.day(date(2024, 3, 1)).len(), 2);
        assert_eq!(index.day(date(2024, 3, 2)).len(), 0);
        assert_eq!(index.month(YearMonth::of(date(2024, 3, 1))).len(), 3);
        assert_eq!(index.month(YearMonth::of(date(2024, 2, 1))).len(), 1);
        assert!(index.month(YearMonth::of(date(2024, 5, 1))).is_empty());
        assert_eq!(index.first_day(), Some(date(2024, 2, 29)));
        assert_eq!(
            index.days_of(YearMonth::of(date(2024, 3, 1))).collect::<Vec<_>>(),
            vec![date(2024, 3, 1), date(2024, 3, 4)],
        );
    }

    #[test]
    fn test_month_partitions_into_days() {
        let series = half_hours(&[
            ("2024-03-01T00:00:00Z", dec!(1.25)),
            ("2024-03-01T12:00:00Z", dec!(0.75)),
            ("2024-03-02T08:30:00Z", dec!(2.5)),
            ("2024-03-31T23:30:00Z", dec!(0.1)),
            ("2024-04-01T00:00:00Z", dec!(9.9)),
        ]);
        let index = PeriodIndex::new(&series);
        let month = YearMonth::of(date(2024, 3, 1));

        let month_total: Cost =
            index.month(month).iter().map(ConsumptionInterval::total_cost).sum();
        let days_total: Cost = index
            .days_of(month)
            .flat_map(|day| index.day(day))
            .map(ConsumptionInterval::total_cost)
            .sum();
        assert_eq!(month_total, days_total);
        assert_eq!(index.month(month).len(), 4);
    }

    #[test]
    fn test_uses_series_time_zone() -> Result {
        let bst = FixedOffset::east_opt(3600).unwrap();
        let records = vec![raw("2024-07-04T23:30:00Z", "2024-07-05T00:00:00Z", dec!(1.0))];

        let local = ConsumptionSeries::try_normalize(
            records.clone(),
            Granularity::HalfHour,
            &tariff(),
            &bst,
        )?;
        assert_eq!(PeriodIndex::new(&local).day(date(2024, 7, 5)).len(), 1);

        let utc =
            ConsumptionSeries::try_normalize(records, Granularity::HalfHour, &tariff(), &Utc)?;
        assert_eq!(PeriodIndex::new(&utc).day(date(2024, 7, 4)).len(), 1);
        Ok(())
    }
}
