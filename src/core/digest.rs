use chrono::{Local, NaiveDate, TimeZone};

use crate::{
    core::{
        Error,
        period::YearMonth,
        rollup::{Calculator, Rollup},
        series::ConsumptionSeries,
    },
    prelude::*,
    quantity::cost::Cost,
};

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Pacing {
    pub daily_average: Cost,
    pub month_end_projection: Cost,
}

/// All the rollups of the rolling consumption report.
#[must_use]
#[derive(Clone, Debug)]
pub struct Digest<Tz: TimeZone = Local> {
    pub yesterday: NaiveDate,
    pub current_month: YearMonth,

    /// Yesterday's totals with the busiest intervals.
    pub snapshot: Rollup<Tz>,

    pub month_to_date: Rollup<Tz>,
    pub prior_month: Rollup<Tz>,

    /// The series reaches back to the first day of the prior month.
    pub is_prior_month_complete: bool,

    /// Not available on the first day of a month.
    pub pacing: Option<Pacing>,
}

impl<Tz: TimeZone> Digest<Tz> {
    #[instrument(skip_all, fields(today = %today))]
    pub fn try_compute(series: &ConsumptionSeries<Tz>, today: NaiveDate) -> Result<Self, Error> {
        let calculator = Calculator::new(series, today);
        let snapshot = calculator.yesterday_snapshot()?;
        let month_to_date = calculator.month_to_date();
        let prior_month = calculator.prior_month();
        let pacing = match calculator.daily_average(month_to_date.cost) {
            Ok(daily_average) => Some(Pacing {
                daily_average,
                month_end_projection: calculator.month_end_projection(daily_average),
            }),
            Err(Error::DivisionUndefined(month)) => {
                debug!(%month, "no pacing on the first day of the month");
                None
            }
            Err(error) => return Err(error),
        };
        Ok(Self {
            yesterday: calculator.yesterday()?,
            current_month: calculator.current_month(),
            snapshot,
            month_to_date,
            prior_month,
            is_prior_month_complete: calculator.is_prior_month_complete(),
            pacing,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{core::fixtures::half_hours, quantity::energy::KilowattHours};

    #[test]
    fn test_first_day_of_month_has_no_pacing() -> Result {
        let series = half_hours(&[("2024-02-29T12:00:00Z", dec!(1.0))]);
        let digest = Digest::try_compute(&series, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())?;
        assert!(digest.pacing.is_none());
        assert_eq!(digest.yesterday, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(digest.snapshot.consumption, KilowattHours(dec!(1.0)));
        assert!(digest.month_to_date.top.is_empty());
        assert_eq!(digest.month_to_date.cost, Cost::ZERO);
        Ok(())
    }

    #[test]
    fn test_pacing() -> Result {
        let series = half_hours(&[
            ("2024-03-01T00:00:00Z", dec!(10.0)),
            ("2024-03-02T00:00:00Z", dec!(5.0)),
        ]);
        let digest = Digest::try_compute(&series, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap())?;
        let pacing = digest.pacing.unwrap();
        assert_eq!(digest.month_to_date.cost, Cost(dec!(3.00972)));
        assert_eq!(pacing.daily_average, Cost(dec!(1.50486)));
        assert_eq!(pacing.month_end_projection, Cost(dec!(46.65066)));
        assert_eq!(digest.current_month, YearMonth::of(digest.yesterday));
        assert!(!digest.is_prior_month_complete);
        Ok(())
    }
}
