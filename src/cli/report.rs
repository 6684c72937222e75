use std::fmt::Display;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Parser;
use http::Uri;

use crate::{
    api::{ConsumptionSource, webhook::Webhook},
    cli::{ClockArgs, octopus::MeterPointArgs, tariff::TariffArgs},
    core::{
        self,
        digest::Digest,
        granularity::Granularity,
        period::YearMonth,
        series::ConsumptionSeries,
        tariff::Tariff,
    },
    prelude::*,
    report::Report,
};

#[derive(Parser)]
pub struct ReportArgs {
    #[clap(flatten)]
    meter_point: MeterPointArgs,

    #[clap(flatten)]
    tariff: TariffArgs,

    #[clap(flatten)]
    clock: ClockArgs,

    /// Maximum number of the most recent half-hour records to fetch.
    #[clap(long = "max-records", default_value = "2000", env = "MAX_RECORDS")]
    max_records: usize,

    /// Also deliver the report to the webhook, as JSON.
    #[clap(long = "webhook-url", env = "WEBHOOK_URL")]
    webhook_url: Option<Uri>,
}

impl ReportArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let report = compose(
            &self.meter_point.new_client(),
            &self.tariff.tariff(),
            self.clock.today(),
            self.max_records,
            &Local,
        )?;
        let Some(report) = report else {
            println!("{}", Report::NO_DATA);
            return Ok(());
        };
        println!("{report}");
        if let Some(url) = self.webhook_url {
            Webhook::new(url).send(&report)?;
        }
        Ok(())
    }
}

const HALF_HOURS_PER_DAY: usize = 48;

/// Fetch the half-hourly series and render the report, if there is anything to report on.
///
/// `max_records` is raised as needed to cover the whole prior month.
fn compose<Tz>(
    source: &impl ConsumptionSource,
    tariff: &Tariff,
    today: NaiveDate,
    max_records: usize,
    time_zone: &Tz,
) -> Result<Option<Report>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (period_from, n_required) =
        fetch_window(today).with_context(|| format!("{today} is out of range"))?;
    let records = source.fetch_consumption(
        Granularity::HalfHour,
        Some(period_from),
        max_records.max(n_required),
    )?;
    let series =
        match ConsumptionSeries::try_normalize(records, Granularity::HalfHour, tariff, time_zone) {
            Ok(series) => series,
            Err(core::Error::EmptySeries) => {
                warn!("the provider returned no records");
                return Ok(None);
            }
            Err(error) => return Err(error).context("failed to normalize the consumption"),
        };
    info!(n_intervals = series.len(), "normalized");
    let digest = Digest::try_compute(&series, today).context("failed to compute the digest")?;
    if !digest.is_prior_month_complete {
        warn!(
            prior_month = %digest.prior_month.period,
            "the consumption does not reach back to the start of the prior month",
        );
    }
    Ok(Some(Report::render(&digest)))
}

/// Start of the prior month, opened a day early for any time zone offset,
/// and the number of half-hours until the end of today.
fn fetch_window(today: NaiveDate) -> Option<(DateTime<Utc>, usize)> {
    let since = YearMonth::of(today).previous().first_day()?.checked_sub_days(Days::new(1))?;
    let n_days = usize::try_from((today - since).num_days() + 1).ok()?;
    Some((since.and_time(NaiveTime::MIN).and_utc(), n_days * HALF_HOURS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core::{
        fixtures::{raw, tariff},
        series::RawRecord,
    };

    /// Serves the records newest first, like the API does.
    struct StaticSource(Vec<RawRecord>);

    impl StaticSource {
        fn new(mut records: Vec<RawRecord>) -> Self {
            records.sort_by(|lhs, rhs| rhs.interval_start.cmp(&lhs.interval_start));
            Self(records)
        }

        /// Half-hours of 1 kWh each from the first day until the last one, inclusive.
        fn flat(first_day: NaiveDate, last_day: NaiveDate) -> Self {
            let start = first_day.and_time(NaiveTime::MIN).and_utc();
            let n_half_hours = ((last_day - first_day).num_days() + 1) * 48;
            Self::new(
                (0..n_half_hours)
                    .map(|i| {
                        let start = start + TimeDelta::minutes(30 * i);
                        let end = start + TimeDelta::minutes(30);
                        raw(&start.to_rfc3339(), &end.to_rfc3339(), dec!(1))
                    })
                    .collect(),
            )
        }
    }

    impl ConsumptionSource for StaticSource {
        fn fetch_consumption(
            &self,
            granularity: Granularity,
            period_from: Option<DateTime<Utc>>,
            max_records: usize,
        ) -> Result<Vec<RawRecord>> {
            assert_eq!(granularity, Granularity::HalfHour);
            Ok(self
                .0
                .iter()
                .filter(|record| {
                    DateTime::parse_from_rfc3339(&record.interval_start)
                        .map_or(true, |start| period_from.is_none_or(|from| start >= from))
                })
                .take(max_records)
                .cloned()
                .collect())
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_no_data() -> Result {
        let source = StaticSource::new(vec![]);
        assert!(compose(&source, &tariff(), date(2024, 7, 5), 2000, &Utc)?.is_none());
        Ok(())
    }

    #[test]
    fn test_report() -> Result {
        let source = StaticSource::new(vec![
            raw("2024-07-04T18:00:00Z", "2024-07-04T18:30:00Z", dec!(2.0)),
            raw("2024-07-04T07:00:00Z", "2024-07-04T07:30:00Z", dec!(1.0)),
            raw("2024-07-04T12:30:00Z", "2024-07-04T13:00:00Z", dec!(0.5)),
        ]);
        let report = compose(&source, &tariff(), date(2024, 7, 5), 2000, &Utc)?.unwrap();
        assert_eq!(report.subject, "Your rolling energy consumption as of Thursday 04 of July");
        assert!(report.body.contains("3.50 kWh"));
        assert!(report.body.contains("18:00, 07:00, 12:30"));
        Ok(())
    }

    #[test]
    fn test_whole_prior_month_late_in_the_month() -> Result {
        // June and July take 2880 half-hours, more than the 2000 requested:
        let source = StaticSource::flat(date(2024, 6, 1), date(2024, 7, 30));
        let report = compose(&source, &tariff(), date(2024, 7, 31), 2000, &Utc)?.unwrap();
        let expected = "So far in July you have spent £295.00; in June you spent £295.00.";
        assert!(report.body.contains(expected), "{}", report.body);
        Ok(())
    }

    #[test]
    fn test_fetch_window() {
        assert_eq!(
            fetch_window(date(2024, 7, 31)),
            Some((date(2024, 5, 31).and_time(NaiveTime::MIN).and_utc(), 62 * 48)),
        );
        assert_eq!(
            fetch_window(date(2024, 1, 15)),
            Some((date(2023, 11, 30).and_time(NaiveTime::MIN).and_utc(), 47 * 48)),
        );
    }

    #[test]
    fn test_malformed_record_fails() {
        let source = StaticSource::new(vec![raw("yesterday", "2024-07-04T18:30:00Z", dec!(2.0))]);
        assert!(compose(&source, &tariff(), date(2024, 7, 5), 2000, &Utc).is_err());
    }
}
