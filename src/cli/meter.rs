use chrono::Local;
use clap::Parser;

use crate::{
    api::ConsumptionSource,
    cli::{octopus::MeterPointArgs, tariff::TariffArgs},
    core::{granularity::Granularity, rollup::life_to_date, series::ConsumptionSeries},
    prelude::*,
};

#[derive(Parser)]
pub struct MeterArgs {
    #[clap(flatten)]
    meter_point: MeterPointArgs,

    #[clap(flatten)]
    tariff: TariffArgs,

    /// Maximum number of daily records to sum up.
    #[clap(long = "max-records", default_value = "25000")]
    max_records: usize,
}

impl MeterArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let records = self.meter_point.new_client().fetch_consumption(
            Granularity::Day,
            None,
            self.max_records,
        )?;
        let series = ConsumptionSeries::try_normalize(
            records,
            Granularity::Day,
            &self.tariff.tariff(),
            &Local,
        )
        .context("failed to normalize the daily consumption")?;
        let since = series.intervals().first().map(|interval| interval.start.date_naive());
        info!(n_days = series.len(), since = ?since, "summed up");
        println!("{}", life_to_date(&series));
        Ok(())
    }
}
