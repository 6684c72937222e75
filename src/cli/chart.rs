use chrono::Local;
use clap::Parser;

use crate::{
    api::ConsumptionSource,
    cli::{octopus::MeterPointArgs, tariff::TariffArgs},
    core::{granularity::Granularity, series::ConsumptionSeries},
    prelude::*,
    tables::build_daily_table,
};

#[derive(Parser)]
pub struct ChartArgs {
    #[clap(flatten)]
    meter_point: MeterPointArgs,

    #[clap(flatten)]
    tariff: TariffArgs,

    #[clap(long = "granularity", value_enum, default_value_t = Granularity::HalfHour)]
    granularity: Granularity,

    #[clap(long = "max-records", default_value = "2000")]
    max_records: usize,
}

impl ChartArgs {
    #[instrument(skip_all, fields(granularity = %self.granularity))]
    pub fn run(self) -> Result {
        let records = self.meter_point.new_client().fetch_consumption(
            self.granularity,
            None,
            self.max_records,
        )?;
        let series = ConsumptionSeries::try_normalize(
            records,
            self.granularity,
            &self.tariff.tariff(),
            &Local,
        )
        .context("failed to normalize the consumption")?;
        println!("{}", build_daily_table(&series));
        info!(consumption = ?series.total_consumption(), cost = ?series.total_cost(), "total");
        Ok(())
    }
}
