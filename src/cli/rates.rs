use clap::Parser;

use crate::{cli::octopus::OctopusApiArgs, prelude::*, tables::build_unit_rates_table};

#[derive(Parser)]
pub struct RatesArgs {
    #[clap(flatten)]
    api: OctopusApiArgs,

    /// Product code, for example `AGILE-18-02-21`.
    #[clap(long = "product", env = "OCTOPUS_PRODUCT")]
    product: String,

    /// Tariff code, for example `E-1R-AGILE-18-02-21-C`.
    #[clap(long = "tariff", env = "OCTOPUS_TARIFF")]
    tariff: String,

    #[clap(long = "max-records", default_value = "96")]
    max_records: usize,
}

impl RatesArgs {
    pub fn run(self) -> Result {
        let mut rates =
            self.api.new_client().fetch_unit_rates(&self.product, &self.tariff, self.max_records)?;
        rates.sort_by_key(|rate| rate.valid_from);
        println!("{}", build_unit_rates_table(&rates));
        Ok(())
    }
}
