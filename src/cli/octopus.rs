use clap::Parser;

use crate::api::octopus::{Api, Meter};

#[derive(Parser)]
pub struct OctopusApiArgs {
    /// Octopus Energy API key, sent as the Basic authentication username.
    #[clap(long = "api-key", env = "OCTOPUS_API_KEY")]
    pub api_key: String,

    #[clap(long = "api-base-url", default_value = "https://api.octopus.energy/v1/")]
    pub base_url: String,
}

impl OctopusApiArgs {
    pub fn new_client(&self) -> Api {
        Api::new(&self.base_url, &self.api_key)
    }
}

#[derive(Parser)]
pub struct MeterPointArgs {
    #[clap(flatten)]
    pub api: OctopusApiArgs,

    /// Meter point administration number.
    #[clap(long = "mpan", env = "OCTOPUS_MPAN")]
    pub mpan: String,

    #[clap(long = "meter-serial", env = "OCTOPUS_METER_SERIAL")]
    pub serial_number: String,
}

impl MeterPointArgs {
    pub fn new_client(&self) -> Meter {
        self.api.new_client().meter(self.mpan.clone(), self.serial_number.clone())
    }
}
