pub mod octopus;
pub mod webhook;

use chrono::{DateTime, Utc};

use crate::{
    core::{granularity::Granularity, series::RawRecord},
    prelude::*,
};

/// Supplier of raw metering records.
pub trait ConsumptionSource {
    /// Fetch up to `max_records` most recent records of the granularity,
    /// starting no earlier than `period_from` when it is set.
    fn fetch_consumption(
        &self,
        granularity: Granularity,
        period_from: Option<DateTime<Utc>>,
        max_records: usize,
    ) -> Result<Vec<RawRecord>>;
}
