use chrono::NaiveDate;
use thiserror::Error;

use crate::{core::period::YearMonth, quantity::energy::KilowattHours};

/// Failures of the consumption aggregation engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed interval timestamp `{value}`")]
    MalformedTimestamp {
        value: String,

        #[source]
        source: chrono::ParseError,
    },

    #[error("no consumption records are available")]
    EmptySeries,

    #[error("daily average is undefined on the first day of {0}")]
    DivisionUndefined(YearMonth),

    #[error("interval starting at {start} does not end after it starts")]
    InvertedInterval { start: String },

    #[error("interval starting at {start} overlaps the preceding one")]
    OverlappingIntervals { start: String },

    #[error("interval starting at {start} has negative consumption {consumption:?}")]
    NegativeConsumption { start: String, consumption: KilowattHours },

    #[error("{0} has no preceding day")]
    DateOutOfRange(NaiveDate),
}
