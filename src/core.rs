pub mod digest;
mod error;
pub mod granularity;
pub mod interval;
pub mod period;
pub mod rollup;
pub mod series;
pub mod tariff;

#[cfg(test)]
pub mod fixtures;

pub use self::error::Error;
