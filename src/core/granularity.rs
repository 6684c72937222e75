use std::fmt::{Display, Formatter};

/// Aggregation period of a single metered record.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Hash,
    Eq,
    PartialEq,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    #[default]
    HalfHour,
    Hour,
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Value of the `group_by` query parameter, half-hours being the ungrouped default.
    #[must_use]
    pub const fn group_by(self) -> Option<&'static str> {
        match self {
            Self::HalfHour => None,
            Self::Hour => Some("hour"),
            Self::Day => Some("day"),
            Self::Week => Some("week"),
            Self::Month => Some("month"),
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::HalfHour => "half-hour",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        })
    }
}
