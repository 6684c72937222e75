use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, TimeZone};
use itertools::Itertools;
use serde::Serialize;

use crate::core::digest::Digest;

/// Rendered narrative of a [`Digest`], independent of how it is going to be delivered.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

impl Report {
    pub const NO_DATA: &'static str = "No data on energy consumption is available at this time. \
        Check the website or reach out to your energy provider.";

    pub fn render<Tz>(digest: &Digest<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let yesterday = human_date(digest.yesterday);
        let current_month = digest.current_month.name();
        let snapshot = &digest.snapshot;

        let mut lines = Vec::with_capacity(4);
        if snapshot.is_empty() {
            lines.push(format!("No consumption was recorded yesterday, {yesterday}."));
        } else {
            lines.push(format!(
                "Yesterday, {yesterday}, you consumed {} for a total of {}.",
                snapshot.consumption, snapshot.cost,
            ));
            lines.push(format!(
                "Your busiest intervals were at {}, costing {} combined.",
                snapshot.top.iter().map(|interval| interval.start.format("%H:%M")).join(", "),
                snapshot.top_cost(),
            ));
        }
        lines.push(format!(
            "So far in {current_month} you have spent {}; in {} you spent {}.",
            digest.month_to_date.cost,
            digest.current_month.previous().name(),
            digest.prior_month.cost,
        ));
        match digest.pacing {
            Some(pacing) => lines.push(format!(
                "At a daily average of {}, {current_month} is projected to cost {}.",
                pacing.daily_average, pacing.month_end_projection,
            )),
            None => lines.push(
                "A daily average is not available on the first day of the month.".to_string(),
            ),
        }

        Self {
            subject: format!("Your rolling energy consumption as of {yesterday}"),
            body: lines.join("\n"),
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.subject)?;
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}

/// For example, «Thursday 04 of July».
fn human_date(date: NaiveDate) -> String {
    date.format("%A %d of %B").to_string()
}
