mod chart;
mod meter;
mod octopus;
mod rates;
mod report;
mod tariff;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::{
    cli::{chart::ChartArgs, meter::MeterArgs, rates::RatesArgs, report::ReportArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        match self.command {
            Command::Report(args) => args.run(),
            Command::Meter(args) => args.run(),
            Command::Chart(args) => args.run(),
            Command::Rates(args) => args.run(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: fetch the half-hourly consumption and print the rolling report.
    #[clap(name = "report")]
    Report(Box<ReportArgs>),

    /// Print the life-to-date consumption.
    #[clap(name = "meter")]
    Meter(Box<MeterArgs>),

    /// Print the consumption and cost per day.
    #[clap(name = "chart")]
    Chart(Box<ChartArgs>),

    /// Print the standard unit rates of a tariff.
    #[clap(name = "rates")]
    Rates(Box<RatesArgs>),
}

#[derive(Copy, Clone, Parser)]
pub struct ClockArgs {
    /// Reference date of the report, defaults to today's local date.
    #[clap(long = "today", env = "REPORT_TODAY")]
    today: Option<NaiveDate>,
}

impl ClockArgs {
    pub fn today(self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
