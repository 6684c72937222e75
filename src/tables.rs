use chrono::TimeZone;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    api::octopus::UnitRate,
    core::{interval::ConsumptionInterval, period::PeriodIndex, series::ConsumptionSeries},
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

const BAR_WIDTH: u32 = 40;

/// Per-day consumption and cost with a bar scaled to the busiest day.
pub fn build_daily_table<Tz: TimeZone>(series: &ConsumptionSeries<Tz>) -> Table {
    let index = PeriodIndex::new(series);
    let days: Vec<_> = index
        .days()
        .map(|(date, intervals)| {
            let consumption: KilowattHours =
                intervals.iter().map(|interval| interval.consumption).sum();
            let cost: Cost = intervals.iter().map(ConsumptionInterval::total_cost).sum();
            (date, consumption, cost)
        })
        .collect();
    let busiest = days.iter().map(|(_, consumption, _)| *consumption).max().unwrap_or_default();
    let mean_cost = if days.is_empty() {
        Cost::ZERO
    } else {
        days.iter().map(|(_, _, cost)| *cost).sum::<Cost>() / Decimal::from(days.len())
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling()
        .set_header(vec![
            Cell::new("Date"),
            Cell::new("Consumption").set_alignment(CellAlignment::Right),
            Cell::new("Cost").set_alignment(CellAlignment::Right),
            Cell::new(""),
        ]);
    for (date, consumption, cost) in days {
        table.add_row(vec![
            Cell::new(date.format("%a %b %d")).add_attribute(Attribute::Dim),
            Cell::new(consumption).set_alignment(CellAlignment::Right),
            Cell::new(cost)
                .set_alignment(CellAlignment::Right)
                .fg(if cost > mean_cost { Color::Red } else { Color::Green }),
            Cell::new(bar(consumption, busiest)),
        ]);
    }
    table
}

pub fn build_unit_rates_table(rates: &[UnitRate]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling()
        .set_header(vec!["Date", "From", "Till", "Excl. VAT", "Incl. VAT"]);
    let mean_rate = if rates.is_empty() {
        KilowattHourRate::ZERO
    } else {
        rates.iter().map(|rate| rate.including_vat).sum::<KilowattHourRate>()
            / Decimal::from(rates.len())
    };
    for rate in rates {
        let till =
            rate.valid_to.map_or_else(|| "…".to_string(), |to| to.format("%H:%M").to_string());
        table.add_row(vec![
            Cell::new(rate.valid_from.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(rate.valid_from.format("%H:%M")),
            Cell::new(till).add_attribute(Attribute::Dim),
            Cell::new(rate.excluding_vat).set_alignment(CellAlignment::Right),
            Cell::new(rate.including_vat).set_alignment(CellAlignment::Right).fg(
                if rate.including_vat >= mean_rate { Color::Red } else { Color::Green },
            ),
        ]);
    }
    table
}

fn bar(value: KilowattHours, max: KilowattHours) -> String {
    if max <= KilowattHours::ZERO {
        return String::new();
    }
    let width = (value.0 / max.0 * Decimal::from(BAR_WIDTH)).round().to_usize().unwrap_or_default();
    "█".repeat(width)
}
