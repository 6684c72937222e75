//! [Octopus Energy](https://developer.octopus.energy/rest/) REST API client.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};
use ureq::Agent;

use crate::{
    api::ConsumptionSource,
    core::{granularity::Granularity, series::RawRecord},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

pub struct Api {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl Api {
    /// Maximum page size accepted by the API.
    pub const MAX_PAGE_SIZE: usize = 25_000;

    pub fn new(base_url: &str, api_key: &str) -> Self {
        let agent =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(10))).build().into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: format!("Basic {}", STANDARD.encode(format!("{api_key}:"))),
        }
    }

    /// Bind the client to the electricity meter.
    pub fn meter(self, mpan: String, serial_number: String) -> Meter {
        Meter { api: self, mpan, serial_number }
    }

    /// Standard unit rates of the tariff, most recent first.
    #[instrument(skip_all, fields(product = product, tariff = tariff))]
    pub fn fetch_unit_rates(
        &self,
        product: &str,
        tariff: &str,
        max_records: usize,
    ) -> Result<Vec<UnitRate>> {
        info!("fetching…");
        let url = format!(
            "{}/products/{product}/electricity-tariffs/{tariff}/standard-unit-rates/",
            self.base_url,
        );
        let rates: Vec<UnitRateRecord> = self.fetch_pages(&url, &[], max_records)?;
        info!(n_rates = rates.len(), "fetched");
        Ok(rates.into_iter().map(UnitRate::from).collect())
    }

    /// Request the first page and follow the `next` links from there.
    fn fetch_pages<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        max_records: usize,
    ) -> Result<Vec<T>> {
        let page_size = page_size(max_records).to_string();
        let mut request = self
            .agent
            .get(url)
            .header("Authorization", &self.authorization)
            .query("page_size", &page_size);
        for (key, value) in query {
            request = request.query(*key, value);
        }
        let first_page = request
            .call()
            .with_context(|| format!("failed to request `{url}`"))?
            .body_mut()
            .read_json::<Page<T>>()
            .with_context(|| format!("failed to deserialize the response from `{url}`"))?;
        collect_pages(first_page, max_records, |next| {
            self.agent
                .get(next)
                .header("Authorization", &self.authorization)
                .call()
                .with_context(|| format!("failed to request `{next}`"))?
                .body_mut()
                .read_json::<Page<T>>()
                .with_context(|| format!("failed to deserialize the response from `{next}`"))
        })
    }
}

fn page_size(max_records: usize) -> usize {
    max_records.clamp(1, Api::MAX_PAGE_SIZE)
}

/// Follow the `next` links until exhausted or enough results are collected.
fn collect_pages<T>(
    mut page: Page<T>,
    max_records: usize,
    mut fetch_next: impl FnMut(&str) -> Result<Page<T>>,
) -> Result<Vec<T>> {
    let mut results = Vec::new();
    loop {
        results.extend(page.results);
        if results.len() >= max_records {
            break;
        }
        let Some(next) = page.next else {
            break;
        };
        debug!(n_results = results.len(), next = %next, "following…");
        page = fetch_next(&next)?;
    }
    results.truncate(max_records);
    Ok(results)
}

/// Client bound to a specific electricity meter.
pub struct Meter {
    api: Api,
    mpan: String,
    serial_number: String,
}

impl ConsumptionSource for Meter {
    #[instrument(skip_all, fields(granularity = %granularity, max_records = max_records))]
    fn fetch_consumption(
        &self,
        granularity: Granularity,
        period_from: Option<DateTime<Utc>>,
        max_records: usize,
    ) -> Result<Vec<RawRecord>> {
        info!(period_from = ?period_from, "fetching…");
        let url = format!(
            "{}/electricity-meter-points/{}/meters/{}/consumption/",
            self.api.base_url, self.mpan, self.serial_number,
        );
        let mut query = Vec::new();
        if let Some(group_by) = granularity.group_by() {
            query.push(("group_by", group_by.to_string()));
        }
        if let Some(period_from) = period_from {
            query.push(("period_from", period_from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        let records = self.api.fetch_pages(&url, &query, max_records)?;
        info!(n_records = records.len(), "fetched");
        Ok(records)
    }
}

#[derive(Deserialize)]
struct Page<T> {
    next: Option<String>,
    results: Vec<T>,
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct UnitRate {
    pub valid_from: DateTime<Utc>,

    /// Open-ended when not set.
    pub valid_to: Option<DateTime<Utc>>,

    pub excluding_vat: KilowattHourRate,
    pub including_vat: KilowattHourRate,
}

/// Unit rate as reported by the API, in pence.
#[derive(Deserialize)]
struct UnitRateRecord {
    value_exc_vat: Decimal,
    value_inc_vat: Decimal,
    valid_from: DateTime<Utc>,
    valid_to: Option<DateTime<Utc>>,
}

impl From<UnitRateRecord> for UnitRate {
    fn from(record: UnitRateRecord) -> Self {
        let pence_per_pound = Decimal::ONE_HUNDRED;
        Self {
            valid_from: record.valid_from,
            valid_to: record.valid_to,
            excluding_vat: KilowattHourRate(record.value_exc_vat / pence_per_pound),
            including_vat: KilowattHourRate(record.value_inc_vat / pence_per_pound),
        }
    }
}
