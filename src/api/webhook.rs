use std::time::Duration;

use http::Uri;
use ureq::Agent;

use crate::{prelude::*, report::Report};

/// Delivers rendered reports as JSON `{"subject": …, "body": …}`.
pub struct Webhook {
    agent: Agent,
    url: Uri,
}

impl Webhook {
    pub fn new(url: Uri) -> Self {
        let agent =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(10))).build().into();
        Self { agent, url }
    }

    #[instrument(skip_all, fields(url = %self.url))]
    pub fn send(&self, report: &Report) -> Result {
        info!(subject = %report.subject, "sending the report…");
        self.agent
            .post(self.url.clone())
            .send_json(report)
            .with_context(|| format!("failed to deliver the report to `{}`", self.url))?;
        Ok(())
    }
}
