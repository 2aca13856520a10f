use crate::output::{Arrival, RunResult};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Instant;

pub const LIST_PATH: &str = "/reactive/onenine/list";

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Requests the eager endpoint. Every value "arrives" at the same moment,
    /// when the response body does.
    pub async fn fetch_list(&self) -> Result<RunResult> {
        let url = format!("{}{}", self.base_url, LIST_PATH);
        let started = Instant::now();

        let values: Vec<u32> = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach the list endpoint")?
            .error_for_status()?
            .json()
            .await
            .context("List endpoint did not return a JSON array of numbers")?;

        let elapsed = started.elapsed();

        Ok(RunResult {
            endpoint: LIST_PATH.to_string(),
            arrivals: values
                .into_iter()
                .map(|value| Arrival { value, elapsed })
                .collect(),
            total: elapsed,
        })
    }
}
