//! Blocking client for a running estate server.

use anyhow::{bail, Result};
use estate_core::{DronePlanResponse, StatsResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct EstateClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl EstateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send()?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .ok()
                .and_then(|body| body["message"].as_str().map(str::to_string))
                .unwrap_or_default();
            bail!("{} returned {}: {}", url, status, message);
        }
        Ok(resp.json()?)
    }

    pub fn stats(&self, estate_id: &str) -> Result<StatsResult> {
        self.get(&format!("/estate/{}/stats", estate_id), &[])
    }

    pub fn drone_plan(&self, estate_id: &str, max_distance: Option<u64>) -> Result<DronePlanResponse> {
        let query: Vec<(&str, String)> = max_distance
            .map(|max| vec![("max_distance", max.to_string())])
            .unwrap_or_default();
        self.get(&format!("/estate/{}/drone-plan", estate_id), &query)
    }
}
