//! HTTP client for the LMP Studio backend, built on gloo-net.

use crate::utils;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use shared::api::endpoints;
use shared::{aggregate_by_name, traces_for, ApiError, Lmp, LmpRecord, LmpStudioApi, Trace};

/// Talks to the backend that served the page (same origin).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HttpApi;

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = utils::api_url(path);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::from_status(response.status(), path));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

impl LmpStudioApi for HttpApi {
    async fn fetch_lmps(&self) -> Result<Vec<Lmp>, ApiError> {
        let records: Vec<LmpRecord> = get_json(endpoints::LMPS).await?;
        Ok(aggregate_by_name(records))
    }

    async fn fetch_traces(&self, lmps: &[Lmp]) -> Result<Vec<Trace>, ApiError> {
        let traces: Vec<Trace> = get_json(endpoints::TRACES).await?;
        Ok(traces_for(lmps, traces))
    }

    async fn fetch_lmp(&self, name: &str) -> Result<Lmp, ApiError> {
        let records: Vec<LmpRecord> = get_json(&endpoints::lmp(name)).await?;
        aggregate_by_name(records)
            .into_iter()
            .find(|lmp| lmp.name == name)
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
    }
}
