use crate::adapters::bitmex::auth::generate_signature;
use crate::config::BitmexConfig;
use crate::models::{ApiErrorBody, OrderQuery};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use log::{debug, error};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const API_PREFIX: &str = "/api/v1";

pub struct BitmexApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    api_secret: Option<String>,
    expires_after_secs: u64,
}

impl BitmexApi {
    pub fn new(config: &BitmexConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: config.effective_base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            expires_after_secs: config.expires_after_secs,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}{}", self.base_url, API_PREFIX, endpoint);
        let mut url = Url::parse(&raw).context(format!("Invalid request URL: {}", raw))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Add `api-expires`, `api-key` and `api-signature` headers when credentials are configured.
    fn add_auth_headers(
        &self,
        request: reqwest::RequestBuilder,
        method: &Method,
        url: &Url,
        body: &str,
    ) -> Result<reqwest::RequestBuilder> {
        let (Some(key), Some(secret)) = (&self.api_key, &self.api_secret) else {
            return Ok(request);
        };

        let expires = Utc::now().timestamp() as u64 + self.expires_after_secs;
        let signature =
            generate_signature(secret, method.as_str(), &signed_path(url), expires, body)?;

        Ok(request
            .header("api-expires", expires.to_string())
            .header("api-key", key)
            .header("api-signature", signature))
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint, query)?;
        let body = body.unwrap_or_default();

        debug!("{} {} {}", method, url, body);

        let mut request = self.client.request(method.clone(), url.clone());
        if !body.is_empty() {
            request = request
                .header("Content-Type", "application/json")
                .body(body.clone());
        }
        let request = self.add_auth_headers(request, &method, &url, &body)?;

        let response = request
            .send()
            .await
            .context(format!("Failed to send {} {}", method, endpoint))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            anyhow::bail!("{}", describe_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse {} {} response: {}. Response was: {}", method, endpoint, e, text);
            anyhow::anyhow!("Failed to parse {} response: {}. Response was: {}", endpoint, e, text)
        })
    }
}

/// Path and query as they appear on the wire; this is what gets signed.
pub fn signed_path(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}

pub fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.error.name {
            Some(name) => format!(
                "BitMEX request failed (status: {}): {}: {}",
                status, name, parsed.error.message
            ),
            None => format!(
                "BitMEX request failed (status: {}): {}",
                status, parsed.error.message
            ),
        },
        Err(_) => format!("BitMEX request failed (status: {}): {}", status, body),
    }
}

pub fn order_query_params(query: &OrderQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", query.symbol.clone()),
        ("count", query.count.to_string()),
        ("reverse", query.reverse.to_string()),
    ];
    if let Some(filter) = &query.filter {
        params.push(("filter", filter.clone()));
    }
    if let Some(start) = query.start_time {
        params.push(("startTime", start.to_rfc3339_opts(SecondsFormat::Millis, true)));
    }
    if let Some(end) = query.end_time {
        params.push(("endTime", end.to_rfc3339_opts(SecondsFormat::Millis, true)));
    }
    params
}
