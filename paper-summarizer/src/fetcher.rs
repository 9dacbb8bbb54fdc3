use crate::types::{FetchConfig, QueryParams, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Plain HTTP GET wrapper. Status codes are not checked: a 404 page is
/// returned like any other body.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch `url` and return the raw response body.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let start_time = Instant::now();
        debug!("Fetching page: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        info!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body.to_vec())
    }

    /// Fetch `url` with `query` attached as request parameters and return the
    /// body decoded as text.
    pub async fn fetch_with_query(&self, url: &str, query: &QueryParams) -> Result<String> {
        let start_time = Instant::now();
        let target = Self::build_query_url(url, query)?;
        debug!("Fetching feed: {}", target);

        let response = self.client.get(target.clone()).send().await?;
        let status = response.status();
        let content = response.text().await?;

        info!(
            url = %target,
            status = status.as_u16(),
            bytes = content.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Fetched feed"
        );
        Ok(content)
    }

    /// Attach `query` to `url`, keeping any query string `url` already has.
    pub fn build_query_url(url: &str, query: &QueryParams) -> Result<Url> {
        let mut target = Url::parse(url)?;

        match query {
            QueryParams::Raw(raw) => {
                let merged = match target.query() {
                    Some(existing) if !existing.is_empty() => format!("{}&{}", existing, raw),
                    _ => raw.clone(),
                };
                target.set_query(Some(&merged));
            }
            QueryParams::Pairs(pairs) => {
                let mut serializer = target.query_pairs_mut();
                for (key, value) in pairs {
                    match value {
                        serde_json::Value::Null => {}
                        serde_json::Value::Array(values) => {
                            for item in values.iter().filter(|v| !v.is_null()) {
                                serializer.append_pair(key, &param_value(item));
                            }
                        }
                        other => {
                            serializer.append_pair(key, &param_value(other));
                        }
                    }
                }
                drop(serializer);
            }
        }

        Ok(target)
    }
}

fn param_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
