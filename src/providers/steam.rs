use crate::core::models::ItemStats;
use crate::core::settings::Settings;
use crate::providers::StatsProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

const API_ENDPOINT: &str =
    "https://api.steampowered.com/ISteamRemoteStorage/GetPublishedFileDetails/v1/";

#[derive(Debug, Default, Deserialize)]
struct DetailsEnvelope {
    #[serde(default)]
    response: Option<DetailsResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    publishedfiledetails: Vec<PublishedFileDetails>,
}

#[derive(Debug, Default, Deserialize)]
struct PublishedFileDetails {
    #[serde(default)]
    result: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    views: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    subscriptions: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    favorited: u64,
}

// Anything that is not a non-negative integer (or its string form) counts as 0.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Signed(i64),
        Float(f64),
        Text(String),
        Null(()),
    }

    Ok(match Count::deserialize(deserializer)? {
        Count::Number(n) => n,
        Count::Signed(n) => {
            tracing::warn!(value = n, "Negative counter in Steam response, using 0");
            0
        }
        Count::Float(n) => {
            tracing::warn!(value = n, "Fractional counter in Steam response, using 0");
            0
        }
        Count::Text(s) => s.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %s, "Unparsable counter in Steam response, using 0");
            0
        }),
        Count::Null(()) => 0,
    })
}

pub struct SteamWorkshopClient {
    api_key: String,
    user_id: String,
    endpoint: String,
    http: reqwest::Client,
}

impl SteamWorkshopClient {
    pub fn new(api_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_id: user_id.into(),
            endpoint: API_ENDPOINT.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let client = Self::new(&settings.api_key, &settings.user_id);
        match &settings.endpoint {
            Some(endpoint) => client.with_endpoint(endpoint),
            None => client,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn parse_details(item_id: &str, body: &str) -> Result<Option<ItemStats>> {
        let envelope: DetailsEnvelope =
            serde_json::from_str(body).context("Failed to parse Steam API response")?;

        let Some(details) = envelope
            .response
            .and_then(|r| r.publishedfiledetails.into_iter().next())
        else {
            return Ok(None);
        };

        if let Some(result) = details.result.filter(|r| *r != 1) {
            tracing::warn!(item_id, result, "Steam reported a non-OK result for item");
        }

        Ok(Some(ItemStats {
            id: item_id.to_string(),
            title: details.title,
            views: details.views,
            subscriptions: details.subscriptions,
            favorited: details.favorited,
        }))
    }
}

#[async_trait]
impl StatsProvider for SteamWorkshopClient {
    fn name(&self) -> &'static str {
        "Steam Workshop"
    }

    async fn fetch_stats(&self, item_id: &str) -> Result<Option<ItemStats>> {
        tracing::debug!(item_id, user_id = %self.user_id, "Fetching published file details");

        let form = [
            ("key", self.api_key.as_str()),
            ("itemcount", "1"),
            ("publishedfileids[0]", item_id),
        ];

        let response = self
            .http
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .with_context(|| format!("Failed to fetch stats for item {}", item_id))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Steam API error for item {}: {} - {}", item_id, status, body);
        }

        let body = response.text().await?;
        Self::parse_details(item_id, &body)
    }
}
