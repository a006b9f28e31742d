use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

pub const DEFAULT_API_URL: &str = "https://api.blockcypher.com/v1/btc/main";
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Anything that can hand out pages of an address's transaction history.
#[async_trait]
pub trait AddressSource: Send + Sync {
    /// One page of `addrs/{address}/full`. `before` asks for transactions
    /// older than that block height. `None` means the page could not be
    /// fetched; the failure has already been logged.
    async fn fetch_page(&self, address: &str, before: Option<i64>, limit: u32) -> Option<Value>;
}

pub struct BlockCypherClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl BlockCypherClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn page_url(&self, address: &str, before: Option<i64>, limit: u32) -> String {
        let mut url = format!("{}/addrs/{}/full?limit={}", self.base_url, address, limit);
        // A zero height means "no cursor", same as None.
        if let Some(before) = before.filter(|b| *b != 0) {
            url.push_str(&format!("&before={}", before));
        }
        if let Some(token) = &self.token {
            url.push_str(&format!("&token={}", token));
        }
        url
    }

    async fn get_json(&self, url: &str) -> reqwest::Result<Value> {
        self.http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl AddressSource for BlockCypherClient {
    async fn fetch_page(&self, address: &str, before: Option<i64>, limit: u32) -> Option<Value> {
        let url = self.page_url(address, before, limit);
        debug!(address, ?before, limit, "Fetching address page");
        match self.get_json(&url).await {
            Ok(page) => Some(page),
            Err(e) => {
                error!(address, ?before, error = %e, "Error fetching data");
                None
            }
        }
    }
}
