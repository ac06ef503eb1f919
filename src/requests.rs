use log::info;
use reqwest::{Client, ClientBuilder, Response};

use crate::error::{Error, Result};

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new() -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET, turning any non-success status into a transport error.
    pub async fn fetch_url_response(&self, url: &str) -> Result<Response> {
        info!("Fetching {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status,
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> Result<String> {
        let response = self.fetch_url_response(url).await?;
        let body = response.text().await?;
        Ok(body)
    }
}
