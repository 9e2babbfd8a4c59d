use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::transit::{DataFetcher, Result, TransitError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`DataFetcher`] over a shared reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransitError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl DataFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| TransitError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransitError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| TransitError::Network(e.to_string()))?;

            Ok(body.to_vec())
        })
    }
}
