//! Client for the operator's `/siri` JSON endpoint.

mod http;

use parada_api_types::{BusDto, LineDto};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::TransitConfig;
use crate::transit::{Bus, DataFetcher, Line, StopIdentifier, TransitError};

pub use http::HttpFetcher;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransitError),

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct SiriClient<F> {
    fetcher: F,
    endpoint: Url,
    city: String,
}

impl<F: DataFetcher> SiriClient<F> {
    pub fn new(fetcher: F, config: &TransitConfig) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        };

        let mut endpoint = Url::parse(&config.base_url).map_err(|e| invalid(e.to_string()))?;
        endpoint
            .path_segments_mut()
            .map_err(|()| invalid("cannot be a base".to_owned()))?
            .pop_if_empty()
            .push("siri");

        Ok(Self {
            fetcher,
            endpoint,
            city: config.city.clone(),
        })
    }

    /// `{base}/siri?city={city}`
    pub fn lines_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("city", &self.city);
        url
    }

    /// `{base}/siri?city={city}&stop={stop}`
    pub fn arrivals_url(&self, stop: &StopIdentifier) -> Url {
        let mut url = self.lines_url();
        url.query_pairs_mut().append_pair("stop", stop.as_str());
        url
    }

    pub async fn lines(&self) -> Result<Vec<Line>, ClientError> {
        let lines: Vec<LineDto> = self.get_json(self.lines_url()).await?;
        Ok(lines.into_iter().map(Line::from).collect())
    }

    pub async fn arrivals(&self, stop: &StopIdentifier) -> Result<Vec<Bus>, ClientError> {
        let buses: Vec<BusDto> = self.get_json(self.arrivals_url(stop)).await?;
        Ok(buses.into_iter().map(Bus::from).collect())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!("GET {url}");
        let body = self.fetcher.fetch(url.as_str()).await?;

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
