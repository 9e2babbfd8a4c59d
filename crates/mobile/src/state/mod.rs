use std::sync::Arc;

use parada_core::client::HttpFetcher;
use parada_core::platform::{HostPlatform, NavigationCapability};
use parada_core::transit::{
    DataFetcher, LineIdentifier, StaticStopProvider, Stop, StopIdentifier, StopProvider, point,
};
use parada_core::{BrowserError, StopBrowser, TransitConfig};

use crate::logging::setup_logging;

pub mod records;

pub use records::{
    ArrivalItem, ArrivalsPanel, LineItem, LinesPanel, LocationIssue, Platform, ScreenKind, StopItem,
};

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum BrowserStateError {
    #[error("{0}")]
    Geodata(String),
    #[error("{0}")]
    Config(String),
    #[error("unknown stop {0}")]
    UnknownStop(String),
    #[error("unknown line {0}")]
    UnknownLine(String),
}

impl From<BrowserError> for BrowserStateError {
    fn from(error: BrowserError) -> Self {
        match error {
            BrowserError::UnknownStop(id) => Self::UnknownStop(id.to_string()),
            BrowserError::UnknownLine(id) => Self::UnknownLine(id.to_string()),
            BrowserError::Client(e) => Self::Config(e.to_string()),
        }
    }
}

/// Implemented on the Kotlin/Swift side to hear about stop taps.
#[uniffi::export(with_foreign)]
pub trait SelectionObserver: Send + Sync {
    fn on_stop_selected(&self, stop: StopItem);
}

/// Everything the stop list and arrivals screens read and act on.
#[derive(uniffi::Object)]
pub struct BrowserState {
    browser: StopBrowser<Arc<dyn DataFetcher>>,
}

impl BrowserState {
    pub(crate) fn with_parts(
        config: TransitConfig,
        fetcher: Arc<dyn DataFetcher>,
        provider: StaticStopProvider,
        platform: HostPlatform,
    ) -> Result<Self, BrowserStateError> {
        tracing::info!(
            "{} stops from {} geodata records, platform {platform}",
            provider.len(),
            provider.record_count()
        );

        let browser = StopBrowser::new(
            config,
            fetcher,
            Arc::new(provider),
            NavigationCapability::from(platform),
        )?;

        Ok(Self { browser })
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl BrowserState {
    /// Load the bundled stop export at `geodata_path`.
    ///
    /// `config_json` overrides fields of the Salamanca defaults
    /// (`base_url`, `city`, `fallback_latitude`, `fallback_longitude`).
    #[uniffi::constructor]
    pub async fn new(
        geodata_path: String,
        platform: Platform,
        config_json: Option<String>,
    ) -> Result<Arc<Self>, BrowserStateError> {
        setup_logging();

        let config = match config_json {
            Some(json) => TransitConfig::from_json(&json)
                .map_err(|e| BrowserStateError::Config(e.to_string()))?,
            None => TransitConfig::salamanca(),
        };

        let bytes = tokio::fs::read(&geodata_path)
            .await
            .map_err(|e| BrowserStateError::Geodata(format!("{geodata_path}: {e}")))?;
        let provider = StaticStopProvider::from_geodata_json(&bytes)
            .map_err(|e| BrowserStateError::Geodata(format!("{geodata_path}: {e}")))?;

        let fetcher = HttpFetcher::new().map_err(|e| BrowserStateError::Config(e.to_string()))?;

        Ok(Arc::new(Self::with_parts(
            config,
            Arc::new(fetcher),
            provider,
            platform.into(),
        )?))
    }

    // ---- Location ----

    /// Returns `false` if the coordinates were rejected.
    pub async fn update_location(&self, latitude: f64, longitude: f64) -> bool {
        self.browser.update_location(point(latitude, longitude)).await
    }

    pub async fn location_unavailable(&self, issue: LocationIssue) {
        self.browser.location_unavailable(issue.into()).await
    }

    // ---- Stop list ----

    pub async fn nearby_stops(&self) -> Vec<StopItem> {
        self.browser
            .nearby_stops()
            .await
            .into_iter()
            .map(StopItem::from)
            .collect()
    }

    pub async fn stops_within(&self, radius_km: f64) -> Vec<StopItem> {
        self.browser
            .stops_within(radius_km)
            .await
            .into_iter()
            .map(StopItem::from)
            .collect()
    }

    // ---- Selection & arrivals ----

    pub async fn subscribe(&self, observer: Arc<dyn SelectionObserver>) {
        self.browser
            .subscribe(Arc::new(move |stop: &Stop| {
                observer.on_stop_selected(stop.into())
            }))
            .await
    }

    pub async fn select_stop(&self, stop_id: String) -> Result<ScreenKind, BrowserStateError> {
        let screen = self
            .browser
            .select_stop_id(&StopIdentifier::new(stop_id))
            .await?;
        Ok(screen.into())
    }

    pub async fn refresh_arrivals(&self) {
        self.browser.refresh_arrivals().await;
    }

    pub async fn back(&self) -> ScreenKind {
        self.browser.back().await.into()
    }

    pub async fn screen(&self) -> ScreenKind {
        self.browser.screen().await.into()
    }

    pub async fn arrivals(&self) -> ArrivalsPanel {
        self.browser.arrivals().await.into()
    }

    // ---- Lines ----

    /// Fetch (or re-fetch) the live line list.
    pub async fn load_lines(&self) -> LinesPanel {
        self.browser.load_lines().await;
        self.browser.lines().await.into()
    }

    pub async fn refresh_lines(&self) -> LinesPanel {
        self.browser.refresh_lines().await;
        self.browser.lines().await.into()
    }

    pub async fn open_line(&self, line_id: String) -> Result<LinesPanel, BrowserStateError> {
        self.browser
            .open_line(&LineIdentifier::new(line_id))
            .await?;
        Ok(self.browser.lines().await.into())
    }

    pub async fn close_line(&self) -> LinesPanel {
        self.browser.close_line().await;
        self.browser.lines().await.into()
    }

    pub async fn lines(&self) -> LinesPanel {
        self.browser.lines().await.into()
    }
}
