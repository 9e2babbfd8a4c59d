//! Ties the stop provider, the live client and the screen state together.
//!
//! All state sits behind one async mutex. The lock is released while a
//! request is on the wire and taken again to apply the response, so a slow
//! fetch never blocks the rider from selecting another stop.

use std::sync::Arc;

use geo::Point;
use tokio::sync::Mutex;

use crate::client::{ClientError, SiriClient};
use crate::config::TransitConfig;
use crate::flow::{
    ApplyOutcome, ArrivalsSnapshot, ArrivalsView, LinesSnapshot, LinesView, RequestToken, Screen,
    SelectionFlow, SelectionListener,
};
use crate::location::{LocationState, LocationUnavailable};
use crate::platform::NavigationCapability;
use crate::transit::{
    DataFetcher, Line, LineIdentifier, RankedStop, Stop, StopIdentifier, StopProvider,
};

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("unknown stop {0}")]
    UnknownStop(StopIdentifier),

    #[error("unknown line {0}")]
    UnknownLine(LineIdentifier),

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug)]
struct BrowserInner {
    location: LocationState,
    flow: SelectionFlow,
    arrivals: ArrivalsView,
    lines: LinesView,
}

pub struct StopBrowser<F> {
    config: TransitConfig,
    client: SiriClient<F>,
    provider: Arc<dyn StopProvider>,
    state: Mutex<BrowserInner>,
}

impl<F: DataFetcher> StopBrowser<F> {
    pub fn new(
        config: TransitConfig,
        fetcher: F,
        provider: Arc<dyn StopProvider>,
        capability: NavigationCapability,
    ) -> Result<Self, BrowserError> {
        let client = SiriClient::new(fetcher, &config)?;

        Ok(Self {
            config,
            client,
            provider,
            state: Mutex::new(BrowserInner {
                location: LocationState::default(),
                flow: SelectionFlow::new(capability),
                arrivals: ArrivalsView::default(),
                lines: LinesView::default(),
            }),
        })
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<dyn StopProvider> {
        &self.provider
    }

    // ---- Location ----

    pub async fn update_location(&self, fix: Point) -> bool {
        self.state.lock().await.location.update(fix)
    }

    pub async fn location_unavailable(&self, reason: LocationUnavailable) {
        self.state.lock().await.location.mark_unavailable(reason);
    }

    pub async fn location(&self) -> LocationState {
        self.state.lock().await.location.clone()
    }

    /// Device fix if there is one, otherwise the configured fallback.
    pub async fn reference_point(&self) -> Point {
        let fallback = self.config.fallback_location();
        self.state.lock().await.location.reference_point(fallback)
    }

    // ---- Stop list ----

    pub async fn nearby_stops(&self) -> Vec<RankedStop> {
        let reference = self.reference_point().await;
        self.provider.ranked_stops(reference)
    }

    pub async fn stops_within(&self, radius_km: f64) -> Vec<RankedStop> {
        let reference = self.reference_point().await;
        self.provider.stops_near(reference, radius_km)
    }

    // ---- Selection & arrivals ----

    pub async fn subscribe(&self, listener: SelectionListener) {
        self.state.lock().await.flow.subscribe(listener);
    }

    pub async fn screen(&self) -> Screen {
        self.state.lock().await.flow.screen()
    }

    pub async fn selected_stop(&self) -> Option<Stop> {
        self.state.lock().await.flow.selection().stop().cloned()
    }

    /// Select a stop by code, looking in the static dataset and then in the
    /// stops of the loaded lines.
    pub async fn select_stop_id(&self, id: &StopIdentifier) -> Result<Screen, BrowserError> {
        let stop = match self.provider.get_stop(id) {
            Some(stop) => stop,
            None => self
                .state
                .lock()
                .await
                .lines
                .find_stop(id)
                .cloned()
                .ok_or_else(|| BrowserError::UnknownStop(id.clone()))?,
        };

        Ok(self.select(stop).await)
    }

    /// The rider tapped `stop`; fetches its arrivals when it is newly shown.
    ///
    /// Selection listeners run after the state lock is released.
    pub async fn select(&self, stop: Stop) -> Screen {
        let (screen, request, notice) = {
            let mut inner = self.state.lock().await;
            let transition = inner.flow.select(stop);
            let request = transition
                .fetch
                .map(|stop| (inner.arrivals.begin(stop.clone()), stop.id));
            (transition.screen, request, transition.notice)
        };

        notice.deliver();

        if let Some((token, stop_id)) = request {
            self.fetch_arrivals(token, &stop_id).await;
        }

        screen
    }

    /// Re-fetch arrivals for the selected stop. Does nothing without a selection.
    pub async fn refresh_arrivals(&self) -> Option<ApplyOutcome> {
        let (token, stop_id) = {
            let mut inner = self.state.lock().await;
            let stop = inner.flow.refresh()?;
            (inner.arrivals.begin(stop.clone()), stop.id)
        };

        Some(self.fetch_arrivals(token, &stop_id).await)
    }

    pub async fn back(&self) -> Screen {
        self.state.lock().await.flow.back()
    }

    pub async fn arrivals(&self) -> ArrivalsSnapshot {
        self.state.lock().await.arrivals.snapshot()
    }

    async fn fetch_arrivals(&self, token: RequestToken, stop_id: &StopIdentifier) -> ApplyOutcome {
        let result = self.client.arrivals(stop_id).await;
        self.state.lock().await.arrivals.apply(token, result)
    }

    // ---- Lines ----

    /// Fetch the line list. Also serves as the manual refresh.
    pub async fn load_lines(&self) -> ApplyOutcome {
        let token = self.state.lock().await.lines.begin();
        let result = self.client.lines().await;
        self.state.lock().await.lines.apply(token, result)
    }

    /// Manual refresh of the line list.
    pub async fn refresh_lines(&self) -> ApplyOutcome {
        self.load_lines().await
    }

    pub async fn open_line(&self, id: &LineIdentifier) -> Result<Line, BrowserError> {
        self.state
            .lock()
            .await
            .lines
            .open(id)
            .cloned()
            .ok_or_else(|| BrowserError::UnknownLine(id.clone()))
    }

    pub async fn close_line(&self) {
        self.state.lock().await.lines.back();
    }

    pub async fn lines(&self) -> LinesSnapshot {
        self.state.lock().await.lines.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::StubFetcher;
    use crate::transit::{point, RawStopRecord, StaticStopProvider};

    const LINES_URL: &str = "http://salamancadetransportes.com/siri?city=salamanca";

    fn arrivals_url(stop: &str) -> String {
        format!("{LINES_URL}&stop={stop}")
    }

    fn provider() -> Arc<dyn StopProvider> {
        Arc::new(StaticStopProvider::from_records(vec![
            RawStopRecord::new(1, point(40.970, -5.655)).with_name("A").with_reference("1"),
            RawStopRecord::new(2, point(41.000, -5.700)).with_name("B").with_reference("2"),
            RawStopRecord::new(3, point(40.9701, -5.655)).with_reference("3"),
        ]))
    }

    fn browser(
        capability: NavigationCapability,
    ) -> (Arc<StubFetcher>, StopBrowser<Arc<StubFetcher>>) {
        let fetcher = Arc::new(StubFetcher::new());
        let browser = StopBrowser::new(
            TransitConfig::salamanca(),
            fetcher.clone(),
            provider(),
            capability,
        )
        .unwrap();
        (fetcher, browser)
    }

    fn buses_json(line: &str) -> String {
        format!(
            r#"[{{"line": "{line}", "direction": "Hospital", "time": "2024-03-01T10:15:00+01:00"}}]"#
        )
    }

    #[tokio::test]
    async fn test_nearby_stops_use_fallback_then_fix() {
        let (_, browser) = browser(NavigationCapability::DetailScreen);

        let ids: Vec<_> = browser
            .nearby_stops()
            .await
            .into_iter()
            .map(|r| r.stop.id.to_string())
            .collect();
        assert_eq!(ids, ["1", "2"]);

        assert!(browser.update_location(point(41.0, -5.7)).await);
        let nearest = browser.nearby_stops().await;
        assert_eq!(nearest[0].stop, Stop::new("2", "B"));

        browser.location_unavailable(LocationUnavailable::PermissionDenied).await;
        assert_eq!(browser.reference_point().await, point(40.970, -5.655));
    }

    #[tokio::test]
    async fn test_select_fetches_arrivals_and_navigates() {
        let (fetcher, browser) = browser(NavigationCapability::DetailScreen);
        fetcher.respond(&arrivals_url("1"), &buses_json("4"));

        let screen = browser.select_stop_id(&StopIdentifier::new("1")).await.unwrap();
        assert_eq!(screen, Screen::ViewingArrivals);

        let arrivals = browser.arrivals().await;
        assert_eq!(arrivals.stop, Some(Stop::new("1", "A")));
        assert!(!arrivals.loading);
        assert_eq!(arrivals.buses[0].line.as_str(), "4");

        assert_eq!(browser.back().await, Screen::Listing);
        assert_eq!(browser.selected_stop().await, Some(Stop::new("1", "A")));
    }

    #[tokio::test]
    async fn test_inline_host_does_not_navigate() {
        let (fetcher, browser) = browser(NavigationCapability::InlineOnly);
        fetcher.respond(&arrivals_url("2"), &buses_json("7"));

        let screen = browser.select_stop_id(&StopIdentifier::new("2")).await.unwrap();
        assert_eq!(screen, Screen::StopSelected);

        // Tapping the stop already shown does not hit the network again
        browser.select_stop_id(&StopIdentifier::new("2")).await.unwrap();
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_late_response_for_previous_stop_is_discarded() {
        let (fetcher, browser) = browser(NavigationCapability::InlineOnly);
        fetcher.respond(&arrivals_url("1"), &buses_json("4"));
        fetcher.respond(&arrivals_url("2"), &buses_json("7"));
        fetcher.gate(&arrivals_url("1"));

        let first = browser.select(Stop::new("1", "A"));
        let second = async {
            browser.select(Stop::new("2", "B")).await;
            fetcher.release(&arrivals_url("1"));
        };
        tokio::join!(first, second);

        let arrivals = browser.arrivals().await;
        assert_eq!(arrivals.stop, Some(Stop::new("2", "B")));
        assert_eq!(arrivals.buses.len(), 1);
        assert_eq!(arrivals.buses[0].line.as_str(), "7");
        assert!(!arrivals.loading);
    }

    #[tokio::test]
    async fn test_failed_fetch_clears_loading_without_error() {
        let (fetcher, browser) = browser(NavigationCapability::DetailScreen);
        fetcher.fail(&arrivals_url("1"), "connection refused");

        let screen = browser.select(Stop::new("1", "A")).await;
        assert_eq!(screen, Screen::ViewingArrivals);

        let arrivals = browser.arrivals().await;
        assert!(!arrivals.loading);
        assert!(arrivals.buses.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_refetches_selected_stop() {
        let (fetcher, browser) = browser(NavigationCapability::DetailScreen);
        assert_eq!(browser.refresh_arrivals().await, None);

        fetcher.fail(&arrivals_url("1"), "offline");
        browser.select(Stop::new("1", "A")).await;
        assert!(browser.arrivals().await.buses.is_empty());

        fetcher.respond(&arrivals_url("1"), &buses_json("4"));
        assert_eq!(browser.refresh_arrivals().await, Some(ApplyOutcome::Applied));
        assert_eq!(browser.arrivals().await.buses.len(), 1);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_listeners_run_without_the_state_lock() {
        let (fetcher, browser) = browser(NavigationCapability::DetailScreen);
        fetcher.respond(&arrivals_url("1"), &buses_json("4"));
        let browser = Arc::new(browser);

        let lock_free = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = lock_free.clone();
        let weak = Arc::downgrade(&browser);
        browser
            .subscribe(Arc::new(move |stop: &Stop| {
                let free = weak
                    .upgrade()
                    .is_some_and(|browser| browser.state.try_lock().is_ok());
                sink.lock().unwrap().push((stop.id.to_string(), free));
            }))
            .await;

        browser.select(Stop::new("1", "A")).await;

        assert_eq!(*lock_free.lock().unwrap(), vec![("1".to_string(), true)]);
    }

    #[tokio::test]
    async fn test_unknown_stop() {
        let (_, browser) = browser(NavigationCapability::DetailScreen);
        let result = browser.select_stop_id(&StopIdentifier::new("404")).await;
        assert!(matches!(result, Err(BrowserError::UnknownStop(_))));
        assert_eq!(browser.screen().await, Screen::Listing);
    }

    #[tokio::test]
    async fn test_lines_flow() {
        let (fetcher, browser) = browser(NavigationCapability::DetailScreen);
        assert!(browser.lines().await.loading);

        fetcher.fail(LINES_URL, "offline");
        assert_eq!(browser.load_lines().await, ApplyOutcome::Failed);
        let snapshot = browser.lines().await;
        assert!(!snapshot.loading);
        assert!(snapshot.lines.is_empty());

        fetcher.respond(
            LINES_URL,
            r#"[{"id": "4", "name": "Circular", "stops": [
                {"id": "50", "name": "X"}, {"id": "51", "name": "Y"},
                {"id": "52", "name": "Z"}, {"id": "53", "name": "W"}
            ]}]"#,
        );
        assert_eq!(browser.refresh_lines().await, ApplyOutcome::Applied);

        let line = browser.open_line(&LineIdentifier::new("4")).await.unwrap();
        assert_eq!(line.stops.len(), 4);
        assert!(browser.open_line(&LineIdentifier::new("99")).await.is_err());

        // Stops that only exist in the live line list are selectable too
        fetcher.respond(&arrivals_url("53"), "[]");
        let screen = browser.select_stop_id(&StopIdentifier::new("53")).await.unwrap();
        assert_eq!(screen, Screen::ViewingArrivals);
        assert_eq!(browser.arrivals().await.stop, Some(Stop::new("53", "W")));
    }
}
