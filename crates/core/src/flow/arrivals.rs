use crate::client::ClientError;
use crate::flow::token::{ApplyOutcome, RequestToken, RequestTracker};
use crate::transit::{Bus, Stop};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrivalsSnapshot {
    pub stop: Option<Stop>,
    pub loading: bool,
    pub buses: Vec<Bus>,
}

/// Arrivals for the selected stop.
#[derive(Debug, Default)]
pub struct ArrivalsView {
    stop: Option<Stop>,
    loading: bool,
    buses: Vec<Bus>,
    requests: RequestTracker,
}

impl ArrivalsView {
    /// Start fetching arrivals for `stop`. Switching stops clears the old list.
    pub fn begin(&mut self, stop: Stop) -> RequestToken {
        if self.stop.as_ref() != Some(&stop) {
            self.buses.clear();
        }
        self.stop = Some(stop);
        self.loading = true;
        self.requests.issue()
    }

    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Bus>, ClientError>,
    ) -> ApplyOutcome {
        if !self.requests.settle(token) {
            tracing::debug!("dropping stale arrivals response #{}", token.get());
            return ApplyOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(buses) => {
                self.buses = buses;
                ApplyOutcome::Applied
            }
            Err(error) => {
                let stop = self.stop.as_ref().map(|s| s.id.as_str()).unwrap_or_default();
                tracing::warn!("failed to fetch arrivals for stop {stop}: {error}");
                self.buses.clear();
                ApplyOutcome::Failed
            }
        }
    }

    pub fn stop(&self) -> Option<&Stop> {
        self.stop.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn snapshot(&self) -> ArrivalsSnapshot {
        ArrivalsSnapshot {
            stop: self.stop.clone(),
            loading: self.loading,
            buses: self.buses.clone(),
        }
    }
}
