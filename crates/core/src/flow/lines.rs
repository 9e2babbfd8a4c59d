//! Browsing the live line list and a line's stops.

use crate::client::ClientError;
use crate::flow::token::{ApplyOutcome, RequestToken, RequestTracker};
use crate::transit::{Line, LineIdentifier, Stop, StopIdentifier};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinesScreen {
    Lines,
    LineStops(LineIdentifier),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinesSnapshot {
    pub screen: LinesScreen,
    pub loading: bool,
    pub lines: Vec<Line>,
}

#[derive(Debug)]
pub struct LinesView {
    screen: LinesScreen,
    loading: bool,
    lines: Vec<Line>,
    requests: RequestTracker,
}

impl Default for LinesView {
    fn default() -> Self {
        Self {
            screen: LinesScreen::Lines,
            // the list starts out waiting on its first fetch
            loading: true,
            lines: Vec::new(),
            requests: RequestTracker::default(),
        }
    }
}

impl LinesView {
    pub fn begin(&mut self) -> RequestToken {
        self.loading = true;
        self.requests.issue()
    }

    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Line>, ClientError>,
    ) -> ApplyOutcome {
        if !self.requests.settle(token) {
            tracing::debug!("dropping stale lines response #{}", token.get());
            return ApplyOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(lines) => {
                self.lines = lines;
                // the opened line may have disappeared from the new list
                let orphaned = matches!(
                    &self.screen,
                    LinesScreen::LineStops(id) if self.line(id).is_none()
                );
                if orphaned {
                    self.screen = LinesScreen::Lines;
                }
                ApplyOutcome::Applied
            }
            Err(error) => {
                tracing::warn!("failed to fetch lines: {error}");
                self.lines.clear();
                self.screen = LinesScreen::Lines;
                ApplyOutcome::Failed
            }
        }
    }

    /// Show the stops of line `id`. Returns `None` if the line is not loaded.
    pub fn open(&mut self, id: &LineIdentifier) -> Option<&Line> {
        let index = self.lines.iter().position(|l| &l.id == id)?;
        self.screen = LinesScreen::LineStops(id.clone());
        self.lines.get(index)
    }

    pub fn back(&mut self) -> &LinesScreen {
        self.screen = LinesScreen::Lines;
        &self.screen
    }

    pub fn screen(&self) -> &LinesScreen {
        &self.screen
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: &LineIdentifier) -> Option<&Line> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Stops of the opened line, all of them, in route order.
    pub fn visible_stops(&self) -> Option<&[Stop]> {
        match &self.screen {
            LinesScreen::Lines => None,
            LinesScreen::LineStops(id) => self.line(id).map(|l| l.stops.as_slice()),
        }
    }

    /// Look a stop up among all loaded lines.
    pub fn find_stop(&self, id: &StopIdentifier) -> Option<&Stop> {
        self.lines
            .iter()
            .flat_map(|l| l.stops.iter())
            .find(|s| &s.id == id)
    }

    pub fn snapshot(&self) -> LinesSnapshot {
        LinesSnapshot {
            screen: self.screen.clone(),
            loading: self.loading,
            lines: self.lines.clone(),
        }
    }
}
