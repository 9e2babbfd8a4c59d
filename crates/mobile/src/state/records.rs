//! Plain values handed across the FFI boundary.

use parada_core::flow::{ArrivalsSnapshot, LinesScreen, LinesSnapshot, Screen};
use parada_core::location::LocationUnavailable;
use parada_core::platform::HostPlatform;
use parada_core::transit::{ArrivalTime, Bus, Line, RankedStop, Stop};

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct StopItem {
    pub id: String,
    pub name: String,
    /// Only set for stops coming from the proximity list.
    pub distance_km: Option<f64>,
}

impl From<RankedStop> for StopItem {
    fn from(ranked: RankedStop) -> Self {
        Self {
            distance_km: Some(ranked.distance_km),
            ..Self::from(&ranked.stop)
        }
    }
}

impl From<&Stop> for StopItem {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            distance_km: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct ArrivalItem {
    pub line: String,
    pub direction: String,
    /// `HH:MM` when the server sent a timestamp, its raw text otherwise.
    pub time: String,
    pub epoch_seconds: Option<i64>,
}

impl From<&Bus> for ArrivalItem {
    fn from(bus: &Bus) -> Self {
        let epoch_seconds = match &bus.time {
            ArrivalTime::At(time) => Some(time.timestamp()),
            ArrivalTime::Unparsed(_) => None,
        };

        Self {
            line: bus.line.to_string(),
            direction: bus.direction.to_string(),
            time: bus.time.to_string(),
            epoch_seconds,
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct ArrivalsPanel {
    pub stop: Option<StopItem>,
    pub loading: bool,
    pub arrivals: Vec<ArrivalItem>,
}

impl From<ArrivalsSnapshot> for ArrivalsPanel {
    fn from(snapshot: ArrivalsSnapshot) -> Self {
        Self {
            stop: snapshot.stop.as_ref().map(StopItem::from),
            loading: snapshot.loading,
            arrivals: snapshot.buses.iter().map(ArrivalItem::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub stop_count: u32,
}

impl From<&Line> for LineItem {
    fn from(line: &Line) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.to_string(),
            stop_count: u32::try_from(line.stops.len()).unwrap_or(u32::MAX),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct LinesPanel {
    pub loading: bool,
    pub lines: Vec<LineItem>,
    /// Set while a line's stops are open.
    pub open_line: Option<String>,
    pub open_line_stops: Vec<StopItem>,
}

impl From<LinesSnapshot> for LinesPanel {
    fn from(snapshot: LinesSnapshot) -> Self {
        let open = match &snapshot.screen {
            LinesScreen::Lines => None,
            LinesScreen::LineStops(id) => snapshot.lines.iter().find(|l| &l.id == id),
        };

        Self {
            loading: snapshot.loading,
            lines: snapshot.lines.iter().map(LineItem::from).collect(),
            open_line: open.map(|l| l.id.to_string()),
            open_line_stops: open
                .map(|l| l.stops.iter().map(StopItem::from).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum ScreenKind {
    Listing,
    StopSelected,
    ViewingArrivals,
}

impl From<Screen> for ScreenKind {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Listing => Self::Listing,
            Screen::StopSelected => Self::StopSelected,
            Screen::ViewingArrivals => Self::ViewingArrivals,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum Platform {
    Android,
    Ios,
    Other,
}

impl From<Platform> for HostPlatform {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Android => Self::Android,
            Platform::Ios => Self::Ios,
            Platform::Other => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum LocationIssue {
    PermissionDenied,
    ServiceDisabled,
    Timeout,
}

impl From<LocationIssue> for LocationUnavailable {
    fn from(issue: LocationIssue) -> Self {
        match issue {
            LocationIssue::PermissionDenied => Self::PermissionDenied,
            LocationIssue::ServiceDisabled => Self::ServiceDisabled,
            LocationIssue::Timeout => Self::Timeout,
        }
    }
}
