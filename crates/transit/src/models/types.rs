//! Core data types for stops, lines and arrivals.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use geo::Point;
use parada_api_types::{BusDto, LineDto, OsmElement, StopDto, WireTime};

use crate::identifiers::*;
use crate::spatial::queries::{is_valid_point, point};

// ============================================================================
// Stops and lines
// ============================================================================

/// A bus stop as shown to the rider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stop {
    pub id: StopIdentifier,
    pub name: Arc<str>,
}

impl Stop {
    pub fn new(id: impl Into<StopIdentifier>, name: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().into(),
        }
    }
}

impl From<StopDto> for Stop {
    fn from(dto: StopDto) -> Self {
        Self::new(dto.id, dto.name)
    }
}

/// A bus line and its stops in route order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub id: LineIdentifier,
    pub name: Arc<str>,
    pub stops: Vec<Stop>,
}

impl From<LineDto> for Line {
    fn from(dto: LineDto) -> Self {
        Self {
            id: LineIdentifier::new(dto.id),
            name: dto.name.into(),
            stops: dto.stops.into_iter().map(Stop::from).collect(),
        }
    }
}

// ============================================================================
// Arrivals
// ============================================================================

/// When a bus is expected at the stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrivalTime {
    At(DateTime<FixedOffset>),
    /// The server sent something we could not read as a timestamp; shown as is.
    Unparsed(Arc<str>),
}

impl From<WireTime> for ArrivalTime {
    fn from(wire: WireTime) -> Self {
        match wire {
            WireTime::Text(text) => match DateTime::parse_from_rfc3339(&text) {
                Ok(time) => Self::At(time),
                Err(_) => Self::Unparsed(text.into()),
            },
            WireTime::EpochMillis(millis) => match DateTime::<Utc>::from_timestamp_millis(millis) {
                Some(time) => Self::At(time.fixed_offset()),
                None => Self::Unparsed(millis.to_string().into()),
            },
        }
    }
}

impl fmt::Display for ArrivalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(time) => write!(f, "{}", time.format("%H:%M")),
            Self::Unparsed(text) => f.write_str(text),
        }
    }
}

/// A predicted arrival at a stop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bus {
    pub line: LineIdentifier,
    pub direction: Arc<str>,
    pub time: ArrivalTime,
}

impl From<BusDto> for Bus {
    fn from(dto: BusDto) -> Self {
        Self {
            line: LineIdentifier::new(dto.line),
            direction: dto.direction.into(),
            time: dto.time.into(),
        }
    }
}

// ============================================================================
// Raw geodata records
// ============================================================================

/// A stop as found in the bundled OSM export, before any validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RawStopRecord {
    pub osm_id: i64,
    pub kind: Arc<str>,
    pub location: Option<Point>,
    pub name: Option<Arc<str>>,
    pub reference: Option<Arc<str>>,
}

impl RawStopRecord {
    pub fn new(osm_id: i64, location: Point) -> Self {
        Self {
            osm_id,
            kind: "node".into(),
            location: Some(location),
            name: None,
            reference: None,
        }
    }

    pub fn with_name(mut self, name: impl AsRef<str>) -> Self {
        self.name = Some(name.as_ref().into());
        self
    }

    pub fn with_reference(mut self, reference: impl AsRef<str>) -> Self {
        self.reference = Some(reference.as_ref().into());
        self
    }

    /// The record's position, if it is a usable geographic coordinate.
    pub fn valid_location(&self) -> Option<Point> {
        self.location.filter(|p| is_valid_point(*p))
    }

    /// Normalize into a [`Stop`], keyed by the operator reference code.
    ///
    /// Returns `None` unless both name and reference are present and non-blank.
    pub fn normalize(&self) -> Option<Stop> {
        let name = non_blank(self.name.as_deref())?;
        let reference = non_blank(self.reference.as_deref())?;
        Some(Stop::new(reference, name))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl From<OsmElement> for RawStopRecord {
    fn from(element: OsmElement) -> Self {
        let location = element.coordinate().map(|(lat, lon)| point(lat, lon));
        let mut tags = element.tags;

        Self {
            osm_id: element.id,
            kind: element.kind.into(),
            location,
            name: tags.remove("name").map(Into::into),
            reference: tags.remove("ref").map(Into::into),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_normalize_requires_name_and_reference() {
        let base = RawStopRecord::new(1, point(40.97, -5.66));

        assert_eq!(base.clone().with_name("A").normalize(), None);
        assert_eq!(base.clone().with_reference("1").normalize(), None);
        assert_eq!(base.clone().with_name("  ").with_reference("1").normalize(), None);
        assert_eq!(
            base.with_name("Plaza Mayor").with_reference("1").normalize(),
            Some(Stop::new("1", "Plaza Mayor"))
        );
    }

    #[test]
    fn test_valid_location_rejects_garbage() {
        let nan = RawStopRecord::new(1, point(f64::NAN, -5.66));
        let out_of_range = RawStopRecord::new(2, point(95.0, -5.66));
        let fine = RawStopRecord::new(3, point(40.97, -5.66));

        assert!(nan.valid_location().is_none());
        assert!(out_of_range.valid_location().is_none());
        assert!(fine.valid_location().is_some());
    }

    #[test]
    fn test_record_from_osm_element() {
        let element = OsmElement {
            kind: "node".into(),
            id: 42,
            lat: Some(40.965),
            lon: Some(-5.664),
            center: None,
            tags: HashMap::from([
                ("name".to_string(), "Gran Vía".to_string()),
                ("ref".to_string(), "33".to_string()),
                ("highway".to_string(), "bus_stop".to_string()),
            ]),
        };

        let record = RawStopRecord::from(element);
        assert_eq!(record.osm_id, 42);
        assert_eq!(record.location, Some(Point::new(-5.664, 40.965)));
        assert_eq!(record.normalize(), Some(Stop::new("33", "Gran Vía")));
    }

    #[test]
    fn test_arrival_time_parsing() {
        let parsed = ArrivalTime::from(WireTime::Text("2024-03-01T10:15:00+01:00".into()));
        assert_eq!(parsed.to_string(), "10:15");

        let raw = ArrivalTime::from(WireTime::Text("3 min".into()));
        assert_eq!(raw, ArrivalTime::Unparsed("3 min".into()));
        assert_eq!(raw.to_string(), "3 min");

        let epoch = ArrivalTime::from(WireTime::EpochMillis(0));
        assert_eq!(epoch.to_string(), "00:00");
    }

    #[test]
    fn test_line_from_dto_keeps_every_stop() {
        let dto = LineDto {
            id: "4".into(),
            name: "Circular".into(),
            stops: (0..5)
                .map(|i| StopDto { id: i.to_string(), name: format!("Stop {i}") })
                .collect(),
        };

        let line = Line::from(dto);
        assert_eq!(line.id.as_str(), "4");
        assert_eq!(line.stops.len(), 5);
        assert_eq!(line.stops[4], Stop::new("4", "Stop 4"));
    }
}
