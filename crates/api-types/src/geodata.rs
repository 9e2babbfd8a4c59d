//! OpenStreetMap export of the city's bus stops, bundled with the app.
//!
//! Accepts either a bare array of elements or the object Overpass returns
//! (`{"version": .., "elements": [...]}`). Elements are decoded one at a
//! time so a single odd record does not take the whole export down.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum GeodataDocument {
    Elements(Vec<Value>),
    Overpass { elements: Vec<Value> },
}

impl GeodataDocument {
    /// Number of elements in the document, decodable or not.
    pub fn len(&self) -> usize {
        self.raw_elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn raw_elements(&self) -> &[Value] {
        match self {
            Self::Elements(elements) | Self::Overpass { elements } => elements,
        }
    }

    /// Decode every element, keeping the failures in place.
    pub fn into_elements(self) -> Vec<Result<OsmElement, serde_json::Error>> {
        match self {
            Self::Elements(elements) | Self::Overpass { elements } => elements
                .into_iter()
                .map(serde_json::from_value)
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Ways and relations exported with `out center` carry their position here.
    #[serde(default)]
    pub center: Option<OsmCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OsmCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OsmElement {
    /// `(lat, lon)` of the element, preferring the node position over `center`.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let json = r#"[{"type": "node", "id": 1, "lat": 40.97, "lon": -5.66, "tags": {"name": "A", "ref": "12"}}]"#;
        let elements: Vec<_> = serde_json::from_str::<GeodataDocument>(json)
            .unwrap()
            .into_elements()
            .into_iter()
            .map(Result::unwrap)
            .collect();

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, "node");
        assert_eq!(elements[0].tag("ref"), Some("12"));
        assert_eq!(elements[0].coordinate(), Some((40.97, -5.66)));
    }

    #[test]
    fn test_overpass_wrapper_and_center() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {"type": "way", "id": 9, "center": {"lat": 40.96, "lon": -5.67}, "tags": {}},
                {"type": "node", "id": 10}
            ]
        }"#;
        let elements: Vec<_> = serde_json::from_str::<GeodataDocument>(json)
            .unwrap()
            .into_elements()
            .into_iter()
            .map(Result::unwrap)
            .collect();

        assert_eq!(elements[0].coordinate(), Some((40.96, -5.67)));
        assert_eq!(elements[1].coordinate(), None);
        assert!(elements[1].tags.is_empty());
    }

    #[test]
    fn test_bad_element_does_not_spoil_the_rest() {
        let json = r#"[
            {"type": "node", "id": 1, "lat": 40.97, "lon": -5.66, "tags": {"name": "A", "ref": "1"}},
            {"type": "node", "id": 2, "lat": 40.98, "lon": -5.66, "tags": {"name": "B", "ref": 2}},
            {"type": "node", "lat": 40.99, "lon": -5.66, "tags": {"name": "C", "ref": "3"}},
            {"type": "node", "id": 4, "lat": "40.99", "lon": -5.66}
        ]"#;
        let document = serde_json::from_str::<GeodataDocument>(json).unwrap();
        assert_eq!(document.len(), 4);

        let elements = document.into_elements();
        assert_eq!(elements[0].as_ref().map(|e| e.id).ok(), Some(1));
        assert!(elements[1..].iter().all(Result::is_err));
    }

    #[test]
    fn test_neither_shape_is_rejected() {
        assert!(serde_json::from_str::<GeodataDocument>(r#"{"nodes": []}"#).is_err());
        assert!(serde_json::from_str::<GeodataDocument>(r#""stops""#).is_err());
    }
}
