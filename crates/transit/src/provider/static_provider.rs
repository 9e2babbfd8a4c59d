//! In-memory stop provider backed by the bundled geodata export.
//!
//! Keeps the raw records for ranking and an R-tree of the usable stops for
//! radius queries.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use parada_api_types::GeodataDocument;
use rstar::RTree;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::index::StopNode;
use crate::spatial::queries::{haversine_distance_km, is_valid_point, meters_to_lon_degrees_at};
use crate::spatial::ranking::{rank_with_distance, RankedStop};

/// A normalized stop with the position it was recorded at.
#[derive(Clone, Debug, PartialEq)]
pub struct LocatedStop {
    pub stop: Stop,
    pub location: Point,
}

// ============================================================================
// Static Provider
// ============================================================================

/// In-memory stop provider with spatial indexing
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticStopProvider {
    records: Arc<[RawStopRecord]>,
    stops: Vec<Arc<LocatedStop>>,
    stop_map: HashMap<StopIdentifier, Arc<LocatedStop>>,
    stop_tree: Arc<RTree<StopNode>>,
}

impl StaticStopProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Build provider from raw geodata records
    ///
    /// Every record is kept for ranking; only the usable ones are indexed.
    pub fn from_records(records: Vec<RawStopRecord>) -> Self {
        let stops: Vec<Arc<LocatedStop>> = records
            .iter()
            .filter_map(|record| {
                let location = record.valid_location()?;
                let stop = record.normalize()?;
                Some(Arc::new(LocatedStop { stop, location }))
            })
            .collect();

        // Both directions of travel often share one ref; the first record wins lookups.
        let mut stop_map = HashMap::with_capacity(stops.len());
        for stop in &stops {
            stop_map
                .entry(stop.stop.id.clone())
                .or_insert_with(|| stop.clone());
        }

        let stop_tree = RTree::bulk_load(
            stops
                .iter()
                .map(|s| StopNode::new(s.location, s.clone()))
                .collect(),
        );

        Self {
            records: records.into(),
            stops,
            stop_map,
            stop_tree: Arc::new(stop_tree),
        }
    }

    /// Parse the bundled OSM export (bare array or Overpass response)
    ///
    /// Elements that do not decode are skipped; only a document that is not
    /// one of the two shapes is an error.
    pub fn from_geodata_json(bytes: &[u8]) -> Result<Self> {
        let document: GeodataDocument = serde_json::from_slice(bytes)
            .map_err(|e| TransitError::SerializationError(e.to_string()))?;

        let total = document.len();
        let records: Vec<RawStopRecord> = document
            .into_elements()
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match element {
                Ok(element) => Some(RawStopRecord::from(element)),
                Err(error) => {
                    tracing::debug!("skipping geodata element #{index}: {error}");
                    None
                }
            })
            .collect();

        if records.len() < total {
            tracing::warn!(
                "skipped {} of {total} geodata elements that did not decode",
                total - records.len()
            );
        }

        Ok(Self::from_records(records))
    }

    /// Number of raw records, including those unusable for ranking
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[RawStopRecord] {
        &self.records
    }
}

impl Default for StaticStopProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StopProvider for StaticStopProvider {
    fn get_stop(&self, id: &StopIdentifier) -> Option<Stop> {
        self.stop_map.get(id).map(|s| s.stop.clone())
    }

    fn all_stops(&self) -> Vec<Stop> {
        self.stops.iter().map(|s| s.stop.clone()).collect()
    }

    fn len(&self) -> usize {
        self.stops.len()
    }

    fn ranked_stops(&self, reference: Point) -> Vec<RankedStop> {
        rank_with_distance(reference, &self.records)
    }

    fn stops_near(&self, reference: Point, radius_km: f64) -> Vec<RankedStop> {
        // Validate radius is positive
        if radius_km <= 0.0 || !radius_km.is_finite() || !is_valid_point(reference) {
            return Vec::new();
        }

        let degrees = meters_to_lon_degrees_at(radius_km * 1000.0, reference.y());

        let mut nearby: Vec<RankedStop> = self
            .stop_tree
            .locate_within_distance([reference.x(), reference.y()], degrees * degrees)
            .filter_map(|node| {
                let distance_km = haversine_distance_km(reference, node.stop.location);
                (distance_km <= radius_km).then(|| RankedStop {
                    stop: node.stop.stop.clone(),
                    distance_km,
                })
            })
            .collect();

        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        nearby
    }
}
