//! Core traits for stop data.
//!
//! Implementations can be in-memory, database-backed, or remote.

use geo::Point;

use crate::identifiers::StopIdentifier;
use crate::models::types::Stop;
use crate::spatial::ranking::RankedStop;

/// Provider of the city's stops with lookup and proximity queries
pub trait StopProvider: Send + Sync {
    // ---- Lookups ----
    fn get_stop(&self, id: &StopIdentifier) -> Option<Stop>;
    fn all_stops(&self) -> Vec<Stop>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---- Spatial queries ----

    /// Every usable stop, nearest first
    fn ranked_stops(&self, reference: Point) -> Vec<RankedStop>;

    /// Stops within `radius_km`, nearest first
    fn stops_near(&self, reference: Point, radius_km: f64) -> Vec<RankedStop>;

    /// The `n` stops closest to `reference`
    fn nearest_stops(&self, reference: Point, n: usize) -> Vec<RankedStop> {
        let mut ranked = self.ranked_stops(reference);
        ranked.truncate(n);
        ranked
    }
}
