//! Proximity ranking of raw stop records.

use geo::Point;

use crate::models::types::{RawStopRecord, Stop};
use crate::spatial::queries::{haversine_distance_km, is_valid_point};

/// A stop together with its distance to the reference point.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedStop {
    pub stop: Stop,
    pub distance_km: f64,
}

/// Stops ordered by great-circle distance to `reference`, nearest first.
///
/// Records without a name, a reference code or a usable coordinate are left
/// out. Equal distances keep their input order.
pub fn rank(reference: Point, records: &[RawStopRecord]) -> Vec<Stop> {
    rank_with_distance(reference, records)
        .into_iter()
        .map(|ranked| ranked.stop)
        .collect()
}

/// Like [`rank`], keeping the distance in kilometers alongside each stop.
pub fn rank_with_distance(reference: Point, records: &[RawStopRecord]) -> Vec<RankedStop> {
    if !is_valid_point(reference) {
        return Vec::new();
    }

    let mut ranked: Vec<RankedStop> = records
        .iter()
        .filter_map(|record| {
            let location = record.valid_location()?;
            let stop = record.normalize()?;
            Some(RankedStop {
                distance_km: haversine_distance_km(reference, location),
                stop,
            })
        })
        .collect();

    // `sort_by` is stable
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
