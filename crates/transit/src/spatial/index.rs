//! R-tree nodes for spatial indexing.
//!
//! ## Two-Stage Filtering
//!
//! Radius queries first ask the R-tree for candidates using a degree-space
//! bounding radius, then apply the exact Haversine distance. The degree radius
//! is widened for the query latitude so the first stage never drops a stop the
//! second stage would keep.

use std::sync::Arc;

use geo::Point;
use rstar::{PointDistance, RTreeObject, AABB};

use crate::provider::static_provider::LocatedStop;

#[derive(Clone)]
pub struct StopNode {
    pub stop: Arc<LocatedStop>,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(location: Point, stop: Arc<LocatedStop>) -> Self {
        Self {
            stop,
            point: [location.x(), location.y()],
        }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
