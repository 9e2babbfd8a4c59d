//! # parada-transit
//!
//! Bus stops, lines and arrivals for a single city network.
//!
//! ## Features
//!
//! - **Proximity ranking**: order stops by great-circle distance to a point
//! - **Spatial queries**: R-tree prefiltered radius lookups
//! - **Geodata loading**: build a provider straight from an OSM stop export
//! - **Pluggable networking**: implement your own data fetching
//!
//! ## Example
//!
//! ```
//! use parada_transit::prelude::*;
//!
//! let records = vec![
//!     RawStopRecord::new(1, point(40.970, -5.655)).with_name("A").with_reference("1"),
//!     RawStopRecord::new(2, point(41.000, -5.700)).with_name("B").with_reference("2"),
//!     RawStopRecord::new(3, point(40.971, -5.655)).with_reference("3"),
//! ];
//!
//! let provider = StaticStopProvider::from_records(records);
//! let ranked = provider.ranked_stops(point(40.970, -5.655));
//!
//! assert_eq!(ranked.len(), 2);
//! assert_eq!(ranked[0].stop.id.as_str(), "1");
//! ```

pub mod identifiers;
pub mod models;
pub mod network;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{traits::*, types::*};
    pub use crate::network::traits::*;
    pub use crate::provider::static_provider::{LocatedStop, StaticStopProvider};
    pub use crate::spatial::{
        haversine_distance, haversine_distance_km, is_valid_point, point, rank,
        rank_with_distance, RankedStop,
    };
}

pub use prelude::*;
