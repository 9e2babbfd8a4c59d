//! Distance calculations, proximity ranking and spatial indexing.

pub mod index;
pub mod queries;
pub mod ranking;

pub use queries::{haversine_distance, haversine_distance_km, is_valid_point, point};
pub use ranking::{rank, rank_with_distance, RankedStop};
