//! # parada-api-types
//!
//! Wire shapes for the data the app consumes from outside:
//!
//! - [`siri`]: JSON bodies returned by the `/siri` endpoint (lines and arrivals)
//! - [`geodata`]: the bundled OpenStreetMap stop export
//!
//! These types mirror the JSON as it arrives. Validation and normalization live
//! in `parada-transit`.

mod de;
pub mod geodata;
pub mod siri;

pub use geodata::{GeodataDocument, OsmCenter, OsmElement};
pub use siri::{BusDto, LineDto, StopDto, WireTime};
