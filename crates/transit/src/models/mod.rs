//! Transit data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::StopProvider;
pub use types::{ArrivalTime, Bus, Line, RawStopRecord, Result, Stop, TransitError};
