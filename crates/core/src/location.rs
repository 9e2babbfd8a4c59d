//! Device location as seen by the stop list.
//!
//! A missing or refused location is a normal operating mode: ranking simply
//! happens around the configured fallback point.

use geo::Point;
use strum::Display;

use crate::transit::is_valid_point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LocationUnavailable {
    PermissionDenied,
    ServiceDisabled,
    Timeout,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LocationState {
    /// Waiting on the platform; may never resolve.
    #[default]
    Pending,
    Fix(Point),
    Unavailable(LocationUnavailable),
}

impl LocationState {
    /// Record a new fix. Coordinates that are not a valid position are ignored.
    pub fn update(&mut self, fix: Point) -> bool {
        if !is_valid_point(fix) {
            tracing::warn!("ignoring invalid location fix ({}, {})", fix.y(), fix.x());
            return false;
        }

        *self = Self::Fix(fix);
        true
    }

    pub fn mark_unavailable(&mut self, reason: LocationUnavailable) {
        tracing::warn!("location unavailable ({reason}), ranking around fallback point");
        *self = Self::Unavailable(reason);
    }

    pub fn reference_point(&self, fallback: Point) -> Point {
        match self {
            Self::Fix(fix) => *fix,
            Self::Pending | Self::Unavailable(_) => fallback,
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, Self::Fix(_))
    }
}
