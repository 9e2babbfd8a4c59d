use geo::Point;
use serde::{Deserialize, Serialize};

use crate::transit::point;

pub const SALAMANCA_BASE_URL: &str = "http://salamancadetransportes.com";
pub const SALAMANCA_CITY: &str = "salamanca";

/// Plaza Mayor, used whenever the device has no location fix.
pub const SALAMANCA_FALLBACK: (f64, f64) = (40.970, -5.655);

/// Where to fetch live data from and where to rank stops around by default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    pub base_url: String,
    pub city: String,
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,
}

impl TransitConfig {
    pub fn salamanca() -> Self {
        Self {
            base_url: SALAMANCA_BASE_URL.to_owned(),
            city: SALAMANCA_CITY.to_owned(),
            fallback_latitude: SALAMANCA_FALLBACK.0,
            fallback_longitude: SALAMANCA_FALLBACK.1,
        }
    }

    /// Overrides on top of the Salamanca preset; missing keys keep their preset value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_fallback(mut self, latitude: f64, longitude: f64) -> Self {
        self.fallback_latitude = latitude;
        self.fallback_longitude = longitude;
        self
    }

    pub fn fallback_location(&self) -> Point {
        point(self.fallback_latitude, self.fallback_longitude)
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self::salamanca()
    }
}
