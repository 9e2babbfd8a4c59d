//! Response bodies of `GET {base}/siri?city={city}[&stop={stop}]`.

use serde::{Deserialize, Serialize};

use crate::de::string_or_number;

/// A transit line with its ordered stops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stops: Vec<StopDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// A single predicted arrival at the queried stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusDto {
    #[serde(deserialize_with = "string_or_number")]
    pub line: String,
    pub direction: String,
    pub time: WireTime,
}

/// Arrival time as sent by the server: usually an ISO-8601 string, occasionally
/// epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTime {
    Text(String),
    EpochMillis(i64),
}
