use crate::error::{AvrError, Result};
use crate::types::{InputSelector, RawVolume, MAIN_ZONE};
use crate::volume::{volume_to_db, Decibels, MAX_RAW_VOLUME};
use serde::Serialize;

/// Snapshot of the receiver as reported by one status poll
///
/// Produced fresh on every poll and never updated in place. Fields the
/// client does not interpret (balance, display, listening mode, ...) stay
/// available through `raw_json`.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceStatus {
    /// Zones in device order; index 0 is the main zone
    zones: Vec<ZoneStatus>,

    // Raw JSON copy
    raw_json: serde_json::Value,
}

/// State of one zone
#[derive(Debug, Clone, Serialize)]
pub struct ZoneStatus {
    pub power: bool,
    pub volume: RawVolume,
    pub mute: bool,

    /// Function code of the active input, as reported
    pub input_code: Option<u32>,

    /// Active input, when the code is one we know
    pub input: Option<InputSelector>,

    // Raw JSON copy
    pub raw_json: serde_json::Value,
}

impl DeviceStatus {
    /// Parse a status body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_slice(body)?;
        parse_status_from_json(json)
    }

    /// The main zone; parsing guarantees it exists
    pub fn main_zone(&self) -> &ZoneStatus {
        &self.zones[MAIN_ZONE]
    }

    /// All zones in device order
    pub fn zones(&self) -> &[ZoneStatus] {
        &self.zones
    }

    /// The status document exactly as received
    pub fn raw_json(&self) -> &serde_json::Value {
        &self.raw_json
    }

    /// Get a zone by index
    pub fn zone(&self, index: usize) -> Option<&ZoneStatus> {
        self.zones.get(index)
    }

    /// Main zone power
    pub fn power(&self) -> bool {
        self.main_zone().power
    }

    /// Main zone mute
    pub fn mute(&self) -> bool {
        self.main_zone().mute
    }

    /// Main zone raw volume
    pub fn volume(&self) -> RawVolume {
        self.main_zone().volume
    }

    /// Main zone volume in decibels
    pub fn volume_db(&self) -> Decibels {
        volume_to_db(self.volume())
    }

    /// Main zone input, if known
    pub fn input(&self) -> Option<InputSelector> {
        self.main_zone().input
    }

    /// Look up a top-level field the client does not interpret
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.raw_json.get(key)
    }
}

/// Parse status from JSON value
fn parse_status_from_json(json: serde_json::Value) -> Result<DeviceStatus> {
    let zones_json = json
        .get("Z")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AvrError::MalformedResponse("Missing zone list".to_string()))?;

    let zones = zones_json
        .iter()
        .enumerate()
        .map(|(index, zone)| parse_zone_from_json(index, zone))
        .collect::<Result<Vec<_>>>()?;

    if zones.is_empty() {
        return Err(AvrError::MalformedResponse("Zone list is empty".to_string()));
    }

    Ok(DeviceStatus {
        zones,
        raw_json: json,
    })
}

fn parse_zone_from_json(index: usize, json: &serde_json::Value) -> Result<ZoneStatus> {
    let power = flag(json, "P", index)?;
    let mute = flag(json, "M", index)?;

    let volume = json
        .get("V")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| AvrError::MalformedResponse(format!("Zone {} has no volume", index)))?;
    if volume > u64::from(MAX_RAW_VOLUME) {
        return Err(AvrError::MalformedResponse(format!(
            "Zone {} volume {} is outside 0..=185",
            index, volume
        )));
    }

    // `I` is a list whose first entry is the active function code
    let input_code = json
        .get("I")
        .and_then(|v| v.as_array())
        .and_then(|codes| codes.first())
        .and_then(|v| v.as_u64())
        .and_then(|code| u32::try_from(code).ok());

    let input = input_code.and_then(InputSelector::from_code);
    if let (Some(code), None) = (input_code, input) {
        tracing::warn!("Zone {} reports unknown input code {}", index, code);
    }

    Ok(ZoneStatus {
        power,
        volume: volume as RawVolume,
        mute,
        input_code,
        input,
        raw_json: json.clone(),
    })
}

/// Read a 0/1 field; booleans are accepted too
fn flag(json: &serde_json::Value, key: &str, index: usize) -> Result<bool> {
    match json.get(key) {
        Some(serde_json::Value::Bool(b)) => Ok(*b),
        Some(v) => v
            .as_u64()
            .map(|n| n != 0)
            .ok_or_else(|| AvrError::MalformedResponse(format!("Zone {} field {} is not a flag", index, key))),
        None => Err(AvrError::MalformedResponse(format!("Zone {} is missing {}", index, key))),
    }
}
