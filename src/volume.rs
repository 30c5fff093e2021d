use crate::types::RawVolume;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest raw level the receiver accepts
pub const MAX_RAW_VOLUME: RawVolume = 185;

const MIN_LEVEL: f64 = 1.0;
const MAX_LEVEL: f64 = MAX_RAW_VOLUME as f64;
const MIN_DB: f64 = -80.0;
const MAX_DB: f64 = 12.0;

/// Volume expressed in decibels
///
/// Raw level 0 sits below the documented -80 dB floor; it is reported as
/// [`Decibels::MuteFloor`] instead of an extrapolated number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decibels {
    MuteFloor,
    Level(f64),
}

impl Decibels {
    /// Numeric value, `None` at the mute floor
    pub fn value(self) -> Option<f64> {
        match self {
            Decibels::MuteFloor => None,
            Decibels::Level(db) => Some(db),
        }
    }
}

impl fmt::Display for Decibels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decibels::MuteFloor => f.write_str("-inf dB"),
            Decibels::Level(db) => f.write_str(&format_volume(*db)),
        }
    }
}

/// A volume reading in the format the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    Raw(RawVolume),
    Db(Decibels),
    Percent(u8),
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volume::Raw(raw) => write!(f, "{}", raw),
            Volume::Db(db) => write!(f, "{}", db),
            Volume::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

/// Linear map from raw level (1..=185) onto -80.0..=+12.0 dB
pub fn volume_to_db(raw: RawVolume) -> Decibels {
    if raw == 0 {
        return Decibels::MuteFloor;
    }
    let per_level = (MAX_DB - MIN_DB) / (MAX_LEVEL - MIN_LEVEL);
    Decibels::Level(MIN_DB + (f64::from(raw) - MIN_LEVEL) * per_level)
}

/// Render decibels with one decimal and an explicit sign (`+3.5 dB`)
pub fn format_volume(db: f64) -> String {
    // Half-away-from-zero, so -12.25 renders as -12.3
    let rounded = (db * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0.0 dB".to_string()
    } else if rounded > 0.0 {
        format!("+{:.1} dB", rounded)
    } else {
        format!("{:.1} dB", rounded)
    }
}

/// Raw level as a 0..=100 percentage, rounded down
pub fn raw_to_percent(raw: RawVolume) -> u8 {
    (u32::from(raw) * 100 / u32::from(MAX_RAW_VOLUME)) as u8
}

/// Percentage (0..=100) as a raw level, rounded down
pub fn percent_to_raw(percent: u8) -> RawVolume {
    (u32::from(percent.min(100)) * u32::from(MAX_RAW_VOLUME) / 100) as RawVolume
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(raw: RawVolume) -> f64 {
        volume_to_db(raw).value().unwrap()
    }

    #[test]
    fn test_volume_to_db_endpoints() {
        assert!((db(1) - -80.0).abs() < 1e-9);
        assert!((db(185) - 12.0).abs() < 1e-9);
        assert!((db(93) - -34.0).abs() < 0.01);
        assert!((db(161) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_volume_to_db_mute_floor() {
        assert_eq!(volume_to_db(0), Decibels::MuteFloor);
        assert_eq!(volume_to_db(0).to_string(), "-inf dB");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0.0), "0.0 dB");
        assert_eq!(format_volume(3.5), "+3.5 dB");
        assert_eq!(format_volume(-12.25), "-12.3 dB");
        assert_eq!(format_volume(-80.0), "-80.0 dB");
        assert_eq!(format_volume(12.0), "+12.0 dB");
    }

    #[test]
    fn test_percent_conversion() {
        assert_eq!(percent_to_raw(0), 0);
        assert_eq!(percent_to_raw(50), 92);
        assert_eq!(percent_to_raw(100), 185);
        assert_eq!(raw_to_percent(185), 100);
        assert_eq!(raw_to_percent(92), 49);
        assert_eq!(raw_to_percent(0), 0);
    }

    #[test]
    fn test_volume_display() {
        assert_eq!(Volume::Raw(42).to_string(), "42");
        assert_eq!(Volume::Db(volume_to_db(185)).to_string(), "+12.0 dB");
        assert_eq!(Volume::Percent(30).to_string(), "30%");
    }
}
