use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw device volume level (0..=185)
pub type RawVolume = u8;

/// Zone index on the receiver
pub type ZoneIndex = usize;

/// Main zone, the only zone addressed by commands
pub const MAIN_ZONE: ZoneIndex = 0;

/// Input sources the receiver can select
///
/// Every variant maps to exactly one function code. The mapping is an
/// exhaustive `match`, so adding a variant without a code does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSelector {
    #[serde(rename = "dvd")]
    Dvd,
    #[serde(rename = "bd")]
    Bd,
    #[serde(rename = "tv/sat")]
    TvSat,
    #[serde(rename = "dvd/bdr")]
    DvdBdr,
    #[serde(rename = "video-1")]
    Video1,
    #[serde(rename = "video-2")]
    Video2,
    #[serde(rename = "hdmi-1")]
    Hdmi1,
    #[serde(rename = "hdmi-2")]
    Hdmi2,
    #[serde(rename = "hdmi-3")]
    Hdmi3,
    #[serde(rename = "hdmi-4")]
    Hdmi4,
    #[serde(rename = "hdmi-5")]
    Hdmi5,
    #[serde(rename = "ipod-usb")]
    IpodUsb,
    #[serde(rename = "xm-radio")]
    XmRadio,
    #[serde(rename = "cd")]
    Cd,
    #[serde(rename = "cd-tape")]
    CdTape,
    #[serde(rename = "tuner")]
    Tuner,
    #[serde(rename = "phono")]
    Phono,
    #[serde(rename = "multi-channel-in")]
    MultiChannelIn,
    #[serde(rename = "adapter-port")]
    AdapterPort,
    #[serde(rename = "sirius")]
    Sirius,
}

impl InputSelector {
    /// Every selectable input, in table order
    pub const ALL: [InputSelector; 20] = [
        InputSelector::Dvd,
        InputSelector::Bd,
        InputSelector::TvSat,
        InputSelector::DvdBdr,
        InputSelector::Video1,
        InputSelector::Video2,
        InputSelector::Hdmi1,
        InputSelector::Hdmi2,
        InputSelector::Hdmi3,
        InputSelector::Hdmi4,
        InputSelector::Hdmi5,
        InputSelector::IpodUsb,
        InputSelector::XmRadio,
        InputSelector::Cd,
        InputSelector::CdTape,
        InputSelector::Tuner,
        InputSelector::Phono,
        InputSelector::MultiChannelIn,
        InputSelector::AdapterPort,
        InputSelector::Sirius,
    ];

    /// Function code the receiver uses for this input
    pub const fn code(self) -> u8 {
        match self {
            InputSelector::Phono => 0,
            InputSelector::Cd => 1,
            InputSelector::Tuner => 2,
            InputSelector::CdTape => 3,
            InputSelector::Dvd => 4,
            InputSelector::TvSat => 5,
            InputSelector::Video1 => 10,
            InputSelector::MultiChannelIn => 12,
            InputSelector::Video2 => 14,
            InputSelector::DvdBdr => 15,
            InputSelector::IpodUsb => 17,
            InputSelector::XmRadio => 18,
            InputSelector::Hdmi1 => 19,
            InputSelector::Hdmi2 => 20,
            InputSelector::Hdmi3 => 21,
            InputSelector::Hdmi4 => 22,
            InputSelector::Hdmi5 => 23,
            InputSelector::Bd => 25,
            InputSelector::Sirius => 27,
            InputSelector::AdapterPort => 33,
        }
    }

    /// Name used on the command line and in serialized form
    pub const fn name(self) -> &'static str {
        match self {
            InputSelector::Dvd => "dvd",
            InputSelector::Bd => "bd",
            InputSelector::TvSat => "tv/sat",
            InputSelector::DvdBdr => "dvd/bdr",
            InputSelector::Video1 => "video-1",
            InputSelector::Video2 => "video-2",
            InputSelector::Hdmi1 => "hdmi-1",
            InputSelector::Hdmi2 => "hdmi-2",
            InputSelector::Hdmi3 => "hdmi-3",
            InputSelector::Hdmi4 => "hdmi-4",
            InputSelector::Hdmi5 => "hdmi-5",
            InputSelector::IpodUsb => "ipod-usb",
            InputSelector::XmRadio => "xm-radio",
            InputSelector::Cd => "cd",
            InputSelector::CdTape => "cd-tape",
            InputSelector::Tuner => "tuner",
            InputSelector::Phono => "phono",
            InputSelector::MultiChannelIn => "multi-channel-in",
            InputSelector::AdapterPort => "adapter-port",
            InputSelector::Sirius => "sirius",
        }
    }

    /// Look up an input by the code reported in a status poll
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|input| u32::from(input.code()) == code)
    }
}

impl fmt::Display for InputSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|input| input.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownInput(s.to_string()))
    }
}

/// Direction for stepped adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// How `get_volume` should report the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeFormat {
    /// Device-native 0..=185
    #[default]
    Raw,
    /// Decibels, -80.0..=+12.0
    Db,
    /// Percentage 0..=100
    Percent,
}

impl FromStr for VolumeFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(VolumeFormat::Raw),
            "db" => Ok(VolumeFormat::Db),
            "percent" | "%" => Ok(VolumeFormat::Percent),
            _ => Err(ValidationError::UnknownMode {
                setting: "volume format",
                value: s.to_string(),
            }),
        }
    }
}

// ========== Sound settings ==========

/// Dialog enhancement level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogEnhancement {
    Off,
    Flat,
    Up1,
    Up2,
    Up3,
    Up4,
}

impl DialogEnhancement {
    /// Numeric prefix sent with `ATH`
    pub const fn digit(self) -> u8 {
        match self {
            DialogEnhancement::Off => 0,
            DialogEnhancement::Flat => 1,
            DialogEnhancement::Up1 => 2,
            DialogEnhancement::Up2 => 3,
            DialogEnhancement::Up3 => 4,
            DialogEnhancement::Up4 => 5,
        }
    }
}

impl FromStr for DialogEnhancement {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(DialogEnhancement::Off),
            "flat" => Ok(DialogEnhancement::Flat),
            "up1" => Ok(DialogEnhancement::Up1),
            "up2" => Ok(DialogEnhancement::Up2),
            "up3" => Ok(DialogEnhancement::Up3),
            "up4" => Ok(DialogEnhancement::Up4),
            _ => Err(ValidationError::UnknownMode {
                setting: "dialog enhancement",
                value: s.to_string(),
            }),
        }
    }
}

/// Phase Control Low-Frequency Sync mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PqlsMode {
    Off,
    Auto,
}

impl PqlsMode {
    /// Numeric prefix sent with `PQ`
    pub const fn digit(self) -> u8 {
        match self {
            PqlsMode::Off => 0,
            PqlsMode::Auto => 1,
        }
    }
}

impl FromStr for PqlsMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(PqlsMode::Off),
            "auto" => Ok(PqlsMode::Auto),
            _ => Err(ValidationError::UnknownMode {
                setting: "PQLS",
                value: s.to_string(),
            }),
        }
    }
}

/// Tone control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneMode {
    Bypass,
    On,
}

impl ToneMode {
    /// Numeric prefix sent with `TO`
    pub const fn digit(self) -> u8 {
        match self {
            ToneMode::Bypass => 0,
            ToneMode::On => 1,
        }
    }
}

impl FromStr for ToneMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bypass" => Ok(ToneMode::Bypass),
            "on" => Ok(ToneMode::On),
            _ => Err(ValidationError::UnknownMode {
                setting: "tone",
                value: s.to_string(),
            }),
        }
    }
}

/// Plain on/off setting (EQ, standing wave, phase control, auto sound
/// retriever, digital noise reduction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    Off,
    On,
}

impl Switch {
    /// Numeric prefix sent with the setting's suffix
    pub const fn digit(self) -> u8 {
        match self {
            Switch::Off => 0,
            Switch::On => 1,
        }
    }
}

impl FromStr for Switch {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Switch::Off),
            "on" => Ok(Switch::On),
            _ => Err(ValidationError::UnknownMode {
                setting: "on/off",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_input_codes_are_unique() {
        let codes: HashSet<u8> = InputSelector::ALL.iter().map(|i| i.code()).collect();
        assert_eq!(codes.len(), InputSelector::ALL.len());
    }

    #[test]
    fn test_input_names_round_trip() {
        for input in InputSelector::ALL {
            assert_eq!(input.name().parse::<InputSelector>().unwrap(), input);
            assert_eq!(InputSelector::from_code(u32::from(input.code())), Some(input));
        }
    }

    #[test]
    fn test_unknown_input_name() {
        let err = "not-a-real-input".parse::<InputSelector>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownInput("not-a-real-input".to_string()));
        assert_eq!(InputSelector::from_code(99), None);
    }

    #[test]
    fn test_input_serializes_as_wire_name() {
        let json = serde_json::to_string(&InputSelector::TvSat).unwrap();
        assert_eq!(json, "\"tv/sat\"");
        let back: InputSelector = serde_json::from_str("\"hdmi-2\"").unwrap();
        assert_eq!(back, InputSelector::Hdmi2);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("UP3".parse::<DialogEnhancement>().unwrap(), DialogEnhancement::Up3);
        assert_eq!("auto".parse::<PqlsMode>().unwrap(), PqlsMode::Auto);
        assert_eq!("bypass".parse::<ToneMode>().unwrap(), ToneMode::Bypass);
        assert_eq!("on".parse::<Switch>().unwrap(), Switch::On);
        assert!("loud".parse::<Switch>().is_err());
        assert_eq!("dB".parse::<VolumeFormat>().unwrap(), VolumeFormat::Db);
    }
}
