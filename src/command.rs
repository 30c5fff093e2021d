//! Wire vocabulary of the receiver's command endpoint
//!
//! Every operation the receiver accepts is a short ASCII token: an optional
//! numeric operand followed by a fixed suffix (`PO`, `085VL`, `20FN`, ...).
//! [`Command`] builds those tokens; nothing here performs I/O.

use crate::error::ValidationError;
use crate::types::{DialogEnhancement, Direction, InputSelector, PqlsMode, Switch, ToneMode};
use crate::volume::MAX_RAW_VOLUME;
use std::fmt;

/// A single token for the command endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    operand: Option<String>,
    suffix: &'static str,
}

impl Command {
    fn fixed(suffix: &'static str) -> Self {
        Self {
            operand: None,
            suffix,
        }
    }

    fn with_operand(operand: String, suffix: &'static str) -> Self {
        Self {
            operand: Some(operand),
            suffix,
        }
    }

    /// The token as sent on the wire
    pub fn token(&self) -> String {
        self.to_string()
    }

    // ========== Power ==========

    /// Power on (`PO`) or standby (`PF`)
    pub fn power(on: bool) -> Self {
        Self::fixed(if on { "PO" } else { "PF" })
    }

    // ========== Volume ==========

    /// Absolute volume, zero padded to three digits (`007VL`)
    pub fn volume_set(raw: i32) -> Result<Self, ValidationError> {
        if !(0..=i32::from(MAX_RAW_VOLUME)).contains(&raw) {
            return Err(ValidationError::VolumeOutOfRange(raw));
        }
        Ok(Self::with_operand(format!("{:03}", raw), "VL"))
    }

    /// One device unit up or down
    pub fn volume_step(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::fixed("VU"),
            Direction::Down => Self::fixed("VD"),
        }
    }

    /// Ask the receiver to report its volume
    pub fn volume_query() -> Self {
        Self::fixed("?V")
    }

    /// Mute on (`MO`) or off (`MF`)
    pub fn mute(on: bool) -> Self {
        Self::fixed(if on { "MO" } else { "MF" })
    }

    // ========== Input ==========

    /// Select an input by its two-digit function code (`20FN`)
    pub fn input(input: InputSelector) -> Self {
        Self::with_operand(format!("{:02}", input.code()), "FN")
    }

    /// Select an input by its name, e.g. `hdmi-2`
    pub fn input_by_name(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::input(name.parse()?))
    }

    /// Next (`FU`) or previous (`FD`) input
    pub fn input_step(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::fixed("FU"),
            Direction::Down => Self::fixed("FD"),
        }
    }

    // ========== Tone ==========

    /// Bass up (`BI`) or down (`BD`)
    pub fn bass(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::fixed("BI"),
            Direction::Down => Self::fixed("BD"),
        }
    }

    /// Treble up (`TI`) or down (`TD`)
    pub fn treble(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::fixed("TI"),
            Direction::Down => Self::fixed("TD"),
        }
    }

    // ========== Sound settings ==========

    /// Dialog enhancement level (`<0-5>ATH`)
    pub fn dialog_enhancement(mode: DialogEnhancement) -> Self {
        Self::with_operand(mode.digit().to_string(), "ATH")
    }

    /// PQLS mode (`<0|1>PQ`)
    pub fn pqls(mode: PqlsMode) -> Self {
        Self::with_operand(mode.digit().to_string(), "PQ")
    }

    /// EQ (`<0|1>ATC`)
    pub fn eq(mode: Switch) -> Self {
        Self::with_operand(mode.digit().to_string(), "ATC")
    }

    /// Standing wave (`<0|1>ATD`)
    pub fn standing_wave(mode: Switch) -> Self {
        Self::with_operand(mode.digit().to_string(), "ATD")
    }

    /// Phase control (`<0|1>IS`)
    pub fn phase_control(mode: Switch) -> Self {
        Self::with_operand(mode.digit().to_string(), "IS")
    }

    /// Tone mode (`<0|1>TO`)
    pub fn tone(mode: ToneMode) -> Self {
        Self::with_operand(mode.digit().to_string(), "TO")
    }

    /// Auto sound retriever (`<0|1>ATA`)
    pub fn auto_sound_retriever(mode: Switch) -> Self {
        Self::with_operand(mode.digit().to_string(), "ATA")
    }

    /// Digital noise reduction (`<0|1>ATG`)
    pub fn digital_noise_reduction(mode: Switch) -> Self {
        Self::with_operand(mode.digit().to_string(), "ATG")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operand) = &self.operand {
            f.write_str(operand)?;
        }
        f.write_str(self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_and_mute() {
        assert_eq!(Command::power(true).token(), "PO");
        assert_eq!(Command::power(false).token(), "PF");
        assert_eq!(Command::mute(true).token(), "MO");
        assert_eq!(Command::mute(false).token(), "MF");
    }

    #[test]
    fn test_volume_set_is_zero_padded() {
        assert_eq!(Command::volume_set(0).unwrap().token(), "000VL");
        assert_eq!(Command::volume_set(7).unwrap().token(), "007VL");
        assert_eq!(Command::volume_set(42).unwrap().token(), "042VL");
        assert_eq!(Command::volume_set(185).unwrap().token(), "185VL");

        for raw in 0..=185 {
            let token = Command::volume_set(raw).unwrap().token();
            assert_eq!(token.len(), 5);
            assert!(token[..3].chars().all(|c| c.is_ascii_digit()));
            assert!(token.ends_with("VL"));
        }
    }

    #[test]
    fn test_volume_set_out_of_range() {
        assert_eq!(Command::volume_set(186), Err(ValidationError::VolumeOutOfRange(186)));
        assert_eq!(Command::volume_set(-1), Err(ValidationError::VolumeOutOfRange(-1)));
    }

    #[test]
    fn test_steps() {
        assert_eq!(Command::volume_step(Direction::Up).token(), "VU");
        assert_eq!(Command::volume_step(Direction::Down).token(), "VD");
        assert_eq!(Command::input_step(Direction::Up).token(), "FU");
        assert_eq!(Command::input_step(Direction::Down).token(), "FD");
        assert_eq!(Command::bass(Direction::Up).token(), "BI");
        assert_eq!(Command::bass(Direction::Down).token(), "BD");
        assert_eq!(Command::treble(Direction::Up).token(), "TI");
        assert_eq!(Command::treble(Direction::Down).token(), "TD");
        assert_eq!(Command::volume_query().token(), "?V");
    }

    #[test]
    fn test_input() {
        assert_eq!(Command::input(InputSelector::Hdmi2).token(), "20FN");
        assert_eq!(Command::input(InputSelector::Cd).token(), "01FN");
        assert_eq!(Command::input_by_name("hdmi-2").unwrap().token(), "20FN");
        assert_eq!(
            Command::input_by_name("not-a-real-input"),
            Err(ValidationError::UnknownInput("not-a-real-input".to_string()))
        );
    }

    #[test]
    fn test_sound_settings() {
        assert_eq!(Command::dialog_enhancement(DialogEnhancement::Off).token(), "0ATH");
        assert_eq!(Command::dialog_enhancement(DialogEnhancement::Up4).token(), "5ATH");
        assert_eq!(Command::pqls(PqlsMode::Auto).token(), "1PQ");
        assert_eq!(Command::eq(Switch::Off).token(), "0ATC");
        assert_eq!(Command::standing_wave(Switch::On).token(), "1ATD");
        assert_eq!(Command::phase_control(Switch::On).token(), "1IS");
        assert_eq!(Command::tone(ToneMode::Bypass).token(), "0TO");
        assert_eq!(Command::auto_sound_retriever(Switch::On).token(), "1ATA");
        assert_eq!(Command::digital_noise_reduction(Switch::Off).token(), "0ATG");
    }
}
