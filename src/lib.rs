//! Rust library for controlling Pioneer network AV receivers
//!
//! Pioneer receivers with a web interface accept short command tokens over
//! HTTP and report their state as a JSON document. This library provides an
//! async API that:
//!
//! - Powers the receiver on and off, or toggles it
//! - Sets, steps, mutes and reads the main zone volume (raw, dB or percent)
//! - Selects inputs by name or steps through them
//! - Adjusts bass and treble
//! - Changes sound settings (dialog enhancement, PQLS, EQ, standing wave,
//!   phase control, tone bypass, auto sound retriever, noise reduction)
//!
//! # Quick Start
//!
//! ```no_run
//! use pioneer_avr::{AvrClient, InputSelector, VolumeFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let avr = AvrClient::new("192.168.1.50");
//!
//!     avr.power_on().await?;
//!     avr.set_input(InputSelector::Hdmi2).await?;
//!     avr.volume_up(3).await?;
//!
//!     let volume = avr.get_volume(VolumeFormat::Db).await?;
//!     println!("Volume: {}", volume);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Client**: Operations, including toggles that poll before acting
//! - **Command**: The receiver's token vocabulary
//! - **Status**: Parsing of the polled JSON state
//! - **Volume**: Raw / decibel / percent conversions
//! - **Transport**: The HTTP collaborator, replaceable for tests or embedding

mod client;
mod command;
mod config;
mod error;
mod protocol;
mod status;
mod types;
mod volume;

pub mod transport;

// Public exports
pub use client::AvrClient;
pub use command::Command;
pub use config::{ClientConfig, DEFAULT_PORT};
pub use error::{AvrError, Result, TransportError, ValidationError};
pub use protocol::{Endpoints, COMMAND_PATH, STATUS_PATH};
pub use status::{DeviceStatus, ZoneStatus};
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use types::{
    DialogEnhancement, Direction, InputSelector, PqlsMode, RawVolume, Switch, ToneMode,
    VolumeFormat, ZoneIndex, MAIN_ZONE,
};
pub use volume::{
    format_volume, percent_to_raw, raw_to_percent, volume_to_db, Decibels, Volume, MAX_RAW_VOLUME,
};
