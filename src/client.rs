use crate::command::Command;
use crate::config::ClientConfig;
use crate::error::{AvrError, Result, TransportError, ValidationError};
use crate::protocol::Endpoints;
use crate::status::DeviceStatus;
use crate::transport::{HttpResponse, HttpTransport, Transport};
use crate::types::{
    DialogEnhancement, Direction, InputSelector, PqlsMode, Switch, ToneMode, VolumeFormat,
};
use crate::volume::{percent_to_raw, raw_to_percent, volume_to_db, Volume};

/// Client for a Pioneer network receiver
///
/// The client keeps no device state between calls. Every operation that
/// depends on the current state (toggles, volume reads) polls the receiver
/// first, and every command is a single request with no retry.
///
/// Toggles are read-then-act: if something else changes the receiver
/// between the poll and the command (a remote, another client), the toggle
/// acts on stale state. Callers that need stronger guarantees should keep
/// one toggle in flight per receiver.
pub struct AvrClient<T = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
}

impl AvrClient<HttpTransport> {
    /// Client for the receiver at `host`, port 80, default timeout
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pioneer_avr::AvrClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let avr = AvrClient::new("192.168.1.50");
    ///     avr.power_on().await?;
    ///     avr.set_volume(100).await?;
    ///     Ok(())
    /// }
    /// ```
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(host))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.timeout);
        Self::with_transport(&config, transport)
    }
}

impl<T: Transport> AvrClient<T> {
    /// Client that delivers requests through `transport`
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        tracing::info!("Controlling receiver at {}:{}", config.host, config.port);
        Self {
            transport,
            endpoints: Endpoints::new(&config.host, config.port),
        }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========== Wire ==========

    /// Send one command token
    pub async fn send(&self, command: Command) -> Result<()> {
        let url = self.endpoints.command_url(&command);
        tracing::debug!("Sending {}", command);

        self.fetch(&url).await?;
        Ok(())
    }

    /// Poll the receiver for its current state
    pub async fn get_status(&self) -> Result<DeviceStatus> {
        let url = self.endpoints.status_url();
        let response = self.fetch(&url).await?;
        tracing::debug!("Status poll returned {} bytes", response.body.len());

        DeviceStatus::from_slice(&response.body)
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse> {
        let response = self.transport.fetch(url).await?;
        if !response.is_success() {
            return Err(AvrError::Transport(TransportError::Status(response.status)));
        }
        Ok(response)
    }

    // ========== Power ==========

    /// Power the receiver on
    pub async fn power_on(&self) -> Result<()> {
        self.send(Command::power(true)).await
    }

    /// Put the receiver in standby
    pub async fn power_off(&self) -> Result<()> {
        self.send(Command::power(false)).await
    }

    /// Switch power to the opposite of what the receiver reports
    ///
    /// Returns the power state that was requested.
    pub async fn toggle_power(&self) -> Result<bool> {
        let on = !self.get_status().await?.power();
        self.send(Command::power(on)).await?;
        Ok(on)
    }

    // ========== Volume ==========

    /// Set the raw volume (0..=185)
    ///
    /// Out-of-range values are rejected without contacting the receiver.
    pub async fn set_volume(&self, raw: i32) -> Result<()> {
        let command = Command::volume_set(raw)?;
        self.send(command).await
    }

    /// Set the volume as a percentage of the raw range
    pub async fn set_volume_percent(&self, percent: i32) -> Result<()> {
        let percent = u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or(ValidationError::PercentOutOfRange(percent))?;
        self.set_volume(i32::from(percent_to_raw(percent))).await
    }

    /// Read the main zone volume
    pub async fn get_volume(&self, format: VolumeFormat) -> Result<Volume> {
        let raw = self.get_status().await?.volume();
        Ok(match format {
            VolumeFormat::Raw => Volume::Raw(raw),
            VolumeFormat::Db => Volume::Db(volume_to_db(raw)),
            VolumeFormat::Percent => Volume::Percent(raw_to_percent(raw)),
        })
    }

    /// Step the volume up one unit per step
    pub async fn volume_up(&self, steps: u32) -> Result<()> {
        self.volume_step(Direction::Up, steps).await
    }

    /// Step the volume down one unit per step
    pub async fn volume_down(&self, steps: u32) -> Result<()> {
        self.volume_step(Direction::Down, steps).await
    }

    // The receiver has no multi-step command, so steps go one at a time,
    // each acknowledged before the next is sent.
    async fn volume_step(&self, direction: Direction, steps: u32) -> Result<()> {
        for _ in 0..steps {
            self.send(Command::volume_step(direction)).await?;
        }
        Ok(())
    }

    /// Mute the main zone
    pub async fn mute(&self) -> Result<()> {
        self.send(Command::mute(true)).await
    }

    /// Unmute the main zone
    pub async fn unmute(&self) -> Result<()> {
        self.send(Command::mute(false)).await
    }

    /// Switch mute to the opposite of what the receiver reports
    ///
    /// Returns the mute state that was requested.
    pub async fn toggle_mute(&self) -> Result<bool> {
        let muted = !self.get_status().await?.mute();
        self.send(Command::mute(muted)).await?;
        Ok(muted)
    }

    // ========== Input ==========

    /// Select an input source
    pub async fn set_input(&self, input: InputSelector) -> Result<()> {
        self.send(Command::input(input)).await
    }

    /// Select an input by name, e.g. `"hdmi-2"`
    pub async fn set_input_by_name(&self, name: &str) -> Result<()> {
        let command = Command::input_by_name(name)?;
        self.send(command).await
    }

    /// Active main zone input, `None` if its code is not one we know
    pub async fn get_input(&self) -> Result<Option<InputSelector>> {
        Ok(self.get_status().await?.input())
    }

    /// Switch to the next input source
    pub async fn input_next(&self) -> Result<()> {
        self.send(Command::input_step(Direction::Up)).await
    }

    /// Switch to the previous input source
    pub async fn input_prev(&self) -> Result<()> {
        self.send(Command::input_step(Direction::Down)).await
    }

    // ========== Tone ==========

    /// Raise bass by one step
    pub async fn bass_up(&self) -> Result<()> {
        self.send(Command::bass(Direction::Up)).await
    }

    /// Lower bass by one step
    pub async fn bass_down(&self) -> Result<()> {
        self.send(Command::bass(Direction::Down)).await
    }

    /// Raise treble by one step
    pub async fn treble_up(&self) -> Result<()> {
        self.send(Command::treble(Direction::Up)).await
    }

    /// Lower treble by one step
    pub async fn treble_down(&self) -> Result<()> {
        self.send(Command::treble(Direction::Down)).await
    }

    // ========== Sound settings ==========

    /// Set the dialog enhancement level
    pub async fn set_dialog_enhancement(&self, mode: DialogEnhancement) -> Result<()> {
        self.send(Command::dialog_enhancement(mode)).await
    }

    /// Set the PQLS mode
    pub async fn set_pqls(&self, mode: PqlsMode) -> Result<()> {
        self.send(Command::pqls(mode)).await
    }

    /// Turn EQ on or off
    pub async fn set_eq(&self, mode: Switch) -> Result<()> {
        self.send(Command::eq(mode)).await
    }

    /// Turn standing wave control on or off
    pub async fn set_standing_wave(&self, mode: Switch) -> Result<()> {
        self.send(Command::standing_wave(mode)).await
    }

    /// Turn phase control on or off
    pub async fn set_phase_control(&self, mode: Switch) -> Result<()> {
        self.send(Command::phase_control(mode)).await
    }

    /// Enable tone controls or bypass them
    pub async fn set_tone(&self, mode: ToneMode) -> Result<()> {
        self.send(Command::tone(mode)).await
    }

    /// Turn the auto sound retriever on or off
    pub async fn set_auto_sound_retriever(&self, mode: Switch) -> Result<()> {
        self.send(Command::auto_sound_retriever(mode)).await
    }

    /// Turn digital noise reduction on or off
    pub async fn set_digital_noise_reduction(&self, mode: Switch) -> Result<()> {
        self.send(Command::digital_noise_reduction(mode)).await
    }
}
