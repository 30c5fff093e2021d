//! Drive a receiver from the command line
//!
//! ```text
//! cargo run --example avr -- 192.168.1.50 status
//! cargo run --example avr -- 192.168.1.50 volume db
//! cargo run --example avr -- 192.168.1.50 set-volume 120
//! cargo run --example avr -- 192.168.1.50 input hdmi-2
//! RUST_LOG=pioneer_avr=debug cargo run --example avr -- 192.168.1.50 toggle-mute
//! ```

use pioneer_avr::{AvrClient, ClientConfig, VolumeFormat};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: avr <host[:port]> <command> [arg]

commands:
  status                      print the polled state
  on | off | toggle-power
  mute | unmute | toggle-mute
  volume [raw|db|percent]     read the main zone volume
  set-volume <0-185>
  set-volume-percent <0-100>
  up [steps] | down [steps]
  input <name> | input-next | input-prev
  bass-up | bass-down | treble-up | treble-down
  dialog <off|flat|up1..up4>
  pqls <off|auto>
  tone <bypass|on>
  eq | standing-wave | phase-control | asr | dnr <on|off>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(target), Some(command)) = (args.first(), args.get(1)) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let arg = args.get(2).map(String::as_str);

    let mut config = ClientConfig::new(target.as_str()).with_timeout(Duration::from_secs(3));
    if let Some((host, port)) = target.rsplit_once(':').filter(|(host, _)| !host.contains(':')) {
        if let Ok(port) = port.parse() {
            config = ClientConfig::new(host).with_port(port).with_timeout(config.timeout);
        }
    }
    let avr = AvrClient::with_config(config);

    match command.as_str() {
        "status" => {
            let status = avr.get_status().await?;
            let zone = status.main_zone();
            println!("power:  {}", if zone.power { "on" } else { "off" });
            println!("mute:   {}", if zone.mute { "on" } else { "off" });
            println!("volume: {} ({})", zone.volume, status.volume_db());
            match (zone.input, zone.input_code) {
                (Some(input), _) => println!("input:  {}", input),
                (None, Some(code)) => println!("input:  unknown code {}", code),
                (None, None) => println!("input:  -"),
            }
            println!("zones:  {}", status.zones().len());
        }
        "on" => avr.power_on().await?,
        "off" => avr.power_off().await?,
        "toggle-power" => {
            let on = avr.toggle_power().await?;
            println!("power {}", if on { "on" } else { "off" });
        }
        "mute" => avr.mute().await?,
        "unmute" => avr.unmute().await?,
        "toggle-mute" => {
            let muted = avr.toggle_mute().await?;
            println!("mute {}", if muted { "on" } else { "off" });
        }
        "volume" => {
            let format: VolumeFormat = arg.unwrap_or("raw").parse()?;
            println!("{}", avr.get_volume(format).await?);
        }
        "set-volume" => avr.set_volume(required(arg)?.parse()?).await?,
        "set-volume-percent" => avr.set_volume_percent(required(arg)?.parse()?).await?,
        "up" => avr.volume_up(arg.unwrap_or("1").parse()?).await?,
        "down" => avr.volume_down(arg.unwrap_or("1").parse()?).await?,
        "input" => avr.set_input_by_name(required(arg)?).await?,
        "input-next" => avr.input_next().await?,
        "input-prev" => avr.input_prev().await?,
        "bass-up" => avr.bass_up().await?,
        "bass-down" => avr.bass_down().await?,
        "treble-up" => avr.treble_up().await?,
        "treble-down" => avr.treble_down().await?,
        "dialog" => avr.set_dialog_enhancement(required(arg)?.parse()?).await?,
        "pqls" => avr.set_pqls(required(arg)?.parse()?).await?,
        "tone" => avr.set_tone(required(arg)?.parse()?).await?,
        "eq" => avr.set_eq(required(arg)?.parse()?).await?,
        "standing-wave" => avr.set_standing_wave(required(arg)?.parse()?).await?,
        "phase-control" => avr.set_phase_control(required(arg)?.parse()?).await?,
        "asr" => avr.set_auto_sound_retriever(required(arg)?.parse()?).await?,
        "dnr" => avr.set_digital_noise_reduction(required(arg)?.parse()?).await?,
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn required(arg: Option<&str>) -> Result<&str, String> {
    arg.ok_or_else(|| format!("missing argument\n\n{}", USAGE))
}
