use std::time::Duration;
use clap::{Parser, ValueEnum};
use wifi_channel_lib::bssid::Bssid;

#[derive(Parser, Debug)]
pub struct Args {
  /// BSSID of the simulated access point we associate with
  #[arg(short, long, default_value_t = Bssid::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]))]
  pub bssid: Bssid,

  /// Channel the simulated access point operates on
  #[arg(short, long, default_value_t = 149)]
  pub channel: u8,

  /// Simulated scan behaviour
  #[arg(short, long, value_enum, default_value_t = ScanMode::Match)]
  pub scan_mode: ScanMode,

  /// Number of connect/disconnect cycles to simulate before exiting
  #[arg(long, default_value_t = 2)]
  pub cycles: usize,

  /// How long each simulated association lasts
  #[arg(long, value_parser = parse_millis, default_value = "6000")]
  pub connected_ms: Duration,

  /// How long to stay disconnected between associations
  #[arg(long, value_parser = parse_millis, default_value = "2000")]
  pub disconnected_ms: Duration,

  /// Delay between association and scan
  #[arg(long, value_parser = parse_millis, default_value = "4000")]
  pub settle_delay_ms: Duration,

  /// Readiness poll interval
  #[arg(long, value_parser = parse_millis, default_value = "1")]
  pub poll_interval_ms: Duration,

  /// How often the diagnostics registry samples its sources
  #[arg(long, value_parser = parse_millis, default_value = "1000")]
  pub diag_period_ms: Duration,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
  /// Our access point shows up in the scan
  Match,

  /// Scan only finds neighbors, channel stays unknown
  Miss,

  /// Every scan fails with a driver error
  Fail,
}

fn parse_millis(s: &str) -> Result<Duration, String> {
  s.parse::<u64>()
      .map(Duration::from_millis)
      .map_err(|e| format!("Can't parse {s} as milliseconds: {e}"))
}
