use std::io::Write;
use std::thread;
use std::time::Duration;
use clap::Parser;
use log::{info, warn};
use mock_station_lib::scripted_station::{ScriptedStation, StationController};
use wifi_channel_lib::access_point::AccessPointRecord;
use wifi_channel_lib::bssid::Bssid;
use wifi_channel_lib::diagnostics::{ChannelDiagnosticSource, DiagnosticsRegistry};
use wifi_channel_lib::monitor_config::MonitorConfig;
use crate::args::{Args, ScanMode};
use crate::diagnostics_sampler::DiagnosticsSampler;

mod args;
mod diagnostics_sampler;

const GRACEFUL_SHUTDOWN_PERIOD: Duration = Duration::from_secs(3);

fn main() -> anyhow::Result<()> {
  env_logger::builder()
      .format(|buf, record| {
        let ts = buf.timestamp_micros();
        writeln!(
          buf,
          "{}: {}: {:?}: {}: {}",
          ts,
          record.metadata().target(),
          std::thread::current().id(),
          buf.default_level_style(record.level())
              .value(record.level()),
          record.args()
        )
      })
      .init();

  let args = Args::parse();

  let (station_control, station) = ScriptedStation::new();
  station_control.set_scan_results(scan_results_for(&args));

  let monitor = wifi_channel_lib::instance();
  let config = MonitorConfig::default()
      .set_settle_delay(args.settle_delay_ms)
      .set_poll_interval(args.poll_interval_ms);
  monitor.setup(station, config)?;

  let mut registry = DiagnosticsRegistry::new();
  registry.register(ChannelDiagnosticSource::with_defaults(monitor.shared_channel()))?;
  let sampler_hold = DiagnosticsSampler::new(registry, args.diag_period_ms).start()?;

  for cycle in 1..=args.cycles {
    run_cycle(&args, &station_control, cycle);
  }

  info!("Simulation finished, requesting graceful shutdown...");
  thread::spawn(|| {
    thread::sleep(GRACEFUL_SHUTDOWN_PERIOD);
    panic!("Graceful shutdown expired timeout...");
  });

  drop(sampler_hold);
  monitor.shutdown();
  info!("Final result: {}", monitor.snapshot());

  Ok(())
}

fn run_cycle(args: &Args, station_control: &StationController, cycle: usize) {
  let monitor = wifi_channel_lib::instance();

  if args.scan_mode == ScanMode::Fail {
    station_control.fail_next_scan("simulated driver failure");
  }

  info!("[cycle {cycle}] Associating with {}...", args.bssid);
  station_control.connect(args.bssid);
  thread::sleep(args.connected_ms);

  // Peek at the result atomically without stalling the monitor if it happens to be mid-write.
  match monitor.try_lock() {
    Some(result) => info!(
        "[cycle {cycle}] {} (2.4GHz={}, 5GHz={})",
        *result,
        result.is_band_2_4ghz(),
        result.is_band_5ghz()),
    None => warn!("[cycle {cycle}] Result busy, skipping report"),
  }

  info!("[cycle {cycle}] Dropping association...");
  station_control.disconnect();
  thread::sleep(args.disconnected_ms);
}

fn scan_results_for(args: &Args) -> Vec<AccessPointRecord> {
  let mut results = vec![
    AccessPointRecord::new(Bssid::new([0x00, 0x15, 0x27, 0x01, 0x02, 0x03]), 1)
        .with_ssid("neighbor-2g")
        .with_rssi(-82),
    AccessPointRecord::new(Bssid::new([0x00, 0x15, 0x27, 0x01, 0x02, 0x04]), 36)
        .with_ssid("neighbor-5g")
        .with_rssi(-77),
  ];
  if args.scan_mode != ScanMode::Miss {
    results.push(
      AccessPointRecord::new(args.bssid, args.channel)
          .with_ssid("simulated")
          .with_rssi(-41));
  }
  results
}
