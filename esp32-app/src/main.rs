use std::thread;
use std::time::Duration;
use anyhow::anyhow;
use embedded_svc::wifi::{ClientConfiguration, Configuration, Wifi};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;
use log::info;
use esp_app::esp_wifi_station::EspWifiStation;
use wifi_channel_lib::diagnostics::{ChannelDiagnosticSource, DiagnosticsRegistry};
use wifi_channel_lib::monitor_config::MonitorConfig;

const SSID: &str = env!("WIFI_SSID");
const PASSWORD: &str = env!("WIFI_PASS");

const DIAGNOSTICS_PERIOD: Duration = Duration::from_secs(30);

/// FreeRTOS task stacks are tight; the monitor only formats short log lines.
const MONITOR_STACK_SIZE: usize = 8 * 1024;

fn main() -> anyhow::Result<()> {
  esp_idf_sys::link_patches();

  esp_idf_svc::log::EspLogger::initialize_default();

  let peripherals = Peripherals::take()
      .ok_or_else(|| anyhow!("Unable to take peripherals"))?;
  let event_loop = EspSystemEventLoop::take()?;
  let nvs = EspDefaultNvsPartition::take()?;

  let mut wifi = EspWifi::new(peripherals.modem, event_loop.clone(), Some(nvs))?;
  wifi.set_configuration(&Configuration::Client(ClientConfiguration {
    ssid: SSID.into(),
    password: PASSWORD.into(),
    ..Default::default()
  }))?;
  wifi.start()?;
  wifi.connect()?;
  info!("Connecting to {SSID}...");

  let monitor = wifi_channel_lib::instance();
  let config = MonitorConfig::default().set_stack_size(MONITOR_STACK_SIZE);
  monitor.setup(EspWifiStation::new(wifi, event_loop), config)?;

  let mut registry = DiagnosticsRegistry::new();
  registry.register(ChannelDiagnosticSource::with_defaults(monitor.shared_channel()))?;

  loop {
    thread::sleep(DIAGNOSTICS_PERIOD);
    for sample in registry.sample_all() {
      info!("diag {}={} (id={})", sample.name, sample.value, sample.id);
    }
  }
}
