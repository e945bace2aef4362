use embedded_svc::wifi::Wifi;
use esp_idf_svc::eventloop::{EspSubscription, EspSystemEventLoop, System};
use esp_idf_svc::wifi::{EspWifi, WifiEvent};
use esp_idf_sys::{esp, esp_wifi_sta_get_ap_info, wifi_ap_record_t, EspError};
use log::warn;
use wifi_channel_lib::access_point::AccessPointRecord;
use wifi_channel_lib::bssid::Bssid;
use wifi_channel_lib::control_handle::ReadinessNotifier;
use wifi_channel_lib::wifi_station::WifiStation;

/// [WifiStation] backed by the ESP-IDF Wi-Fi driver.  The driver must already be started and
/// connecting; association management stays with whoever configured it.
pub struct EspWifiStation {
  wifi: EspWifi<'static>,
  event_loop: EspSystemEventLoop,
  _subscription: Option<EspSubscription<System>>,
}

impl EspWifiStation {
  pub fn new(wifi: EspWifi<'static>, event_loop: EspSystemEventLoop) -> Self {
    Self {
      wifi,
      event_loop,
      _subscription: None,
    }
  }
}

impl WifiStation for EspWifiStation {
  type Error = EspError;

  /// Associated and with an IP, which is when the rest of the app considers Wi-Fi usable.
  fn is_ready(&self) -> Result<bool, Self::Error> {
    if !self.wifi.is_connected()? || !self.wifi.sta_netif().is_up()? {
      return Ok(false);
    }
    let ip_info = self.wifi.sta_netif().get_ip_info()?;
    Ok(!ip_info.ip.is_unspecified())
  }

  fn current_bssid(&self) -> Result<Bssid, Self::Error> {
    let mut ap_info = wifi_ap_record_t::default();
    esp!(unsafe { esp_wifi_sta_get_ap_info(&mut ap_info) })?;
    Ok(Bssid::new(ap_info.bssid))
  }

  fn scan(
      &mut self,
      on_result: &mut dyn FnMut(&AccessPointRecord),
  ) -> Result<usize, Self::Error> {
    let access_points = self.wifi.scan()?;
    for ap in &access_points {
      let record = AccessPointRecord::new(Bssid::new(ap.bssid), ap.channel)
          .with_ssid(ap.ssid.as_str())
          .with_rssi(ap.signal_strength);
      on_result(&record);
    }
    Ok(access_points.len())
  }

  fn subscribe(&mut self, notifier: ReadinessNotifier) {
    let result = self.event_loop.subscribe(move |event: &WifiEvent| {
      if matches!(event, WifiEvent::StaConnected | WifiEvent::StaDisconnected) {
        notifier.notify();
      }
    });
    match result {
      Ok(subscription) => self._subscription = Some(subscription),
      Err(e) => warn!("Unable to subscribe to Wi-Fi events, relying on polling: {e}"),
    }
  }
}
