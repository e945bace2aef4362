use crate::bssid::Bssid;

/// One access point reported by a scan.  Only `bssid` and `channel` take part in correlation,
/// the rest is carried along for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPointRecord {
  pub bssid: Bssid,
  pub channel: u8,
  pub ssid: String,
  pub rssi: i8,
}

impl AccessPointRecord {
  pub fn new(bssid: Bssid, channel: u8) -> Self {
    Self {
      bssid,
      channel,
      ssid: String::new(),
      rssi: 0,
    }
  }

  pub fn with_ssid(mut self, ssid: impl Into<String>) -> Self {
    self.ssid = ssid.into();
    self
  }

  pub fn with_rssi(mut self, rssi: i8) -> Self {
    self.rssi = rssi;
    self
  }
}
