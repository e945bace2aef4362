use std::fmt::{Debug, Display};
use crate::access_point::AccessPointRecord;
use crate::bssid::Bssid;
use crate::control_handle::ReadinessNotifier;

/// The pieces of the host Wi-Fi driver we depend on.  Implementations are owned and driven
/// exclusively by the monitor thread.
pub trait WifiStation {
  /// Underlying driver error.  Never fatal to us: every failure degrades to "not ready" or
  /// "channel unknown".
  type Error: Debug + Display;

  /// True while associated and usable.  Polled on every loop iteration so must be cheap.
  fn is_ready(&self) -> Result<bool, Self::Error>;

  /// BSSID of the access point we are currently associated with.
  fn current_bssid(&self) -> Result<Bssid, Self::Error>;

  /// Perform a blocking scan, invoking `on_result` once per access point found before
  /// returning.  Returns the number of access points reported.
  fn scan(
      &mut self,
      on_result: &mut dyn FnMut(&AccessPointRecord),
  ) -> Result<usize, Self::Error>;

  /// Stations that can observe association changes as events should hold on to `notifier` and
  /// call [ReadinessNotifier::notify] on each change so the monitor doesn't have to wait for its
  /// next poll.  Polling remains the source of truth either way.
  fn subscribe(&mut self, notifier: ReadinessNotifier) {
    let _ = notifier;
  }
}
