use std::sync::{Arc, Mutex, MutexGuard};
use log::debug;
use wifi_channel_lib::access_point::AccessPointRecord;
use wifi_channel_lib::bssid::Bssid;
use wifi_channel_lib::channel_result::ChannelResult;
use wifi_channel_lib::control_handle::ReadinessNotifier;
use wifi_channel_lib::shared_channel::SharedChannel;
use wifi_channel_lib::wifi_station::WifiStation;

/// [WifiStation] whose readiness, association, and scan results are set through a
/// [StationController] from another thread.
pub struct ScriptedStation {
  inner: Arc<Mutex<StationState>>,
}

/// Test/simulator side of a [ScriptedStation].
#[derive(Clone)]
pub struct StationController {
  inner: Arc<Mutex<StationState>>,
}

#[derive(Default)]
struct StationState {
  ready: bool,
  bssid: Option<Bssid>,
  scan_results: Vec<AccessPointRecord>,
  fail_next_scan: Option<String>,
  ready_error: Option<String>,
  bssid_failures: usize,
  ready_queries: usize,
  scan_count: usize,
  probe: Option<SharedChannel>,
  observed_at_scan_start: Vec<ChannelResult>,
  notifier: Option<ReadinessNotifier>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum StationError {
  #[error("Not associated")]
  NotAssociated,

  #[error("Driver error: {0}")]
  Driver(String),
}

impl ScriptedStation {
  pub fn new() -> (StationController, Self) {
    let inner = Arc::new(Mutex::new(StationState::default()));
    (StationController { inner: inner.clone() }, Self { inner })
  }

  fn state(&self) -> MutexGuard<'_, StationState> {
    self.inner.lock().unwrap()
  }
}

impl WifiStation for ScriptedStation {
  type Error = StationError;

  fn is_ready(&self) -> Result<bool, Self::Error> {
    let mut state = self.state();
    state.ready_queries += 1;
    match &state.ready_error {
      Some(e) => Err(StationError::Driver(e.clone())),
      None => Ok(state.ready),
    }
  }

  fn current_bssid(&self) -> Result<Bssid, Self::Error> {
    let mut state = self.state();
    if state.bssid_failures > 0 {
      state.bssid_failures -= 1;
      return Err(StationError::Driver("ap info unavailable".to_owned()));
    }
    match state.bssid {
      Some(bssid) if state.ready => Ok(bssid),
      _ => Err(StationError::NotAssociated),
    }
  }

  fn scan(
      &mut self,
      on_result: &mut dyn FnMut(&AccessPointRecord),
  ) -> Result<usize, Self::Error> {
    // Copy out what we need so the callback never runs under our own lock.
    let results = {
      let mut state = self.state();
      state.scan_count += 1;
      let observed = state.probe.as_ref().map(|probe| probe.snapshot());
      if let Some(observed) = observed {
        state.observed_at_scan_start.push(observed);
      }
      if let Some(e) = state.fail_next_scan.take() {
        return Err(StationError::Driver(e));
      }
      state.scan_results.clone()
    };

    debug!("Reporting {} scan results", results.len());
    for record in &results {
      on_result(record);
    }
    Ok(results.len())
  }

  fn subscribe(&mut self, notifier: ReadinessNotifier) {
    self.state().notifier = Some(notifier);
  }
}

impl StationController {
  fn state(&self) -> MutexGuard<'_, StationState> {
    self.inner.lock().unwrap()
  }

  /// Associate with `bssid` and become ready.
  pub fn connect(&self, bssid: Bssid) {
    let notifier = {
      let mut state = self.state();
      state.bssid = Some(bssid);
      state.ready = true;
      state.notifier.clone()
    };
    if let Some(notifier) = notifier {
      notifier.notify();
    }
  }

  pub fn disconnect(&self) {
    let notifier = {
      let mut state = self.state();
      state.ready = false;
      state.notifier.clone()
    };
    if let Some(notifier) = notifier {
      notifier.notify();
    }
  }

  pub fn set_scan_results(&self, results: Vec<AccessPointRecord>) {
    self.state().scan_results = results;
  }

  pub fn fail_next_scan(&self, reason: impl Into<String>) {
    self.state().fail_next_scan = Some(reason.into());
  }

  /// Fail readiness queries with `reason` until cleared with `None`.
  pub fn fail_ready(&self, reason: Option<&str>) {
    self.state().ready_error = reason.map(str::to_owned);
  }

  /// Fail the next `count` BSSID reads even while associated.
  pub fn fail_bssid_reads(&self, count: usize) {
    self.state().bssid_failures = count;
  }

  pub fn ready_queries(&self) -> usize {
    self.state().ready_queries
  }

  pub fn scan_count(&self) -> usize {
    self.state().scan_count
  }

  pub fn is_subscribed(&self) -> bool {
    self.state().notifier.is_some()
  }

  /// Record `channel`'s value at the start of every subsequent scan, see
  /// [Self::observed_at_scan_start].
  pub fn probe_at_scan_start(&self, channel: SharedChannel) {
    self.state().probe = Some(channel);
  }

  pub fn observed_at_scan_start(&self) -> Vec<ChannelResult> {
    self.state().observed_at_scan_start.clone()
  }
}
