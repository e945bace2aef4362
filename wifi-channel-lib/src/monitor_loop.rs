use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};
use crate::access_point::AccessPointRecord;
use crate::bssid::Bssid;
use crate::clock::Clock;
use crate::control_handle::MonitorEvent;
use crate::discovery_state::{DiscoveryState, DiscoveryStateKind};
use crate::monitor_config::MonitorConfig;
use crate::scan_correlator::ScanCorrelator;
use crate::shared_channel::SharedChannel;
use crate::wifi_station::WifiStation;

/// Background loop that watches readiness and runs one scan per association.  Owns the station,
/// the discovery state, and the target BSSID; only [SharedChannel] is visible to other threads.
///
/// Built via [crate::channel_monitor::ChannelMonitor::runner].
pub struct MonitorLoop<S, C> {
  station: S,
  clock: C,
  shared: SharedChannel,
  config: MonitorConfig,
  shutdown: Arc<AtomicBool>,
  wake_rx: Receiver<()>,
  events_tx: Sender<MonitorEvent>,
  was_ready: bool,
  ready_error_logged: bool,
  state: DiscoveryState,
}

impl<S: WifiStation, C: Clock> MonitorLoop<S, C> {
  pub(crate) fn new(
      station: S,
      clock: C,
      shared: SharedChannel,
      config: MonitorConfig,
      shutdown: Arc<AtomicBool>,
      wake_rx: Receiver<()>,
      events_tx: Sender<MonitorEvent>,
  ) -> Self {
    Self {
      station,
      clock,
      shared,
      config,
      shutdown,
      wake_rx,
      events_tx,
      was_ready: false,
      ready_error_logged: false,
      state: DiscoveryState::Idle,
    }
  }

  pub fn state_kind(&self) -> DiscoveryStateKind {
    self.state.kind()
  }

  /// Run until shutdown is requested through the [crate::control_handle::ControlHandle].
  pub fn run_loop(mut self) {
    info!(
        "Channel monitor running (settle={}ms, poll={}us)...",
        self.config.settle_delay().as_millis(),
        self.config.poll_interval().as_micros());
    while !self.shutdown.load(Ordering::SeqCst) {
      self.tick();

      match self.wake_rx.recv_timeout(self.config.poll_interval()) {
        Ok(()) | Err(RecvTimeoutError::Timeout) => {}
        Err(RecvTimeoutError::Disconnected) => break,
      }
    }
    info!("Channel monitor loop exiting");
  }

  /// One loop iteration: observe readiness edges, then run the current state's handler.
  pub fn tick(&mut self) {
    let ready = self.poll_ready();
    if ready && !self.was_ready {
      info!("Wi-Fi ready");
      self.was_ready = true;
      // A new association invalidates whatever the last one found, scan or not.
      self.shared.reset();
      let target = self.read_bssid();
      self.move_to_state(DiscoveryState::ScanWait {
        entered_at: self.clock.now(),
        target,
      });
    } else if !ready && self.was_ready {
      info!("Wi-Fi no longer ready");
      self.was_ready = false;
      self.move_to_state(DiscoveryState::Idle);
    }

    self.handle_state();
  }

  fn handle_state(&mut self) {
    match self.state {
      DiscoveryState::Idle => {}
      DiscoveryState::ScanWait { entered_at, target } => {
        let waited = self.clock.now().saturating_duration_since(entered_at);
        if waited < self.config.settle_delay() {
          return;
        }

        // Single shot: whatever the outcome we don't scan again until the next association.
        match target.or_else(|| self.read_bssid()) {
          Some(target) => self.run_scan(target),
          None => warn!("No BSSID for current association, channel unknown until next association"),
        }
        self.move_to_state(DiscoveryState::Idle);
      }
    }
  }

  fn run_scan(&mut self, target: Bssid) {
    debug!("Current BSSID {target}");

    let mut correlator = ScanCorrelator::new(&self.shared, target);
    let scan_result = self.station.scan(&mut |record: &AccessPointRecord| {
      correlator.on_result(record)
    });
    let matches = correlator.matches();

    let result = self.shared.snapshot();
    match scan_result {
      Ok(result_count) => {
        debug!("Scan finished: resultCount={result_count} matches={matches} {result}");
        if !result.has_channel() {
          info!("{target} not found in scan, channel unknown until next association");
        }
        let _ = self.events_tx.send(MonitorEvent::ScanCompleted { result_count, result });
      }
      Err(e) => {
        warn!("Scan failed: {e}");
        let _ = self.events_tx.send(MonitorEvent::ScanFailed(e.to_string()));
      }
    }
  }

  fn poll_ready(&mut self) -> bool {
    match self.station.is_ready() {
      Ok(ready) => {
        self.ready_error_logged = false;
        ready
      }
      Err(e) => {
        // Polled every millisecond or so, only worth saying once per streak.
        if !self.ready_error_logged {
          warn!("Unable to query Wi-Fi readiness, assuming not ready: {e}");
          self.ready_error_logged = true;
        }
        false
      }
    }
  }

  fn read_bssid(&self) -> Option<Bssid> {
    match self.station.current_bssid() {
      Ok(bssid) => Some(bssid),
      Err(e) => {
        warn!("Unable to read current BSSID: {e}");
        None
      }
    }
  }

  fn move_to_state(&mut self, new_state: DiscoveryState) {
    let from = self.state.kind();
    let to = new_state.kind();
    self.state = new_state;
    if from != to {
      debug!("Moving from {from:?} to {to:?}");
      let _ = self.events_tx.send(MonitorEvent::StateChanged { from, to });
    }
  }
}
