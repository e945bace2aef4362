use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use crate::channel_result::ChannelResult;
use crate::discovery_state::DiscoveryStateKind;

/// Used to stop a running monitor loop.  Dropping the handle also stops it.
#[derive(Debug)]
pub struct ControlHandle {
  pub(crate) shutdown: Arc<AtomicBool>,
  pub(crate) wake_tx: Sender<()>,
}

impl ControlHandle {
  pub fn request_shutdown(&self) {
    self.shutdown.store(true, Ordering::SeqCst);
    let _ = self.wake_tx.try_send(());
  }

  pub fn notifier(&self) -> ReadinessNotifier {
    ReadinessNotifier { wake_tx: self.wake_tx.clone() }
  }
}

impl Drop for ControlHandle {
  fn drop(&mut self) {
    self.request_shutdown();
  }
}

/// Wakes the monitor loop early so a readiness change is seen without waiting out the poll
/// interval.  Safe to call from driver callbacks: it never blocks.
#[derive(Debug, Clone)]
pub struct ReadinessNotifier {
  wake_tx: Sender<()>,
}

impl ReadinessNotifier {
  pub fn notify(&self) {
    // Full means a wake-up is already pending, which is all we need.
    let _ = self.wake_tx.try_send(());
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
  StateChanged {
    from: DiscoveryStateKind,
    to: DiscoveryStateKind,
  },
  ScanCompleted {
    result_count: usize,
    result: ChannelResult,
  },
  ScanFailed(String),
}

/// Stream of notable things the monitor loop did, mostly useful for tests and status displays.
pub struct MonitorEventHandle {
  pub events_rx: Receiver<MonitorEvent>,
}

impl MonitorEventHandle {
  pub fn next_event(&self, timeout: Duration) -> Result<MonitorEvent, RecvTimeoutError> {
    self.events_rx.recv_timeout(timeout)
  }

  /// Skip events until `predicate` matches or `timeout` elapses (measured per event).
  pub fn wait_for(
      &self,
      timeout: Duration,
      mut predicate: impl FnMut(&MonitorEvent) -> bool,
  ) -> Result<MonitorEvent, RecvTimeoutError> {
    loop {
      let event = self.next_event(timeout)?;
      if predicate(&event) {
        return Ok(event);
      }
    }
  }
}
