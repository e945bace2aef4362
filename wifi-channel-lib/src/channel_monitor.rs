use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::thread::JoinHandle;
use crossbeam::channel::{bounded, unbounded};
use log::{error, info};
use crate::band::Band;
use crate::channel_result::ChannelResult;
use crate::clock::{Clock, SystemClock};
use crate::control_handle::{ControlHandle, MonitorEventHandle};
use crate::monitor_config::MonitorConfig;
use crate::monitor_loop::MonitorLoop;
use crate::shared_channel::{ChannelGuard, SharedChannel};
use crate::wifi_station::WifiStation;

/// Tracks the channel of the current Wi-Fi association.
///
/// Usually accessed through [crate::instance] with `instance().setup(station, config)` called
/// once from application init.
///
/// All queries may be called from any thread, before or after setup.  Before the first
/// successful scan they report channel 0 / not found.
#[derive(Debug, Default)]
pub struct ChannelMonitor {
  shared: SharedChannel,
  setup_called: AtomicBool,
  running: Mutex<Option<RunningMonitor>>,
}

#[derive(Debug)]
struct RunningMonitor {
  control: ControlHandle,
  thread: JoinHandle<()>,
}

impl ChannelMonitor {
  pub fn new() -> Self {
    Default::default()
  }

  /// Start the monitor thread.  Call exactly once; subsequent calls fail with
  /// [SetupError::AlreadySetup] and leave the running monitor alone.
  pub fn setup<S>(&self, station: S, config: MonitorConfig) -> Result<(), SetupError>
  where
      S: WifiStation + Send + 'static,
  {
    let thread_name = config.thread_name().to_owned();
    let stack_size = config.stack_size();
    let (control, _events, runner) = self.runner(station, SystemClock, config)?;

    let spawn_result = thread::Builder::new()
        .name(thread_name)
        .stack_size(stack_size)
        .spawn(move || runner.run_loop());
    let thread = match spawn_result {
      Ok(thread) => thread,
      Err(e) => {
        self.setup_called.store(false, Ordering::SeqCst);
        return Err(SetupError::ThreadSpawn(e.to_string()));
      }
    };

    *self.running.lock().unwrap_or_else(PoisonError::into_inner) =
        Some(RunningMonitor { control, thread });
    Ok(())
  }

  /// Alternative to [Self::setup] for callers that want to own the thread (or drive
  /// [MonitorLoop::tick] by hand).  Counts as the one allowed setup.
  pub fn runner<S, C>(
      &self,
      mut station: S,
      clock: C,
      config: MonitorConfig,
  ) -> Result<(ControlHandle, MonitorEventHandle, MonitorLoop<S, C>), SetupError>
  where
      S: WifiStation,
      C: Clock,
  {
    if self.setup_called.swap(true, Ordering::SeqCst) {
      return Err(SetupError::AlreadySetup);
    }

    // One slot is enough: wake-ups coalesce, the loop re-polls everything when it wakes.
    let (wake_tx, wake_rx) = bounded(1);
    let (events_tx, events_rx) = unbounded();
    let shutdown = Arc::new(AtomicBool::new(false));
    let control = ControlHandle { shutdown: shutdown.clone(), wake_tx };

    station.subscribe(control.notifier());

    let runner = MonitorLoop::new(
        station,
        clock,
        self.shared.clone(),
        config,
        shutdown,
        wake_rx,
        events_tx);
    Ok((control, MonitorEventHandle { events_rx }, runner))
  }

  /// Stop the thread started by [Self::setup] and wait for it to exit.  The last result stays
  /// readable.  Returns false if there was nothing running.
  pub fn shutdown(&self) -> bool {
    let running = self.running.lock().unwrap_or_else(PoisonError::into_inner).take();
    match running {
      Some(RunningMonitor { control, thread }) => {
        control.request_shutdown();
        if thread.join().is_err() {
          error!("Channel monitor thread panicked");
        }
        info!("Channel monitor stopped");
        true
      }
      None => false,
    }
  }

  /// Handle to the result that can be handed to other threads/components, e.g.
  /// [crate::diagnostics::ChannelDiagnosticSource].
  pub fn shared_channel(&self) -> SharedChannel {
    self.shared.clone()
  }

  /// Current channel number, or 0 if not known.
  pub fn channel(&self) -> u8 {
    self.shared.channel()
  }

  pub fn has_channel(&self) -> bool {
    self.shared.has_channel()
  }

  pub fn known_channel(&self) -> Option<u8> {
    self.shared.known_channel()
  }

  pub fn band(&self) -> Option<Band> {
    self.shared.band()
  }

  pub fn is_band_2_4ghz(&self) -> bool {
    self.shared.is_band_2_4ghz()
  }

  pub fn is_band_5ghz(&self) -> bool {
    self.shared.is_band_5ghz()
  }

  pub fn snapshot(&self) -> ChannelResult {
    self.shared.snapshot()
  }

  /// See [SharedChannel::lock].  Not reentrant: don't call other accessors on this monitor
  /// while holding the guard.
  pub fn lock(&self) -> ChannelGuard<'_> {
    self.shared.lock()
  }

  pub fn try_lock(&self) -> Option<ChannelGuard<'_>> {
    self.shared.try_lock()
  }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum SetupError {
  #[error("Channel monitor is already set up")]
  AlreadySetup,

  #[error("Unable to spawn channel monitor thread: {0}")]
  ThreadSpawn(String),
}

#[cfg(test)]
mod tests {
  use std::convert::Infallible;
  use crate::access_point::AccessPointRecord;
  use crate::bssid::Bssid;
  use super::*;

  struct NeverReady;

  impl WifiStation for NeverReady {
    type Error = Infallible;

    fn is_ready(&self) -> Result<bool, Self::Error> {
      Ok(false)
    }

    fn current_bssid(&self) -> Result<Bssid, Self::Error> {
      Ok(Bssid::default())
    }

    fn scan(
        &mut self,
        _on_result: &mut dyn FnMut(&AccessPointRecord),
    ) -> Result<usize, Self::Error> {
      Ok(0)
    }
  }

  #[test]
  fn test_defaults_before_setup() {
    let monitor = ChannelMonitor::new();
    assert_eq!(monitor.channel(), 0);
    assert!(!monitor.has_channel());
    assert!(!monitor.is_band_2_4ghz());
    assert!(!monitor.is_band_5ghz());
    assert!(!monitor.shutdown());
  }

  #[test]
  #[ntest::timeout(10000)]
  fn test_setup_only_once() {
    let _ = env_logger::builder().is_test(true).try_init();

    let monitor = ChannelMonitor::new();
    monitor.setup(NeverReady, MonitorConfig::default()).unwrap();
    assert_eq!(
      monitor.setup(NeverReady, MonitorConfig::default()),
      Err(SetupError::AlreadySetup));
    assert!(matches!(
      monitor.runner(NeverReady, SystemClock, MonitorConfig::default()),
      Err(SetupError::AlreadySetup)));

    assert!(monitor.shutdown());
    assert!(!monitor.shutdown());
  }

  #[test]
  fn test_lock_excludes_try_lock() {
    let monitor = ChannelMonitor::new();
    let guard = monitor.lock();
    assert!(monitor.try_lock().is_none());
    drop(guard);
    assert!(monitor.try_lock().is_some());
  }
}
