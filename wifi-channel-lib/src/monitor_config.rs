use std::time::Duration;

/// Time to let a fresh association stabilize before scanning.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(4000);

/// The readiness signal has no blocking wait, so we poll at this interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub const DEFAULT_THREAD_NAME: &str = "WiFiChannel";

pub const DEFAULT_STACK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
  settle_delay: Duration,
  poll_interval: Duration,
  thread_name: String,
  stack_size: usize,
}

impl Default for MonitorConfig {
  fn default() -> Self {
    Self {
      settle_delay: DEFAULT_SETTLE_DELAY,
      poll_interval: DEFAULT_POLL_INTERVAL,
      thread_name: DEFAULT_THREAD_NAME.to_owned(),
      stack_size: DEFAULT_STACK_SIZE,
    }
  }
}

impl MonitorConfig {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn set_settle_delay(mut self, settle_delay: Duration) -> Self {
    self.settle_delay = settle_delay;
    self
  }

  pub fn set_poll_interval(mut self, poll_interval: Duration) -> Self {
    self.poll_interval = poll_interval;
    self
  }

  pub fn set_thread_name(mut self, thread_name: impl Into<String>) -> Self {
    self.thread_name = thread_name.into();
    self
  }

  /// Host platforms may round this up to their minimum.
  pub fn set_stack_size(mut self, stack_size: usize) -> Self {
    self.stack_size = stack_size;
    self
  }

  pub fn settle_delay(&self) -> Duration {
    self.settle_delay
  }

  pub fn poll_interval(&self) -> Duration {
    self.poll_interval
  }

  pub fn thread_name(&self) -> &str {
    &self.thread_name
  }

  pub fn stack_size(&self) -> usize {
    self.stack_size
  }
}
