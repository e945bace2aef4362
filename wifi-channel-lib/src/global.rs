use lazy_static::lazy_static;
use crate::channel_monitor::ChannelMonitor;

lazy_static! {
  static ref GLOBAL_MONITOR: ChannelMonitor = ChannelMonitor::new();
}

/// The process-wide monitor, created on first access and never replaced.  Call
/// [ChannelMonitor::setup] on it once from application init.
pub fn instance() -> &'static ChannelMonitor {
  &GLOBAL_MONITOR
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_same_instance() {
    assert!(std::ptr::eq(instance(), instance()));
    assert_eq!(instance().channel(), 0);
  }
}
