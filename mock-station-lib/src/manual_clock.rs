use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wifi_channel_lib::clock::Clock;

/// Clock that only moves when told to.  Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
  base: Instant,
  offset: Arc<Mutex<Duration>>,
}

impl Default for ManualClock {
  fn default() -> Self {
    Self {
      base: Instant::now(),
      offset: Default::default(),
    }
  }
}

impl ManualClock {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn advance(&self, by: Duration) {
    *self.offset.lock().unwrap() += by;
  }

  pub fn elapsed(&self) -> Duration {
    *self.offset.lock().unwrap()
  }
}

impl Clock for ManualClock {
  fn now(&self) -> Instant {
    self.base + self.elapsed()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clones_advance_together() {
    let clock = ManualClock::new();
    let other = clock.clone();
    let start = clock.now();
    other.advance(Duration::from_millis(4000));
    assert_eq!(clock.now() - start, Duration::from_millis(4000));
  }
}
