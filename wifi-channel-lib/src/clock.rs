use std::time::Instant;

/// Monotonic time source for the settle delay.  Swapped out in tests so we don't have to sleep
/// through the real delay.
pub trait Clock {
  fn now(&self) -> Instant;
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> Instant {
    Instant::now()
  }
}
