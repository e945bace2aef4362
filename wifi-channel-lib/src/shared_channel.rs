use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use crate::band::Band;
use crate::channel_result::ChannelResult;

/// The one piece of state shared across threads: the discovered channel, guarded by a
/// non-reentrant mutex.  Cheap to clone; every clone refers to the same result.
///
/// Every accessor takes the lock for its own duration, so never call one while holding a
/// [ChannelGuard] from the same value or the calling thread will deadlock.
#[derive(Debug, Clone, Default)]
pub struct SharedChannel {
  inner: Arc<Mutex<ChannelResult>>,
}

impl SharedChannel {
  pub fn new() -> Self {
    Default::default()
  }

  /// Enter a critical section spanning multiple reads (or a read and an invalidate).  Dropping
  /// the guard unlocks.
  pub fn lock(&self) -> ChannelGuard<'_> {
    // Writes are a single struct assignment, so a panicking holder can't leave the value
    // half-updated.  Safe to keep going with the poisoned data.
    let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
    ChannelGuard { guard }
  }

  /// Like [Self::lock] but returns None instead of blocking if another thread holds the lock.
  pub fn try_lock(&self) -> Option<ChannelGuard<'_>> {
    match self.inner.try_lock() {
      Ok(guard) => Some(ChannelGuard { guard }),
      Err(TryLockError::Poisoned(e)) => Some(ChannelGuard { guard: e.into_inner() }),
      Err(TryLockError::WouldBlock) => None,
    }
  }

  /// Copy of channel and found flag taken in one critical section.
  pub fn snapshot(&self) -> ChannelResult {
    *self.lock()
  }

  pub fn channel(&self) -> u8 {
    self.snapshot().channel()
  }

  pub fn has_channel(&self) -> bool {
    self.snapshot().has_channel()
  }

  pub fn known_channel(&self) -> Option<u8> {
    self.snapshot().known_channel()
  }

  pub fn band(&self) -> Option<Band> {
    self.snapshot().band()
  }

  pub fn is_band_2_4ghz(&self) -> bool {
    self.snapshot().is_band_2_4ghz()
  }

  pub fn is_band_5ghz(&self) -> bool {
    self.snapshot().is_band_5ghz()
  }

  pub(crate) fn reset(&self) {
    self.lock().invalidate();
  }

  pub(crate) fn record_match(&self, channel: u8) {
    let mut locked = self.lock();
    *locked.guard = ChannelResult::found(channel);
  }
}

pub struct ChannelGuard<'a> {
  guard: MutexGuard<'a, ChannelResult>,
}

impl ChannelGuard<'_> {
  /// Forget the current channel, e.g. because the caller knows the association changed.
  pub fn invalidate(&mut self) {
    *self.guard = ChannelResult::UNKNOWN;
  }
}

impl Deref for ChannelGuard<'_> {
  type Target = ChannelResult;

  fn deref(&self) -> &Self::Target {
    &self.guard
  }
}
