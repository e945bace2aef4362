use std::time::Instant;
use crate::bssid::Bssid;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum DiscoveryState {
  /// Waiting for the station to become ready.
  Idle,

  /// Associated at `entered_at`, waiting out the settle delay before scanning.  `target` is
  /// None if the BSSID couldn't be read at association time; we'll try once more before
  /// scanning.
  ScanWait {
    entered_at: Instant,
    target: Option<Bssid>,
  },
}

impl DiscoveryState {
  pub fn kind(&self) -> DiscoveryStateKind {
    match self {
      DiscoveryState::Idle => DiscoveryStateKind::Idle,
      DiscoveryState::ScanWait { .. } => DiscoveryStateKind::ScanWait,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiscoveryStateKind {
  Idle,
  ScanWait,
}
