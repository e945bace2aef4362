use log::trace;
use crate::access_point::AccessPointRecord;
use crate::bssid::Bssid;
use crate::shared_channel::SharedChannel;

/// Receives each scan result and records the channel of the one matching our BSSID.  The lock
/// is taken per match, never across the whole scan, so readers only ever wait on a single
/// assignment.
pub(crate) struct ScanCorrelator<'a> {
  shared: &'a SharedChannel,
  target: Bssid,
  matches: usize,
}

impl<'a> ScanCorrelator<'a> {
  pub fn new(shared: &'a SharedChannel, target: Bssid) -> Self {
    Self { shared, target, matches: 0 }
  }

  pub fn on_result(&mut self, record: &AccessPointRecord) {
    if record.bssid != self.target {
      return;
    }

    if record.channel == 0 {
      // Would read back as unknown and clobber an earlier duplicate that did carry a channel.
      trace!("Ignoring {} with no channel", record.bssid);
      return;
    }

    // Duplicates shouldn't happen but if they do the last one with a channel wins.
    trace!("Matched {} on channel {} (ssid={:?}, rssi={})",
        record.bssid, record.channel, record.ssid, record.rssi);
    self.shared.record_match(record.channel);
    self.matches += 1;
  }

  pub fn matches(&self) -> usize {
    self.matches
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TARGET: Bssid = Bssid::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
  const OTHER: Bssid = Bssid::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x00]);

  #[test]
  fn test_single_match() {
    let shared = SharedChannel::new();
    let mut correlator = ScanCorrelator::new(&shared, TARGET);
    correlator.on_result(&AccessPointRecord::new(OTHER, 1));
    correlator.on_result(&AccessPointRecord::new(TARGET, 6));
    correlator.on_result(&AccessPointRecord::new(OTHER, 11));
    assert_eq!(correlator.matches(), 1);
    assert_eq!(shared.channel(), 6);
    assert!(shared.has_channel());
  }

  #[test]
  fn test_no_match_leaves_result_alone() {
    let shared = SharedChannel::new();
    let mut correlator = ScanCorrelator::new(&shared, TARGET);
    correlator.on_result(&AccessPointRecord::new(OTHER, 36));
    assert_eq!(correlator.matches(), 0);
    assert_eq!(shared.channel(), 0);
    assert!(!shared.has_channel());
  }

  #[test]
  fn test_duplicate_last_wins() {
    let shared = SharedChannel::new();
    let mut correlator = ScanCorrelator::new(&shared, TARGET);
    correlator.on_result(&AccessPointRecord::new(TARGET, 6));
    correlator.on_result(&AccessPointRecord::new(TARGET, 149));
    assert_eq!(correlator.matches(), 2);
    assert_eq!(shared.channel(), 149);
  }

  #[test]
  fn test_channel_zero_does_not_clobber_match() {
    let shared = SharedChannel::new();
    let mut correlator = ScanCorrelator::new(&shared, TARGET);
    correlator.on_result(&AccessPointRecord::new(TARGET, 36));
    correlator.on_result(&AccessPointRecord::new(TARGET, 0));
    assert_eq!(correlator.matches(), 1);
    assert_eq!(shared.known_channel(), Some(36));
  }
}
