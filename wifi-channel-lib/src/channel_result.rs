use std::fmt::{Display, Formatter};
use crate::band::Band;

/// Last outcome of channel discovery.  `found == false` always pairs with `channel == 0`; the
/// only way to build a found result is [ChannelResult::found] which rejects channel 0.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ChannelResult {
  channel: u8,
  found: bool,
}

impl ChannelResult {
  pub const UNKNOWN: ChannelResult = ChannelResult { channel: 0, found: false };

  pub fn found(channel: u8) -> Self {
    if channel == 0 {
      Self::UNKNOWN
    } else {
      Self { channel, found: true }
    }
  }

  /// Channel number, or 0 if not known.
  pub fn channel(&self) -> u8 {
    self.channel
  }

  pub fn has_channel(&self) -> bool {
    self.found
  }

  pub fn known_channel(&self) -> Option<u8> {
    self.found.then_some(self.channel)
  }

  pub fn band(&self) -> Option<Band> {
    Band::from_channel(self.channel)
  }

  pub fn is_band_2_4ghz(&self) -> bool {
    self.band() == Some(Band::TwoPointFourGhz)
  }

  pub fn is_band_5ghz(&self) -> bool {
    self.band() == Some(Band::FiveGhz)
  }
}

impl Display for ChannelResult {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.known_channel() {
      Some(channel) => write!(f, "channel={channel}"),
      None => write!(f, "channel=<unknown>"),
    }
  }
}
