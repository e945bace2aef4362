use std::ops::RangeInclusive;

pub const BAND_2_4_GHZ_CHANNELS: RangeInclusive<u8> = 1..=14;
pub const BAND_5_GHZ_CHANNELS: RangeInclusive<u8> = 36..=177;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Band {
  TwoPointFourGhz,
  FiveGhz,
}

impl Band {
  /// Classify a channel number.  Channel 0 (unknown) and anything between or beyond the two
  /// ranges belongs to neither band.
  pub fn from_channel(channel: u8) -> Option<Band> {
    if BAND_2_4_GHZ_CHANNELS.contains(&channel) {
      Some(Band::TwoPointFourGhz)
    } else if BAND_5_GHZ_CHANNELS.contains(&channel) {
      Some(Band::FiveGhz)
    } else {
      None
    }
  }
}
