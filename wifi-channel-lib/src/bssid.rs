use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Hardware (MAC) address of a specific access point radio.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bssid(pub [u8; 6]);

impl Bssid {
  pub const fn new(octets: [u8; 6]) -> Self {
    Self(octets)
  }

  pub fn octets(&self) -> &[u8; 6] {
    &self.0
  }
}

impl From<[u8; 6]> for Bssid {
  fn from(value: [u8; 6]) -> Self {
    Self(value)
  }
}

impl Display for Bssid {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let [a, b, c, d, e, g] = self.0;
    write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
  }
}

impl Debug for Bssid {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "Bssid({self})")
  }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum BssidParseError {
  #[error("Expected 6 octets, got {0}")]
  WrongLength(usize),

  #[error("Invalid octet: {0:?}")]
  InvalidOctet(String),
}

impl FromStr for Bssid {
  type Err = BssidParseError;

  /// Accepts `AA:BB:CC:DD:EE:FF` or `aa-bb-cc-dd-ee-ff`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let parts: Vec<&str> = s.trim().split(|c| c == ':' || c == '-').collect();
    if parts.len() != 6 {
      return Err(BssidParseError::WrongLength(parts.len()));
    }

    let mut octets = [0u8; 6];
    for (dst, part) in octets.iter_mut().zip(parts) {
      if part.len() != 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BssidParseError::InvalidOctet(part.to_owned()));
      }
      *dst = u8::from_str_radix(part, 16)
          .map_err(|_| BssidParseError::InvalidOctet(part.to_owned()))?;
    }
    Ok(Self(octets))
  }
}
