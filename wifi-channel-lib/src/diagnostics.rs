use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use log::{trace, warn};
use crate::shared_channel::SharedChannel;

/// First id available to application-defined diagnostic sources.
pub const DIAG_ID_USER: u16 = 32768;

pub const DEFAULT_CHANNEL_DIAG_ID: u16 = DIAG_ID_USER + 10;
pub const DEFAULT_CHANNEL_DIAG_NAME: &str = "net:channel";

/// Pull-based integer value sampled by a diagnostics registry on its own schedule.
pub trait IntegerDiagnosticSource: Send + Sync {
  fn id(&self) -> u16;
  fn name(&self) -> &str;
  fn sample(&self) -> Result<i32, DiagnosticError>;
}

#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum DiagnosticError {
  #[error("Diagnostic source id {0} is already registered")]
  DuplicateId(u16),

  #[error("Diagnostic source unavailable: {0}")]
  Unavailable(String),
}

/// Publishes the current channel (0 if unknown).  Sampling only reads.
#[derive(Debug, Clone)]
pub struct ChannelDiagnosticSource {
  id: u16,
  name: String,
  channel: SharedChannel,
}

impl ChannelDiagnosticSource {
  pub fn new(id: u16, name: impl Into<String>, channel: SharedChannel) -> Self {
    Self { id, name: name.into(), channel }
  }

  pub fn with_defaults(channel: SharedChannel) -> Self {
    Self::new(DEFAULT_CHANNEL_DIAG_ID, DEFAULT_CHANNEL_DIAG_NAME, channel)
  }
}

impl IntegerDiagnosticSource for ChannelDiagnosticSource {
  fn id(&self) -> u16 {
    self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn sample(&self) -> Result<i32, DiagnosticError> {
    let channel = self.channel.channel();
    trace!("ChannelDiagnosticSource {channel}");
    Ok(i32::from(channel))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSample {
  pub id: u16,
  pub name: String,
  pub value: i32,
}

/// Minimal registry of diagnostic sources keyed by id.  Whoever owns it decides when to call
/// [Self::sample_all].
#[derive(Default)]
pub struct DiagnosticsRegistry {
  sources: BTreeMap<u16, Box<dyn IntegerDiagnosticSource>>,
}

impl DiagnosticsRegistry {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn register(
      &mut self,
      source: impl IntegerDiagnosticSource + 'static,
  ) -> Result<(), DiagnosticError> {
    match self.sources.entry(source.id()) {
      Entry::Occupied(o) => Err(DiagnosticError::DuplicateId(*o.key())),
      Entry::Vacant(v) => {
        v.insert(Box::new(source));
        Ok(())
      }
    }
  }

  pub fn len(&self) -> usize {
    self.sources.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sources.is_empty()
  }

  pub fn sample(&self, id: u16) -> Option<Result<i32, DiagnosticError>> {
    self.sources.get(&id).map(|source| source.sample())
  }

  /// Sample every source in id order.  Sources that fail are logged and left out.
  pub fn sample_all(&self) -> Vec<DiagnosticSample> {
    self.sources.values()
        .filter_map(|source| match source.sample() {
          Ok(value) => Some(DiagnosticSample {
            id: source.id(),
            name: source.name().to_owned(),
            value,
          }),
          Err(e) => {
            warn!("Skipping diagnostic {} ({}): {e}", source.name(), source.id());
            None
          }
        })
        .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct BrokenSource;

  impl IntegerDiagnosticSource for BrokenSource {
    fn id(&self) -> u16 {
      DIAG_ID_USER
    }

    fn name(&self) -> &str {
      "broken"
    }

    fn sample(&self) -> Result<i32, DiagnosticError> {
      Err(DiagnosticError::Unavailable("always".to_owned()))
    }
  }

  #[test]
  fn test_channel_source_tracks_channel() {
    let shared = SharedChannel::new();
    let source = ChannelDiagnosticSource::with_defaults(shared.clone());
    assert_eq!(source.id(), DIAG_ID_USER + 10);
    assert_eq!(source.name(), "net:channel");
    assert_eq!(source.sample(), Ok(0));

    shared.record_match(36);
    assert_eq!(source.sample(), Ok(36));
    assert_eq!(shared.channel(), 36);
  }

  #[test]
  fn test_registry_rejects_duplicate_id() {
    let shared = SharedChannel::new();
    let mut registry = DiagnosticsRegistry::new();
    registry.register(ChannelDiagnosticSource::with_defaults(shared.clone())).unwrap();
    assert_eq!(
      registry.register(ChannelDiagnosticSource::with_defaults(shared)),
      Err(DiagnosticError::DuplicateId(DEFAULT_CHANNEL_DIAG_ID)));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn test_sample_all_skips_failures() {
    let shared = SharedChannel::new();
    shared.record_match(11);
    let mut registry = DiagnosticsRegistry::new();
    registry.register(BrokenSource).unwrap();
    registry.register(ChannelDiagnosticSource::with_defaults(shared)).unwrap();

    assert_eq!(registry.sample(DIAG_ID_USER), Some(Err(DiagnosticError::Unavailable("always".to_owned()))));
    assert_eq!(registry.sample(1), None);
    assert_eq!(registry.sample_all(), vec![DiagnosticSample {
      id: DEFAULT_CHANNEL_DIAG_ID,
      name: "net:channel".to_owned(),
      value: 11,
    }]);
  }
}
