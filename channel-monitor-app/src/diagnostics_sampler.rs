use std::time::Duration;
use log::info;
use timer::{Guard, Timer};
use wifi_channel_lib::diagnostics::DiagnosticsRegistry;

/// Stands in for the device's cloud diagnostics upload: samples every registered source on a
/// fixed period and logs what it would have sent.
pub struct DiagnosticsSampler {
  registry: DiagnosticsRegistry,
  period: Duration,
}

impl DiagnosticsSampler {
  pub fn new(registry: DiagnosticsRegistry, period: Duration) -> Self {
    Self { registry, period }
  }

  /// Sampling continues until the returned hold is dropped.
  pub fn start(self) -> anyhow::Result<SamplerHold> {
    let timer = Timer::new();
    let registry = self.registry;
    info!("Sampling {} diagnostic source(s) every {}ms...", registry.len(), self.period.as_millis());
    let guard = timer.schedule_repeating(chrono::Duration::from_std(self.period)?, move || {
      for sample in registry.sample_all() {
        info!("diag {}={} (id={})", sample.name, sample.value, sample.id);
      }
    });
    Ok(SamplerHold { _guard: guard, _timer: timer })
  }
}

pub struct SamplerHold {
  _guard: Guard,
  _timer: Timer,
}
