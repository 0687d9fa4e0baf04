//! Reload pulse bus.
//!
//! Carries a monotonic generation number. The list feed refetches on every
//! change; repository mutations are the only writers.

use std::sync::Arc;
use tokio::sync::watch;

/// Generation the bus starts at. Counts as the pulse that triggers the first load.
pub const INITIAL_GENERATION: u64 = 1;

/// Shared reload trigger.
///
/// Cloning hands out another handle to the same bus.
#[derive(Debug, Clone)]
pub struct ReloadBus {
    tx: Arc<watch::Sender<u64>>,
}

impl ReloadBus {
    /// Create a bus holding the initial pulse.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(INITIAL_GENERATION);
        Self { tx: Arc::new(tx) }
    }

    /// Fire one pulse. Returns the new generation.
    pub fn pulse(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|current| {
            *current += 1;
            generation = *current;
        });
        tracing::debug!(generation, "Reload pulse");
        generation
    }

    /// Latest generation.
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Subscribe to pulses. The current generation is marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ReloadBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_increments_generation() {
        let bus = ReloadBus::new();
        assert_eq!(bus.generation(), INITIAL_GENERATION);
        assert_eq!(bus.pulse(), INITIAL_GENERATION + 1);
        assert_eq!(bus.clone().pulse(), INITIAL_GENERATION + 2);
        assert_eq!(bus.generation(), INITIAL_GENERATION + 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_pulse() {
        let bus = ReloadBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.pulse();

        a.changed().await.unwrap();
        b.changed().await.unwrap();
        assert_eq!(*a.borrow(), 2);
        assert_eq!(*b.borrow(), 2);
    }
}
