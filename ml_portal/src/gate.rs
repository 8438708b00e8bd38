use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Admits one prediction at a time. Further submissions are turned away
/// rather than queued.
#[derive(Debug, Clone)]
pub struct PredictionGate {
    slot: Arc<Semaphore>,
}

/// Held for as long as a prediction is in flight.
#[derive(Debug)]
pub struct InFlight {
    _permit: OwnedSemaphorePermit,
}

impl Default for PredictionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionGate {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn try_enter(&self) -> Option<InFlight> {
        self.slot
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| InFlight { _permit: permit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_entry_is_refused_until_release() {
        let gate = PredictionGate::new();

        let first = gate.try_enter();
        assert!(first.is_some());
        assert!(gate.clone().try_enter().is_none());

        drop(first);
        assert!(gate.try_enter().is_some());
    }
}
