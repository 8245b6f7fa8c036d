use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Re-entrancy flag for document generation, shareable across threads
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag if it is clear. The returned guard clears it on drop,
    /// whether the generation succeeded, failed or panicked.
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                flag: Arc::clone(&self.flag),
            })
    }

    pub fn is_active(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Proof that a generation is running; owned by whoever runs it
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_refused() {
        let in_flight = InFlight::new();
        let guard = in_flight.try_begin();
        assert!(guard.is_some());
        assert!(in_flight.try_begin().is_none());
        assert!(in_flight.is_active());
    }

    #[test]
    fn test_drop_clears_flag() {
        let in_flight = InFlight::new();
        {
            let _guard = in_flight.try_begin().unwrap();
        }
        assert!(!in_flight.is_active());
        assert!(in_flight.try_begin().is_some());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let in_flight = InFlight::new();
        let observer = in_flight.clone();
        let _guard = in_flight.try_begin().unwrap();
        assert!(observer.is_active());
    }
}
