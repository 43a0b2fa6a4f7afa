//! Platform abstraction layer
//!
//! Device services the simulation asks for but never waits on. Hosts plug in
//! their own implementations; the headless runner only logs.

use crate::sim::GameEvent;

/// Device vibration
pub trait Haptics {
    fn vibrate(&mut self, duration_ms: u64);
}

/// Forward a vibration request to `haptics`; other events are ignored
pub fn dispatch_haptics(haptics: &mut impl Haptics, event: &GameEvent) {
    if let GameEvent::Vibrate { duration_ms } = event {
        haptics.vibrate(*duration_ms);
    }
}

/// Haptics stand-in for hosts without a vibrator
#[derive(Debug, Default)]
pub struct LogHaptics {
    pub pulses: usize,
}

impl Haptics for LogHaptics {
    fn vibrate(&mut self, duration_ms: u64) {
        self.pulses += 1;
        log::debug!("haptics: vibrate {}ms", duration_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_vibrate_events_pulse() {
        let mut haptics = LogHaptics::default();
        dispatch_haptics(&mut haptics, &GameEvent::Explosion);
        dispatch_haptics(&mut haptics, &GameEvent::Vibrate { duration_ms: 500 });
        assert_eq!(haptics.pulses, 1);
    }
}
