//! Audio cues
//!
//! Maps simulation events to sound effects and hands them to whatever
//! backend the host provides. The simulation itself never waits on audio.

use rand::Rng;

use crate::sim::{GameEvent, GameOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Laser1,
    Laser2,
    Laser3,
    Explosion1,
    Explosion2,
    Explosion3,
    /// Looping engine sound while the human ship thrusts
    Thrust,
    GameOver,
    Win,
    Lose,
}

impl SoundEffect {
    pub const LASERS: [SoundEffect; 3] = [
        SoundEffect::Laser1,
        SoundEffect::Laser2,
        SoundEffect::Laser3,
    ];

    pub const EXPLOSIONS: [SoundEffect; 3] = [
        SoundEffect::Explosion1,
        SoundEffect::Explosion2,
        SoundEffect::Explosion3,
    ];
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Play a one-shot effect at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Start a looping effect
    fn start_loop(&mut self, effect: SoundEffect, volume: f32);

    /// Stop a looping effect; stopping a silent loop is a no-op
    fn stop_loop(&mut self, effect: SoundEffect);
}

/// Playback volume for every cue (0.0 - 1.0)
pub const SFX_VOLUME: f32 = 0.8;

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.backend.stop_loop(SoundEffect::Thrust);
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            SFX_VOLUME
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Play whatever `event` sounds like
    pub fn handle_event(&mut self, event: &GameEvent, rng: &mut impl Rng) {
        let vol = self.effective_volume();

        match event {
            GameEvent::ThrustStopped => self.backend.stop_loop(SoundEffect::Thrust),
            _ if vol <= 0.0 => {}
            GameEvent::LaserFired { .. } => {
                let effect = SoundEffect::LASERS[rng.random_range(0..SoundEffect::LASERS.len())];
                self.backend.play(effect, vol);
            }
            GameEvent::Explosion => {
                let effect =
                    SoundEffect::EXPLOSIONS[rng.random_range(0..SoundEffect::EXPLOSIONS.len())];
                self.backend.play(effect, vol);
            }
            GameEvent::ThrustStarted => self.backend.start_loop(SoundEffect::Thrust, vol),
            GameEvent::GameOver { outcome, .. } => {
                self.backend.stop_loop(SoundEffect::Thrust);
                let effect = match outcome {
                    GameOutcome::Over => SoundEffect::GameOver,
                    GameOutcome::Win => SoundEffect::Win,
                    GameOutcome::Lose => SoundEffect::Lose,
                };
                self.backend.play(effect, vol);
            }
            GameEvent::WaveCleared { .. }
            | GameEvent::ShipLost { .. }
            | GameEvent::Vibrate { .. } => {}
        }
    }
}

/// Backend that only logs what it would play (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: usize,
}

impl AudioBackend for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!("audio: play {:?} at {:.2}", effect, volume);
    }

    fn start_loop(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("audio: loop {:?} at {:.2}", effect, volume);
    }

    fn stop_loop(&mut self, effect: SoundEffect) {
        log::debug!("audio: stop {:?}", effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ShipType;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundEffect>,
        volumes: Vec<f32>,
        looping: Vec<SoundEffect>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.played.push(effect);
            self.volumes.push(volume);
        }

        fn start_loop(&mut self, effect: SoundEffect, _volume: f32) {
            self.looping.push(effect);
        }

        fn stop_loop(&mut self, effect: SoundEffect) {
            self.looping.retain(|e| *e != effect);
        }
    }

    #[test]
    fn test_laser_and_explosion_variants() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut audio = AudioManager::new(Recorder::default());
        for _ in 0..20 {
            audio.handle_event(
                &GameEvent::LaserFired {
                    source: ShipType::Human,
                },
                &mut rng,
            );
            audio.handle_event(&GameEvent::Explosion, &mut rng);
        }
        let played = &audio.backend().played;
        assert_eq!(played.len(), 40);
        assert!(played.iter().step_by(2).all(|e| SoundEffect::LASERS.contains(e)));
        assert!(
            played
                .iter()
                .skip(1)
                .step_by(2)
                .all(|e| SoundEffect::EXPLOSIONS.contains(e))
        );
    }

    #[test]
    fn test_thrust_loop() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle_event(&GameEvent::ThrustStarted, &mut rng);
        assert_eq!(audio.backend().looping, vec![SoundEffect::Thrust]);
        audio.handle_event(&GameEvent::ThrustStopped, &mut rng);
        assert!(audio.backend().looping.is_empty());
    }

    #[test]
    fn test_cues_play_at_sfx_volume() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle_event(&GameEvent::Explosion, &mut rng);
        audio.set_muted(true);
        audio.set_muted(false);
        audio.handle_event(&GameEvent::Explosion, &mut rng);
        assert_eq!(audio.backend().volumes, vec![SFX_VOLUME, SFX_VOLUME]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.handle_event(&GameEvent::Explosion, &mut rng);
        audio.handle_event(
            &GameEvent::GameOver {
                outcome: GameOutcome::Win,
                score: 0,
            },
            &mut rng,
        );
        assert!(audio.backend().played.is_empty());
    }

    #[test]
    fn test_outcome_cues() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut audio = AudioManager::new(Recorder::default());
        audio.handle_event(
            &GameEvent::GameOver {
                outcome: GameOutcome::Lose,
                score: 10,
            },
            &mut rng,
        );
        assert_eq!(audio.backend().played, vec![SoundEffect::Lose]);
    }
}
