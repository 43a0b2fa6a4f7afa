//! Rock Raiders headless runner
//!
//! Plays one session with a scripted pilot in the human seat, feeding the
//! events to logging audio and haptics backends, and prints a summary.
//!
//! # Usage
//!
//! ```bash
//! rock-raiders
//! rock-raiders settings.json --seed 7
//! rock-raiders --mode versus --max-ticks 5000
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use rock_raiders::audio::{AudioManager, LogAudio};
    use rock_raiders::platform::{LogHaptics, dispatch_haptics};
    use rock_raiders::sim::{GamePhase, GameState, TickInput, view};
    use rock_raiders::{GameMode, Settings};

    #[derive(Parser)]
    #[command(name = "rock-raiders")]
    #[command(author, version, about = "Rock Raiders - headless arena session")]
    struct Args {
        /// Settings file (JSON); defaults are used when omitted
        settings: Option<PathBuf>,

        /// Session seed
        #[arg(long, short = 's', default_value = "1")]
        seed: u64,

        /// Override the mode from the settings (classic, coop, versus)
        #[arg(long, short = 'm')]
        mode: Option<String>,

        /// Stop after this many ticks even if the game is not over
        #[arg(long, default_value = "18000")]
        max_ticks: u64,
    }

    /// Scripted human pilot: keep turning, keep shooting, thrust in bursts
    fn autopilot(tick: u64) -> TickInput {
        TickInput {
            rotate_left: false,
            rotate_right: tick % 90 < 60,
            thrust: tick % 120 < 10,
            fire: true,
        }
    }

    fn load_settings(args: &Args) -> Result<Settings> {
        let mut settings = match &args.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Settings::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Settings::default(),
        };

        if let Some(mode) = &args.mode {
            let Some(mode) = GameMode::from_str(mode) else {
                bail!("unknown mode '{mode}'");
            };
            settings.mode = mode;
        }
        Ok(settings)
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let settings = load_settings(&args)?;

        let mut state = GameState::new(args.seed, &settings);
        let mut audio = AudioManager::new(LogAudio::default());
        audio.set_muted(!settings.sound);
        let mut haptics = LogHaptics::default();
        // Cue variants draw from their own RNG, never the session one
        let mut cue_rng = Pcg32::seed_from_u64(args.seed.wrapping_add(1));

        let mut last_message: Option<String> = None;
        while !state.is_over() && state.ticks < args.max_ticks {
            state.advance(&autopilot(state.ticks));

            for event in state.drain_events() {
                audio.handle_event(&event, &mut cue_rng);
                dispatch_haptics(&mut haptics, &event);
            }

            let message = view::overlay_message(&state).map(str::to_string);
            if message != last_message {
                if let Some(text) = &message {
                    log::info!("overlay: {}", text);
                }
                last_message = message;
            }
        }

        println!("Mode:    {}", settings.mode.as_str());
        println!("Seed:    {}", args.seed);
        println!("Ticks:   {}", state.ticks);
        println!("Wave:    {}", state.overlay.wave);
        for line in view::hud(&state) {
            println!("{line}");
        }
        println!(
            "Cues:    {} sounds, {} vibrations",
            audio.backend().played,
            haptics.pulses
        );

        match state.phase {
            GamePhase::GameOver(outcome) => {
                println!("Result:  {}", outcome.headline());
                Ok(())
            }
            GamePhase::Playing => {
                println!("Result:  stopped after {} ticks", state.ticks);
                Ok(())
            }
            GamePhase::Aborted => bail!("session aborted at tick {}", state.ticks),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Rock Raiders (headless) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}
