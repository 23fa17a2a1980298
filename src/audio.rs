//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no asset files to load.
//! The event-to-sound mapping is target independent; playback is web only.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump from the ground
    Jump,
    /// Mid-air jump
    AirJump,
    /// Dash started
    Dash,
    /// Fell off the bottom of the world
    FallOut,
    /// Flag reached
    Win,
    /// Touched a spike
    Death,
    /// Manual respawn
    Respawn,
}

impl SoundEffect {
    /// Sound for a simulation event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::Jumped { air: false } => SoundEffect::Jump,
            GameEvent::Jumped { air: true } => SoundEffect::AirJump,
            GameEvent::DashStarted => SoundEffect::Dash,
            GameEvent::FellOut => SoundEffect::FallOut,
            GameEvent::FlagReached => SoundEffect::Win,
            GameEvent::Died => SoundEffect::Death,
            GameEvent::Respawned => SoundEffect::Respawn,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Take volumes from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.set_master_volume(settings.master_volume);
            self.set_sfx_volume(settings.sfx_volume);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        /// Set SFX volume (0.0 - 1.0)
        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play the sound for each event
        pub fn play_events(&self, events: &[GameEvent]) {
            for event in events {
                self.play(SoundEffect::for_event(*event));
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol, 300.0),
                SoundEffect::AirJump => self.play_jump(ctx, vol, 450.0),
                SoundEffect::Dash => self.play_dash(ctx, vol),
                SoundEffect::FallOut => self.play_fall_out(ctx, vol),
                SoundEffect::Win => self.play_win(ctx, vol),
                SoundEffect::Death => self.play_death(ctx, vol),
                SoundEffect::Respawn => self.play_respawn(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Jump - short upward chirp starting at `base`
        fn play_jump(&self, ctx: &AudioContext, vol: f32, base: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, base, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(base, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(base * 2.5, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Dash - fast falling whoosh
        fn play_dash(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.01, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.2, t + 0.03)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(150.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Fall out - long descending slide
        fn play_fall_out(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 500.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                .ok();
            osc.frequency().set_value_at_time(500.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.6)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.7).ok();
        }

        /// Win - major arpeggio in square waves, last note held over a low root
        fn play_win(&self, ctx: &AudioContext, vol: f32) {
            let notes = [523.25, 659.25, 783.99, 1046.5];
            for (i, freq) in notes.iter().enumerate() {
                let last = i == notes.len() - 1;
                let hold = if last { 0.6 } else { 0.12 };
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + i as f64 * 0.09;
                    gain.gain().set_value_at_time(vol * 0.15, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + hold)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + hold + 0.05).ok();
                }
            }

            // Root an octave down under the held note
            if let Some((osc, gain)) = self.create_osc(ctx, 261.63, OscillatorType::Sine) {
                let t = ctx.current_time() + 0.27;
                gain.gain().set_value_at_time(0.01, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.3, t + 0.05)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.7)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.75).ok();
            }
        }

        /// Death - sawtooth buzz that wobbles down, with a low thud
        fn play_death(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                    .ok();
                for (step, freq) in [220.0, 180.0, 200.0, 150.0, 165.0, 110.0].iter().enumerate() {
                    osc.frequency()
                        .set_value_at_time(*freq, t + step as f64 * 0.07)
                        .ok();
                }
                osc.start().ok();
                osc.stop_with_when(t + 0.55).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.45, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(35.0, t + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }

        /// Respawn - quick two-note ding
        fn play_respawn(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [600.0, 900.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }
    }
}
