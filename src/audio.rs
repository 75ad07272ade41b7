//! Audio output
//!
//! The simulation queues [`SoundEvent`]s; a [`SoundSink`] turns them into
//! noise. In the browser that is [`AudioManager`], a one-oscillator synth on
//! the Web Audio API. Everything is fire-and-forget: a sound that cannot be
//! produced is simply skipped.

use crate::sim::SoundEvent;

/// Consumer of sound events
pub trait SoundSink {
    fn play(&mut self, event: SoundEvent);
}

/// Discards everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Records events in order
impl SoundSink for Vec<SoundEvent> {
    fn play(&mut self, event: SoundEvent) {
        self.push(event);
    }
}

/// Peak gain of every tone before volume scaling
pub const TONE_PEAK_GAIN: f32 = 0.2;
/// Exponential ramps cannot reach zero
pub const TONE_FLOOR_GAIN: f32 = 0.001;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundSink, TONE_FLOOR_GAIN, TONE_PEAK_GAIN};
    use crate::settings::Settings;
    use crate::sim::{SoundEvent, Tone, Waveform};

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    /// Web Audio synth
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
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
                volume: Settings::default().effective_volume(),
            }
        }

        /// Pick up volume and mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Oscillator wired through a gain node to the output
        fn create_osc(
            &self,
            ctx: &AudioContext,
            tone: &Tone,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(oscillator_type(tone.waveform));
            osc.frequency().set_value(tone.freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, tone: Tone) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, &tone) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + f64::from(tone.duration);

            gain.gain()
                .set_value_at_time(TONE_PEAK_GAIN * self.volume, t)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(TONE_FLOOR_GAIN, end)
                .ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, event: SoundEvent) {
            self.play_tone(event.tone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<SoundEvent> = Vec::new();
        sink.play(SoundEvent::Power);
        sink.play(SoundEvent::Crash);
        assert_eq!(sink, vec![SoundEvent::Power, SoundEvent::Crash]);
    }

    #[test]
    fn test_null_sink_accepts_anything() {
        let mut sink = NullSink;
        sink.play(SoundEvent::Birthday);
        let dyn_sink: &mut dyn SoundSink = &mut sink;
        dyn_sink.play(SoundEvent::Crash);
    }
}
