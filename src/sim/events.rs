//! Sound events emitted by the simulation
//!
//! The simulation never talks to an audio device; it queues these and the
//! scene controller hands them to whatever sink the host provides.

use serde::{Deserialize, Serialize};

/// Oscillator shapes available to the synth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// A single enveloped tone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Frequency (Hz)
    pub freq: f32,
    /// Duration (seconds)
    pub duration: f32,
    pub waveform: Waveform,
}

impl Tone {
    pub const fn new(freq: f32, duration: f32, waveform: Waveform) -> Self {
        Self {
            freq,
            duration,
            waveform,
        }
    }
}

/// Notes the background arpeggio picks from
pub const MUSIC_NOTES: [f32; 4] = [440.0, 554.0, 659.0, 880.0];
pub const MUSIC_NOTE_SECS: f32 = 0.15;

/// Sound requests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SoundEvent {
    /// Power-up collected
    Power,
    /// Run ended
    Crash,
    /// Wind gust; pitch is rolled by the simulation
    Wind { freq: f32 },
    /// Birthday chime
    Birthday,
    /// Background music note
    Note(Tone),
}

impl SoundEvent {
    /// Resolve to the tone the synth should play
    pub fn tone(&self) -> Tone {
        match *self {
            SoundEvent::Power => Tone::new(660.0, 0.2, Waveform::Triangle),
            SoundEvent::Crash => Tone::new(120.0, 0.3, Waveform::Sawtooth),
            SoundEvent::Wind { freq } => Tone::new(freq, 0.1, Waveform::Square),
            SoundEvent::Birthday => Tone::new(880.0, 0.3, Waveform::Triangle),
            SoundEvent::Note(tone) => tone,
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEvent::Note(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_tones() {
        assert_eq!(SoundEvent::Power.tone(), Tone::new(660.0, 0.2, Waveform::Triangle));
        assert_eq!(SoundEvent::Crash.tone().waveform, Waveform::Sawtooth);
        assert_eq!(SoundEvent::Wind { freq: 250.0 }.tone().freq, 250.0);
        assert!(SoundEvent::Note(Tone::new(440.0, 0.15, Waveform::Sine)).is_music());
    }
}
