//! Offline Signal Renderer
//!
//! Synthesizes the stereo binaural waveform: left channel at the base
//! frequency, right channel at base + beat, both scaled by the session
//! volume. Rendering is a pure function of `SessionParams` - identical
//! parameters always produce bit-identical buffers, which is the contract a
//! live dual-oscillator playback path must mirror.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::engine::buffer::{AudioBuffer, ChannelLayout};
use crate::error::{EntrainError, Result};

// Routing test tone, matching the live left/right test buttons
const TEST_TONE_HZ: f64 = 440.0;
const TEST_TONE_GAIN: f64 = 0.5;
const TEST_TONE_SECS: f64 = 0.5;

// ============================================================================
// Session Parameters
// ============================================================================

/// Parameters describing one binaural session render
///
/// Validated before rendering begins and never mutated afterwards; the
/// renderer borrows it immutably.
///
/// # Invariants
/// - `base_hz` > 0 and finite
/// - `beat_hz` >= 0 and finite
/// - `duration_secs` > 0 and finite
/// - `volume` in [0.0, 1.0] and finite
/// - `sample_rate` > 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Carrier frequency presented to the left ear, in Hz
    pub base_hz: f64,
    /// Offset added to the base for the right ear, in Hz
    pub beat_hz: f64,
    /// Session length in seconds
    pub duration_secs: f64,
    /// Linear output gain in [0.0, 1.0]
    pub volume: f32,
    /// Output sample rate in Hz
    pub sample_rate: u32,
}

impl SessionParams {
    /// Create session parameters with the default 44.1kHz sample rate
    pub fn new(base_hz: f64, beat_hz: f64, duration_secs: f64, volume: f32) -> Self {
        Self {
            base_hz,
            beat_hz,
            duration_secs,
            volume,
            sample_rate: 44100,
        }
    }

    /// Check all parameter invariants
    ///
    /// # Returns
    /// * `Ok(())` if every invariant holds
    /// * `Err(EntrainError::InvalidParameter)` naming the first violated field
    pub fn validate(&self) -> Result<()> {
        if !self.base_hz.is_finite() || self.base_hz <= 0.0 {
            return Err(invalid("base_hz", "must be a positive finite frequency"));
        }
        if !self.beat_hz.is_finite() || self.beat_hz < 0.0 {
            return Err(invalid("beat_hz", "must be a non-negative finite frequency"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(invalid("duration_secs", "must be a positive finite duration"));
        }
        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(invalid("volume", "must be within [0.0, 1.0]"));
        }
        if self.sample_rate == 0 {
            return Err(invalid("sample_rate", "must be positive"));
        }
        Ok(())
    }

    /// Number of samples per channel this session renders to
    ///
    /// Truncates toward zero: a duration that is not a whole number of
    /// samples loses the trailing sub-sample remainder. That drift is
    /// accepted, not an error.
    pub fn num_samples(&self) -> usize {
        (self.duration_secs * self.sample_rate as f64).floor() as usize
    }

    /// Frequency presented to the right ear (base + beat), in Hz
    pub fn right_hz(&self) -> f64 {
        self.base_hz + self.beat_hz
    }
}

fn invalid(field: &'static str, reason: &str) -> EntrainError {
    EntrainError::InvalidParameter {
        field,
        reason: reason.to_string(),
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a binaural session into a stereo buffer
///
/// Each channel holds `floor(duration_secs * sample_rate)` samples computed
/// as `volume * sin(2π * f * i / sample_rate)` with `f = base_hz` on the
/// left and `f = base_hz + beat_hz` on the right. Both oscillators start in
/// phase at t = 0, matching a live two-oscillator graph started
/// simultaneously. Phase math runs in f64 before narrowing to f32 storage.
///
/// # Arguments
/// * `params` - Validated session parameters
///
/// # Returns
/// * `Ok(AudioBuffer)` - Stereo buffer, left = channel 0, right = channel 1
/// * `Err(EntrainError::InvalidParameter)` - If any invariant is violated
pub fn render(params: &SessionParams) -> Result<AudioBuffer> {
    params.validate()?;

    let num_samples = params.num_samples();
    let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Stereo, params.sample_rate);

    fill_sine(
        buffer.channel_mut(0),
        params.base_hz,
        params.volume as f64,
        params.sample_rate,
    );
    fill_sine(
        buffer.channel_mut(1),
        params.right_hz(),
        params.volume as f64,
        params.sample_rate,
    );

    Ok(buffer)
}

/// Fill one channel with a fixed-frequency sine wave
fn fill_sine(channel: &mut [f32], frequency: f64, gain: f64, sample_rate: u32) {
    let omega = TAU * frequency;
    let rate = sample_rate as f64;

    for (i, sample) in channel.iter_mut().enumerate() {
        let t = i as f64 / rate;
        *sample = (gain * (omega * t).sin()) as f32;
    }
}

// ============================================================================
// Channel Routing Test Tone
// ============================================================================

/// Which side of the stereo field a routing test targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StereoSide {
    Left,
    Right,
}

impl StereoSide {
    /// Channel index within a stereo buffer (left = 0, right = 1)
    pub fn channel_index(&self) -> usize {
        match self {
            StereoSide::Left => 0,
            StereoSide::Right => 1,
        }
    }
}

/// Render the channel routing test tone
///
/// A 440Hz sine at half gain for half a second, placed on the requested
/// side of a stereo buffer with the other side silent. Lets a listener
/// verify left/right routing of their playback chain.
pub fn render_test_tone(side: StereoSide, sample_rate: u32) -> Result<AudioBuffer> {
    if sample_rate == 0 {
        return Err(invalid("sample_rate", "must be positive"));
    }

    let num_samples = (TEST_TONE_SECS * sample_rate as f64).floor() as usize;
    let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Stereo, sample_rate);

    fill_sine(
        buffer.channel_mut(side.channel_index()),
        TEST_TONE_HZ,
        TEST_TONE_GAIN,
        sample_rate,
    );

    Ok(buffer)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn valid_params() -> SessionParams {
        SessionParams::new(200.0, 5.0, 1.0, 1.0)
    }

    // ------------------------------------------------------------------------
    // Parameter validation
    // ------------------------------------------------------------------------

    #[test]
    fn test_valid_params_pass() {
        assert!(valid_params().validate().is_ok());
    }

    #[test_case(-10.0, 5.0, 1.0, 1.0, 44100 ; "negative base frequency")]
    #[test_case(0.0, 5.0, 1.0, 1.0, 44100 ; "zero base frequency")]
    #[test_case(200.0, -1.0, 1.0, 1.0, 44100 ; "negative beat frequency")]
    #[test_case(200.0, 5.0, 0.0, 1.0, 44100 ; "zero duration")]
    #[test_case(200.0, 5.0, -2.0, 1.0, 44100 ; "negative duration")]
    #[test_case(200.0, 5.0, 1.0, 1.5, 44100 ; "volume above one")]
    #[test_case(200.0, 5.0, 1.0, -0.1, 44100 ; "negative volume")]
    #[test_case(200.0, 5.0, 1.0, 1.0, 0 ; "zero sample rate")]
    #[test_case(f64::NAN, 5.0, 1.0, 1.0, 44100 ; "nan base frequency")]
    #[test_case(200.0, f64::INFINITY, 1.0, 1.0, 44100 ; "infinite beat frequency")]
    fn test_invalid_params_rejected(
        base_hz: f64,
        beat_hz: f64,
        duration_secs: f64,
        volume: f32,
        sample_rate: u32,
    ) {
        let params = SessionParams {
            base_hz,
            beat_hz,
            duration_secs,
            volume,
            sample_rate,
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, EntrainError::InvalidParameter { .. }));
    }

    #[test]
    fn test_render_rejects_invalid_params() {
        let mut params = valid_params();
        params.base_hz = -10.0;
        assert!(matches!(
            render(&params),
            Err(EntrainError::InvalidParameter { field: "base_hz", .. })
        ));
    }

    // ------------------------------------------------------------------------
    // Output shape
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_length_is_floor_of_duration() {
        let params = valid_params();
        let buffer = render(&params).unwrap();

        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.len(), 44100);
        assert_eq!(buffer.sample_rate, 44100);
    }

    #[test]
    fn test_render_truncates_sub_sample_duration() {
        // 0.9999 s at 10Hz sample rate is 9.999 samples, floored to 9
        let params = SessionParams {
            base_hz: 1.0,
            beat_hz: 0.0,
            duration_secs: 0.9999,
            volume: 1.0,
            sample_rate: 10,
        };
        assert_eq!(render(&params).unwrap().len(), 9);
    }

    #[test]
    fn test_render_starts_in_phase_at_zero() {
        let buffer = render(&valid_params()).unwrap();

        // sin(0) on both oscillators
        assert_eq!(buffer.channel(0)[0], 0.0);
        assert_eq!(buffer.channel(1)[0], 0.0);
    }

    #[test]
    fn test_render_sample_formula() {
        let params = valid_params();
        let buffer = render(&params).unwrap();

        for &i in &[1usize, 100, 4410, 44099] {
            let t = i as f64 / 44100.0;
            let expected_left = (TAU * 200.0 * t).sin() as f32;
            let expected_right = (TAU * 205.0 * t).sin() as f32;
            assert_relative_eq!(buffer.channel(0)[i], expected_left, max_relative = 1e-6);
            assert_relative_eq!(buffer.channel(1)[i], expected_right, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_render_respects_volume() {
        let mut params = valid_params();
        params.volume = 0.25;
        let buffer = render(&params).unwrap();

        let peak = buffer
            .channel(0)
            .iter()
            .fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= 0.25 + 1e-6);
        assert!(peak > 0.2, "volume-scaled signal should still be audible");
    }

    #[test]
    fn test_render_samples_stay_in_range() {
        let buffer = render(&valid_params()).unwrap();
        assert!(buffer.is_finite());
        assert!(buffer
            .samples
            .iter()
            .flatten()
            .all(|s| (-1.0..=1.0).contains(s)));
    }

    // ------------------------------------------------------------------------
    // Boundary behavior
    // ------------------------------------------------------------------------

    #[test]
    fn test_zero_beat_renders_identical_channels() {
        let mut params = valid_params();
        params.beat_hz = 0.0;
        let buffer = render(&params).unwrap();

        assert_eq!(buffer.channel(0), buffer.channel(1));
    }

    #[test]
    fn test_zero_volume_renders_silence() {
        let mut params = valid_params();
        params.volume = 0.0;
        let buffer = render(&params).unwrap();

        assert!(buffer.samples.iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn test_render_is_deterministic() {
        let params = valid_params();
        let first = render(&params).unwrap();
        let second = render(&params).unwrap();

        // Bit-identical, not merely close
        assert_eq!(first, second);
    }

    // ------------------------------------------------------------------------
    // Routing test tone
    // ------------------------------------------------------------------------

    #[test]
    fn test_test_tone_targets_requested_side() {
        for (side, active, silent) in [(StereoSide::Left, 0, 1), (StereoSide::Right, 1, 0)] {
            let buffer = render_test_tone(side, 44100).unwrap();

            assert_eq!(buffer.len(), 22050);
            assert!(buffer.channel(silent).iter().all(|&s| s == 0.0));

            let peak = buffer
                .channel(active)
                .iter()
                .fold(0.0_f32, |acc, s| acc.max(s.abs()));
            assert_relative_eq!(peak, 0.5, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_test_tone_frequency() {
        let buffer = render_test_tone(StereoSide::Left, 44100).unwrap();

        // 440Hz at 44.1kHz crosses zero upward every 44100/440 ~ 100.2 samples
        let expected = (TAU * 440.0 * (100.0 / 44100.0)).sin() as f32 * 0.5;
        assert_relative_eq!(buffer.channel(0)[100], expected, max_relative = 1e-5);
    }

    #[test]
    fn test_test_tone_rejects_zero_rate() {
        assert!(render_test_tone(StereoSide::Left, 0).is_err());
    }
}
