//! Audio Buffer Management
//!
//! Provides the sample buffer type shared by the renderer and the encoder.
//! Samples are stored non-interleaved as 32-bit floats, one `Vec<f32>` per
//! channel, in the nominal range [-1.0, 1.0].

// ============================================================================
// Channel Layout
// ============================================================================

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
    /// Single channel (mono)
    Mono,
    /// Two channels (stereo: left, right)
    #[default]
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Sample buffer holding one `Vec<f32>` per channel plus the sample rate.
///
/// Created by the renderer and consumed by the encoder. Once handed to the
/// encoder the buffer is only read, never mutated.
///
/// # Example
/// ```
/// use entrain::engine::buffer::{AudioBuffer, ChannelLayout};
///
/// // One second of stereo silence at 44.1kHz
/// let buffer = AudioBuffer::new(44100, ChannelLayout::Stereo, 44100);
/// assert_eq!(buffer.num_channels(), 2);
/// assert_eq!(buffer.len(), 44100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is samples
    pub samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a new audio buffer with the specified length, layout and rate
    ///
    /// All samples are initialized to 0.0 (silence).
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples per channel
    /// * `layout` - Channel configuration (Mono or Stereo)
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(num_samples: usize, layout: ChannelLayout, sample_rate: u32) -> Self {
        let samples = vec![vec![0.0_f32; num_samples]; layout.num_channels()];
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get the number of channels
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of samples per channel
    ///
    /// The length of the first channel is authoritative; the encoder rejects
    /// buffers whose channels disagree.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty (no samples)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Get mutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.samples[index]
    }

    /// Convert the buffer to interleaved format
    ///
    /// # Returns
    /// A Vec<f32> with samples in frame order (L, R, L, R, ... for stereo)
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_channels = self.num_channels();
        let num_samples = self.len();

        if num_channels == 0 || num_samples == 0 {
            return Vec::new();
        }

        let mut interleaved = Vec::with_capacity(num_channels * num_samples);

        for sample_idx in 0..num_samples {
            for channel in &self.samples {
                interleaved.push(channel[sample_idx]);
            }
        }

        interleaved
    }

    /// Check if all samples are finite (not NaN or Infinity)
    pub fn is_finite(&self) -> bool {
        self.samples
            .iter()
            .flat_map(|ch| ch.iter())
            .all(|s| s.is_finite())
    }

    /// Clamp all samples to the valid range [-1.0, 1.0]
    pub fn clamp(&mut self) {
        for channel in &mut self.samples {
            for sample in channel.iter_mut() {
                *sample = sample.clamp(-1.0, 1.0);
            }
        }
    }
}

impl Default for AudioBuffer {
    fn default() -> Self {
        Self::new(0, ChannelLayout::Stereo, 44100)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_buffer(samples: Vec<Vec<f32>>) -> AudioBuffer {
        AudioBuffer {
            samples,
            sample_rate: 44100,
        }
    }

    #[test]
    fn test_channel_layout() {
        assert_eq!(ChannelLayout::Mono.num_channels(), 1);
        assert_eq!(ChannelLayout::Stereo.num_channels(), 2);
    }

    #[test]
    fn test_buffer_new() {
        let buffer = AudioBuffer::new(1000, ChannelLayout::Stereo, 44100);
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.sample_rate, 44100);
        assert!(buffer.samples.iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn test_buffer_duration() {
        let buffer = AudioBuffer::new(44100, ChannelLayout::Mono, 44100);
        assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);

        let half = AudioBuffer::new(22050, ChannelLayout::Mono, 44100);
        assert!((half.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_buffer_is_empty() {
        let empty = AudioBuffer::new(0, ChannelLayout::Mono, 44100);
        assert!(empty.is_empty());

        let not_empty = AudioBuffer::new(100, ChannelLayout::Mono, 44100);
        assert!(!not_empty.is_empty());
    }

    #[test]
    fn test_buffer_channel_access() {
        let mut buffer = AudioBuffer::new(100, ChannelLayout::Stereo, 44100);

        let left = buffer.channel_mut(0);
        left[0] = 0.5;
        left[50] = 0.75;

        assert_eq!(buffer.channel(0)[0], 0.5);
        assert_eq!(buffer.channel(0)[50], 0.75);
        assert_eq!(buffer.channel(1)[0], 0.0);
    }

    #[test]
    fn test_buffer_to_interleaved() {
        let buffer = create_test_buffer(vec![
            vec![0.1, 0.3, 0.5], // Left
            vec![0.2, 0.4, 0.6], // Right
        ]);
        let interleaved = buffer.to_interleaved();
        assert_eq!(interleaved, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_buffer_to_interleaved_empty() {
        let buffer = AudioBuffer::new(0, ChannelLayout::Stereo, 44100);
        assert!(buffer.to_interleaved().is_empty());
    }

    #[test]
    fn test_buffer_is_finite() {
        let buffer = create_test_buffer(vec![vec![0.5; 100]]);
        assert!(buffer.is_finite());

        let buffer_nan = create_test_buffer(vec![vec![f32::NAN; 100]]);
        assert!(!buffer_nan.is_finite());

        let buffer_inf = create_test_buffer(vec![vec![f32::INFINITY; 100]]);
        assert!(!buffer_inf.is_finite());
    }

    #[test]
    fn test_buffer_clamp() {
        let mut buffer = create_test_buffer(vec![vec![-2.0, -0.5, 0.0, 0.5, 2.0]]);
        buffer.clamp();
        assert_eq!(buffer.channel(0), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
    }
}
