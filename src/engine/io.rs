//! Waveform Encoding and File Export
//!
//! Serializes rendered sample buffers into the canonical uncompressed PCM
//! container: a 44-byte RIFF/WAVE header followed by interleaved 16-bit
//! integer samples, little-endian throughout. Encoding to an in-memory byte
//! buffer and writing to disk share one code path, so an exported file is
//! byte-identical to the `EncodedAudio` handed to a caller.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::engine::buffer::AudioBuffer;
use crate::engine::renderer::{render, SessionParams};
use crate::error::{EntrainError, Result};

/// Size of the RIFF/WAVE header for 16-bit integer PCM
pub const WAV_HEADER_LEN: usize = 44;

/// Encoded bit depth; the container always carries 16-bit integer samples
pub const BITS_PER_SAMPLE: u16 = 16;

// ============================================================================
// Quantization
// ============================================================================

/// Quantize one float sample to a signed 16-bit integer
///
/// The input is clamped to [-1.0, 1.0], then scaled asymmetrically:
/// negative values by 32768 and non-negative values by 32767, truncating
/// toward zero. The asymmetry keeps +1.0 representable without overflow
/// while still reaching the full negative range.
#[inline]
pub fn quantize_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode a sample buffer as a complete WAV byte stream
///
/// Samples are interleaved frame-by-frame (channel 0, channel 1, ... per
/// frame) and quantized with [`quantize_i16`]. The output is always exactly
/// `44 + samples * channels * 2` bytes; only the size, channel and rate
/// header fields vary with input.
///
/// # Arguments
/// * `buffer` - Channel buffers of equal length plus the sample rate
///
/// # Returns
/// * `Ok(Vec<u8>)` - The encoded file image
/// * `Err(EntrainError::InvalidChannelCount)` - If the buffer has no channels
/// * `Err(EntrainError::ChannelLengthMismatch)` - If channel lengths differ
///
/// Both validation failures are detected before any output is produced.
pub fn encode_wav(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    validate_channels(buffer)?;

    let spec = WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).map_err(wav_error)?;

    for sample in buffer.to_interleaved() {
        writer.write_sample(quantize_i16(sample)).map_err(wav_error)?;
    }

    writer.finalize().map_err(wav_error)?;

    Ok(cursor.into_inner())
}

/// Write a sample buffer to disk as a WAV file
///
/// Encodes through [`encode_wav`], so the file carries the exact bytes an
/// in-memory export would.
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let encoded = encode_wav(buffer)?;
    fs::write(path, &encoded)?;
    Ok(())
}

/// Check encoder input invariants without producing output
fn validate_channels(buffer: &AudioBuffer) -> Result<()> {
    if buffer.num_channels() == 0 {
        return Err(EntrainError::InvalidChannelCount { count: 0 });
    }

    let expected = buffer.samples[0].len();
    for channel in &buffer.samples[1..] {
        if channel.len() != expected {
            return Err(EntrainError::ChannelLengthMismatch {
                expected,
                actual: channel.len(),
            });
        }
    }

    Ok(())
}

fn wav_error(e: hound::Error) -> EntrainError {
    EntrainError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

// ============================================================================
// Session Export
// ============================================================================

/// File name for an exported session
///
/// Encodes base frequency, beat frequency and duration in minutes for
/// traceability: `binaural_200Hz_5Hz_25min.wav`. Whole numbers drop their
/// fractional part; fractional values keep it (`binaural_200Hz_4.5Hz_1.5min.wav`).
pub fn session_filename(params: &SessionParams) -> String {
    format!(
        "binaural_{}Hz_{}Hz_{}min.wav",
        format_num(params.base_hz),
        format_num(params.beat_hz),
        format_num(params.duration_secs / 60.0),
    )
}

fn format_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Render a session and write it into the given directory
///
/// The full export pipeline: validate and render the session, encode it,
/// and persist the bytes under the conventional file name.
///
/// # Arguments
/// * `params` - Session parameters to render
/// * `output_dir` - Existing directory to place the file in
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written file
pub fn export_session(params: &SessionParams, output_dir: &Path) -> Result<PathBuf> {
    let buffer = render(params)?;
    let encoded = encode_wav(&buffer)?;
    let path = output_dir.join(session_filename(params));

    fs::write(&path, &encoded)?;
    info!(
        "Exported session ({}Hz base, {}Hz beat): {} bytes to {}",
        params.base_hz,
        params.beat_hz,
        encoded.len(),
        path.display()
    );

    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
