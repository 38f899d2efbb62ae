//! FLAC encoder for upload payloads
//!
//! The analysis backend accepts any common audio container, but FLAC keeps
//! the upload lossless at roughly 40% of WAV size, which matters against
//! the 50 MB upload ceiling.
//!
//! Settings:
//! - 16kHz sample rate (speech-optimized, resampled from device rate)
//! - Mono channel
//! - 16-bit samples

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use rubato::{FftFixedIn, Resampler};

use crate::domain::capture::{AudioMimeType, CapturePayload};

/// Target sample rate for speech-optimized encoding
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: usize = 16;

/// Number of channels (mono)
const CHANNELS: usize = 1;

/// FLAC encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("FLAC write failed: {0}")]
    Write(String),
}

/// Resample mono PCM from the device rate to the 16kHz target
fn resample_to_target(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, EncodingError> {
    if source_rate == TARGET_SAMPLE_RATE {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        TARGET_SAMPLE_RATE as usize,
        1024, // Chunk size
        2,    // Sub-chunks
        1,    // Mono
    )
    .map_err(|e| EncodingError::Resample(e.to_string()))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());
        let mut chunk = samples_f32[input_pos..end_pos].to_vec();
        // Zero-pad the final partial chunk
        chunk.resize(frames_needed, 0.0);

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| EncodingError::Resample(e.to_string()))?;

        output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
        input_pos = end_pos;
    }

    output.truncate(output_len);
    Ok(output)
}

/// Encode mono PCM samples at the target rate to FLAC bytes
pub fn encode_to_flac(pcm_samples: &[i16]) -> Result<Vec<u8>, EncodingError> {
    // flacenc works on i32 samples
    let samples_i32: Vec<i32> = pcm_samples.iter().map(|&s| s as i32).collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodingError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples_i32,
        CHANNELS,
        BITS_PER_SAMPLE,
        TARGET_SAMPLE_RATE as usize,
    );

    let flac_stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| EncodingError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    flac_stream
        .write(&mut sink)
        .map_err(|e| EncodingError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}

/// Resample and encode a finished recording into an upload payload
pub fn encode_capture(
    samples: &[i16],
    source_rate: u32,
    filename: impl Into<String>,
) -> Result<CapturePayload, EncodingError> {
    let resampled = resample_to_target(samples, source_rate)?;
    let flac = encode_to_flac(&resampled)?;
    Ok(CapturePayload::new(flac, filename, AudioMimeType::Flac))
}
