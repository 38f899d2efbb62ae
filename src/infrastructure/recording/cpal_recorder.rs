//! Chunked audio recorder using cpal
//!
//! Capture runs on a dedicated thread because cpal streams are not Send.
//! The stream callback appends mono i16 samples to a working buffer; once
//! per chunk interval the capture thread seals the working buffer into a
//! chunk, which `drain_chunks` hands to the caller in arrival order.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};

use super::flac_encoder::TARGET_SAMPLE_RATE;
use crate::application::ports::{ChunkedRecorder, RecordingError};

/// Interval at which the working buffer is sealed into a chunk
const CHUNK_INTERVAL: Duration = Duration::from_millis(1000);

/// Chunked recorder backed by the default cpal input device
pub struct CpalChunkedRecorder {
    /// Samples captured since the last chunk seal (mono, device rate)
    working: Arc<StdMutex<Vec<i16>>>,
    /// Sealed chunks awaiting a drain
    chunks: Arc<StdMutex<Vec<Vec<i16>>>>,
    /// Device sample rate (may differ from the 16kHz encode target)
    sample_rate: Arc<AtomicU32>,
    is_recording: Arc<AtomicBool>,
}

impl CpalChunkedRecorder {
    /// Create a new recorder
    pub fn new() -> Self {
        Self {
            working: Arc::new(StdMutex::new(Vec::new())),
            chunks: Arc::new(StdMutex::new(Vec::new())),
            sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the default input device
    fn input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an input config, preferring mono and a range that covers the
    /// 16kHz encode target so resampling becomes a no-op
    fn input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let mut best: Option<cpal::SupportedStreamConfigRange> = None;
        for config in supported {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let covers_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let better = match &best {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        covers_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if better {
                best = Some(config);
            }
        }

        let range = best.ok_or(RecordingError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        let sample_rate = if range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            range.min_sample_rate()
        };

        let sample_format = range.sample_format();
        let config = StreamConfig {
            channels: range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix interleaved multi-channel samples down to mono
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }
        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    fn capture_loop(
        working: Arc<StdMutex<Vec<i16>>>,
        chunks: Arc<StdMutex<Vec<Vec<i16>>>>,
        sample_rate: Arc<AtomicU32>,
        is_recording: Arc<AtomicBool>,
        started: std::sync::mpsc::Sender<Result<u32, RecordingError>>,
    ) {
        let setup = Self::input_device().and_then(|device| {
            Self::input_config(&device).map(|(config, format)| (device, config, format))
        });
        let (device, config, sample_format) = match setup {
            Ok(parts) => parts,
            Err(e) => {
                is_recording.store(false, Ordering::SeqCst);
                let _ = started.send(Err(e));
                return;
            }
        };

        let rate = config.sample_rate.0;
        let channels = config.channels;
        sample_rate.store(rate, Ordering::SeqCst);

        let working_cb = Arc::clone(&working);
        let recording_cb = Arc::clone(&is_recording);
        let stream_result = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if recording_cb.load(Ordering::SeqCst) {
                        let mono = CpalChunkedRecorder::mix_to_mono(data, channels);
                        if let Ok(mut buffer) = working_cb.lock() {
                            buffer.extend_from_slice(&mono);
                        }
                    }
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if recording_cb.load(Ordering::SeqCst) {
                        let i16_data: Vec<i16> =
                            data.iter().map(|&s| (s * 32767.0) as i16).collect();
                        let mono = CpalChunkedRecorder::mix_to_mono(&i16_data, channels);
                        if let Ok(mut buffer) = working_cb.lock() {
                            buffer.extend_from_slice(&mono);
                        }
                    }
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            ),
            _ => {
                is_recording.store(false, Ordering::SeqCst);
                let _ = started.send(Err(RecordingError::StartFailed(
                    "Unsupported sample format".into(),
                )));
                return;
            }
        };

        let stream = match stream_result {
            Ok(s) => s,
            Err(e) => {
                is_recording.store(false, Ordering::SeqCst);
                let _ = started.send(Err(map_build_error(e)));
                return;
            }
        };

        if let Err(e) = stream.play() {
            is_recording.store(false, Ordering::SeqCst);
            let _ = started.send(Err(RecordingError::StartFailed(e.to_string())));
            return;
        }

        let _ = started.send(Ok(rate));

        // Seal the working buffer into a chunk once per interval
        while is_recording.load(Ordering::SeqCst) {
            std::thread::sleep(CHUNK_INTERVAL);
            let sealed = {
                let mut buffer = match working.lock() {
                    Ok(b) => b,
                    Err(_) => break,
                };
                std::mem::take(&mut *buffer)
            };
            if !sealed.is_empty() {
                if let Ok(mut pending) = chunks.lock() {
                    pending.push(sealed);
                }
            }
        }

        drop(stream);

        // Flush the tail as a final chunk
        let tail = {
            let mut buffer = match working.lock() {
                Ok(b) => b,
                Err(poisoned) => poisoned.into_inner(),
            };
            std::mem::take(&mut *buffer)
        };
        if !tail.is_empty() {
            if let Ok(mut pending) = chunks.lock() {
                pending.push(tail);
            }
        }
    }
}

fn map_build_error(error: cpal::BuildStreamError) -> RecordingError {
    match error {
        cpal::BuildStreamError::DeviceNotAvailable => RecordingError::NoAudioDevice,
        other => {
            let message = other.to_string();
            if message.to_ascii_lowercase().contains("permission") {
                RecordingError::PermissionDenied
            } else {
                RecordingError::StartFailed(message)
            }
        }
    }
}

impl Default for CpalChunkedRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChunkedRecorder for CpalChunkedRecorder {
    async fn start(&self) -> Result<u32, RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        if let Ok(mut buffer) = self.working.lock() {
            buffer.clear();
        }
        if let Ok(mut pending) = self.chunks.lock() {
            pending.clear();
        }
        self.is_recording.store(true, Ordering::SeqCst);

        let working = Arc::clone(&self.working);
        let chunks = Arc::clone(&self.chunks);
        let sample_rate = Arc::clone(&self.sample_rate);
        let is_recording = Arc::clone(&self.is_recording);
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            Self::capture_loop(working, chunks, sample_rate, is_recording, tx);
        });

        // Wait off the async runtime for the capture thread to report in
        let startup = tokio::task::spawn_blocking(move || rx.recv())
            .await
            .map_err(|e| RecordingError::StartFailed(format!("Startup task error: {}", e)))?;

        match startup {
            Ok(result) => result,
            Err(_) => {
                self.is_recording.store(false, Ordering::SeqCst);
                Err(RecordingError::StartFailed(
                    "Capture thread exited before starting".into(),
                ))
            }
        }
    }

    fn drain_chunks(&self) -> Vec<Vec<i16>> {
        match self.chunks.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }

    async fn stop(&self) -> Result<(), RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::RecordingFailed(
                "No recording in progress".to_string(),
            ));
        }
        self.is_recording.store(false, Ordering::SeqCst);

        // Give the capture thread a moment to flush the tail chunk
        tokio::time::sleep(CHUNK_INTERVAL + Duration::from_millis(100)).await;
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        let result = CpalChunkedRecorder::mix_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn mix_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalChunkedRecorder::mix_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]); // Average of each pair
    }

    #[test]
    fn recorder_default_state() {
        let recorder = CpalChunkedRecorder::new();
        assert!(!recorder.is_recording());
        assert!(recorder.drain_chunks().is_empty());
    }
}
