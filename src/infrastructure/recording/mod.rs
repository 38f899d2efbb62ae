//! Recording infrastructure module
//!
//! Cross-platform chunked capture using cpal, with FLAC encoding of the
//! finished session for upload.

mod cpal_recorder;
mod flac_encoder;

pub use cpal_recorder::CpalChunkedRecorder;
pub use flac_encoder::{encode_capture, encode_to_flac, EncodingError, TARGET_SAMPLE_RATE};
