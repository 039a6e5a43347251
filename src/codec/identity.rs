//! Codec identity of a variant
//!
//! Two variants with the same identity can be switched between without
//! re-initializing the decoders.

use crate::manifest::{Stream, Variant};
use std::fmt;

/// Canonical audio/video codec summary of a variant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodecIdentity {
    pub audio_mime: Option<String>,
    pub audio_codec_base: Option<String>,
    pub video_mime: Option<String>,
    pub video_codec_base: Option<String>,
}

impl CodecIdentity {
    /// Summarize the codecs of a variant
    pub fn from_variant(variant: &Variant) -> Self {
        let (audio_mime, audio_codec_base) = split_stream(variant.audio.as_ref());
        let (video_mime, video_codec_base) = split_stream(variant.video.as_ref());
        Self {
            audio_mime,
            audio_codec_base,
            video_mime,
            video_codec_base,
        }
    }
}

fn split_stream(stream: Option<&Stream>) -> (Option<String>, Option<String>) {
    match stream {
        Some(s) => (
            Some(s.mime_type.clone()),
            Some(codec_base(&s.codecs).to_string()),
        ),
        None => (None, None),
    }
}

/// Get the codec base of a codecs string: everything before the first `.`
///
/// "avc1.42E01E" -> "avc1", "mp4a.40.2" -> "mp4a", "ac-3" -> "ac-3"
pub fn codec_base(codecs: &str) -> &str {
    codecs.split('.').next().unwrap_or(codecs)
}

impl fmt::Display for CodecIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn channel(
            f: &mut fmt::Formatter<'_>,
            mime: &Option<String>,
            base: &Option<String>,
        ) -> fmt::Result {
            match (mime, base) {
                (Some(m), Some(b)) => write!(f, "{};{}", m, b),
                _ => write!(f, "-"),
            }
        }

        write!(f, "video=")?;
        channel(f, &self.video_mime, &self.video_codec_base)?;
        write!(f, " audio=")?;
        channel(f, &self.audio_mime, &self.audio_codec_base)
    }
}
