//! Manifest data model
//!
//! A presentation is an ordered list of periods, each holding the variants a
//! player may switch between. Filters narrow `Period::variants` in place.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Audio or video elementary stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub id: u32,
    /// Container/base media type, e.g. "video/mp4"
    pub mime_type: String,
    /// Codec profile string, e.g. "avc1.42E01E"
    pub codecs: String,
    #[serde(default)]
    pub bandwidth: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// DRM scheme a variant is protected with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrmInfo {
    /// Key system identifier, e.g. "com.widevine.alpha"
    pub key_system: String,
}

/// A playable audio/video pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: u32,
    /// Combined bandwidth in bits per second
    #[serde(default)]
    pub bandwidth: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub audio: Option<Stream>,
    #[serde(default)]
    pub video: Option<Stream>,
    #[serde(default)]
    pub drm_infos: Vec<DrmInfo>,
}

impl Variant {
    /// Check if the variant requires a key system to play
    pub fn is_encrypted(&self) -> bool {
        !self.drm_infos.is_empty()
    }

    /// Get the video frame size, if the variant has video with known dimensions
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        let video = self.video.as_ref()?;
        Some((video.width?, video.height?))
    }

    /// Iterate over the streams that are present
    pub fn streams(&self) -> impl Iterator<Item = &Stream> {
        self.audio.iter().chain(self.video.iter())
    }
}

/// A span of the presentation timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: String,
    /// Start time in seconds
    #[serde(default)]
    pub start_time: f64,
    pub variants: Vec<Variant>,
}

impl Period {
    pub fn new(id: impl Into<String>, start_time: f64, variants: Vec<Variant>) -> Self {
        Self {
            id: id.into(),
            start_time,
            variants,
        }
    }

    /// Keep only the variants matching `keep`, preserving order.
    /// Returns the number of variants removed.
    pub fn retain_variants<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Variant) -> bool,
    {
        let before = self.variants.len();
        self.variants.retain(keep);
        before - self.variants.len()
    }
}

/// An ordered timeline of periods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub periods: Vec<Period>,
}

impl Manifest {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    /// Parse a manifest from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the manifest as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of variants across all periods
    pub fn variant_count(&self) -> usize {
        self.periods.iter().map(|p| p.variants.len()).sum()
    }
}
