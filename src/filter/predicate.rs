//! Variant predicates
//!
//! Per-variant checks that decide playability on their own: restrictions,
//! decode support and key system support. A [`PredicateChain`] composes them
//! into a [`PeriodFilter`] for the rolling filter.

use super::rolling::PeriodFilter;
use crate::codec::codec_base;
use crate::error::BoxError;
use crate::manifest::{Period, Variant};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A boolean check over a single variant
pub trait VariantPredicate: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    fn accepts(&self, variant: &Variant) -> bool;
}

/// Size and bandwidth bounds a variant must fall within
///
/// Upper bounds are open when absent. Bounds on frame size only apply to
/// variants with video of known size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restrictions {
    pub min_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    pub min_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    pub min_pixels: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pixels: Option<u64>,
    /// Bits per second
    pub min_bandwidth: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bandwidth: Option<u64>,
}

fn within<T: PartialOrd + Copy>(value: T, min: T, max: Option<T>) -> bool {
    value >= min && max.map_or(true, |m| value <= m)
}

impl Restrictions {
    /// Check if every lower bound is at most its upper bound
    pub fn is_consistent(&self) -> bool {
        within(self.min_width, 0, self.max_width)
            && within(self.min_height, 0, self.max_height)
            && within(self.min_pixels, 0, self.max_pixels)
            && within(self.min_bandwidth, 0, self.max_bandwidth)
    }

    /// Check if these restrictions filter anything at all
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }
}

impl VariantPredicate for Restrictions {
    fn name(&self) -> &'static str {
        "restrictions"
    }

    fn accepts(&self, variant: &Variant) -> bool {
        if let Some((width, height)) = variant.frame_size() {
            let pixels = u64::from(width) * u64::from(height);
            if !within(width, self.min_width, self.max_width)
                || !within(height, self.min_height, self.max_height)
                || !within(pixels, self.min_pixels, self.max_pixels)
            {
                return false;
            }
        }

        within(variant.bandwidth, self.min_bandwidth, self.max_bandwidth)
    }
}

/// Accepts variants whose streams are all in a list of decodable types
///
/// Entries are `"<mime>;<codec base>"`, e.g. `"video/mp4;avc1"`.
#[derive(Debug, Clone, Default)]
pub struct DecodeSupport {
    supported: Vec<String>,
}

impl DecodeSupport {
    pub fn new<I, S>(supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }

    fn supports(&self, mime_type: &str, codecs: &str) -> bool {
        let base = codec_base(codecs);
        self.supported.iter().any(|entry| match entry.split_once(';') {
            Some((mime, codec)) => mime == mime_type && codec == base,
            None => entry == mime_type,
        })
    }
}

impl VariantPredicate for DecodeSupport {
    fn name(&self) -> &'static str {
        "decode-support"
    }

    fn accepts(&self, variant: &Variant) -> bool {
        variant
            .streams()
            .all(|s| self.supports(&s.mime_type, &s.codecs))
    }
}

/// Accepts clear variants, and encrypted ones with a supported key system
#[derive(Debug, Clone, Default)]
pub struct KeySystemSupport {
    key_systems: Vec<String>,
}

impl KeySystemSupport {
    pub fn new<I, S>(key_systems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key_systems: key_systems.into_iter().map(Into::into).collect(),
        }
    }
}

impl VariantPredicate for KeySystemSupport {
    fn name(&self) -> &'static str {
        "key-system-support"
    }

    fn accepts(&self, variant: &Variant) -> bool {
        if !variant.is_encrypted() {
            return true;
        }
        variant
            .drm_infos
            .iter()
            .any(|info| self.key_systems.contains(&info.key_system))
    }
}

/// Ordered list of predicates applied as one period filter
#[derive(Default)]
pub struct PredicateChain {
    predicates: Vec<Box<dyn VariantPredicate>>,
}

impl PredicateChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate; predicates run in insertion order
    pub fn with<P: VariantPredicate + 'static>(mut self, predicate: P) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check a variant against every predicate, logging the first rejection
    pub fn accepts(&self, variant: &Variant) -> bool {
        match self.predicates.iter().find(|p| !p.accepts(variant)) {
            Some(predicate) => {
                trace!(variant = variant.id, predicate = predicate.name(), "Variant rejected");
                false
            }
            None => true,
        }
    }

    /// Narrow a period to the variants every predicate accepts
    pub fn apply(&self, period: &mut Period) -> usize {
        let removed = period.retain_variants(|v| self.accepts(v));
        debug!(
            period = %period.id,
            removed,
            kept = period.variants.len(),
            "Applied variant predicates"
        );
        removed
    }
}

impl std::fmt::Debug for PredicateChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.predicates.iter().map(|p| p.name()))
            .finish()
    }
}

#[async_trait]
impl PeriodFilter for PredicateChain {
    async fn filter_period(&self, period: &mut Period) -> Result<(), BoxError> {
        self.apply(period);
        Ok(())
    }
}
