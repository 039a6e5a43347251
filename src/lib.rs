//! Variant filtering for multi-period media manifests
//!
//! Prunes each period's variants so that only playable variants survive and
//! the survivors stay codec-compatible across period boundaries.

pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod manifest;

#[cfg(test)]
pub(crate) mod tests;

pub use codec::{CodecIdentity, CodecIdentitySet};
pub use config::{CompatibilityMode, FilterConfig};
pub use error::{BoxError, FilterError, Result};
pub use filter::{apply, filter_by_common_codecs, rolling_filter, PeriodFilter};
pub use manifest::{DrmInfo, Manifest, Period, Stream, Variant};
