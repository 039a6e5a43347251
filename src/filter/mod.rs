//! Manifest filtering module
//!
//! This module decides which variants stay eligible for playback:
//! - Common-codec filtering across the whole timeline
//! - Rolling adjacency filtering with an injected per-period filter
//! - Per-variant predicates (restrictions, decode support, key systems)

pub mod common;
pub mod predicate;
pub mod rolling;

pub use common::{common_codecs, filter_by_common_codecs};
pub use predicate::{
    DecodeSupport, KeySystemSupport, PredicateChain, Restrictions, VariantPredicate,
};
pub use rolling::{rolling_filter, PassThrough, PeriodFilter};

use crate::config::{CompatibilityMode, FilterConfig};
use crate::error::{FilterError, Result};
use crate::manifest::Manifest;
use tracing::info;

/// Filter a manifest according to `config`
///
/// Rolling mode threads the configured predicates through [`rolling_filter`].
/// Common mode applies the predicates to every period and then keeps only the
/// codecs shared by all periods.
pub async fn apply(manifest: &mut Manifest, config: &FilterConfig) -> Result<()> {
    if manifest.periods.is_empty() {
        return Err(FilterError::EmptyManifest);
    }

    let chain = config.predicate_chain();
    let before = manifest.variant_count();
    info!(mode = ?config.mode, predicates = ?chain, variants = before, "Filtering manifest");

    match config.mode {
        CompatibilityMode::Rolling => rolling_filter(manifest, &chain).await?,
        CompatibilityMode::Common => {
            for period in &mut manifest.periods {
                chain.apply(period);
            }
            filter_by_common_codecs(manifest);
        }
    }

    info!(
        kept = manifest.variant_count(),
        removed = before - manifest.variant_count(),
        "Manifest filtered"
    );
    Ok(())
}
