//! Rolling compatibility filter
//!
//! Walks the periods in timeline order. Each period is first narrowed to the
//! codec identities that survived in the previous period, then handed to the
//! injected [`PeriodFilter`]. Only one period of history is tracked, so a
//! period that ends up empty empties every period after it.

use crate::codec::CodecIdentitySet;
use crate::error::{BoxError, FilterError, Result};
use crate::manifest::{Manifest, Period};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Per-period transformation injected into [`rolling_filter`]
///
/// Implementations may narrow `period.variants` (restriction, decode-support
/// and DRM checks live here). The rolling filter waits for each call to
/// finish before looking at the next period.
#[async_trait]
pub trait PeriodFilter: Send + Sync {
    async fn filter_period(&self, period: &mut Period) -> std::result::Result<(), BoxError>;
}

/// Filter that leaves every period untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

#[async_trait]
impl PeriodFilter for PassThrough {
    async fn filter_period(&self, _period: &mut Period) -> std::result::Result<(), BoxError> {
        Ok(())
    }
}

/// Run `filter` over each period in order while keeping adjacent periods
/// codec-compatible.
///
/// On failure the error names the period that failed. Earlier periods have
/// already been narrowed and later ones are untouched, so the manifest must be
/// discarded rather than filtered again.
pub async fn rolling_filter<F>(manifest: &mut Manifest, filter: &F) -> Result<()>
where
    F: PeriodFilter + ?Sized,
{
    let mut previous: Option<CodecIdentitySet> = None;

    for (index, period) in manifest.periods.iter_mut().enumerate() {
        if let Some(allowed) = &previous {
            let removed = period.retain_variants(|v| allowed.admits(v));
            debug!(
                period = %period.id,
                index,
                removed,
                kept = period.variants.len(),
                "Pruned period to codecs compatible with previous period"
            );
        }

        if let Err(source) = filter.filter_period(period).await {
            warn!(period = %period.id, index, error = %source, "Period filter failed");
            return Err(FilterError::PeriodFilter {
                period: period.id.clone(),
                source,
            });
        }

        let surviving = CodecIdentitySet::from_variants(&period.variants);
        if surviving.is_empty() {
            debug!(period = %period.id, index, "Period has no playable variants");
        }
        previous = Some(surviving);
    }

    Ok(())
}
