//! Common-codec filter
//!
//! Narrows every period to the codec identities present in *all* periods, so
//! a single decoder configuration can play the whole presentation.

use crate::codec::CodecIdentitySet;
use crate::manifest::Manifest;
use tracing::debug;

/// Compute the codec identities shared by every period of the manifest
///
/// # Panics
///
/// Panics if the manifest has no periods.
pub fn common_codecs(manifest: &Manifest) -> CodecIdentitySet {
    assert!(
        !manifest.periods.is_empty(),
        "common codec filtering requires at least one period"
    );

    let mut common = CodecIdentitySet::new();
    common.include_all(&CodecIdentitySet::from_variants(
        &manifest.periods[0].variants,
    ));

    for period in &manifest.periods[1..] {
        common.only_keep(&CodecIdentitySet::from_variants(&period.variants));
    }

    common
}

/// Keep only variants whose codec identity appears in every period
///
/// An empty intersection leaves every period without variants; deciding
/// whether that is fatal is up to the caller.
///
/// # Panics
///
/// Panics if the manifest has no periods.
pub fn filter_by_common_codecs(manifest: &mut Manifest) {
    let common = common_codecs(manifest);
    debug!(
        identities = common.len(),
        periods = manifest.periods.len(),
        "Computed common codec set"
    );
    for identity in common.iter() {
        debug!(%identity, "Common codec identity");
    }

    for period in &mut manifest.periods {
        let removed = period.retain_variants(|v| common.admits(v));
        debug!(
            period = %period.id,
            kept = period.variants.len(),
            removed,
            "Pruned period to common codecs"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::{manifest, period, variant};

    #[test]
    fn test_single_period_is_unchanged() {
        let mut m = manifest(vec![period(
            "p1",
            vec![
                variant(1, Some("avc1.42E01E"), Some("mp4a.40.2")),
                variant(2, Some("hvc1.1.6.L93.B0"), Some("ec-3")),
            ],
        )]);
        let before = m.clone();
        filter_by_common_codecs(&mut m);
        assert_eq!(m, before);
    }

    #[test]
    fn test_keeps_only_identities_in_every_period() {
        let mut m = manifest(vec![
            period(
                "p1",
                vec![
                    variant(1, Some("avc1.42E01E"), Some("mp4a.40.2")),
                    variant(2, Some("hvc1.1.6.L93.B0"), Some("mp4a.40.2")),
                ],
            ),
            period(
                "p2",
                vec![
                    variant(3, Some("hvc1.2.4.L120.B0"), Some("mp4a.40.5")),
                    variant(4, Some("av01.0.04M.08"), Some("opus")),
                ],
            ),
            period(
                "p3",
                vec![
                    variant(5, Some("hvc1.1.6.L93.B0"), Some("mp4a.40.2")),
                    variant(6, Some("avc1.640028"), Some("mp4a.40.2")),
                ],
            ),
        ]);

        filter_by_common_codecs(&mut m);

        let ids: Vec<Vec<u32>> = m
            .periods
            .iter()
            .map(|p| p.variants.iter().map(|v| v.id).collect())
            .collect();
        assert_eq!(ids, vec![vec![2], vec![3], vec![5]]);
    }

    #[test]
    fn test_intersection_order_does_not_change_result() {
        let periods = vec![
            period(
                "p1",
                vec![
                    variant(1, Some("avc1.42E01E"), None),
                    variant(2, Some("hvc1.1.6.L93.B0"), None),
                    variant(3, Some("vp09.00.10.08"), None),
                ],
            ),
            period(
                "p2",
                vec![
                    variant(4, Some("hvc1.1.6.L93.B0"), None),
                    variant(5, Some("avc1.640028"), None),
                ],
            ),
        ];
        let forward = common_codecs(&manifest(periods.clone()));
        let reversed = common_codecs(&manifest(periods.into_iter().rev().collect()));

        // forward collects avc1 first, reversed collects hvc1 first
        let first = |set: &CodecIdentitySet| set.iter().next().cloned();
        assert_ne!(first(&forward), first(&reversed));
        assert_eq!(forward, reversed);
        assert_eq!(forward.len(), 2);
    }

    #[test]
    #[should_panic(expected = "at least one period")]
    fn test_zero_periods_panics() {
        let mut m = Manifest::default();
        filter_by_common_codecs(&mut m);
    }
}
