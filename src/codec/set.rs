//! Deduplicating set of codec identities
//!
//! Sets are bounded by the number of distinct codec pairings in a period,
//! so a linear scan over a `Vec` is enough.

use super::CodecIdentity;
use crate::manifest::Variant;

/// Unordered collection of distinct codec identities
#[derive(Debug, Clone, Default)]
pub struct CodecIdentitySet {
    identities: Vec<CodecIdentity>,
}

impl CodecIdentitySet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the codec identity of every variant
    pub fn from_variants<'a, I>(variants: I) -> Self
    where
        I: IntoIterator<Item = &'a Variant>,
    {
        variants
            .into_iter()
            .map(CodecIdentity::from_variant)
            .collect()
    }

    /// Insert `identity` unless an equal one is already present
    pub fn add(&mut self, identity: CodecIdentity) {
        if !self.contains(&identity) {
            self.identities.push(identity);
        }
    }

    /// Check if an equal identity is present
    pub fn contains(&self, identity: &CodecIdentity) -> bool {
        self.identities.iter().any(|i| i == identity)
    }

    /// Union `other` into this set
    pub fn include_all(&mut self, other: &CodecIdentitySet) {
        for identity in &other.identities {
            self.add(identity.clone());
        }
    }

    /// Remove every identity not present in `other` (in-place intersection)
    pub fn only_keep(&mut self, other: &CodecIdentitySet) {
        self.identities.retain(|i| other.contains(i));
    }

    /// Check if the variant's codec identity is in this set
    pub fn admits(&self, variant: &Variant) -> bool {
        self.contains(&CodecIdentity::from_variant(variant))
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodecIdentity> {
        self.identities.iter()
    }
}

// Membership-based: insertion order does not affect equality.
impl PartialEq for CodecIdentitySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|i| other.contains(i))
    }
}

impl Eq for CodecIdentitySet {}

impl FromIterator<CodecIdentity> for CodecIdentitySet {
    fn from_iter<T: IntoIterator<Item = CodecIdentity>>(iter: T) -> Self {
        let mut set = Self::new();
        for identity in iter {
            set.add(identity);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Stream;

    fn variant(video_codecs: &str, audio_codecs: &str) -> Variant {
        let stream = |mime: &str, codecs: &str| Stream {
            id: 0,
            mime_type: mime.to_string(),
            codecs: codecs.to_string(),
            bandwidth: None,
            width: None,
            height: None,
        };
        Variant {
            id: 0,
            bandwidth: 0,
            language: None,
            audio: Some(stream("audio/mp4", audio_codecs)),
            video: Some(stream("video/mp4", video_codecs)),
            drm_infos: vec![],
        }
    }

    fn identity(video_codecs: &str, audio_codecs: &str) -> CodecIdentity {
        CodecIdentity::from_variant(&variant(video_codecs, audio_codecs))
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut set = CodecIdentitySet::new();
        set.add(identity("avc1.42E01E", "mp4a.40.2"));
        set.add(identity("avc1.4D401F", "mp4a.40.5"));
        assert_eq!(set.len(), 1);

        set.add(identity("hvc1.1.6.L93.B0", "mp4a.40.2"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_variants_dedups() {
        let variants = vec![
            variant("avc1.42E01E", "mp4a.40.2"),
            variant("avc1.640028", "mp4a.40.2"),
            variant("hvc1.1.6.L93.B0", "ec-3"),
        ];
        let set = CodecIdentitySet::from_variants(&variants);
        assert_eq!(set.len(), 2);
        assert!(set.admits(&variants[1]));
    }

    #[test]
    fn test_empty_set_contains_nothing() {
        let set = CodecIdentitySet::from_variants(&Vec::<Variant>::new());
        assert!(set.is_empty());
        assert!(!set.contains(&identity("avc1.42E01E", "mp4a.40.2")));
    }

    #[test]
    fn test_self_union_and_intersection_are_noops() {
        let variants = vec![
            variant("avc1.42E01E", "mp4a.40.2"),
            variant("hvc1.1.6.L93.B0", "ec-3"),
        ];
        let original = CodecIdentitySet::from_variants(&variants);

        let mut set = original.clone();
        set.only_keep(&original);
        assert_eq!(set, original);

        set.include_all(&original);
        assert_eq!(set, original);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = CodecIdentitySet::new();
        a.add(identity("avc1.42E01E", "mp4a.40.2"));
        a.add(identity("hvc1.1.6.L93.B0", "mp4a.40.2"));

        let mut b = CodecIdentitySet::new();
        b.add(identity("hvc1.1.6.L93.B0", "mp4a.40.2"));
        b.add(identity("avc1.640028", "mp4a.40.5"));
        assert_eq!(a, b);

        b.add(identity("av01.0.04M.08", "opus"));
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn test_include_all_unions() {
        let mut a: CodecIdentitySet = vec![identity("avc1", "mp4a")].into_iter().collect();
        let b: CodecIdentitySet = vec![identity("avc1", "mp4a"), identity("hvc1", "ac-3")]
            .into_iter()
            .collect();
        a.include_all(&b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(&identity("hvc1.2.4", "ac-3")));
    }

    #[test]
    fn test_only_keep_intersects() {
        let mut a: CodecIdentitySet = vec![
            identity("avc1", "mp4a"),
            identity("hvc1", "mp4a"),
            identity("av01", "opus"),
        ]
        .into_iter()
        .collect();
        let b: CodecIdentitySet = vec![identity("hvc1", "mp4a"), identity("vp09", "opus")]
            .into_iter()
            .collect();

        a.only_keep(&b);
        assert_eq!(a.len(), 1);
        assert!(a.contains(&identity("hvc1", "mp4a")));
        assert!(!a.contains(&identity("avc1", "mp4a")));

        a.only_keep(&CodecIdentitySet::new());
        assert!(a.is_empty());
    }
}
