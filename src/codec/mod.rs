//! Codec compatibility module
//!
//! This module reduces variants to comparable codec identities:
//! - Mime type plus codec base (profile suffix stripped) per channel
//! - Deduplicating identity sets with union and intersection

pub mod identity;
pub mod set;

pub use identity::{codec_base, CodecIdentity};
pub use set::CodecIdentitySet;
