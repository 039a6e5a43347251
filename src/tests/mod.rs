//! Integration testing module
//!
//! End-to-end filtering scenarios:
//! - Common-codec filtering across periods
//! - Rolling filtering with cascading empty periods
//! - Injected period filter failures
