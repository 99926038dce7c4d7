//! Error handling for LZSS operations
//!
//! This module re-exports the error type used throughout the crate. It uses
//! thiserror for ergonomic error handling with context-specific variants.

pub use crate::common::LzssError;
pub use crate::common::Result;
