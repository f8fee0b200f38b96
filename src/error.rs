//! Error handling for decoding operations
//!
//! This module re-exports the error types used throughout the crate. The
//! decode core deliberately never fails on corrupt data; see the variants
//! on [`DecodeError`] for what can actually go wrong.

pub use crate::common::DecodeError;
pub use crate::common::Result;
