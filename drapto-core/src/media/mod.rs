//! Media information and probing module
//!
//! Responsibilities:
//! - Define the data structures representing a probed media file (`MediaInfo`,
//!   `StreamInfo`)
//! - Execute and parse the external media-inspection tool's output into those
//!   structures
//! - Compute content hashes (MD5, SHA-256) for auditability
//!
//! This module implements the `Probe` component from the design: a single
//! entry point, [`probe::probe`], that turns a path into a normalized,
//! read-only [`MediaInfo`] snapshot or a [`crate::error::CoreError`].

pub mod info;
pub mod probe;

pub use info::{MediaInfo, StreamInfo, StreamKind};
pub use probe::probe;
