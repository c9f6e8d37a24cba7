//! Non-authoritative size defaults (SPEC_FULL.md §D).
//!
//! `max_control_transfer` and the transport's fragment size cap are
//! negotiated or configured by layers above this crate; nothing here is
//! read by [`crate::message`] or [`crate::fragment`]. These constants exist
//! so callers bootstrapping a session don't have to go hunting for the
//! conventional defaults.

/// The `max_control_transfer` value commonly offered in the first `OPEN`
/// before a device-specific capability exchange has happened.
pub const DEFAULT_MAX_CONTROL_TRANSFER: u32 = 4096;

/// Header plus fragment header: the fixed overhead of any fragmented-type
/// message, in bytes.
pub const FRAGMENT_OVERHEAD: usize = crate::header::HEADER_LEN + crate::header::FRAGMENT_HEADER_LEN;
