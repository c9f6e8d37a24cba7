//! Error types for the MBIM message-handling core.
//!
//! Three failure categories, matching the error handling design: contract
//! violations are not modeled here at all (see the `debug_assert!` calls at
//! the accessor boundaries in [`crate::message`]); protocol errors and
//! semantic (status) errors each get their own type.

use std::fmt;

/// A `(current, total)` fragment position, used purely for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentPosition {
    pub current: u32,
    pub total: u32,
}

impl fmt::Display for FragmentPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// Protocol-level errors this core can raise.
///
/// This is deliberately small: per the purpose statement, the core does not
/// retry, schedule, or own the transport, so the only protocol error it is
/// in a position to detect is fragments arriving out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MbimError {
    /// A fragment was received whose `current` did not match the next
    /// expected index for this reassembly.
    #[error("fragment out of sequence: expected {expected}, got {actual}")]
    FragmentOutOfSequence {
        expected: FragmentPosition,
        actual: FragmentPosition,
    },

    /// [`crate::fragment::split`] was invoked on a message type that is not
    /// one of `COMMAND` / `COMMAND_DONE` / `INDICATION`.
    #[error("message type is not fragmentable")]
    NotFragmentable,

    /// [`crate::message::Message::raw`] was called on a zero-length buffer.
    #[error("message is empty")]
    Empty,
}

/// The numeric status codes carried by `OPEN_DONE` / `CLOSE_DONE` messages.
///
/// This is a representative subset, not the full MBIM status-code table
/// (that table is an external collaborator per the purpose statement); it
/// covers exactly the codes this core's invariants reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatusErrorCode {
    /// The operation succeeded.
    None,
    /// A generic failure; also the defensive default for unrecognized codes.
    Failure,
    /// A numeric code outside this crate's known subset.
    Other(u32),
}

impl StatusErrorCode {
    pub const NONE_VALUE: u32 = 0;

    pub fn from_u32(value: u32) -> Self {
        match value {
            Self::NONE_VALUE => Self::None,
            1 => Self::Failure,
            other => Self::Other(other),
        }
    }

    pub fn as_u32(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Failure => 1,
            Self::Other(v) => v,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "MBIM_STATUS_ERROR_NONE",
            Self::Failure => "MBIM_STATUS_ERROR_FAILURE",
            Self::Other(_) => "MBIM_STATUS_ERROR_UNKNOWN",
        }
    }
}

/// Raised by `*_get_result()` when an `_DONE` message's status code is not
/// `NONE`. Carries the numeric code and its name for display, per spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{name} (0x{code:08x})", name = self.code.name(), code = self.code.as_u32())]
pub struct StatusFailure {
    pub code: StatusErrorCode,
}

/// The numeric error codes carried by `HOST_ERROR` / `FUNCTION_ERROR`
/// messages. As with [`StatusErrorCode`], a representative subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProtocolErrorCode {
    /// A fragment collector observed fragments arriving out of order.
    ///
    /// This is the sole protocol error this core itself raises about
    /// fragments (spec.md §6); it is also a valid `FUNCTION_ERROR` /
    /// `HOST_ERROR` payload value, since a peer can report the same fault.
    FragmentOutOfSequence,
    /// Defensive default returned when a code cannot be interpreted.
    Invalid,
    /// A numeric code outside this crate's known subset.
    Other(u32),
}

impl ProtocolErrorCode {
    pub const FRAGMENT_OUT_OF_SEQUENCE_VALUE: u32 = 1;

    pub fn from_u32(value: u32) -> Self {
        match value {
            Self::FRAGMENT_OUT_OF_SEQUENCE_VALUE => Self::FragmentOutOfSequence,
            other => Self::Other(other),
        }
    }

    pub fn as_u32(self) -> u32 {
        match self {
            Self::FragmentOutOfSequence => Self::FRAGMENT_OUT_OF_SEQUENCE_VALUE,
            Self::Invalid => u32::MAX,
            Self::Other(v) => v,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FragmentOutOfSequence => "MBIM_PROTOCOL_ERROR_FRAGMENT_OUT_OF_SEQUENCE",
            Self::Invalid => "MBIM_PROTOCOL_ERROR_INVALID",
            Self::Other(_) => "MBIM_PROTOCOL_ERROR_UNKNOWN",
        }
    }
}

pub type Result<T> = core::result::Result<T, MbimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_none_round_trips() {
        assert_eq!(StatusErrorCode::from_u32(0), StatusErrorCode::None);
        assert_eq!(StatusErrorCode::None.as_u32(), 0);
        assert_eq!(StatusErrorCode::None.name(), "MBIM_STATUS_ERROR_NONE");
    }

    #[test]
    fn protocol_error_fragment_out_of_sequence_exists() {
        let code = ProtocolErrorCode::FragmentOutOfSequence;
        assert_eq!(code.as_u32(), 1);
        assert_eq!(code.name(), "MBIM_PROTOCOL_ERROR_FRAGMENT_OUT_OF_SEQUENCE");
    }

    #[test]
    fn invalid_sentinels_exist() {
        let _ = ProtocolErrorCode::Invalid;
        let _ = StatusErrorCode::Failure;
    }

    #[test]
    fn mbim_error_display_carries_indices() {
        let err = MbimError::FragmentOutOfSequence {
            expected: FragmentPosition { current: 1, total: 2 },
            actual: FragmentPosition { current: 2, total: 2 },
        };
        let rendered = err.to_string();
        assert!(rendered.contains("1/2"));
        assert!(rendered.contains("2/2"));
    }
}
