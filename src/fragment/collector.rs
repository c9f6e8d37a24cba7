//! Fragment Collector: the inbound reassembly state machine (spec.md §4.4).

use crate::error::{FragmentPosition, MbimError};
use crate::header;
use crate::message::Message;

/// Reassembles a fragmented message from sequentially-arriving fragments.
///
/// Models spec.md's `Empty → Growing(next_expected) → Complete` machine: a
/// `Collector` only exists once a first fragment has been accepted (there
/// is no `Empty` value to construct), so the type itself is always in
/// `Growing` or `Complete`. [`Collector::complete`] distinguishes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collector {
    message: Message,
    next_expected: u32,
}

impl Collector {
    /// Requires `first_fragment`'s fragment header to read `current == 0`.
    /// Deep-copies `first_fragment` and transitions to `Growing(1)`, or
    /// directly to `Complete` if `total == 1`.
    pub fn init(first_fragment: &Message) -> Result<Self, MbimError> {
        let (current, total) = fragment_position(first_fragment);
        if current != 0 {
            return Err(MbimError::FragmentOutOfSequence {
                expected: FragmentPosition { current: 0, total },
                actual: FragmentPosition { current, total },
            });
        }
        Ok(Self {
            message: first_fragment.dup(),
            next_expected: 1,
        })
    }

    /// Accepts only a fragment whose `current` equals the next expected
    /// index. On acceptance: appends the fragment's payload, grows
    /// `header.length` by the appended byte count, and stores the incoming
    /// fragment's `current` into the in-progress header (`total` is left
    /// untouched, per spec.md §4.4).
    #[tracing::instrument(level = "trace", skip_all, fields(next_expected = self.next_expected))]
    pub fn add(&mut self, next_fragment: &Message) -> Result<(), MbimError> {
        let (current, total) = fragment_position(next_fragment);
        if current != self.next_expected {
            return Err(MbimError::FragmentOutOfSequence {
                expected: FragmentPosition {
                    current: self.next_expected,
                    total,
                },
                actual: FragmentPosition { current, total },
            });
        }

        let incoming = next_fragment.raw()?;
        let payload_start = header::HEADER_LEN + header::FRAGMENT_HEADER_LEN;
        let payload = &incoming[payload_start..];

        let buffer = self.message.buffer_mut();
        buffer.append(payload);
        let new_length = buffer.len() as u32;
        let slice = buffer.as_mut_slice();
        header::write_length(slice, new_length);
        header::write_fragment_current(slice, current);

        self.next_expected += 1;
        Ok(())
    }

    /// `true` once `current + 1 == total`. Normalizes the fragment header
    /// to `(total = 1, current = 0)` the first time it observes completion,
    /// making the result indistinguishable in shape from a single-fragment
    /// message (spec.md §4.4).
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn complete(&mut self) -> bool {
        let (current, total) = fragment_position(&self.message);
        let is_complete = current + 1 == total;
        if is_complete {
            let slice = self.message.buffer_mut().as_mut_slice();
            header::write_fragment_total(slice, 1);
            header::write_fragment_current(slice, 0);
        }
        is_complete
    }

    /// Consumes the collector, yielding its message.
    pub fn into_message(self) -> Message {
        self.message
    }
}

fn fragment_position(m: &Message) -> (u32, u32) {
    match m.raw() {
        Ok(slice) if slice.len() >= header::HEADER_LEN + header::FRAGMENT_HEADER_LEN => {
            (header::read_fragment_current(slice), header::read_fragment_total(slice))
        }
        _ => (0, 0),
    }
}
