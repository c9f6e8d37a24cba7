//! Fragment Codec: `split(m, max_fragment_size)` (spec.md §4.3).

use crate::error::MbimError;
use crate::header;
use crate::message::Message;
use crate::message_type::MessageType;

/// One outbound fragment: the owning message's header fields, this
/// fragment's position, and a borrowed slice of its payload.
///
/// Borrows from the `Message` passed to [`split`]; per spec.md §5 it MUST
/// NOT outlive that message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentInfo<'a> {
    pub message_type: MessageType,
    pub transaction_id: u32,
    pub total: u32,
    pub current: u32,
    pub payload: &'a [u8],
}

impl<'a> FragmentInfo<'a> {
    /// `header.length` this fragment would carry on the wire.
    pub fn length(&self) -> u32 {
        (header::HEADER_LEN + header::FRAGMENT_HEADER_LEN) as u32 + self.payload.len() as u32
    }

    /// Materializes this descriptor into a standalone, owned wire message.
    pub fn to_message(&self) -> Message {
        Message::new_fragment(self.message_type, self.transaction_id, self.total, self.current, self.payload)
    }
}

/// Splits `m` into fragments no larger than `max_fragment_size` bytes each.
///
/// Returns `Ok(None)` when `m` already fits (the caller transmits `m`
/// as-is — the only case in which the codec declines to produce
/// descriptors). Returns `Err(NotFragmentable)` when `m`'s type is not one
/// of `COMMAND` / `COMMAND_DONE` / `INDICATION` (spec.md §9 Open Question
/// (c), resolved in `SPEC_FULL.md` §G in favor of a typed error over
/// undefined behavior).
#[tracing::instrument(level = "trace", skip(m), fields(message_length = m.message_length(), max_fragment_size))]
pub fn split(m: &Message, max_fragment_size: usize) -> Result<Option<Vec<FragmentInfo<'_>>>, MbimError> {
    if !m.message_type().is_fragmented() {
        return Err(MbimError::NotFragmentable);
    }

    let raw = m.raw()?;
    if raw.len() <= max_fragment_size {
        return Ok(None);
    }

    let overhead = header::HEADER_LEN + header::FRAGMENT_HEADER_LEN;
    debug_assert!(
        max_fragment_size > overhead,
        "max_fragment_size must leave room for at least one payload byte"
    );
    if max_fragment_size <= overhead {
        return Ok(Some(Vec::new()));
    }

    let payload_region = &raw[overhead..];
    let total_payload = payload_region.len();
    let per_fragment = max_fragment_size - overhead;
    let fragment_count = total_payload.div_ceil(per_fragment);

    let message_type = m.message_type();
    let transaction_id = m.transaction_id();

    let fragments = (0..fragment_count)
        .map(|i| {
            let start = i * per_fragment;
            let end = (start + per_fragment).min(total_payload);
            FragmentInfo {
                message_type,
                transaction_id,
                total: fragment_count as u32,
                current: i as u32,
                payload: &payload_region[start..end],
            }
        })
        .collect();

    Ok(Some(fragments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_with_payload(len: usize) -> Message {
        let payload = vec![0xABu8; len];
        Message::new_fragment(MessageType::Command, 1, 1, 0, &payload)
    }

    #[test]
    fn fits_within_limit_returns_none() {
        let m = command_with_payload(10);
        assert!(split(&m, 4096).unwrap().is_none());
    }

    #[test]
    fn non_fragmentable_type_is_rejected() {
        let m = Message::close_new(0);
        assert!(matches!(split(&m, 4), Err(MbimError::NotFragmentable)));
    }

    #[test]
    fn splits_uneven_payload_into_bounded_fragments() {
        let m = command_with_payload(200);
        let fragments = split(&m, 64).unwrap().unwrap();
        let lengths: Vec<usize> = fragments.iter().map(|f| f.payload.len()).collect();
        assert_eq!(lengths, vec![44, 44, 44, 44, 24]);
        assert_eq!(fragments.last().unwrap().length(), 44);
        assert_eq!(fragments[0].total, 5);
        let ordering: Vec<u32> = fragments.iter().map(|f| f.current).collect();
        assert_eq!(ordering, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn payload_partitions_the_source_exactly() {
        let m = command_with_payload(200);
        let fragments = split(&m, 64).unwrap().unwrap();
        let joined: Vec<u8> = fragments.iter().flat_map(|f| f.payload.iter().copied()).collect();
        assert_eq!(joined, vec![0xABu8; 200]);
    }
}
