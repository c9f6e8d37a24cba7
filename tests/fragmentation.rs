//! Cross-module split/collect invariants (spec.md §8).

use mbim_proto::{split, Collector, Message, MessageType};
use proptest::prelude::*;

fn build_command(transaction_id: u32, payload: &[u8]) -> Message {
    let mut bytes = vec![0u8; 20 + payload.len()];
    bytes[0..4].copy_from_slice(&MessageType::Command.as_u32().to_le_bytes());
    bytes[4..8].copy_from_slice(&(bytes.len() as u32).to_le_bytes());
    bytes[8..12].copy_from_slice(&transaction_id.to_le_bytes());
    bytes[12..16].copy_from_slice(&1u32.to_le_bytes());
    bytes[16..20].copy_from_slice(&0u32.to_le_bytes());
    bytes[20..].copy_from_slice(payload);
    Message::new_from_bytes(&bytes)
}

fn collect_all(fragments: &[mbim_proto::FragmentInfo<'_>]) -> Message {
    let mut iter = fragments.iter();
    let first = iter.next().unwrap().to_message();
    let mut collector = Collector::init(&first).unwrap();
    if fragments.len() == 1 {
        assert!(collector.complete());
        return collector.into_message();
    }
    for fragment in iter {
        let msg = fragment.to_message();
        collector.add(&msg).unwrap();
    }
    assert!(collector.complete());
    collector.into_message()
}

#[test]
fn split_then_collect_reproduces_original_payload() {
    let payload: Vec<u8> = (0..200u32).map(|i| i as u8).collect();
    let original = build_command(11, &payload);
    let fragments = split(&original, 64).unwrap().unwrap();

    let joined = collect_all(&fragments);
    assert_eq!(&joined.raw().unwrap()[20..], payload.as_slice());
    assert_eq!(joined.message_length() as usize, joined.raw().unwrap().len());
}

#[test]
fn message_below_the_limit_is_sent_unfragmented() {
    let small = build_command(1, &[1, 2, 3]);
    assert!(split(&small, 4096).unwrap().is_none());
}

proptest! {
    #[test]
    fn split_join_round_trips_for_arbitrary_payloads(
        payload in prop::collection::vec(any::<u8>(), 21..500),
        max_fragment_size in 21usize..100,
    ) {
        let original = build_command(5, &payload);
        let Some(fragments) = split(&original, max_fragment_size).unwrap() else {
            prop_assert!(original.raw().unwrap().len() <= max_fragment_size);
            return Ok(());
        };

        let joined_payload: Vec<u8> = fragments.iter().flat_map(|f| f.payload.iter().copied()).collect();
        prop_assert_eq!(&joined_payload, &payload);

        let reassembled = collect_all(&fragments);
        prop_assert_eq!(&reassembled.raw().unwrap()[20..], payload.as_slice());
    }
}
