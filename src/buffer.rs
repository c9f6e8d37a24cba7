//! A reference-counted, resizable byte buffer (spec.md §4.1).
//!
//! Every [`crate::message::Message`] is a thin typed wrapper over one of
//! these. Sharing is by `Arc`; mutation (restricted to the Fragment
//! Collector while it owns a message uniquely) goes through
//! [`ByteBuffer::make_mut`], which is exactly `Arc::make_mut` — clone-on-write
//! if the buffer is currently shared, in-place if it is not. This is the
//! direct Rust answer to spec.md Design Note "Reference counting with
//! mutation": prefer unique-ownership semantics while growing, convert to
//! shared ownership only once reassembly completes.

use std::sync::Arc;

/// A resizable, reference-counted contiguous byte region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Arc<Vec<u8>>,
}

impl ByteBuffer {
    /// Allocate `n` zeroed bytes.
    pub fn allocate_zeroed(n: usize) -> Self {
        Self {
            bytes: Arc::new(vec![0u8; n]),
        }
    }

    /// Copy an existing byte slice into a newly owned buffer.
    pub fn copy_from(data: &[u8]) -> Self {
        Self {
            bytes: Arc::new(data.to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Append bytes, growing the buffer. Requires unique ownership to avoid
    /// silently forking state a sibling handle still observes; shared
    /// buffers are cloned first (copy-on-write), matching `Arc::make_mut`.
    pub fn append(&mut self, data: &[u8]) {
        Arc::make_mut(&mut self.bytes).extend_from_slice(data);
    }

    /// Overwrite bytes starting at `offset`. Panics if the write would run
    /// past the current length; callers size the buffer first.
    pub fn write_at(&mut self, offset: usize, data: &[u8]) {
        let buf = Arc::make_mut(&mut self.bytes);
        buf[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Mutable access to the full buffer. Copy-on-write if shared.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_zeroed_has_requested_length() {
        let buf = ByteBuffer::allocate_zeroed(12);
        assert_eq!(buf.len(), 12);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn append_grows_without_disturbing_a_shared_clone() {
        let original = ByteBuffer::copy_from(&[1, 2, 3]);
        let mut grown = original.clone();
        grown.append(&[4, 5]);

        assert_eq!(original.as_slice(), &[1, 2, 3]);
        assert_eq!(grown.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn write_at_overwrites_in_place() {
        let mut buf = ByteBuffer::allocate_zeroed(8);
        buf.write_at(4, &[0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(buf.as_slice(), &[0, 0, 0, 0, 0xAA, 0xBB, 0xCC, 0xDD]);
    }
}
