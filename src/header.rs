//! Fixed-offset, little-endian accessors onto a message's backing buffer
//! (spec.md §3, §6).
//!
//! This is the safe re-architecture spec.md's Design Notes ask for: rather
//! than overlaying a C struct onto the buffer, each field is a named
//! function that reads/writes four bytes at a fixed offset with explicit
//! endianness conversion. Every multi-byte field is little-endian on the
//! wire regardless of host byte order (spec.md Design Notes, "Endianness").

/// Size of the 12-byte MBIM header: type, length, transaction_id.
pub const HEADER_LEN: usize = 12;

/// Size of the 8-byte fragment header: total, current.
pub const FRAGMENT_HEADER_LEN: usize = 8;

const OFFSET_TYPE: usize = 0;
const OFFSET_LENGTH: usize = 4;
const OFFSET_TRANSACTION_ID: usize = 8;
const OFFSET_FRAGMENT_TOTAL: usize = HEADER_LEN;
const OFFSET_FRAGMENT_CURRENT: usize = HEADER_LEN + 4;

fn read_u32_le(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn write_u32_le(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn read_type(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFFSET_TYPE)
}

pub fn write_type(buf: &mut [u8], value: u32) {
    write_u32_le(buf, OFFSET_TYPE, value);
}

pub fn read_length(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFFSET_LENGTH)
}

pub fn write_length(buf: &mut [u8], value: u32) {
    write_u32_le(buf, OFFSET_LENGTH, value);
}

pub fn read_transaction_id(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFFSET_TRANSACTION_ID)
}

pub fn write_transaction_id(buf: &mut [u8], value: u32) {
    write_u32_le(buf, OFFSET_TRANSACTION_ID, value);
}

/// Reads the fragment header's `total` field. Callers must ensure `buf` is
/// at least `HEADER_LEN + FRAGMENT_HEADER_LEN` bytes (i.e. a fragmented type).
pub fn read_fragment_total(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFFSET_FRAGMENT_TOTAL)
}

pub fn write_fragment_total(buf: &mut [u8], value: u32) {
    write_u32_le(buf, OFFSET_FRAGMENT_TOTAL, value);
}

pub fn read_fragment_current(buf: &[u8]) -> u32 {
    read_u32_le(buf, OFFSET_FRAGMENT_CURRENT)
}

pub fn write_fragment_current(buf: &mut [u8], value: u32) {
    write_u32_le(buf, OFFSET_FRAGMENT_CURRENT, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_fields_round_trip_little_endian() {
        let mut buf = [0u8; HEADER_LEN];
        write_type(&mut buf, 0x0000_0001);
        write_length(&mut buf, 16);
        write_transaction_id(&mut buf, 7);

        // Bit-exact wire layout regardless of host endianness.
        assert_eq!(&buf[0..4], &[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(&buf[4..8], &[0x10, 0x00, 0x00, 0x00]);
        assert_eq!(&buf[8..12], &[0x07, 0x00, 0x00, 0x00]);

        assert_eq!(read_type(&buf), 0x0000_0001);
        assert_eq!(read_length(&buf), 16);
        assert_eq!(read_transaction_id(&buf), 7);
    }

    #[test]
    fn fragment_header_round_trips() {
        let mut buf = [0u8; HEADER_LEN + FRAGMENT_HEADER_LEN];
        write_fragment_total(&mut buf, 2);
        write_fragment_current(&mut buf, 1);
        assert_eq!(read_fragment_total(&buf), 2);
        assert_eq!(read_fragment_current(&buf), 1);
    }
}
