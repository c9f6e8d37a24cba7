//! The typed `Message` wrapper over a [`ByteBuffer`] (spec.md §4.2).
//!
//! Every constructor here follows the same allocation policy: write
//! `length` to equal the buffer's byte length, `type` to the variant
//! discriminant, `transaction_id` to the caller's value, all little-endian.
//! Accessors that require a specific message type enforce it with
//! `debug_assert!` and fall back to a defensive default in release builds,
//! matching the contract-violation category in spec.md §7.

use crate::buffer::ByteBuffer;
use crate::error::{MbimError, ProtocolErrorCode, StatusErrorCode, StatusFailure};
use crate::header;
use crate::message_type::MessageType;

/// A parsed or constructed MBIM control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    buffer: ByteBuffer,
}

impl Message {
    /// Copies `data` verbatim into a new buffer. Does not validate the
    /// header; a buffer shorter than 12 bytes is only observable through
    /// [`Message::raw`] and [`Message::message_length`].
    pub fn new_from_bytes(data: &[u8]) -> Self {
        Self {
            buffer: ByteBuffer::copy_from(data),
        }
    }

    /// Deep copy of exactly `self.message_length()` bytes, not the backing
    /// buffer's full extent (spec.md §4.2). If the buffer is shorter than
    /// the declared length (a malformed message), the copy is truncated to
    /// what actually exists rather than reading out of bounds.
    pub fn dup(&self) -> Self {
        let declared = self.message_length() as usize;
        let available = self.buffer.len();
        let len = declared.min(available);
        Self {
            buffer: ByteBuffer::copy_from(&self.buffer.as_slice()[..len]),
        }
    }

    /// The full serialized message. Fails when the buffer is zero-length.
    pub fn raw(&self) -> Result<&[u8], MbimError> {
        if self.buffer.is_empty() {
            return Err(MbimError::Empty);
        }
        Ok(self.buffer.as_slice())
    }

    /// Callable on any Message without preconditions; a buffer too short to
    /// contain a header reads as `Invalid`.
    pub fn message_type(&self) -> MessageType {
        if self.buffer.len() < header::HEADER_LEN {
            return MessageType::Invalid;
        }
        MessageType::from_u32(header::read_type(self.buffer.as_slice()))
    }

    pub fn message_length(&self) -> u32 {
        if self.buffer.len() < header::HEADER_LEN {
            return 0;
        }
        header::read_length(self.buffer.as_slice())
    }

    pub fn transaction_id(&self) -> u32 {
        if self.buffer.len() < header::HEADER_LEN {
            return 0;
        }
        header::read_transaction_id(self.buffer.as_slice())
    }

    /// Allocates 12+4 bytes: header plus `max_control_transfer`.
    pub fn open_new(transaction_id: u32, max_control_transfer: u32) -> Self {
        let mut buffer = ByteBuffer::allocate_zeroed(header::HEADER_LEN + 4);
        Self::write_header(&mut buffer, MessageType::Open, transaction_id);
        buffer.write_at(header::HEADER_LEN, &max_control_transfer.to_le_bytes());
        Self { buffer }
    }

    /// Header-only, 12 bytes.
    pub fn close_new(transaction_id: u32) -> Self {
        let mut buffer = ByteBuffer::allocate_zeroed(header::HEADER_LEN);
        Self::write_header(&mut buffer, MessageType::Close, transaction_id);
        Self { buffer }
    }

    /// 12+4 bytes, type `HOST_ERROR`, payload is a single `error_status_code`.
    ///
    /// Written as a dedicated 4-byte field rather than reusing the `OPEN`
    /// constructor's layout helper: the two happen to share a size, not a
    /// structure (spec.md §9 Open Question (a)).
    pub fn error_new(transaction_id: u32, error_status_code: u32) -> Self {
        let mut buffer = ByteBuffer::allocate_zeroed(header::HEADER_LEN + 4);
        Self::write_header(&mut buffer, MessageType::HostError, transaction_id);
        buffer.write_at(header::HEADER_LEN, &error_status_code.to_le_bytes());
        Self { buffer }
    }

    /// Builds a fragmented-type message directly from its parts: header,
    /// fragment header, and payload. Used by the Fragment Codec to
    /// materialize a `FragmentInfo` into a standalone wire message, and by
    /// the Fragment Collector as its in-progress and final representation.
    pub(crate) fn new_fragment(
        message_type: MessageType,
        transaction_id: u32,
        total: u32,
        current: u32,
        payload: &[u8],
    ) -> Self {
        debug_assert!(message_type.is_fragmented());
        let total_len = header::HEADER_LEN + header::FRAGMENT_HEADER_LEN + payload.len();
        let mut buffer = ByteBuffer::allocate_zeroed(total_len);
        Self::write_header(&mut buffer, message_type, transaction_id);
        let slice = buffer.as_mut_slice();
        header::write_fragment_total(slice, total);
        header::write_fragment_current(slice, current);
        let payload_start = header::HEADER_LEN + header::FRAGMENT_HEADER_LEN;
        buffer.write_at(payload_start, payload);
        Self { buffer }
    }

    fn write_header(buffer: &mut ByteBuffer, message_type: MessageType, transaction_id: u32) {
        let total_len = buffer.len() as u32;
        let slice = buffer.as_mut_slice();
        header::write_type(slice, message_type.as_u32());
        header::write_length(slice, total_len);
        header::write_transaction_id(slice, transaction_id);
    }

    /// Requires `type == OPEN`; returns 0 on a contract violation.
    pub fn open_get_max_control_transfer(&self) -> u32 {
        debug_assert_eq!(self.message_type(), MessageType::Open);
        self.read_trailing_u32(MessageType::Open, header::HEADER_LEN)
    }

    pub fn open_done_get_status_code(&self) -> u32 {
        debug_assert_eq!(self.message_type(), MessageType::OpenDone);
        self.read_trailing_u32(MessageType::OpenDone, header::HEADER_LEN)
    }

    pub fn close_done_get_status_code(&self) -> u32 {
        debug_assert_eq!(self.message_type(), MessageType::CloseDone);
        self.read_trailing_u32(MessageType::CloseDone, header::HEADER_LEN)
    }

    /// `Ok(())` iff the status code equals `NONE`; otherwise a typed error
    /// carrying the code and its name.
    pub fn open_done_get_result(&self) -> Result<(), StatusFailure> {
        Self::status_result(self.open_done_get_status_code())
    }

    pub fn close_done_get_result(&self) -> Result<(), StatusFailure> {
        Self::status_result(self.close_done_get_status_code())
    }

    fn status_result(code: u32) -> Result<(), StatusFailure> {
        if code == StatusErrorCode::NONE_VALUE {
            Ok(())
        } else {
            Err(StatusFailure {
                code: StatusErrorCode::from_u32(code),
            })
        }
    }

    /// Requires `type ∈ {HOST_ERROR, FUNCTION_ERROR}`.
    pub fn error_get_error_status_code(&self) -> u32 {
        let ty = self.message_type();
        debug_assert!(matches!(ty, MessageType::HostError | MessageType::FunctionError));
        if !matches!(ty, MessageType::HostError | MessageType::FunctionError) {
            return 0;
        }
        self.read_trailing_u32(ty, header::HEADER_LEN)
    }

    pub fn error_get_error(&self) -> ProtocolErrorCode {
        ProtocolErrorCode::from_u32(self.error_get_error_status_code())
    }

    fn read_trailing_u32(&self, expected: MessageType, offset: usize) -> u32 {
        if self.message_type() != expected || self.buffer.len() < offset + 4 {
            return 0;
        }
        let slice = self.buffer.as_slice();
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&slice[offset..offset + 4]);
        u32::from_le_bytes(bytes)
    }

    /// Human-readable dump: header block, then a type-specific block
    /// (spec.md §4.5, §6). Service-specific payload dumps are a higher
    /// layer's responsibility.
    pub fn printable(&self, line_prefix: &str) -> String {
        let mut out = String::new();
        let ty = self.message_type();
        out.push_str(&format!("{line_prefix}Header:\n"));
        out.push_str(&format!("{line_prefix}  length      = {}\n", self.message_length()));
        out.push_str(&format!(
            "{line_prefix}  type        = {} (0x{:08x})\n",
            ty.name(),
            ty.as_u32()
        ));
        out.push_str(&format!("{line_prefix}  transaction = {}\n", self.transaction_id()));

        match ty {
            MessageType::Invalid => {
                debug_assert!(false, "printable() called on an INVALID message");
            }
            MessageType::Open => {
                out.push_str(&format!("{line_prefix}Contents:\n"));
                out.push_str(&format!(
                    "{line_prefix}  max_control_transfer = {}\n",
                    self.open_get_max_control_transfer()
                ));
            }
            MessageType::Close => {}
            MessageType::OpenDone | MessageType::CloseDone => {
                let code = if ty == MessageType::OpenDone {
                    self.open_done_get_status_code()
                } else {
                    self.close_done_get_status_code()
                };
                let status = StatusErrorCode::from_u32(code);
                out.push_str(&format!("{line_prefix}Contents:\n"));
                out.push_str(&format!(
                    "{line_prefix}  status_code = {} (0x{:08x})\n",
                    status.name(),
                    code
                ));
            }
            MessageType::HostError | MessageType::FunctionError => {
                let code = self.error_get_error_status_code();
                let error = ProtocolErrorCode::from_u32(code);
                out.push_str(&format!("{line_prefix}Contents:\n"));
                out.push_str(&format!(
                    "{line_prefix}  error_status_code = {} (0x{:08x})\n",
                    error.name(),
                    code
                ));
            }
            MessageType::Command | MessageType::CommandDone | MessageType::Indication => {
                let slice = self.buffer.as_slice();
                let (total, current) = if slice.len() >= header::HEADER_LEN + header::FRAGMENT_HEADER_LEN {
                    (header::read_fragment_total(slice), header::read_fragment_current(slice))
                } else {
                    (0, 0)
                };
                out.push_str(&format!("{line_prefix}Fragment header:\n"));
                out.push_str(&format!("{line_prefix}  total   = {total}\n"));
                out.push_str(&format!("{line_prefix}  current = {current}\n"));
            }
        }

        out
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut ByteBuffer {
        &mut self.buffer
    }
}
