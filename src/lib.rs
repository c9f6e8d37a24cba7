//! MBIM message-handling core.
//!
//! Constructs, parses, and inspects Mobile Broadband Interface Model
//! control messages in their canonical little-endian binary layout, and
//! implements the fragmentation protocol that splits oversize messages on
//! transmit and reassembles them on receive.
//!
//! Transport I/O, per-service (CID/UUID) command encoders, transaction
//! tracking, and the full error-enumeration tables are all out of scope —
//! this crate is the framing and fragmentation substrate those layers
//! stand on.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod buffer;
pub mod error;
pub mod fragment;
mod header;
pub mod limits;
pub mod message;
pub mod message_type;

pub use buffer::ByteBuffer;
pub use error::{FragmentPosition, MbimError, ProtocolErrorCode, Result, StatusErrorCode, StatusFailure};
pub use fragment::{split, Collector, FragmentInfo};
pub use message::Message;
pub use message_type::MessageType;
