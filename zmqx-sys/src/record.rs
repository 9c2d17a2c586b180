//! 3.x monitor record layout.
//!
//! The record is a C tagged union: an `int` discriminator followed by one of
//! several `{ char *addr; <value> }` variants. All variants currently share
//! offsets, but which member is read is decided per kind by the decoder's
//! selection table, never by reinterpreting the union as a single shape.

use std::ffi::{c_char, c_int, c_uint};
use std::mem::{offset_of, size_of};

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct AddrFd {
    pub addr: *const c_char,
    pub fd: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct AddrErr {
    pub addr: *const c_char,
    pub err: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct AddrInterval {
    pub addr: *const c_char,
    pub interval: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct AddrId {
    pub addr: *const c_char,
    pub id: c_uint,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) union EventData {
    pub connected: AddrFd,
    pub connect_delayed: AddrErr,
    pub connect_retried: AddrInterval,
    pub listening: AddrFd,
    pub bind_failed: AddrErr,
    pub accepted: AddrFd,
    pub accept_failed: AddrErr,
    pub closed: AddrFd,
    pub close_failed: AddrErr,
    // The patched transport stores the disconnecting peer's id in a signed slot.
    pub disconnected: AddrFd,
    pub peer_attached: AddrId,
    pub peer_detached: AddrId,
}

/// `zmq_event_t`
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawEvent {
    pub event: c_int,
    pub data: EventData,
}

/// Exact size of a 3.x monitor record on this platform.
pub const RECORD_SIZE: usize = size_of::<RawEvent>();

const DATA_OFFSET: usize = offset_of!(RawEvent, data);
const VALUE_OFFSET: usize = DATA_OFFSET + offset_of!(AddrFd, fd);

/// Build a 3.x record from its parts, as the transport would lay it out.
///
/// `addr` is stored as a pointer, not copied: the caller keeps the string
/// alive for as long as the record may be decoded. Padding bytes are zero.
#[must_use]
pub fn encode_record(event: c_int, addr: *const c_char, value: u32) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[..size_of::<c_int>()].copy_from_slice(&event.to_ne_bytes());
    buf[DATA_OFFSET..DATA_OFFSET + size_of::<usize>()]
        .copy_from_slice(&(addr as usize).to_ne_bytes());
    buf[VALUE_OFFSET..VALUE_OFFSET + size_of::<u32>()].copy_from_slice(&value.to_ne_bytes());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_share_offsets() {
        assert_eq!(offset_of!(AddrFd, fd), offset_of!(AddrErr, err));
        assert_eq!(offset_of!(AddrFd, fd), offset_of!(AddrInterval, interval));
        assert_eq!(offset_of!(AddrFd, fd), offset_of!(AddrId, id));
        assert_eq!(size_of::<*const c_char>(), size_of::<usize>());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_record_size_64() {
        // int + pad, pointer, int + pad
        assert_eq!(RECORD_SIZE, 24);
        assert_eq!(DATA_OFFSET, 8);
        assert_eq!(VALUE_OFFSET, 16);
    }

    #[test]
    fn test_encode_writes_discriminator() {
        let buf = encode_record(512, std::ptr::null(), 7);
        assert_eq!(c_int::from_ne_bytes(buf[..4].try_into().unwrap()), 512);
        assert_eq!(
            u32::from_ne_bytes(buf[VALUE_OFFSET..VALUE_OFFSET + 4].try_into().unwrap()),
            7
        );
    }
}
