//! Monitor event decoding.
//!
//! Decoding is a single stateless step: check the record size, read the
//! discriminator, then let the per-kind selection table pick the union
//! member that holds the address and the value. Discriminators outside the
//! revision's table fail instead of guessing a layout, since a wrong guess
//! would read an arbitrary word as an address pointer.

use crate::last_error;
use crate::raw::RawSocket;
use crate::record::{EventData, RawEvent, RECORD_SIZE};
use std::ffi::{c_char, c_int, CStr};
use std::ptr;
use tracing::{debug, trace};
use zmqx_core::error::{Result, ZmqxError};
use zmqx_core::event::{spec_for_code, Event, EventKind};
use zmqx_core::monitor::{decode_frames, FRAME_RECORD_SIZE};
use zmqx_core::revision::Revision;

type Selector = fn(&EventData) -> (*const c_char, i64);

macro_rules! selector {
    ($name:ident, $member:ident, $value:ident) => {
        fn $name(data: &EventData) -> (*const c_char, i64) {
            // SAFETY: every union member is a pointer and a 32-bit integer,
            // neither of which has invalid bit patterns.
            let member = unsafe { data.$member };
            (member.addr, i64::from(member.$value))
        }
    };
}

selector!(connected, connected, fd);
selector!(connect_delayed, connect_delayed, err);
selector!(connect_retried, connect_retried, interval);
selector!(listening, listening, fd);
selector!(bind_failed, bind_failed, err);
selector!(accepted, accepted, fd);
selector!(accept_failed, accept_failed, err);
selector!(closed, closed, fd);
selector!(close_failed, close_failed, err);
selector!(disconnected, disconnected, fd);
selector!(peer_attached, peer_attached, id);
selector!(peer_detached, peer_detached, id);

/// Which union member each 3.x kind is read from.
static SELECTORS: [(EventKind, Selector); 12] = [
    (EventKind::Connected, connected),
    (EventKind::ConnectDelayed, connect_delayed),
    (EventKind::ConnectRetried, connect_retried),
    (EventKind::Listening, listening),
    (EventKind::BindFailed, bind_failed),
    (EventKind::Accepted, accepted),
    (EventKind::AcceptFailed, accept_failed),
    (EventKind::Closed, closed),
    (EventKind::CloseFailed, close_failed),
    (EventKind::Disconnected, disconnected),
    (EventKind::PeerAttached, peer_attached),
    (EventKind::PeerDetached, peer_detached),
];

/// Decode a 3.x monitor record.
///
/// The buffer must be exactly [`RECORD_SIZE`] bytes, otherwise the stream is
/// out of sync and `MalformedEvent` is returned without looking further. The
/// address is copied, so the buffer may be released as soon as this returns.
///
/// # Safety
///
/// If the buffer has the right size and a known discriminator, the address
/// slot of the selected member must be null or point to a NUL-terminated
/// string valid for the duration of the call.
pub unsafe fn decode(buf: &[u8]) -> Result<Event> {
    if buf.len() != RECORD_SIZE {
        return Err(ZmqxError::malformed(format!(
            "event record is {} bytes (expected {RECORD_SIZE})",
            buf.len()
        )));
    }

    // SAFETY: the length check above guarantees RECORD_SIZE readable bytes;
    // the read is unaligned because receive buffers carry no alignment.
    let raw: RawEvent = unsafe { ptr::read_unaligned(buf.as_ptr().cast()) };
    let code = raw.event as u32;
    let spec = spec_for_code(Revision::V3, code)?;

    let select = SELECTORS
        .iter()
        .find(|(kind, _)| *kind == spec.kind)
        .map(|(_, select)| *select)
        .ok_or(ZmqxError::UnknownEventKind(code))?;
    let (addr, extra) = select(&raw.data);

    if addr.is_null() {
        return Err(ZmqxError::malformed(format!("{} record without address", spec.kind)));
    }

    // SAFETY: non-null address slots point to a live C string (caller contract).
    let address = unsafe { CStr::from_ptr(addr) }
        .to_string_lossy()
        .into_owned();

    trace!("[MONITOR] {} {} extra={}", spec.kind, address, extra);
    Ok(Event::new(spec, address, extra))
}

/// Receive and decode one monitor event from a monitor socket.
///
/// 3.x reads one record; 4.x reads the record frame and the address frame.
/// Both are decoded while the transport still owns the parts, which are
/// released before this returns.
pub fn recv_event<S: RawSocket + ?Sized>(
    socket: &mut S,
    revision: Revision,
    flags: c_int,
) -> Result<Event> {
    match revision {
        Revision::V2 => Err(ZmqxError::Unsupported {
            revision,
            what: "socket monitor",
        }),
        Revision::V3 => recv_record(socket, flags),
        Revision::V4 => recv_frames(socket, flags),
    }
}

fn recv_record<S: RawSocket + ?Sized>(socket: &mut S, flags: c_int) -> Result<Event> {
    let mut decoded = None;
    let rc = socket.recv_raw(flags, &mut |part: &[u8], _more: bool| {
        // SAFETY: RawSocket implementors guarantee valid address slots.
        decoded = Some(unsafe { decode(part) });
    });
    if rc != 0 {
        return Err(last_error(socket, &"monitor receive"));
    }

    let result = decoded.unwrap_or_else(|| Err(ZmqxError::malformed("no event part received")));
    if let Err(err) = &result {
        debug!("[MONITOR] Dropping record: {}", err);
    }
    result
}

fn recv_frames<S: RawSocket + ?Sized>(socket: &mut S, flags: c_int) -> Result<Event> {
    let mut record = [0u8; FRAME_RECORD_SIZE];
    let mut first = None;
    let rc = socket.recv_raw(flags, &mut |part: &[u8], more: bool| {
        if part.len() == FRAME_RECORD_SIZE {
            record.copy_from_slice(part);
        }
        first = Some((part.len(), more));
    });
    if rc != 0 {
        return Err(last_error(socket, &"monitor receive"));
    }

    match first {
        Some((FRAME_RECORD_SIZE, true)) => {}
        Some((FRAME_RECORD_SIZE, false)) => {
            return Err(ZmqxError::malformed("event record without address frame"));
        }
        Some((len, _)) => {
            return Err(ZmqxError::malformed(format!(
                "event record is {len} bytes (expected {FRAME_RECORD_SIZE})"
            )));
        }
        None => return Err(ZmqxError::malformed("no event part received")),
    }

    let mut decoded = None;
    let rc = socket.recv_raw(flags, &mut |address: &[u8], _more: bool| {
        decoded = Some(decode_frames(&record, address));
    });
    if rc != 0 {
        return Err(last_error(socket, &"monitor receive"));
    }
    decoded.unwrap_or_else(|| Err(ZmqxError::malformed("no address part received")))
}
