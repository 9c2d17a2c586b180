//! Socket monitor helpers that need no raw pointers.
//!
//! 4.x delivers each event as two frames: a fixed 6-byte record
//! (`u16` event, `u32` value, native byte order) followed by the address.
//! The 3.x single-record form embeds an address pointer and is decoded in
//! `zmqx-sys`.

use crate::error::{Result, ZmqxError};
use crate::event::{event_table, spec_for_code, Event, EventKind, ExtraMeaning};
use crate::revision::Revision;
use tracing::trace;

/// Size of the first frame of a 4.x monitor event.
pub const FRAME_RECORD_SIZE: usize = 6;

/// Decode a 4.x two-frame monitor event.
///
/// The record must be exactly [`FRAME_RECORD_SIZE`] bytes; anything else is
/// a desynchronized stream and fails with `MalformedEvent`. The address
/// frame is copied (invalid UTF-8 is replaced).
pub fn decode_frames(record: &[u8], address: &[u8]) -> Result<Event> {
    if record.len() != FRAME_RECORD_SIZE {
        return Err(ZmqxError::malformed(format!(
            "event record is {} bytes (expected {FRAME_RECORD_SIZE})",
            record.len()
        )));
    }

    let code = u16::from_ne_bytes([record[0], record[1]]);
    let value = u32::from_ne_bytes([record[2], record[3], record[4], record[5]]);
    let spec = spec_for_code(Revision::V4, u32::from(code))?;

    let address = String::from_utf8_lossy(address).into_owned();
    trace!("[MONITOR] {} {} value={}", spec.kind, address, value);

    // fd and error codes are signed natively; the value slot is not.
    let extra = match spec.extra {
        ExtraMeaning::Fd | ExtraMeaning::ErrorCode => i64::from(value as i32),
        _ => i64::from(value),
    };
    Ok(Event::new(spec, address, extra))
}

/// Fold event kinds into the subscription mask passed when enabling a monitor.
///
/// Kinds the revision does not have are rejected with `Unsupported`.
pub fn monitor_mask(revision: Revision, kinds: &[EventKind]) -> Result<u32> {
    kinds.iter().try_fold(0u32, |mask, kind| {
        kind.code(revision)
            .map(|bit| mask | bit)
            .ok_or(ZmqxError::Unsupported {
                revision,
                what: "event kind",
            })
    })
}

/// Mask selecting every event of the revision (`ZMQ_EVENT_ALL`).
#[must_use]
pub fn all_events_mask(revision: Revision) -> u32 {
    event_table(revision).iter().fold(0, |mask, spec| mask | spec.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: u16, value: u32) -> [u8; FRAME_RECORD_SIZE] {
        let mut buf = [0u8; FRAME_RECORD_SIZE];
        buf[0..2].copy_from_slice(&code.to_ne_bytes());
        buf[2..6].copy_from_slice(&value.to_ne_bytes());
        buf
    }

    #[test]
    fn test_decode_frames_listening() {
        let event = decode_frames(&record(8, 12), b"tcp://0.0.0.0:5555").unwrap();
        assert_eq!(event.kind, EventKind::Listening);
        assert_eq!(event.address, "tcp://0.0.0.0:5555");
        assert_eq!(event.fd(), Some(12));
    }

    #[test]
    fn test_decode_frames_sign_extends_fd() {
        let event = decode_frames(&record(128, u32::MAX), b"tcp://x:1").unwrap();
        assert_eq!(event.extra, -1);
    }

    #[test]
    fn test_decode_frames_interval_not_sign_extended() {
        let event = decode_frames(&record(4, 0x8000_0000), b"tcp://x:1").unwrap();
        assert_eq!(event.meaning, ExtraMeaning::IntervalMs);
        assert_eq!(event.extra, 0x8000_0000);
    }

    #[test]
    fn test_decode_frames_wrong_size() {
        let full = record(1, 3);
        for len in [0, 1, 5] {
            let err = decode_frames(&full[..len], b"").unwrap_err();
            assert!(err.is_protocol_desync());
        }
        let mut long = full.to_vec();
        long.push(0);
        assert!(decode_frames(&long, b"").unwrap_err().is_protocol_desync());
    }

    #[test]
    fn test_decode_frames_unknown_kind() {
        let err = decode_frames(&record(4096, 0), b"").unwrap_err();
        assert!(matches!(err, ZmqxError::UnknownEventKind(4096)));
    }

    #[test]
    fn test_monitor_mask() {
        let mask = monitor_mask(
            Revision::V3,
            &[EventKind::Connected, EventKind::PeerAttached],
        )
        .unwrap();
        assert_eq!(mask, 1 | 1024);

        assert!(monitor_mask(Revision::V4, &[EventKind::PeerAttached]).is_err());
        assert_eq!(monitor_mask(Revision::V4, &[]).unwrap(), 0);
    }

    #[test]
    fn test_all_events_mask() {
        assert_eq!(all_events_mask(Revision::V2), 0);
        assert_eq!(all_events_mask(Revision::V3), 0x0FFF);
        assert_eq!(all_events_mask(Revision::V4), 0x07FF);
    }
}
