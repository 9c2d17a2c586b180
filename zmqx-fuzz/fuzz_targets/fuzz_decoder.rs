#![no_main]

use libfuzzer_sys::fuzz_target;
use zmqx_core::catalog::Catalog;
use zmqx_core::error::ZmqxError;
use zmqx_core::monitor::{decode_frames, FRAME_RECORD_SIZE};
use zmqx_core::revision::Revision;

fuzz_target!(|data: &[u8]| {
    // Two-frame monitor events: the record is a prefix, the rest the address
    let split = data.len().min(FRAME_RECORD_SIZE);
    let (record, address) = data.split_at(split);
    match decode_frames(record, address) {
        Ok(_) => assert_eq!(record.len(), FRAME_RECORD_SIZE),
        Err(ZmqxError::MalformedEvent(_)) => assert_ne!(record.len(), FRAME_RECORD_SIZE),
        Err(ZmqxError::UnknownEventKind(_)) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }

    // Option lookup by arbitrary code never panics
    if data.len() >= 4 {
        let code = i32::from_ne_bytes([data[0], data[1], data[2], data[3]]);
        for revision in Revision::ALL {
            if let Ok(desc) = Catalog::for_revision(revision).lookup_code(code) {
                assert_eq!(desc.code, code);
            }
        }
    }
});
