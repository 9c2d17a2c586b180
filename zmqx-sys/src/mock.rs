//! Recording collaborator for tests.
//!
//! `MockSocket` stores option values in memory, records every raw call with
//! its pointer and size arguments kept apart, and hands out transport-style
//! allocations so tests can observe exactly what crossed the raw interface:
//!
//! - Size-only raw options are never read; a non-null data pointer for them
//!   is recorded as a violation.
//! - The size-override option is read up to its NUL terminator, and the size
//!   argument is recorded on its own.
//! - Transport strings are overwritten before they are freed, so a caller
//!   that kept aliasing one would read garbage.

use crate::raw::{PeerControl, RawSocket};
use crate::record::encode_record;
use hashbrown::{HashMap, HashSet};
use std::collections::VecDeque;
use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::slice;
use zmqx_core::catalog::{Catalog, OptionCategory, RawShape};
use zmqx_core::revision::Revision;

// Linux errno values reported by the mock.
pub const EAGAIN: c_int = 11;
pub const EFAULT: c_int = 14;
pub const EINVAL: c_int = 22;

/// Byte written over transport strings before they are freed.
pub const POISON: u8 = b'#';

/// One recorded `set_option_raw` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCall {
    pub code: c_int,
    /// Whether the data pointer was null.
    pub null_value: bool,
    /// The size argument, as passed.
    pub size: usize,
    /// The bytes read from the data pointer, if the mock read any.
    pub value: Option<Vec<u8>>,
}

/// In-memory socket implementing the raw collaborator interface.
#[derive(Debug, Default)]
pub struct MockSocket {
    options: HashMap<c_int, Vec<u8>>,
    size_only: HashSet<c_int>,
    size_override: HashSet<c_int>,
    set_calls: Vec<SetCall>,
    get_calls: Vec<(c_int, usize)>,
    violations: Vec<String>,
    fail_next: Option<c_int>,
    errno: c_int,
    frames: VecDeque<(Vec<u8>, bool)>,
    recv_flags: Vec<c_int>,
    addresses: Vec<CString>,
    last_peer: Option<CString>,
    live_strings: usize,
    freed_strings: usize,
    peer_calls: Vec<&'static str>,
}

impl MockSocket {
    /// Mock that knows the raw-parameter options of `revision`.
    #[must_use]
    pub fn for_revision(revision: Revision) -> Self {
        let mut mock = Self::default();
        for desc in Catalog::for_revision(revision).iter() {
            match desc.category {
                OptionCategory::Raw(RawShape::SizeOnly) => {
                    mock.size_only.insert(desc.code);
                }
                OptionCategory::Raw(RawShape::CStrSizeOverride) => {
                    mock.size_override.insert(desc.code);
                }
                _ => {}
            }
        }
        mock
    }

    /// Store a value as if the transport held it.
    pub fn store(&mut self, code: c_int, value: &[u8]) {
        self.options.insert(code, value.to_vec());
    }

    #[must_use]
    pub fn stored(&self, code: c_int) -> Option<&[u8]> {
        self.options.get(&code).map(Vec::as_slice)
    }

    /// Make the next raw call fail with `errno`.
    pub fn fail_next(&mut self, errno: c_int) {
        self.fail_next = Some(errno);
    }

    #[must_use]
    pub fn set_calls(&self) -> &[SetCall] {
        &self.set_calls
    }

    /// `(code, capacity)` of every `get_option_raw` call.
    #[must_use]
    pub fn get_calls(&self) -> &[(c_int, usize)] {
        &self.get_calls
    }

    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Queue a 3.x monitor record. The mock owns the address string.
    pub fn push_record(&mut self, event: c_int, address: &str, value: u32) {
        let address = CString::new(address).unwrap_or_default();
        let record = encode_record(event, address.as_ptr(), value);
        self.addresses.push(address);
        self.frames.push_back((record.to_vec(), false));
    }

    /// Queue a 4.x monitor event (record frame, then address frame).
    pub fn push_frames(&mut self, event: u16, value: u32, address: &str) {
        let mut record = Vec::with_capacity(6);
        record.extend_from_slice(&event.to_ne_bytes());
        record.extend_from_slice(&value.to_ne_bytes());
        self.frames.push_back((record, true));
        self.frames.push_back((address.as_bytes().to_vec(), false));
    }

    /// Queue an arbitrary message part.
    ///
    /// # Safety
    ///
    /// If the part is decoded as a 3.x record with a known discriminator,
    /// its address slot must be null or point to a live C string.
    pub unsafe fn push_raw_part(&mut self, part: Vec<u8>, more: bool) {
        self.frames.push_back((part, more));
    }

    #[must_use]
    pub fn pending_parts(&self) -> usize {
        self.frames.len()
    }

    /// Flags passed to every `recv_raw` call, failed ones included.
    #[must_use]
    pub fn recv_flags(&self) -> &[c_int] {
        &self.recv_flags
    }

    /// Address returned by the next `last_recv_peer_addr_raw`; `None`
    /// returns a null pointer.
    pub fn set_last_recv_peer(&mut self, address: Option<&str>) {
        self.set_last_recv_peer_bytes(address.map(str::as_bytes));
    }

    /// Like [`MockSocket::set_last_recv_peer`], for addresses that are not
    /// valid UTF-8. Bytes after an interior NUL are dropped.
    pub fn set_last_recv_peer_bytes(&mut self, address: Option<&[u8]>) {
        self.last_peer = address.map(|bytes| {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            CString::new(&bytes[..end]).unwrap_or_default()
        });
    }

    /// Transport strings handed out and not yet freed.
    #[must_use]
    pub fn live_strings(&self) -> usize {
        self.live_strings
    }

    #[must_use]
    pub fn freed_strings(&self) -> usize {
        self.freed_strings
    }

    #[must_use]
    pub fn peer_calls(&self) -> &[&'static str] {
        &self.peer_calls
    }

    fn take_failure(&mut self) -> bool {
        match self.fail_next.take() {
            Some(errno) => {
                self.errno = errno;
                true
            }
            None => false,
        }
    }

    fn fail(&mut self, errno: c_int) -> c_int {
        self.errno = errno;
        -1
    }
}

// SAFETY: every 3.x record queued through the safe API points at a CString
// owned by the mock for its whole lifetime.
unsafe impl RawSocket for MockSocket {
    unsafe fn get_option_raw(
        &mut self,
        code: c_int,
        value: *mut c_void,
        size: *mut usize,
    ) -> c_int {
        if self.take_failure() {
            return -1;
        }
        // SAFETY: caller passes a valid size pointer.
        let capacity = unsafe { *size };
        self.get_calls.push((code, capacity));

        let Some(stored) = self.options.get(&code) else {
            return self.fail(EINVAL);
        };
        if stored.len() > capacity {
            return self.fail(EINVAL);
        }
        // SAFETY: caller guarantees `value` is writable for `capacity` bytes.
        unsafe {
            std::ptr::copy_nonoverlapping(stored.as_ptr(), value.cast::<u8>(), stored.len());
            *size = stored.len();
        }
        0
    }

    unsafe fn set_option_raw(&mut self, code: c_int, value: *const c_void, size: usize) -> c_int {
        if self.take_failure() {
            return -1;
        }
        let null_value = value.is_null();

        if self.size_only.contains(&code) {
            if !null_value {
                self.violations
                    .push(format!("data pointer passed to size-only option {code}"));
            }
            self.set_calls.push(SetCall {
                code,
                null_value,
                size,
                value: None,
            });
            return 0;
        }

        if self.size_override.contains(&code) {
            if null_value {
                self.violations
                    .push(format!("null string passed to size-override option {code}"));
                return self.fail(EFAULT);
            }
            // SAFETY: this option's value is a NUL-terminated string.
            let bytes = unsafe { CStr::from_ptr(value.cast::<c_char>()) }
                .to_bytes()
                .to_vec();
            self.set_calls.push(SetCall {
                code,
                null_value,
                size,
                value: Some(bytes),
            });
            return 0;
        }

        if null_value && size > 0 {
            return self.fail(EFAULT);
        }
        let bytes = if null_value {
            Vec::new()
        } else {
            // SAFETY: caller guarantees `value` is readable for `size` bytes.
            unsafe { slice::from_raw_parts(value.cast::<u8>(), size) }.to_vec()
        };
        self.options.insert(code, bytes.clone());
        self.set_calls.push(SetCall {
            code,
            null_value,
            size,
            value: Some(bytes),
        });
        0
    }

    fn recv_raw(&mut self, flags: c_int, f: &mut dyn FnMut(&[u8], bool)) -> c_int {
        self.recv_flags.push(flags);
        if self.take_failure() {
            return -1;
        }
        match self.frames.pop_front() {
            Some((part, more)) => {
                f(&part, more);
                0
            }
            None => self.fail(EAGAIN),
        }
    }

    fn errno(&self) -> c_int {
        self.errno
    }
}

// SAFETY: strings handed out are leaked CStrings, valid until freed here.
unsafe impl PeerControl for MockSocket {
    unsafe fn last_recv_peer_addr_raw(&mut self, out: *mut *mut c_char) -> c_int {
        if self.take_failure() {
            return -1;
        }
        self.peer_calls.push("last_recv_peer_addr");
        let ptr = match &self.last_peer {
            Some(address) => {
                self.live_strings += 1;
                address.clone().into_raw()
            }
            None => std::ptr::null_mut(),
        };
        // SAFETY: caller passes a valid pointer slot.
        unsafe { *out = ptr };
        0
    }

    unsafe fn free_transport_string(&mut self, ptr: *mut c_char) {
        // SAFETY: `ptr` came from CString::into_raw above. Overwriting every
        // byte before the terminator keeps the length CString::from_raw sees.
        unsafe {
            let len = CStr::from_ptr(ptr).to_bytes().len();
            std::ptr::write_bytes(ptr.cast::<u8>(), POISON, len);
            drop(CString::from_raw(ptr));
        }
        self.live_strings -= 1;
        self.freed_strings += 1;
    }

    fn disconnect_last_recv_peer_raw(&mut self) -> c_int {
        if self.take_failure() {
            return -1;
        }
        self.peer_calls.push("disconnect_last_recv_peer");
        0
    }

    fn block_last_recv_peer_raw(&mut self) -> c_int {
        if self.take_failure() {
            return -1;
        }
        self.peer_calls.push("block_last_recv_peer");
        0
    }
}
