//! `RawSocket` for `zmq::Socket`, calling libzmq directly.
//!
//! The `zmq` crate owns socket lifetime and plain messaging; option calls go
//! straight to `zmq_getsockopt`/`zmq_setsockopt` so the valueless and
//! size-override shapes reach libzmq unchanged.

use crate::raw::RawSocket;
use std::env;
use std::ffi::{c_int, c_void};
use std::mem::MaybeUninit;
use std::slice;
use tracing::debug;
use zmqx_core::config::{BindingConfig, REVISION_ENV};
use zmqx_core::error::Result;
use zmqx_core::revision::Revision;

pub use zmq;

/// Revision of the libzmq this process is linked against.
pub fn linked_revision() -> Result<Revision> {
    let (major, minor, patch) = zmq::version();
    let revision = Revision::from_version(major, minor)?;
    debug!("[ZMQX] libzmq {}.{}.{} is {}", major, minor, patch, revision);
    Ok(revision)
}

/// Configuration matching the linked libzmq.
///
/// `ZMQX_REVISION` still takes precedence when set.
pub fn binding_config() -> Result<BindingConfig> {
    if env::var_os(REVISION_ENV).is_some() {
        return BindingConfig::from_env();
    }
    Ok(BindingConfig::new().with_revision(linked_revision()?))
}

/// Closes a received message on every exit path.
struct Message(zmq_sys::zmq_msg_t);

impl Message {
    fn new() -> Option<Self> {
        let mut msg = MaybeUninit::<zmq_sys::zmq_msg_t>::uninit();
        // SAFETY: zmq_msg_init initializes the message in place.
        let rc = unsafe { zmq_sys::zmq_msg_init(msg.as_mut_ptr()) };
        // SAFETY: rc == 0 means the message was initialized.
        (rc == 0).then(|| Self(unsafe { msg.assume_init() }))
    }
}

impl Drop for Message {
    fn drop(&mut self) {
        // SAFETY: the message was initialized by zmq_msg_init.
        unsafe { zmq_sys::zmq_msg_close(&mut self.0) };
    }
}

// SAFETY: libzmq 3.x monitor records point at an address string owned by the
// message, which stays alive until the message is closed after `f` returns.
unsafe impl RawSocket for zmq::Socket {
    unsafe fn get_option_raw(
        &mut self,
        code: c_int,
        value: *mut c_void,
        size: *mut usize,
    ) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { zmq_sys::zmq_getsockopt(self.as_mut_ptr(), code, value, size) }
    }

    unsafe fn set_option_raw(&mut self, code: c_int, value: *const c_void, size: usize) -> c_int {
        // SAFETY: forwarded caller contract.
        unsafe { zmq_sys::zmq_setsockopt(self.as_mut_ptr(), code, value, size) }
    }

    fn recv_raw(&mut self, flags: c_int, f: &mut dyn FnMut(&[u8], bool)) -> c_int {
        let Some(mut msg) = Message::new() else {
            return -1;
        };
        // SAFETY: the socket pointer is live for the lifetime of `self`.
        let rc = unsafe { zmq_sys::zmq_msg_recv(&mut msg.0, self.as_mut_ptr(), flags) };
        if rc < 0 {
            return -1;
        }

        // SAFETY: a received message exposes zmq_msg_size readable bytes at
        // zmq_msg_data until it is closed.
        let (part, more) = unsafe {
            let size = zmq_sys::zmq_msg_size(&mut msg.0);
            let data = zmq_sys::zmq_msg_data(&mut msg.0).cast::<u8>();
            let part = if size == 0 {
                &[][..]
            } else {
                slice::from_raw_parts(data, size)
            };
            (part, zmq_sys::zmq_msg_more(&mut msg.0) != 0)
        };
        f(part, more);
        0
    }

    fn errno(&self) -> c_int {
        // SAFETY: zmq_errno reads thread-local state only.
        unsafe { zmq_sys::zmq_errno() }
    }
}

#[cfg(feature = "peer-extensions")]
mod peer {
    use crate::raw::PeerControl;
    use std::ffi::{c_char, c_int, c_void};

    extern "C" {
        fn zmq_last_recv_peer_addr(socket: *mut c_void, out: *mut *mut c_char) -> c_int;
        fn zmq_disconnect_last_recv_peer(socket: *mut c_void) -> c_int;
        fn zmq_block_last_recv_peer(socket: *mut c_void) -> c_int;
    }

    // SAFETY: the extension returns a malloc'd string that the caller frees.
    unsafe impl PeerControl for zmq::Socket {
        unsafe fn last_recv_peer_addr_raw(&mut self, out: *mut *mut c_char) -> c_int {
            // SAFETY: forwarded caller contract.
            unsafe { zmq_last_recv_peer_addr(self.as_mut_ptr(), out) }
        }

        unsafe fn free_transport_string(&mut self, ptr: *mut c_char) {
            // SAFETY: the string was allocated with malloc by libzmq.
            unsafe { libc::free(ptr.cast()) };
        }

        fn disconnect_last_recv_peer_raw(&mut self) -> c_int {
            // SAFETY: the socket pointer is live for the lifetime of `self`.
            unsafe { zmq_disconnect_last_recv_peer(self.as_mut_ptr()) }
        }

        fn block_last_recv_peer_raw(&mut self) -> c_int {
            // SAFETY: the socket pointer is live for the lifetime of `self`.
            unsafe { zmq_block_last_recv_peer(self.as_mut_ptr()) }
        }
    }
}
