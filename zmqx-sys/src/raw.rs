//! Collaborator interface: the live socket handle.
//!
//! Socket creation, teardown and plain messaging belong to the transport
//! binding. This layer only needs the raw option calls, a scoped receive and
//! the last native error code, expressed with the transport's own pointer and
//! size conventions so that the valueless and size-override call shapes can
//! be passed through unchanged.

use std::ffi::{c_char, c_int, c_void};

/// Receive flag: fail with EAGAIN instead of blocking (ZMQ_DONTWAIT).
pub const DONTWAIT: c_int = 1;

/// Raw socket handle.
///
/// # Safety
///
/// Implementors promise that every 3.x monitor record handed to the closure
/// of [`RawSocket::recv_raw`] carries an address pointer that is either null
/// or points to a NUL-terminated string that stays valid until the closure
/// returns. The monitor decoder dereferences that pointer.
pub unsafe trait RawSocket {
    /// Read an option (zmq_getsockopt).
    ///
    /// On entry `*size` is the capacity of `value`; on success it holds the
    /// number of bytes written. Returns 0 on success, -1 on failure.
    ///
    /// # Safety
    ///
    /// `value` must be valid for writes of `*size` bytes and `size` must be
    /// a valid pointer.
    unsafe fn get_option_raw(
        &mut self,
        code: c_int,
        value: *mut c_void,
        size: *mut usize,
    ) -> c_int;

    /// Write an option (zmq_setsockopt).
    ///
    /// `value` may be null, in which case `size` is a parameter rather than a
    /// length. Returns 0 on success, -1 on failure.
    ///
    /// # Safety
    ///
    /// When `value` is non-null it must be valid for reads as the transport
    /// interprets `size` for `code`.
    unsafe fn set_option_raw(&mut self, code: c_int, value: *const c_void, size: usize) -> c_int;

    /// Receive one message part and lend it to `f` together with the
    /// "more parts follow" flag. The part is released before this returns.
    /// Returns 0 on success, -1 on failure (in which case `f` is not called).
    fn recv_raw(&mut self, flags: c_int, f: &mut dyn FnMut(&[u8], bool)) -> c_int;

    /// Native error code of the last failed call (zmq_errno).
    fn errno(&self) -> c_int;
}

/// Peer-control extension primitives (3.x extension builds only).
///
/// # Safety
///
/// Same contract as [`RawSocket`]. In addition, a string returned through
/// [`PeerControl::last_recv_peer_addr_raw`] must stay valid until it is
/// passed to [`PeerControl::free_transport_string`].
pub unsafe trait PeerControl: RawSocket {
    /// Address of the peer the last message came from, allocated by the
    /// transport (zmq_last_recv_peer_addr). Returns 0 on success.
    ///
    /// # Safety
    ///
    /// `out` must be valid for a pointer write.
    unsafe fn last_recv_peer_addr_raw(&mut self, out: *mut *mut c_char) -> c_int;

    /// Release a string returned by [`PeerControl::last_recv_peer_addr_raw`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `last_recv_peer_addr_raw` on this socket and must
    /// not be used afterwards.
    unsafe fn free_transport_string(&mut self, ptr: *mut c_char);

    /// Disconnect the peer the last message came from.
    fn disconnect_last_recv_peer_raw(&mut self) -> c_int;

    /// Block the address of the peer the last message came from.
    fn block_last_recv_peer_raw(&mut self) -> c_int;
}
