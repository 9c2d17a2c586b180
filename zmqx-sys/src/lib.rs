//! Raw option access and monitor record decoding for zmqx.
//!
//! Everything here talks to the transport through the pointer-and-size
//! conventions of its C API:
//! - `raw`: the collaborator traits a socket handle implements
//! - `record`: the 3.x monitor record layout
//! - `decoder`: record decoding and `recv_event`
//! - `accessor`: typed option get/set over the three wire shapes
//! - `mock`: a recording collaborator for tests
//! - `libzmq` (feature `libzmq`): the collaborator for `zmq::Socket`

#![warn(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]

pub mod accessor;
pub mod decoder;
pub mod mock;
pub mod raw;
pub mod record;

#[cfg(feature = "libzmq")]
pub mod libzmq;

pub use zmqx_core as core;

use raw::RawSocket;
use tracing::debug;
use zmqx_core::error::ZmqxError;

/// Translate the socket's last native error after a failed call.
pub(crate) fn last_error<S: RawSocket + ?Sized>(
    socket: &S,
    what: &dyn std::fmt::Display,
) -> ZmqxError {
    let err = ZmqxError::from_code(socket.errno());
    debug!("[ZMQX] {} failed: {}", what, err);
    err
}
