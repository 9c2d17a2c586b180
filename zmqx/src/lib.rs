//! # zmqx
//!
//! Socket monitor events and extended socket options for ZeroMQ-style
//! transports, across the 2.x, 3.x (with the peer-control extension) and
//! 4.x revisions.
//!
//! ## Architecture
//!
//! - **`zmqx-core`**: revisions, option catalogs, event vocabulary, errors
//! - **`zmqx-sys`**: raw option calls and monitor record decoding
//! - **`zmqx`**: public API surface (this crate)
//!
//! ## Revisions (build-time via features)
//!
//! - default: 4.x with **`libzmq`**, otherwise 3.x with the peer-control extension
//! - **`zmq_2_x`**: 2.x (no monitor events)
//! - **`zmq_3_x`**: 3.x
//! - **`zmq_4_x`**: 4.x (two-frame monitor events)
//!
//! At run time, [`BindingConfig::with_revision`] overrides the build default.
//! The `ZMQX_REVISION` variable is read only by [`BindingConfig::from_env`]
//! and [`ExtSocket::from_env`].
//!
//! ## Backends
//!
//! Any handle implementing [`RawSocket`] works. Enable **`libzmq`** for
//! `zmq::Socket`, and **`peer-extensions`** when libzmq carries the 3.x
//! peer-control patch.
//!
//! ## Quick Start
//!
//! ```rust
//! use zmqx::mock::MockSocket;
//! use zmqx::prelude::*;
//!
//! # fn example() -> Result<(), ZmqxError> {
//! let mut monitor = MockSocket::for_revision(Revision::V3);
//! monitor.push_record(1024, "tcp://10.0.0.5:40112", 7);
//!
//! let config = BindingConfig::new().with_revision(Revision::V3);
//! let mut socket = ExtSocket::with_config(monitor, config);
//!
//! let event = socket.recv_event()?;
//! assert_eq!(event.kind, EventKind::PeerAttached);
//! assert_eq!(event.peer_id(), Some(7));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(clippy::all)]

pub mod dev_tracing;
pub mod pump;
pub mod socket;

pub use bytes::Bytes;
pub use pump::{create_monitor_channel, EventPump, EventReceiver, EventSender, PumpExit};
pub use socket::ExtSocket;

pub use zmqx_core::catalog::{Catalog, OptionName};
pub use zmqx_core::config::BindingConfig;
pub use zmqx_core::error::{Result, TransportError, TransportErrorKind, ZmqxError};
pub use zmqx_core::event::{Event, EventKind, ExtraMeaning};
pub use zmqx_core::revision::Revision;
pub use zmqx_core::socket_type::SocketType;
pub use zmqx_sys::raw::{PeerControl, RawSocket};

/// Option catalogs and descriptors.
pub mod catalog {
    pub use zmqx_core::catalog::*;
}

/// Monitor record decoding.
pub mod monitor {
    pub use zmqx_core::monitor::{all_events_mask, decode_frames, monitor_mask, FRAME_RECORD_SIZE};
    pub use zmqx_sys::decoder::{decode, recv_event};
    pub use zmqx_sys::record::{encode_record, RECORD_SIZE};
}

/// Raw collaborator interface and accessor.
pub mod raw {
    pub use zmqx_sys::accessor::{IntValue, OptionAccessor};
    pub use zmqx_sys::raw::*;
}

/// `zmq::Socket` backend and linked-library detection.
#[cfg(feature = "libzmq")]
pub mod libzmq {
    pub use zmqx_sys::libzmq::*;
}

/// Recording socket for tests.
pub mod mock {
    pub use zmqx_sys::mock::*;
}

/// Convenient imports.
///
/// ```rust
/// use zmqx::prelude::*;
///
/// // ExtSocket, BindingConfig, Revision, Event, EventKind, OptionName, ...
/// ```
pub mod prelude {
    pub use super::{
        create_monitor_channel, BindingConfig, Event, EventKind, EventPump, ExtSocket,
        ExtraMeaning, OptionName, Revision, SocketType, ZmqxError,
    };
    pub use bytes::Bytes;
}
