//! Extended socket wrapper.

use zmqx_core::catalog::{Catalog, OptionName};
use zmqx_core::config::BindingConfig;
use zmqx_core::error::{Result, ZmqxError};
use zmqx_core::event::{Event, EventKind};
use zmqx_core::monitor::monitor_mask;
use zmqx_core::revision::Revision;
use zmqx_core::socket_type::SocketType;
use zmqx_sys::accessor::{IntValue, OptionAccessor};
use zmqx_sys::decoder;
use zmqx_sys::raw::{PeerControl, RawSocket, DONTWAIT};

use bytes::Bytes;
use tracing::debug;

/// A transport socket with monitor decoding and extended socket options.
///
/// `ExtSocket` owns the socket handle and a [`BindingConfig`]. Every option
/// call is checked against the configured revision's catalog, so an option
/// the revision lacks fails with `UnknownOption` instead of reaching the
/// transport with a meaningless code.
///
/// ## Peer-control extension (3.x)
///
/// The patched 3.x transport adds an approval-gated publisher (APUB) and a
/// handful of peer-control calls. The option-based ones are plain methods
/// here; the three parameterless primitives need a handle implementing
/// [`PeerControl`].
///
/// ## Example
///
/// ```rust
/// use zmqx::mock::MockSocket;
/// use zmqx::prelude::*;
///
/// # fn example() -> Result<(), ZmqxError> {
/// let config = BindingConfig::new().with_revision(Revision::V3);
/// let mut socket = ExtSocket::with_config(MockSocket::for_revision(Revision::V3), config);
///
/// socket.block_addr("10.0.0.13")?;
/// socket.disconnect_peer_by_id(42)?;
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct ExtSocket<S> {
    inner: S,
    config: BindingConfig,
}

impl<S: RawSocket> ExtSocket<S> {
    /// Wrap a socket using the default configuration.
    pub fn new(socket: S) -> Self {
        Self::with_config(socket, BindingConfig::default())
    }

    /// Wrap a socket, taking the revision from `ZMQX_REVISION` when set.
    pub fn from_env(socket: S) -> Result<Self> {
        Ok(Self::with_config(socket, BindingConfig::from_env()?))
    }

    /// Wrap a socket with an explicit configuration.
    pub fn with_config(socket: S, config: BindingConfig) -> Self {
        debug!("[SOCKET] Extension layer for {}", config.revision);
        Self {
            inner: socket,
            config,
        }
    }

    pub fn revision(&self) -> Revision {
        self.config.revision
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Option catalog of the configured revision.
    pub fn catalog(&self) -> Catalog {
        self.config.catalog()
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutable access to the handle, e.g. to enable a monitor or send.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn options(&mut self) -> OptionAccessor<'_, S> {
        OptionAccessor::with_config(&mut self.inner, &self.config)
    }

    // ===== generic access =====

    /// Read an integer option at its native width.
    pub fn get_int<T: IntValue>(&mut self, name: OptionName) -> Result<T> {
        self.options().get_int(name)
    }

    /// Write an integer option at its native width.
    pub fn set_int<T: IntValue>(&mut self, name: OptionName, value: T) -> Result<()> {
        self.options().set_int(name, value)
    }

    /// Read an unsigned 32-bit integer option.
    pub fn get_sockopt_uint(&mut self, name: OptionName) -> Result<u32> {
        self.options().get_uint(name)
    }

    pub fn get_bool(&mut self, name: OptionName) -> Result<bool> {
        self.options().get_bool(name)
    }

    pub fn set_bool(&mut self, name: OptionName, value: bool) -> Result<()> {
        self.options().set_bool(name, value)
    }

    pub fn get_string(&mut self, name: OptionName) -> Result<String> {
        self.options().get_string(name)
    }

    pub fn set_string(&mut self, name: OptionName, value: &str) -> Result<()> {
        self.options().set_string(name, value)
    }

    pub fn get_bytes(&mut self, name: OptionName) -> Result<Bytes> {
        self.options().get_bytes(name)
    }

    pub fn set_bytes(&mut self, name: OptionName, value: &[u8]) -> Result<()> {
        self.options().set_bytes(name, value)
    }

    // ===== common options =====

    /// Socket type, as reported by the TYPE option.
    pub fn socket_type(&mut self) -> Result<SocketType> {
        let code = self.get_int::<i32>(OptionName::Type)?;
        SocketType::from_code(code, self.revision()).ok_or_else(|| {
            ZmqxError::invalid_value(format!("socket type {code} in {}", self.revision()))
        })
    }

    /// Endpoint of the last bind or connect (3.x and later).
    pub fn last_endpoint(&mut self) -> Result<String> {
        self.get_string(OptionName::LastEndpoint)
    }

    // ===== peer-control extension (3.x) =====

    /// Refuse connections from `addr`.
    pub fn block_addr(&mut self, addr: &str) -> Result<()> {
        self.set_string(OptionName::BlockAddr, addr)
    }

    /// Lift a block set with [`ExtSocket::block_addr`].
    pub fn unblock_addr(&mut self, addr: &str) -> Result<()> {
        self.set_string(OptionName::UnblockAddr, addr)
    }

    /// Approve the pending subscription of `peer_id` on an APUB socket.
    ///
    /// The transport receives `value` as a C string and the peer id in the
    /// size argument of the option call.
    pub fn apub_approve(&mut self, value: &str, peer_id: u32) -> Result<()> {
        self.options()
            .set_string_with_size_override(OptionName::ApubApprove, value, peer_id)
    }

    /// Whether an APUB socket has a subscription waiting for approval.
    pub fn apub_req(&mut self) -> Result<bool> {
        self.get_bool(OptionName::ApubReq)
    }

    /// Disconnect a peer by the id reported in its monitor events.
    pub fn disconnect_peer_by_id(&mut self, peer_id: u32) -> Result<()> {
        self.options()
            .set_raw_param(OptionName::DisconnectPeerById, peer_id)
    }

    /// Id of the peer the last message came from.
    pub fn last_peer_unique_id(&mut self) -> Result<u32> {
        self.get_sockopt_uint(OptionName::LastPeerUniqId)
    }

    /// Address of the peer the last message came from, as an option read.
    pub fn last_peer_addr(&mut self) -> Result<String> {
        self.get_string(OptionName::LastPeerAddr)
    }

    // ===== monitor =====

    /// Receive and decode one event from this monitor socket.
    ///
    /// Blocks unless the configuration sets `dont_wait`.
    pub fn recv_event(&mut self) -> Result<Event> {
        let flags = if self.config.dont_wait { DONTWAIT } else { 0 };
        decoder::recv_event(&mut self.inner, self.config.revision, flags)
    }

    /// Subscription mask for `kinds` in the configured revision.
    pub fn monitor_mask(&self, kinds: &[EventKind]) -> Result<u32> {
        monitor_mask(self.config.revision, kinds)
    }
}

#[cfg(feature = "libzmq")]
impl ExtSocket<zmqx_sys::libzmq::zmq::Socket> {
    /// Wrap a `zmq::Socket`, targeting the revision of the linked libzmq.
    ///
    /// `ZMQX_REVISION` still takes precedence when set.
    pub fn from_zmq(socket: zmqx_sys::libzmq::zmq::Socket) -> Result<Self> {
        Ok(Self::with_config(socket, zmqx_sys::libzmq::binding_config()?))
    }
}

impl<S: PeerControl> ExtSocket<S> {
    /// Address of the peer the last message came from.
    ///
    /// The transport allocates the string; it is copied and released before
    /// this returns.
    pub fn last_recv_peer_addr(&mut self) -> Result<String> {
        self.options().last_recv_peer_addr()
    }

    /// Disconnect the peer the last message came from.
    pub fn disconnect_last_recv_peer(&mut self) -> Result<()> {
        self.options().disconnect_last_recv_peer()
    }

    /// Block the peer the last message came from.
    pub fn block_last_recv_peer(&mut self) -> Result<()> {
        self.options().block_last_recv_peer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zmqx_sys::mock::MockSocket;

    fn socket(revision: Revision) -> ExtSocket<MockSocket> {
        ExtSocket::with_config(
            MockSocket::for_revision(revision),
            BindingConfig::new().with_revision(revision),
        )
    }

    #[test]
    fn test_socket_type() {
        let mut s = socket(Revision::V3);
        s.get_mut().store(16, &12i32.to_ne_bytes());
        assert_eq!(s.socket_type().unwrap(), SocketType::APub);

        let mut s = socket(Revision::V4);
        s.get_mut().store(16, &12i32.to_ne_bytes());
        assert!(matches!(s.socket_type(), Err(ZmqxError::InvalidValue(_))));
    }

    #[test]
    fn test_monitor_mask_uses_revision() {
        let s = socket(Revision::V4);
        assert_eq!(s.monitor_mask(&[EventKind::Connected]).unwrap(), 1);
        assert!(s.monitor_mask(&[EventKind::PeerAttached]).is_err());
    }
}
