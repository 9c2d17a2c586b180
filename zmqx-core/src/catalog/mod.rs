//! Socket option catalogs.
//!
//! Each transport revision has its own static table mapping an option to its
//! native code and wire shape (zmq_setsockopt/zmq_getsockopt). A revision
//! that lacks an option simply has no entry for it, so asking for it yields
//! [`ZmqxError::UnknownOption`] instead of a runtime surprise from the
//! transport.
//!
//! # Examples
//!
//! ```
//! use zmqx_core::catalog::{Catalog, OptionCategory, OptionName, RawShape};
//! use zmqx_core::revision::Revision;
//!
//! let catalog = Catalog::for_revision(Revision::V3);
//! let desc = catalog.lookup(OptionName::DisconnectPeerById).unwrap();
//! assert_eq!(desc.category, OptionCategory::Raw(RawShape::SizeOnly));
//!
//! // 4.x has no peer-control extension.
//! assert!(Catalog::for_revision(Revision::V4)
//!     .lookup(OptionName::DisconnectPeerById)
//!     .is_err());
//! ```

mod v2;
mod v3;
mod v4;

use crate::error::{Result, ZmqxError};
use crate::revision::Revision;
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use std::fmt;

pub use v3::{
    ZMQ_APUB_APPROVE, ZMQ_APUB_REQ, ZMQ_BLOCK_ADDR, ZMQ_DISCONNECT_PEER_BY_ID, ZMQ_LAST_PEER_ADDR,
    ZMQ_LAST_PEER_UNIQ_ID, ZMQ_UNBLOCK_ADDR,
};

/// Width of an integer option's native value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I32,
    U32,
    I64,
    U64,
}

impl IntWidth {
    /// Size in bytes of the native value.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::I32 | Self::U32 => 4,
            Self::I64 | Self::U64 => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
        }
    }
}

/// Shape of a raw-parameter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawShape {
    /// Null data pointer; the parameter travels in the size argument.
    SizeOnly,
    /// NUL-terminated string pointer; the size argument carries a peer id
    /// instead of the string length.
    CStrSizeOverride,
}

/// Wire category of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCategory {
    /// Fixed-width integer read and written through an exactly sized buffer.
    Integer(IntWidth),
    /// Textual value with explicit length.
    String,
    /// Binary value with explicit length.
    Bytes,
    /// Valueless call, see [`RawShape`].
    Raw(RawShape),
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(w) => write!(f, "integer({})", w.as_str()),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::Raw(RawShape::SizeOnly) => f.write_str("raw(size-only)"),
            Self::Raw(RawShape::CStrSizeOverride) => f.write_str("raw(cstr+size-override)"),
        }
    }
}

/// Directions an option supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl Access {
    #[must_use]
    pub const fn can_get(self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite)
    }

    #[must_use]
    pub const fn can_set(self) -> bool {
        matches!(self, Self::WriteOnly | Self::ReadWrite)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ReadOnly => "read-only",
            Self::WriteOnly => "write-only",
            Self::ReadWrite => "read-write",
        })
    }
}

/// Every option known to at least one revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    // 2.x only
    Hwm,
    Swap,
    McastLoop,
    RecoveryIvlMsec,

    // common
    Affinity,
    Identity,
    Subscribe,
    Unsubscribe,
    Rate,
    RecoveryIvl,
    SndBuf,
    RcvBuf,
    RcvMore,
    Events,
    Type,
    Linger,
    ReconnectIvl,
    Backlog,
    ReconnectIvlMax,
    RcvTimeo,
    SndTimeo,

    // 3.x and later
    MaxMsgSize,
    SndHwm,
    RcvHwm,
    MulticastHops,
    Ipv4Only,
    LastEndpoint,
    RouterMandatory,
    TcpKeepalive,
    TcpKeepaliveCnt,
    TcpKeepaliveIdle,
    TcpKeepaliveIntvl,
    TcpAcceptFilter,
    DelayAttachOnConnect,
    XpubVerbose,

    // 4.x
    Immediate,
    RouterRaw,
    Ipv6,
    Mechanism,
    PlainServer,
    PlainUsername,
    PlainPassword,
    CurveServer,
    ProbeRouter,
    ReqCorrelate,
    ReqRelaxed,
    Conflate,
    ZapDomain,
    RouterHandover,
    Tos,
    HandshakeIvl,

    // 3.x peer-control extension
    BlockAddr,
    UnblockAddr,
    ApubApprove,
    LastPeerAddr,
    ApubReq,
    LastPeerUniqId,
    DisconnectPeerById,
}

impl OptionName {
    /// The transport's name for the option, without the `ZMQ_` prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hwm => "HWM",
            Self::Swap => "SWAP",
            Self::McastLoop => "MCAST_LOOP",
            Self::RecoveryIvlMsec => "RECOVERY_IVL_MSEC",
            Self::Affinity => "AFFINITY",
            Self::Identity => "IDENTITY",
            Self::Subscribe => "SUBSCRIBE",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Rate => "RATE",
            Self::RecoveryIvl => "RECOVERY_IVL",
            Self::SndBuf => "SNDBUF",
            Self::RcvBuf => "RCVBUF",
            Self::RcvMore => "RCVMORE",
            Self::Events => "EVENTS",
            Self::Type => "TYPE",
            Self::Linger => "LINGER",
            Self::ReconnectIvl => "RECONNECT_IVL",
            Self::Backlog => "BACKLOG",
            Self::ReconnectIvlMax => "RECONNECT_IVL_MAX",
            Self::RcvTimeo => "RCVTIMEO",
            Self::SndTimeo => "SNDTIMEO",
            Self::MaxMsgSize => "MAXMSGSIZE",
            Self::SndHwm => "SNDHWM",
            Self::RcvHwm => "RCVHWM",
            Self::MulticastHops => "MULTICAST_HOPS",
            Self::Ipv4Only => "IPV4ONLY",
            Self::LastEndpoint => "LAST_ENDPOINT",
            Self::RouterMandatory => "ROUTER_MANDATORY",
            Self::TcpKeepalive => "TCP_KEEPALIVE",
            Self::TcpKeepaliveCnt => "TCP_KEEPALIVE_CNT",
            Self::TcpKeepaliveIdle => "TCP_KEEPALIVE_IDLE",
            Self::TcpKeepaliveIntvl => "TCP_KEEPALIVE_INTVL",
            Self::TcpAcceptFilter => "TCP_ACCEPT_FILTER",
            Self::DelayAttachOnConnect => "DELAY_ATTACH_ON_CONNECT",
            Self::XpubVerbose => "XPUB_VERBOSE",
            Self::Immediate => "IMMEDIATE",
            Self::RouterRaw => "ROUTER_RAW",
            Self::Ipv6 => "IPV6",
            Self::Mechanism => "MECHANISM",
            Self::PlainServer => "PLAIN_SERVER",
            Self::PlainUsername => "PLAIN_USERNAME",
            Self::PlainPassword => "PLAIN_PASSWORD",
            Self::CurveServer => "CURVE_SERVER",
            Self::ProbeRouter => "PROBE_ROUTER",
            Self::ReqCorrelate => "REQ_CORRELATE",
            Self::ReqRelaxed => "REQ_RELAXED",
            Self::Conflate => "CONFLATE",
            Self::ZapDomain => "ZAP_DOMAIN",
            Self::RouterHandover => "ROUTER_HANDOVER",
            Self::Tos => "TOS",
            Self::HandshakeIvl => "HANDSHAKE_IVL",
            Self::BlockAddr => "BLOCK_ADDR",
            Self::UnblockAddr => "UNBLOCK_ADDR",
            Self::ApubApprove => "APUB_APPROVE",
            Self::LastPeerAddr => "LAST_PEER_ADDR",
            Self::ApubReq => "APUB_REQ",
            Self::LastPeerUniqId => "LAST_PEER_UNIQ_ID",
            Self::DisconnectPeerById => "DISCONNECT_PEER_BY_ID",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry for one option in one revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionDescriptor {
    pub name: OptionName,
    /// Native option code passed to the transport.
    pub code: i32,
    pub category: OptionCategory,
    pub access: Access,
}

impl OptionDescriptor {
    pub(crate) const fn int(name: OptionName, code: i32, width: IntWidth, access: Access) -> Self {
        Self {
            name,
            code,
            category: OptionCategory::Integer(width),
            access,
        }
    }

    pub(crate) const fn string(name: OptionName, code: i32, access: Access) -> Self {
        Self {
            name,
            code,
            category: OptionCategory::String,
            access,
        }
    }

    pub(crate) const fn bytes(name: OptionName, code: i32, access: Access) -> Self {
        Self {
            name,
            code,
            category: OptionCategory::Bytes,
            access,
        }
    }

    pub(crate) const fn raw(name: OptionName, code: i32, shape: RawShape) -> Self {
        Self {
            name,
            code,
            category: OptionCategory::Raw(shape),
            access: Access::WriteOnly,
        }
    }
}

static V2_INDEX: Lazy<HashMap<i32, usize>> = Lazy::new(|| code_index(v2::OPTIONS));
static V3_INDEX: Lazy<HashMap<i32, usize>> = Lazy::new(|| code_index(v3::OPTIONS));
static V4_INDEX: Lazy<HashMap<i32, usize>> = Lazy::new(|| code_index(v4::OPTIONS));

fn code_index(options: &[OptionDescriptor]) -> HashMap<i32, usize> {
    options
        .iter()
        .enumerate()
        .map(|(pos, desc)| (desc.code, pos))
        .collect()
}

/// The option table of one revision.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    revision: Revision,
    options: &'static [OptionDescriptor],
}

impl Catalog {
    /// Catalog for the given revision.
    #[must_use]
    pub fn for_revision(revision: Revision) -> Self {
        let options = match revision {
            Revision::V2 => v2::OPTIONS,
            Revision::V3 => v3::OPTIONS,
            Revision::V4 => v4::OPTIONS,
        };
        Self { revision, options }
    }

    /// Catalog for the revision selected by cargo features.
    #[must_use]
    pub fn current() -> Self {
        Self::for_revision(Revision::current())
    }

    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Look up an option by name.
    pub fn lookup(&self, name: OptionName) -> Result<OptionDescriptor> {
        self.options
            .iter()
            .find(|desc| desc.name == name)
            .copied()
            .ok_or_else(|| ZmqxError::unknown_option(format!("{name} (not in {})", self.revision)))
    }

    /// Look up an option by native code.
    pub fn lookup_code(&self, code: i32) -> Result<OptionDescriptor> {
        let index = match self.revision {
            Revision::V2 => &*V2_INDEX,
            Revision::V3 => &*V3_INDEX,
            Revision::V4 => &*V4_INDEX,
        };
        index
            .get(&code)
            .map(|&pos| self.options[pos])
            .ok_or_else(|| {
                ZmqxError::unknown_option(format!("code {code} (not in {})", self.revision))
            })
    }

    /// Whether the revision knows the option.
    #[must_use]
    pub fn contains(&self, name: OptionName) -> bool {
        self.options.iter().any(|desc| desc.name == name)
    }

    /// All options of the revision.
    pub fn iter(&self) -> impl Iterator<Item = &'static OptionDescriptor> {
        self.options.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
