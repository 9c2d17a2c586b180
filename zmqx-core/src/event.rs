//! Socket monitor event vocabulary.
//!
//! A monitor event carries an address and one numeric value whose meaning
//! depends only on the event kind (and revision). The record never says what
//! the value is, so the mapping lives in the per-revision tables below.

use crate::error::{Result, ZmqxError};
use crate::revision::Revision;
use std::fmt;
use std::time::Duration;

/// Connection lifecycle transitions reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Connection to a peer established.
    Connected,
    /// Synchronous connect failed; the transport will retry.
    ConnectDelayed,
    /// Reconnect attempt scheduled.
    ConnectRetried,
    /// Socket bound and listening.
    Listening,
    /// Bind failed.
    BindFailed,
    /// Incoming connection accepted.
    Accepted,
    /// Incoming connection could not be accepted.
    AcceptFailed,
    /// Connection closed.
    Closed,
    /// Connection could not be released.
    CloseFailed,
    /// Peer disconnected unexpectedly.
    Disconnected,
    /// Peer attached to the socket (3.x peer-control extension).
    PeerAttached,
    /// Peer detached from the socket (3.x peer-control extension).
    PeerDetached,
    /// Monitor was stopped (4.x).
    MonitorStopped,
}

impl EventKind {
    /// Get the event kind as the transport's name, without `ZMQ_EVENT_`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "CONNECTED",
            Self::ConnectDelayed => "CONNECT_DELAYED",
            Self::ConnectRetried => "CONNECT_RETRIED",
            Self::Listening => "LISTENING",
            Self::BindFailed => "BIND_FAILED",
            Self::Accepted => "ACCEPTED",
            Self::AcceptFailed => "ACCEPT_FAILED",
            Self::Closed => "CLOSED",
            Self::CloseFailed => "CLOSE_FAILED",
            Self::Disconnected => "DISCONNECTED",
            Self::PeerAttached => "PEER_ATTACHED",
            Self::PeerDetached => "PEER_DETACHED",
            Self::MonitorStopped => "MONITOR_STOPPED",
        }
    }

    /// Native discriminator of the kind in `revision`, if the revision has it.
    #[must_use]
    pub fn code(self, revision: Revision) -> Option<u32> {
        spec_for_kind(revision, self).map(|spec| spec.code)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the numeric value of an event means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraMeaning {
    /// Underlying file descriptor.
    Fd,
    /// Native error code.
    ErrorCode,
    /// Reconnect interval in milliseconds.
    IntervalMs,
    /// Opaque peer identifier.
    PeerId,
    /// No value.
    None,
}

/// One row of a revision's event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpec {
    pub code: u32,
    pub kind: EventKind,
    pub extra: ExtraMeaning,
}

const fn row(code: u32, kind: EventKind, extra: ExtraMeaning) -> EventSpec {
    EventSpec { code, kind, extra }
}

static V3_EVENTS: &[EventSpec] = &[
    row(1, EventKind::Connected, ExtraMeaning::Fd),
    row(2, EventKind::ConnectDelayed, ExtraMeaning::ErrorCode),
    row(4, EventKind::ConnectRetried, ExtraMeaning::IntervalMs),
    row(8, EventKind::Listening, ExtraMeaning::Fd),
    row(16, EventKind::BindFailed, ExtraMeaning::ErrorCode),
    row(32, EventKind::Accepted, ExtraMeaning::Fd),
    row(64, EventKind::AcceptFailed, ExtraMeaning::ErrorCode),
    row(128, EventKind::Closed, ExtraMeaning::Fd),
    row(256, EventKind::CloseFailed, ExtraMeaning::ErrorCode),
    row(512, EventKind::Disconnected, ExtraMeaning::PeerId),
    row(1024, EventKind::PeerAttached, ExtraMeaning::PeerId),
    row(2048, EventKind::PeerDetached, ExtraMeaning::PeerId),
];

static V4_EVENTS: &[EventSpec] = &[
    row(1, EventKind::Connected, ExtraMeaning::Fd),
    row(2, EventKind::ConnectDelayed, ExtraMeaning::ErrorCode),
    row(4, EventKind::ConnectRetried, ExtraMeaning::IntervalMs),
    row(8, EventKind::Listening, ExtraMeaning::Fd),
    row(16, EventKind::BindFailed, ExtraMeaning::ErrorCode),
    row(32, EventKind::Accepted, ExtraMeaning::Fd),
    row(64, EventKind::AcceptFailed, ExtraMeaning::ErrorCode),
    row(128, EventKind::Closed, ExtraMeaning::Fd),
    row(256, EventKind::CloseFailed, ExtraMeaning::ErrorCode),
    row(512, EventKind::Disconnected, ExtraMeaning::Fd),
    row(1024, EventKind::MonitorStopped, ExtraMeaning::None),
];

/// The event table of a revision. Empty for 2.x.
#[must_use]
pub fn event_table(revision: Revision) -> &'static [EventSpec] {
    match revision {
        Revision::V2 => &[],
        Revision::V3 => V3_EVENTS,
        Revision::V4 => V4_EVENTS,
    }
}

/// Resolve a native discriminator.
///
/// Codes outside the revision's table fail with `UnknownEventKind`; the
/// caller must not guess a layout for them.
pub fn spec_for_code(revision: Revision, code: u32) -> Result<EventSpec> {
    event_table(revision)
        .iter()
        .find(|spec| spec.code == code)
        .copied()
        .ok_or(ZmqxError::UnknownEventKind(code))
}

#[must_use]
pub fn spec_for_kind(revision: Revision, kind: EventKind) -> Option<EventSpec> {
    event_table(revision)
        .iter()
        .find(|spec| spec.kind == kind)
        .copied()
}

/// A decoded monitor event.
///
/// The address is an owned copy and `extra` is always widened to 64 bits,
/// so the event outlives the buffer it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub kind: EventKind,
    /// Endpoint the transition concerns.
    pub address: String,
    /// Numeric value; see [`Event::meaning`].
    pub extra: i64,
    /// What `extra` holds for this kind.
    pub meaning: ExtraMeaning,
}

impl Event {
    pub fn new(spec: EventSpec, address: impl Into<String>, extra: i64) -> Self {
        Self {
            kind: spec.kind,
            address: address.into(),
            extra,
            meaning: spec.extra,
        }
    }

    fn extra_if(&self, meaning: ExtraMeaning) -> Option<i64> {
        (self.meaning == meaning).then_some(self.extra)
    }

    /// File descriptor, for Connected, Listening, Accepted, Closed.
    #[must_use]
    pub fn fd(&self) -> Option<i64> {
        self.extra_if(ExtraMeaning::Fd)
    }

    /// Native error code, for the *Failed and ConnectDelayed kinds.
    #[must_use]
    pub fn error_code(&self) -> Option<i64> {
        self.extra_if(ExtraMeaning::ErrorCode)
    }

    /// Reconnect interval, for ConnectRetried.
    #[must_use]
    pub fn retry_interval(&self) -> Option<Duration> {
        self.extra_if(ExtraMeaning::IntervalMs)
            .map(|ms| Duration::from_millis(ms.max(0) as u64))
    }

    /// Peer identifier, for Disconnected (3.x), PeerAttached, PeerDetached.
    #[must_use]
    pub fn peer_id(&self) -> Option<i64> {
        self.extra_if(ExtraMeaning::PeerId)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.address.is_empty() {
            write!(f, " {}", self.address)?;
        }
        match self.meaning {
            ExtraMeaning::Fd => write!(f, " (fd {})", self.extra),
            ExtraMeaning::ErrorCode => write!(f, " (error {})", self.extra),
            ExtraMeaning::IntervalMs => write!(f, " (retry in {}ms)", self.extra),
            ExtraMeaning::PeerId => write!(f, " (peer {})", self.extra),
            ExtraMeaning::None => Ok(()),
        }
    }
}
