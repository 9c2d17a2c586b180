//! Socket type vocabulary per transport revision.
//!
//! Socket creation is the transport binding's job; this module only knows
//! which types exist in which revision and their native codes (ZMQ_TYPE).

use crate::revision::Revision;
use std::fmt;

/// ZeroMQ socket types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketType {
    /// PAIR socket for exclusive bidirectional communication
    Pair,

    /// PUB socket for publishing messages to subscribers
    Pub,

    /// SUB socket for subscribing to published messages
    Sub,

    /// REQ socket for synchronous request-reply client
    Req,

    /// REP socket for synchronous request-reply server
    Rep,

    /// DEALER socket for asynchronous request-reply patterns
    Dealer,

    /// ROUTER socket for routing messages by identity
    Router,

    /// PULL socket for receiving messages from pushers
    Pull,

    /// PUSH socket for sending messages to pullers
    Push,

    /// XPUB socket for extended publisher with subscription awareness
    XPub,

    /// XSUB socket for extended subscriber with dynamic subscriptions
    XSub,

    /// STREAM socket for raw TCP connections (4.x)
    Stream,

    /// Approval-gated publisher (3.x peer-control extension)
    APub,
}

impl SocketType {
    /// Get the socket type as a string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pair => "PAIR",
            Self::Pub => "PUB",
            Self::Sub => "SUB",
            Self::Req => "REQ",
            Self::Rep => "REP",
            Self::Dealer => "DEALER",
            Self::Router => "ROUTER",
            Self::Pull => "PULL",
            Self::Push => "PUSH",
            Self::XPub => "XPUB",
            Self::XSub => "XSUB",
            Self::Stream => "STREAM",
            Self::APub => "APUB",
        }
    }

    /// Native code of the type in `revision`, or `None` if the revision
    /// lacks it.
    #[must_use]
    pub fn code(self, revision: Revision) -> Option<i32> {
        match (self, revision) {
            (Self::Pair, _) => Some(0),
            (Self::Pub, _) => Some(1),
            (Self::Sub, _) => Some(2),
            (Self::Req, _) => Some(3),
            (Self::Rep, _) => Some(4),
            (Self::Dealer, _) => Some(5),
            (Self::Router, _) => Some(6),
            (Self::Pull, _) => Some(7),
            (Self::Push, _) => Some(8),
            (Self::XPub, Revision::V3 | Revision::V4) => Some(9),
            (Self::XSub, Revision::V3 | Revision::V4) => Some(10),
            (Self::Stream, Revision::V4) => Some(11),
            (Self::APub, Revision::V3) => Some(12),
            _ => None,
        }
    }

    /// Resolve a value read from the TYPE option.
    #[must_use]
    pub fn from_code(code: i32, revision: Revision) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.code(revision) == Some(code))
    }

    const ALL: [SocketType; 13] = [
        Self::Pair,
        Self::Pub,
        Self::Sub,
        Self::Req,
        Self::Rep,
        Self::Dealer,
        Self::Router,
        Self::Pull,
        Self::Push,
        Self::XPub,
        Self::XSub,
        Self::Stream,
        Self::APub,
    ];
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_type_display() {
        assert_eq!(SocketType::Dealer.to_string(), "DEALER");
        assert_eq!(SocketType::APub.to_string(), "APUB");
    }

    #[test]
    fn test_codes_per_revision() {
        assert_eq!(SocketType::APub.code(Revision::V3), Some(12));
        assert_eq!(SocketType::APub.code(Revision::V4), None);
        assert_eq!(SocketType::Stream.code(Revision::V3), None);
        assert_eq!(SocketType::XPub.code(Revision::V2), None);
        assert_eq!(SocketType::Router.code(Revision::V2), Some(6));
    }

    #[test]
    fn test_from_code() {
        assert_eq!(SocketType::from_code(12, Revision::V3), Some(SocketType::APub));
        assert_eq!(SocketType::from_code(12, Revision::V4), None);
        assert_eq!(SocketType::from_code(11, Revision::V4), Some(SocketType::Stream));
        assert_eq!(SocketType::from_code(-1, Revision::V3), None);
    }
}
