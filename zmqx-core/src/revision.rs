//! Transport revision selection.
//!
//! The option and event vocabularies differ between the 2.x, 3.x and 4.x
//! transport series. Every catalog in this crate is keyed by a [`Revision`],
//! so an option a revision does not know is absent rather than present and
//! failing at runtime.

use crate::error::ZmqxError;
use std::fmt;
use std::str::FromStr;

#[cfg(any(
    all(feature = "zmq_2_x", feature = "zmq_3_x"),
    all(feature = "zmq_2_x", feature = "zmq_4_x"),
    all(feature = "zmq_3_x", feature = "zmq_4_x"),
))]
compile_error!("features `zmq_2_x`, `zmq_3_x` and `zmq_4_x` are mutually exclusive");

/// Transport revision the binding is compiled or configured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revision {
    /// 2.x series. No socket monitor.
    V2,
    /// 3.x series with the peer-control extension (APUB, peer ids).
    V3,
    /// 4.x series. Monitor events arrive as two frames.
    V4,
}

impl Revision {
    /// All revisions, oldest first.
    pub const ALL: [Revision; 3] = [Revision::V2, Revision::V3, Revision::V4];

    /// The revision selected by cargo features (`zmq_2_x`, `zmq_3_x`,
    /// `zmq_4_x`).
    ///
    /// Without one, a build linking stock libzmq (feature `libzmq`) targets
    /// 4.x and anything else targets 3.x.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(feature = "zmq_2_x") {
            Self::V2
        } else if cfg!(feature = "zmq_3_x") {
            Self::V3
        } else if cfg!(feature = "zmq_4_x") || cfg!(feature = "libzmq") {
            Self::V4
        } else {
            Self::V3
        }
    }

    /// Revision of a transport reporting `major.minor` (zmq_version).
    pub fn from_version(major: i32, minor: i32) -> Result<Self, ZmqxError> {
        match major {
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            _ => Err(ZmqxError::InvalidRevision(format!("{major}.{minor}"))),
        }
    }

    /// Whether the revision emits monitor events at all.
    #[must_use]
    pub const fn has_monitor(self) -> bool {
        !matches!(self, Self::V2)
    }

    /// Whether the peer-control extension (APUB, peer ids) is available.
    #[must_use]
    pub const fn has_peer_control(self) -> bool {
        matches!(self, Self::V3)
    }

    /// Get the revision as a string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "2.x",
            Self::V3 => "3.x",
            Self::V4 => "4.x",
        }
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Revision {
    type Err = ZmqxError;

    /// Accepts `2`, `2.x`, `zmq_2_x` (and the same for 3 and 4).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let major = trimmed
            .strip_prefix("zmq_")
            .and_then(|rest| rest.strip_suffix("_x"))
            .or_else(|| trimmed.strip_suffix(".x"))
            .unwrap_or(trimmed);

        match major {
            "2" => Ok(Self::V2),
            "3" => Ok(Self::V3),
            "4" => Ok(Self::V4),
            _ => Err(ZmqxError::InvalidRevision(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_parse_forms() {
        assert_eq!("2".parse::<Revision>().unwrap(), Revision::V2);
        assert_eq!("3.x".parse::<Revision>().unwrap(), Revision::V3);
        assert_eq!("zmq_4_x".parse::<Revision>().unwrap(), Revision::V4);
        assert_eq!(" 4 ".parse::<Revision>().unwrap(), Revision::V4);
    }

    #[test]
    fn test_revision_parse_rejects_unknown() {
        let err = "5.x".parse::<Revision>().unwrap_err();
        assert!(matches!(err, ZmqxError::InvalidRevision(ref s) if s == "5.x"));
        assert!("zmq_3".parse::<Revision>().is_err());
        assert!("".parse::<Revision>().is_err());
    }

    #[test]
    fn test_revision_capabilities() {
        assert!(!Revision::V2.has_monitor());
        assert!(Revision::V3.has_monitor());
        assert!(Revision::V4.has_monitor());

        assert!(Revision::V3.has_peer_control());
        assert!(!Revision::V4.has_peer_control());
    }

    #[test]
    fn test_revision_from_version() {
        assert_eq!(Revision::from_version(4, 3).unwrap(), Revision::V4);
        assert_eq!(Revision::from_version(3, 2).unwrap(), Revision::V3);
        assert_eq!(Revision::from_version(2, 2).unwrap(), Revision::V2);

        let err = Revision::from_version(5, 0).unwrap_err();
        assert!(matches!(err, ZmqxError::InvalidRevision(ref s) if s == "5.0"));
    }

    #[cfg(not(any(feature = "zmq_2_x", feature = "zmq_3_x", feature = "zmq_4_x")))]
    #[test]
    fn test_current_follows_backend() {
        let expected = if cfg!(feature = "libzmq") {
            Revision::V4
        } else {
            Revision::V3
        };
        assert_eq!(Revision::current(), expected);
    }

    #[test]
    fn test_revision_display_roundtrips() {
        for rev in Revision::ALL {
            assert_eq!(rev.to_string().parse::<Revision>().unwrap(), rev);
        }
    }
}
