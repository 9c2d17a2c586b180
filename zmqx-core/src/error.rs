/// zmqx Error Types
///
/// Every accessor and decoder returns the specific failure kind, so callers
/// can tell a transient native failure from protocol-level corruption.

use crate::catalog::{Access, OptionCategory, OptionName};
use std::fmt;
use std::io;
use thiserror::Error;

/// Base of the transport's own error numbers (`ZMQ_HAUSNUMERO`).
pub const HAUSNUMERO: i32 = 156_384_712;

/// Operation cannot be accomplished in current state.
pub const EFSM: i32 = HAUSNUMERO + 51;
/// The protocol is not compatible with the socket type.
pub const ENOCOMPATPROTO: i32 = HAUSNUMERO + 52;
/// Context was terminated.
pub const ETERM: i32 = HAUSNUMERO + 53;
/// No I/O thread is available.
pub const EMTHREAD: i32 = HAUSNUMERO + 54;

/// Main error type for zmqx operations
#[derive(Error, Debug)]
pub enum ZmqxError {
    /// Option is not part of the selected revision's catalog
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Native call returned failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Event record has the wrong size or an invalid address slot
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// Event discriminator is not part of the selected revision's table
    #[error("Unknown event kind: {0}")]
    UnknownEventKind(u32),

    /// Option was used through an accessor for a different wire shape
    #[error("Option {option} has category {actual}, not {expected}")]
    CategoryMismatch {
        option: OptionName,
        expected: &'static str,
        actual: OptionCategory,
    },

    /// Option does not support the requested direction
    #[error("Option {option} is {access}")]
    AccessDenied { option: OptionName, access: Access },

    /// Transport reported a value size that differs from the option width
    #[error("Option {option} returned {actual} bytes (expected {expected})")]
    SizeMismatch {
        option: OptionName,
        expected: usize,
        actual: usize,
    },

    /// Value cannot be encoded for the transport
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// String value returned by the transport is not UTF-8
    #[error("Invalid UTF-8 in string value: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Operation is not available in the selected revision
    #[error("Unsupported in {revision}: {what}")]
    Unsupported {
        revision: crate::revision::Revision,
        what: &'static str,
    },

    /// Revision name could not be parsed
    #[error("Invalid revision: {0} (expected 2.x, 3.x or 4.x)")]
    InvalidRevision(String),
}

/// Result type alias for zmqx operations
pub type Result<T> = std::result::Result<T, ZmqxError>;

impl ZmqxError {
    /// Create an unknown option error
    pub fn unknown_option(option: impl fmt::Display) -> Self {
        Self::UnknownOption(option.to_string())
    }

    /// Create a malformed event error with a message
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }

    /// Create an invalid value error
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    /// Translate a native error code into a transport error
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        Self::Transport(TransportError::from_code(code))
    }

    /// Check if this error is recoverable by retrying the same call
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_recoverable(),
            _ => false,
        }
    }

    /// Check if the monitor stream must be treated as broken
    #[must_use]
    pub const fn is_protocol_desync(&self) -> bool {
        matches!(self, Self::MalformedEvent(_))
    }

    /// Check if this error was caused by the caller rather than the transport
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOption(_)
                | Self::CategoryMismatch { .. }
                | Self::AccessDenied { .. }
                | Self::InvalidValue(_)
                | Self::Unsupported { .. }
                | Self::InvalidRevision(_)
        )
    }
}

/// Classification of a native error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Operation cannot be accomplished in current state (EFSM)
    InvalidState,
    /// Protocol not compatible with the socket type (ENOCOMPATPROTO)
    IncompatibleProtocol,
    /// Context was terminated (ETERM)
    Terminated,
    /// No I/O thread available (EMTHREAD)
    NoIoThread,
    /// Any operating system error number
    Os(io::ErrorKind),
}

/// Typed form of a native error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    code: i32,
    kind: TransportErrorKind,
}

impl TransportError {
    /// Translate a native error code.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        let kind = match code {
            EFSM => TransportErrorKind::InvalidState,
            ENOCOMPATPROTO => TransportErrorKind::IncompatibleProtocol,
            ETERM => TransportErrorKind::Terminated,
            EMTHREAD => TransportErrorKind::NoIoThread,
            _ => TransportErrorKind::Os(io::Error::from_raw_os_error(code).kind()),
        };
        Self { code, kind }
    }

    /// The native error code, unchanged.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    #[must_use]
    pub const fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Check if retrying the same call may succeed
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind,
            TransportErrorKind::Os(
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            )
        )
    }

    /// Check if the owning context is gone
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.kind, TransportErrorKind::Terminated)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransportErrorKind::InvalidState => {
                write!(f, "operation cannot be accomplished in current state")?;
            }
            TransportErrorKind::IncompatibleProtocol => {
                write!(f, "the protocol is not compatible with the socket type")?;
            }
            TransportErrorKind::Terminated => write!(f, "context was terminated")?,
            TransportErrorKind::NoIoThread => write!(f, "no thread available")?,
            TransportErrorKind::Os(_) => write!(f, "{}", io::Error::from_raw_os_error(self.code))?,
        }
        write!(f, " (code {})", self.code)
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for io::Error {
    fn from(err: TransportError) -> Self {
        match err.kind {
            TransportErrorKind::Os(_) => io::Error::from_raw_os_error(err.code),
            _ => io::Error::new(io::ErrorKind::Other, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Linux errno values
    const EAGAIN: i32 = 11;
    const EINTR: i32 = 4;
    const EINVAL: i32 = 22;

    #[test]
    fn test_transport_specific_codes() {
        assert_eq!(
            TransportError::from_code(ETERM).kind(),
            TransportErrorKind::Terminated
        );
        assert_eq!(
            TransportError::from_code(EFSM).kind(),
            TransportErrorKind::InvalidState
        );
        assert!(TransportError::from_code(ETERM).is_terminated());
        assert_eq!(TransportError::from_code(EMTHREAD).code(), EMTHREAD);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_os_codes_keep_kind() {
        let err = TransportError::from_code(EAGAIN);
        assert_eq!(err.kind(), TransportErrorKind::Os(io::ErrorKind::WouldBlock));
        assert!(err.is_recoverable());

        assert!(TransportError::from_code(EINTR).is_recoverable());
        assert!(!TransportError::from_code(EINVAL).is_recoverable());
    }

    #[test]
    fn test_display_includes_code() {
        let err = TransportError::from_code(ETERM);
        assert_eq!(err.to_string(), format!("context was terminated (code {ETERM})"));
    }

    #[test]
    fn test_error_classification() {
        assert!(ZmqxError::malformed("short").is_protocol_desync());
        assert!(!ZmqxError::UnknownEventKind(4096).is_protocol_desync());
        assert!(ZmqxError::unknown_option("BOGUS").is_caller_error());
        assert!(!ZmqxError::from_code(ETERM).is_caller_error());
        assert!(!ZmqxError::from_code(ETERM).is_recoverable());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_into_io_error() {
        let io_err: io::Error = TransportError::from_code(EINVAL).into();
        assert_eq!(io_err.raw_os_error(), Some(EINVAL));

        let io_err: io::Error = TransportError::from_code(ETERM).into();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
    }
}
