//! zmqx Core
//!
//! This crate contains the pure, revision-aware building blocks of the
//! extension layer:
//! - Transport revision selection (`revision`)
//! - Static option catalogs per revision (`catalog`)
//! - Monitor event vocabulary and the two-frame decoder (`event`, `monitor`)
//! - Socket type vocabulary (`socket_type`)
//! - Binding configuration (`config`)
//! - Error types and native error translation (`error`)
//!
//! Anything that touches raw pointers lives in `zmqx-sys`.

#![cfg_attr(not(test), deny(unsafe_code))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_same_arms)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod monitor;
pub mod revision;
pub mod socket_type;

// Keep it minimal to avoid API lock-in.
pub mod prelude {
    pub use crate::catalog::{
        Access, Catalog, IntWidth, OptionCategory, OptionDescriptor, OptionName, RawShape,
    };
    pub use crate::config::BindingConfig;
    pub use crate::error::{Result, TransportError, TransportErrorKind, ZmqxError};
    pub use crate::event::{Event, EventKind, ExtraMeaning};
    pub use crate::monitor::{all_events_mask, decode_frames, monitor_mask};
    pub use crate::revision::Revision;
    pub use crate::socket_type::SocketType;
}
