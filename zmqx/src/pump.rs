//! Forwarding monitor events into a channel.
//!
//! The pump runs on the caller's thread; nothing is spawned. Unknown event
//! kinds are skipped, since a newer transport may report kinds this revision
//! does not know. A malformed record means the stream is out of sync and ends
//! the pump, as does any transport error.

use crate::socket::ExtSocket;
use tracing::{debug, warn};
use zmqx_core::error::{Result, ZmqxError};
use zmqx_core::event::Event;
use zmqx_sys::raw::RawSocket;

/// Receiving side of a monitor channel.
pub type EventReceiver = flume::Receiver<Event>;

/// Sending side of a monitor channel.
pub type EventSender = flume::Sender<Event>;

/// Create an unbounded monitor channel pair.
#[must_use]
pub fn create_monitor_channel() -> (EventSender, EventReceiver) {
    flume::unbounded()
}

/// Why a pump stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpExit {
    /// Every receiver was dropped.
    Disconnected,
    /// The event limit was reached.
    Limit,
}

/// Reads events from a monitor socket and sends them to a channel.
pub struct EventPump<'a, S> {
    socket: &'a mut ExtSocket<S>,
    sender: EventSender,
    forwarded: u64,
    skipped: u64,
}

impl<'a, S: RawSocket> EventPump<'a, S> {
    pub fn new(socket: &'a mut ExtSocket<S>, sender: EventSender) -> Self {
        Self {
            socket,
            sender,
            forwarded: 0,
            skipped: 0,
        }
    }

    /// Receive one event and forward it.
    ///
    /// Returns `Ok(false)` when the receiver is gone, and `Ok(true)` when an
    /// event was forwarded or an unknown kind was skipped.
    pub fn pump_once(&mut self) -> Result<bool> {
        match self.socket.recv_event() {
            Ok(event) => {
                if self.sender.send(event).is_err() {
                    debug!("[PUMP] Receiver dropped after {} events", self.forwarded);
                    return Ok(false);
                }
                self.forwarded += 1;
                Ok(true)
            }
            Err(ZmqxError::UnknownEventKind(code)) => {
                warn!("[PUMP] Skipping unknown event kind {}", code);
                self.skipped += 1;
                Ok(true)
            }
            Err(err) => {
                debug!("[PUMP] Stopping: {}", err);
                Err(err)
            }
        }
    }

    /// Pump until the receiver is dropped or an error ends the stream.
    pub fn run(&mut self) -> Result<PumpExit> {
        while self.pump_once()? {}
        Ok(PumpExit::Disconnected)
    }

    /// Pump at most `limit` events (skipped ones included).
    pub fn run_for(&mut self, limit: usize) -> Result<PumpExit> {
        for _ in 0..limit {
            if !self.pump_once()? {
                return Ok(PumpExit::Disconnected);
            }
        }
        Ok(PumpExit::Limit)
    }

    /// Events sent to the channel so far.
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Unknown-kind records skipped so far.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
