//! Single-slot button event queue
//!
//! Filled from the button-edge callback with non-blocking pushes, drained
//! by one logic thread with filtered reads bounded by an overall deadline.
//! A second edge arriving before the first is read is dropped.

use core::cell::Cell;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{with_deadline, Duration, Instant};

use super::events::{Button, ButtonEvent, ButtonFilter};

/// At most one unread event
pub const QUEUE_CAPACITY: usize = 1;

/// Why an event could not be queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushError {
    /// An unread event is already waiting
    Full,
    /// The queue was closed
    Closed,
    /// The queue was reset and the reader has not caught up yet
    Reset,
}

impl core::fmt::Display for PushError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PushError::Full => f.write_str("full"),
            PushError::Closed => f.write_str("closed"),
            PushError::Reset => f.write_str("reset"),
        }
    }
}

/// Why a read was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    Closed,
    Reset,
}

impl core::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::Closed => f.write_str("closed"),
            ReadError::Reset => f.write_str("reset"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueueState {
    Open,
    /// Reset requested; pushes refused until the reader observes it
    Resetting,
    Closed,
}

/// Bounded single-producer/single-consumer button queue
pub struct ButtonQueue<M: RawMutex> {
    channel: Channel<M, ButtonEvent, QUEUE_CAPACITY>,
    state: Mutex<M, Cell<QueueState>>,
    fault: Signal<M, ReadError>,
}

impl<M: RawMutex> Default for ButtonQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> ButtonQueue<M> {
    /// Create an empty, open queue
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            state: Mutex::new(Cell::new(QueueState::Open)),
            fault: Signal::new(),
        }
    }

    fn state(&self) -> QueueState {
        self.state.lock(|s| s.get())
    }

    fn set_state(&self, state: QueueState) {
        self.state.lock(|s| s.set(state));
    }

    /// Button-edge callback body
    ///
    /// `value` is the raw key value: zero for a release, anything else for
    /// a press. Never blocks; failures are logged and the edge is dropped.
    pub fn on_input(&self, code: u16, value: i32) {
        let Some(button) = Button::from_input_code(code) else {
            warn!("Ignoring unknown button code {}", code);
            return;
        };
        let event = if value != 0 {
            ButtonEvent::pressed(button)
        } else {
            ButtonEvent::released(button)
        };
        // push() already logged the reason
        let _ = self.push(event);
    }

    /// Queue an event without blocking
    pub fn push(&self, event: ButtonEvent) -> Result<(), PushError> {
        let result = match self.state() {
            QueueState::Closed => Err(PushError::Closed),
            QueueState::Resetting => Err(PushError::Reset),
            QueueState::Open => self
                .channel
                .try_send(event)
                .map_err(|_| PushError::Full),
        };
        if let Err(e) = result {
            warn!("Cannot queue '{}'; queue is {}", event.letter(), e);
        }
        result
    }

    /// Discard any buffered event without blocking
    pub fn clear(&self) {
        while let Ok(event) = self.channel.try_receive() {
            trace!("Discarding stale '{}'", event.letter());
        }
    }

    /// Close the queue for good; pending and future reads see no event
    pub fn close(&self) {
        self.set_state(QueueState::Closed);
        self.channel.clear();
        self.fault.signal(ReadError::Closed);
    }

    /// Drop the buffered event and cancel the read in progress
    ///
    /// The queue accepts events again once the reader has observed the
    /// reset.
    pub fn reset(&self) {
        if self.state() == QueueState::Closed {
            return;
        }
        self.set_state(QueueState::Resetting);
        self.channel.clear();
        self.fault.signal(ReadError::Reset);
    }

    pub fn is_closed(&self) -> bool {
        self.state() == QueueState::Closed
    }

    /// Wait for the next event, until `deadline` if one is given
    ///
    /// `Ok(None)` means the deadline passed.
    async fn next(&self, deadline: Option<Instant>) -> Result<Option<ButtonEvent>, ReadError> {
        match self.state() {
            QueueState::Closed => return Err(ReadError::Closed),
            QueueState::Resetting => {
                self.acknowledge_reset();
                return Err(ReadError::Reset);
            }
            QueueState::Open => {}
        }

        let receive = select(self.channel.receive(), self.fault.wait());
        let outcome = match deadline {
            Some(at) => match with_deadline(at, receive).await {
                Ok(outcome) => outcome,
                Err(_) => return Ok(None),
            },
            None => receive.await,
        };

        match outcome {
            Either::First(event) => Ok(Some(event)),
            Either::Second(ReadError::Reset) => {
                self.acknowledge_reset();
                Err(ReadError::Reset)
            }
            Either::Second(ReadError::Closed) => Err(ReadError::Closed),
        }
    }

    fn acknowledge_reset(&self) {
        self.state.lock(|s| {
            if s.get() == QueueState::Resetting {
                s.set(QueueState::Open);
            }
        });
        if !self.is_closed() {
            self.fault.reset();
        }
    }

    /// Read the next event accepted by `filter`, waiting at most `timeout`
    ///
    /// Events not in the filter are discarded. The timeout covers the
    /// whole call, not each discarded event. Returns `None` on timeout or
    /// if the queue is closed or reset. A timeout too long to form a
    /// deadline waits without one.
    pub async fn read(&self, filter: ButtonFilter, timeout: Duration) -> Option<ButtonEvent> {
        self.read_until(filter, Instant::now().checked_add(timeout))
            .await
    }

    /// Read the next event accepted by `filter`, without a timeout
    ///
    /// Returns `None` only if the queue is closed or reset.
    pub async fn wait(&self, filter: ButtonFilter) -> Option<ButtonEvent> {
        self.read_until(filter, None).await
    }

    async fn read_until(
        &self,
        filter: ButtonFilter,
        deadline: Option<Instant>,
    ) -> Option<ButtonEvent> {
        loop {
            match self.next(deadline).await {
                Ok(Some(event)) if filter.contains(event) => return Some(event),
                Ok(Some(event)) => {
                    trace!("Filtered out '{}'", event.letter());
                }
                Ok(None) => return None,
                Err(e) => {
                    warn!("Cannot read from button queue; it is {}", e);
                    return None;
                }
            }
        }
    }
}
