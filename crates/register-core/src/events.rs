//! # Events
//!
//! Synchronous publish/subscribe for ledger rows and the ledger itself.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  LedgerRow  publishes  { Update, Destroy }                              │
//! │  Ledger     publishes  { Update }                                       │
//! │                                                                         │
//! │  emit(owner, Update)                                                    │
//! │     │                                                                   │
//! │     ├─► take this event's listeners out of the owner                    │
//! │     ├─► call each with &mut owner, in subscription order                │
//! │     └─► put them back, followed by any subscribed during the emit       │
//! │                                                                         │
//! │  Listeners subscribed during an emit run from the next emit on.         │
//! │  Re-emitting the same event from inside a listener reaches nobody.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No IO, no threads: every listener has run by the time `emit` returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::UnknownEventError;

/// Something that happened to a row or a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Amounts or detail changed.
    Update,
    /// The row is being discarded.
    Destroy,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Update => f.write_str("update"),
            Event::Destroy => f.write_str("destroy"),
        }
    }
}

/// A subscriber callback. It receives the emitting object.
pub type Listener<T> = Box<dyn FnMut(&mut T)>;

/// Listener registry over a fixed set of events.
pub struct Notifier<T> {
    owner: &'static str,
    channels: Vec<(Event, Vec<Listener<T>>)>,
}

impl<T> Notifier<T> {
    /// A notifier that publishes exactly `events`.
    pub fn new(owner: &'static str, events: &[Event]) -> Self {
        Notifier {
            owner,
            channels: events.iter().map(|e| (*e, Vec::new())).collect(),
        }
    }

    pub fn publishes(&self, event: Event) -> bool {
        self.channels.iter().any(|(e, _)| *e == event)
    }

    /// Registers `listener` for `event`.
    pub fn subscribe<F>(&mut self, event: Event, listener: F) -> Result<(), UnknownEventError>
    where
        F: FnMut(&mut T) + 'static,
    {
        self.channel_mut(event)?.push(Box::new(listener));
        Ok(())
    }

    pub fn listener_count(&self, event: Event) -> usize {
        self.channels
            .iter()
            .find(|(e, _)| *e == event)
            .map_or(0, |(_, listeners)| listeners.len())
    }

    fn channel_mut(&mut self, event: Event) -> Result<&mut Vec<Listener<T>>, UnknownEventError> {
        let owner = self.owner;
        self.channels
            .iter_mut()
            .find(|(e, _)| *e == event)
            .map(|(_, listeners)| listeners)
            .ok_or(UnknownEventError { owner, event })
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event, listeners) in &self.channels {
            map.entry(event, &listeners.len());
        }
        map.finish()
    }
}

/// Calls every `event` listener held by `owner`'s notifier, passing `owner`.
///
/// Returns how many listeners ran.
pub fn emit<T>(
    owner: &mut T,
    event: Event,
    notifier: fn(&mut T) -> &mut Notifier<T>,
) -> Result<usize, UnknownEventError> {
    let mut listeners = std::mem::take(notifier(owner).channel_mut(event)?);
    for listener in listeners.iter_mut() {
        listener(owner);
    }
    let count = listeners.len();

    let channel = notifier(owner).channel_mut(event)?;
    let added = std::mem::replace(channel, listeners);
    channel.extend(added);

    Ok(count)
}

// =============================================================================
// Unit Tests
// =============================================================================
