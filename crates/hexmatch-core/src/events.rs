//! Events emitted by a session, and the registry that delivers them.
//!
//! Every event is a one-way notification. Listeners are called
//! synchronously, in subscription order, for each event in emission order.

use crate::board::{TileFall, TileId};
use crate::hex::{Coord, WorldPos};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle for a pending bonus-trigger effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub u32);

/// Everything a presentation layer can observe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Bonus triggers still required
    MissionProgressChanged { remaining: u32 },

    /// Moves left
    MoveCountChanged { remaining: u32 },

    /// The mission target was met. Fires at most once.
    MissionComplete,

    /// Points awarded, with where to show them
    ScoreGained { amount: u64, position: WorldPos },

    /// New running total
    ScoreUpdated { total: u64 },

    /// Moves ran out with the mission incomplete. Fires at most once.
    GameOver,

    /// A tentative swap was applied
    TilesSwapped { a: Coord, b: Coord },

    /// A swap produced no match and was undone
    SwapReverted { a: Coord, b: Coord },

    /// Matched tiles were cleared from the board
    TilesRemoved { tiles: Vec<(TileId, Coord)> },

    /// Tiles dropped or spawned by a column collapse
    TilesFell { falls: Vec<TileFall> },

    /// A bonus tile next to a match was triggered. The collaborator playing
    /// the effect reports back with the same `effect` id when it finishes.
    BonusTriggered {
        effect: EffectId,
        tile: TileId,
        position: WorldPos,
    },

    /// The board is stable again after `passes` cascade passes
    CascadeFinished { passes: u32 },
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Per-session listener registry
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every future event
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to every listener
    pub fn emit(&mut self, event: GameEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Shared, clonable event recorder.
///
/// Subscribe `log.listener()` and read the events back later; used by tests
/// and by bindings that poll for events instead of taking callbacks.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener that appends to this log
    pub fn listener(&self) -> impl FnMut(&GameEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(event.clone())
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Take everything recorded so far, leaving the log empty
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events matching a predicate
    pub fn count<F: Fn(&GameEvent) -> bool>(&self, predicate: F) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_order() {
        let mut bus = EventBus::new();
        let log = EventLog::new();
        bus.subscribe(log.listener());

        bus.emit(GameEvent::MoveCountChanged { remaining: 3 });
        bus.emit(GameEvent::ScoreUpdated { total: 60 });

        assert_eq!(
            log.events(),
            vec![
                GameEvent::MoveCountChanged { remaining: 3 },
                GameEvent::ScoreUpdated { total: 60 },
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let first = EventLog::new();
        let second = EventLog::new();
        let id = bus.subscribe(first.listener());
        bus.subscribe(second.listener());

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(GameEvent::GameOver);

        assert!(first.events().is_empty());
        assert_eq!(second.events(), vec![GameEvent::GameOver]);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_drain_empties_log() {
        let mut bus = EventBus::new();
        let log = EventLog::new();
        bus.subscribe(log.listener());
        bus.emit(GameEvent::MissionComplete);

        assert_eq!(log.drain().len(), 1);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_events_serialize() {
        let event = GameEvent::ScoreGained {
            amount: 60,
            position: WorldPos::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
