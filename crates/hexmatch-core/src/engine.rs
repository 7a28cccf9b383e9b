//! Resolution engine.
//!
//! A `Session` owns the board, the mission bookkeeping and the event bus for
//! one game. It is driven from outside in two ways:
//!
//! - `request_swap` (or `request_swap_toward`) asks for a player swap; it is
//!   either rejected outright or applied tentatively
//! - `advance` performs exactly one step of the state machine and reports
//!   how long the caller should wait before the next step
//!
//! The state machine is `Idle -> AwaitingSwapResult -> (Reverting | Resolving)
//! -> Idle`. Resolving loops through crush, fall and rescan steps until the
//! board has no matches left. Only one swap can be in flight at a time.

use crate::board::{Board, Tile, TileFall, TileId};
use crate::config::{ConfigError, GameConfig};
use crate::events::{EffectId, EventBus, GameEvent, SubscriptionId};
use crate::hex::{Coord, Direction, WorldPos};
use crate::matcher::{self, MatchSet};
use crate::mission::Mission;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Internal invariant violations. These point at a topology or generation
/// bug, never at bad player input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EngineError {
    #[error("Slot {slot:?} holds a tile that thinks it is at {tile:?}")]
    SlotMismatch { slot: Coord, tile: Coord },

    #[error("Coordinate {coord:?} is off the board")]
    OutOfBounds { coord: Coord },

    #[error("Board still had matches after {passes} repair passes")]
    GenerationExhausted { passes: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Why a swap request was refused. The board is untouched; the caller
/// should put its dragged tile back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SwapRejection {
    #[error("Game is over")]
    GameEnded,

    #[error("No moves remaining")]
    NoMovesRemaining,

    #[error("Another swap is still resolving")]
    Busy,

    #[error("Origin is off the board")]
    OriginOutOfBounds,

    #[error("Only normal tiles can be moved")]
    OriginNotMovable,

    #[error("Drag has no direction")]
    ZeroDrag,

    #[error("Target is off the board")]
    TargetOutOfBounds,

    #[error("Target slot is empty")]
    TargetEmpty,

    #[error("Bonus tiles cannot be swapped")]
    TargetBonus,
}

/// Result of a swap request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap was applied; call `advance` after `settle`
    Accepted {
        origin: Coord,
        target: Coord,
        settle: Duration,
    },
    /// Nothing changed
    Rejected(SwapRejection),
}

/// Steps inside one cascade pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveStep {
    /// Matched tiles are gone; waiting for the removal effect
    Crushing,
    /// Columns collapsed; waiting for every fall to land
    Falling,
    /// Everything landed; waiting to rescan
    Rescanning,
}

/// Engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Ready for a swap request
    Idle,
    /// A tentative swap is applied and waiting to be evaluated
    AwaitingSwapResult { origin: Coord, target: Coord },
    /// The swap matched nothing and will be undone
    Reverting { origin: Coord, target: Coord },
    /// Cascade in progress; `pass` counts from 1
    Resolving { pass: u32, step: ResolveStep },
}

/// What the driver must wait for before calling `advance` again
#[derive(Debug, Clone, PartialEq)]
pub enum Pace {
    /// Back to idle; nothing more to do until the next swap
    Idle,
    /// Sleep for a fixed interval
    Wait(Duration),
    /// Let every fall play out (each lasting `duration`) before continuing.
    /// This is a barrier: all of them must finish.
    Falls {
        falls: Vec<TileFall>,
        duration: Duration,
    },
}

/// One game session
pub struct Session {
    config: GameConfig,
    board: Board,
    mission: Mission,
    state: EngineState,
    bus: EventBus,
    rng: StdRng,
    /// Bonus effects still playing, by effect id
    pending_effects: BTreeMap<EffectId, TileId>,
    next_effect: u32,
}

impl Session {
    /// Create a session on a freshly generated board, seeded from entropy
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        Self::generated(config, StdRng::from_entropy())
    }

    /// Create a session on a freshly generated board with a fixed seed, for
    /// reproducible games
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        Self::generated(config, StdRng::seed_from_u64(seed))
    }

    /// Create a session on a prepared board. `seed` drives refill colors.
    pub fn with_board(config: GameConfig, board: Board, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        board.verify()?;
        Ok(Self::from_parts(config, board, StdRng::seed_from_u64(seed)))
    }

    fn generated(config: GameConfig, mut rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::generate(
            config.dimensions(),
            config.bonus_tiles,
            config.color_count,
            &mut rng,
        )?;
        Ok(Self::from_parts(config, board, rng))
    }

    fn from_parts(config: GameConfig, board: Board, rng: StdRng) -> Self {
        let mission = Mission::new(config.max_moves, config.bonus_target);
        Self {
            config,
            board,
            mission,
            state: EngineState::Idle,
            bus: EventBus::new(),
            rng,
            pending_effects: BTreeMap::new(),
            next_effect: 0,
        }
    }

    /// Announce the initial mission and move counters to listeners
    pub fn start(&mut self) {
        self.emit(GameEvent::MissionProgressChanged {
            remaining: self.mission.bonus_remaining(),
        });
        self.emit(GameEvent::MoveCountChanged {
            remaining: self.mission.moves_remaining(),
        });
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == EngineState::Idle
    }

    /// Bonus effects that have been triggered but not yet completed
    pub fn pending_effects(&self) -> Vec<EffectId> {
        self.pending_effects.keys().copied().collect()
    }

    /// Fraction of the target score reached, for progress displays
    pub fn score_progress(&self) -> f64 {
        self.mission.score_progress(self.config.target_score)
    }

    fn emit(&mut self, event: GameEvent) {
        self.bus.emit(event);
    }

    /// Ask to swap the tile at `origin` with the neighbor the drag vector
    /// points at most directly
    pub fn request_swap(&mut self, origin: Coord, drag: WorldPos) -> Result<SwapOutcome, EngineError> {
        if let Err(rejection) = self.check_origin(origin) {
            return Ok(self.reject(origin, rejection));
        }
        match self.config.layout.direction_from_drag(origin, drag) {
            Some(direction) => self.request_swap_toward(origin, direction),
            None => Ok(self.reject(origin, SwapRejection::ZeroDrag)),
        }
    }

    /// Ask to swap the tile at `origin` with its neighbor in `direction`
    pub fn request_swap_toward(
        &mut self,
        origin: Coord,
        direction: Direction,
    ) -> Result<SwapOutcome, EngineError> {
        if let Err(rejection) = self.check_origin(origin) {
            return Ok(self.reject(origin, rejection));
        }

        let target = origin.neighbor(direction);
        if !self.board.contains(target) {
            return Ok(self.reject(origin, SwapRejection::TargetOutOfBounds));
        }
        match self.board.get(target) {
            None => return Ok(self.reject(origin, SwapRejection::TargetEmpty)),
            Some(tile) if tile.is_bonus() => {
                return Ok(self.reject(origin, SwapRejection::TargetBonus))
            }
            Some(_) => {}
        }

        self.board.swap_slots(origin, target)?;
        self.state = EngineState::AwaitingSwapResult { origin, target };
        debug!(?origin, ?target, "swap applied");
        self.emit(GameEvent::TilesSwapped {
            a: origin,
            b: target,
        });

        Ok(SwapOutcome::Accepted {
            origin,
            target,
            settle: self.config.timing.swap_settle(),
        })
    }

    fn check_origin(&self, origin: Coord) -> Result<(), SwapRejection> {
        if self.mission.game_ended() {
            return Err(SwapRejection::GameEnded);
        }
        if self.mission.moves_remaining() == 0 {
            return Err(SwapRejection::NoMovesRemaining);
        }
        if !self.is_idle() {
            return Err(SwapRejection::Busy);
        }
        if !self.board.contains(origin) {
            return Err(SwapRejection::OriginOutOfBounds);
        }
        if !self.board.get(origin).map_or(false, Tile::is_normal) {
            return Err(SwapRejection::OriginNotMovable);
        }
        Ok(())
    }

    fn reject(&self, origin: Coord, rejection: SwapRejection) -> SwapOutcome {
        debug!(?origin, %rejection, "swap rejected");
        SwapOutcome::Rejected(rejection)
    }

    /// Run one step of the state machine
    pub fn advance(&mut self) -> Result<Pace, EngineError> {
        let state = std::mem::replace(&mut self.state, EngineState::Idle);
        match state {
            EngineState::Idle => Ok(Pace::Idle),

            EngineState::AwaitingSwapResult { origin, target } => {
                let matches = matcher::find_all_matches(&self.board);
                if matches.is_empty() {
                    debug!(?origin, ?target, "swap matched nothing, reverting");
                    self.state = EngineState::Reverting { origin, target };
                    return Ok(Pace::Wait(self.config.timing.revert_delay()));
                }

                let remaining = self.mission.consume_move();
                self.emit(GameEvent::MoveCountChanged { remaining });

                self.resolve_pass(1, &matches)?;

                if self.mission.is_out_of_moves() && self.mission.latch_game_over() {
                    info!(score = self.mission.total_score(), "out of moves, game over");
                    self.emit(GameEvent::GameOver);
                }

                self.state = EngineState::Resolving {
                    pass: 1,
                    step: ResolveStep::Crushing,
                };
                Ok(Pace::Wait(self.config.timing.crush_effect()))
            }

            EngineState::Reverting { origin, target } => {
                self.board.swap_slots(origin, target)?;
                self.emit(GameEvent::SwapReverted {
                    a: origin,
                    b: target,
                });
                Ok(Pace::Idle)
            }

            EngineState::Resolving {
                pass,
                step: ResolveStep::Crushing,
            } => {
                let falls = self
                    .board
                    .collapse_and_refill(self.config.color_count, &mut self.rng)?;
                self.emit(GameEvent::TilesFell {
                    falls: falls.clone(),
                });
                self.state = EngineState::Resolving {
                    pass,
                    step: ResolveStep::Falling,
                };
                Ok(Pace::Falls {
                    falls,
                    duration: self.config.timing.tile_fall(),
                })
            }

            EngineState::Resolving {
                pass,
                step: ResolveStep::Falling,
            } => {
                self.state = EngineState::Resolving {
                    pass,
                    step: ResolveStep::Rescanning,
                };
                Ok(Pace::Wait(self.config.timing.post_fall_settle()))
            }

            EngineState::Resolving {
                pass,
                step: ResolveStep::Rescanning,
            } => {
                self.board.verify()?;
                let matches = matcher::find_all_matches(&self.board);
                if matches.is_empty() {
                    debug!(passes = pass, "cascade finished");
                    self.emit(GameEvent::CascadeFinished { passes: pass });
                    return Ok(Pace::Idle);
                }

                let pass = pass + 1;
                self.resolve_pass(pass, &matches)?;
                self.state = EngineState::Resolving {
                    pass,
                    step: ResolveStep::Crushing,
                };
                Ok(Pace::Wait(self.config.timing.crush_effect()))
            }
        }
    }

    /// Score a match set, trigger adjacent bonus tiles and clear the matched
    /// slots
    fn resolve_pass(&mut self, pass: u32, matches: &MatchSet) -> Result<(), EngineError> {
        let layout = self.config.layout;
        debug!(pass, matched = matches.len(), "resolving matches");

        let amount = matches.len() as u64 * self.config.match_score;
        let total = self.mission.add_score(amount);
        let position =
            WorldPos::centroid(matches.iter().map(|c| layout.to_world(c))).unwrap_or_default();
        self.emit(GameEvent::ScoreGained { amount, position });
        self.emit(GameEvent::ScoreUpdated { total });

        let mut triggered = BTreeSet::new();
        for coord in matches.iter() {
            for neighbor in coord.neighbors() {
                if let Some(tile) = self.board.get(neighbor).filter(|t| t.is_bonus()) {
                    triggered.insert((tile.coord, tile.id));
                }
            }
        }

        for (coord, tile) in triggered {
            if !self.mission.consume_bonus() {
                break;
            }
            let position = layout.to_world(coord);
            let total = self.mission.add_score(self.config.bonus_score);
            self.emit(GameEvent::ScoreGained {
                amount: self.config.bonus_score,
                position,
            });
            self.emit(GameEvent::ScoreUpdated { total });

            let effect = EffectId(self.next_effect);
            self.next_effect += 1;
            self.pending_effects.insert(effect, tile);
            info!(
                ?coord,
                remaining = self.mission.bonus_remaining(),
                "bonus tile triggered"
            );
            self.emit(GameEvent::BonusTriggered {
                effect,
                tile,
                position,
            });
        }

        let mut removed = Vec::with_capacity(matches.len());
        for coord in matches.iter() {
            if let Some(tile) = self.board.take(coord)? {
                removed.push((tile.id, coord));
            }
        }
        self.emit(GameEvent::TilesRemoved { tiles: removed });
        Ok(())
    }

    /// Report that a bonus effect finished playing. Updates the mission
    /// display and, if this was the last required trigger, completes the
    /// mission. Returns `false` for an unknown or already completed effect.
    pub fn complete_bonus_effect(&mut self, effect: EffectId) -> bool {
        if self.pending_effects.remove(&effect).is_none() {
            return false;
        }

        self.emit(GameEvent::MissionProgressChanged {
            remaining: self.mission.bonus_remaining(),
        });

        if self.mission.is_mission_met() && self.mission.latch_mission_complete() {
            info!(score = self.mission.total_score(), "mission complete");
            self.emit(GameEvent::MissionComplete);
        }
        true
    }

    /// Complete every pending bonus effect, oldest first. Returns how many
    /// were completed.
    pub fn complete_all_bonus_effects(&mut self) -> usize {
        let pending = self.pending_effects();
        pending
            .into_iter()
            .filter(|effect| self.complete_bonus_effect(*effect))
            .count()
    }

    /// Step the state machine until it is idle, ignoring pacing. Bonus
    /// effects are left pending.
    pub fn run_until_idle(&mut self) -> Result<(), EngineError> {
        while self.advance()? != Pace::Idle {}
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("mission", &self.mission)
            .field("pending_effects", &self.pending_effects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::striped;
    use crate::board::{ColorValue, TileKind};
    use crate::events::EventLog;
    use crate::hex::Dimensions;

    /// Striped 7x7 board with bonus tiles and painted purple cells
    fn board_with(bonus: &[(i32, i32)], purple: &[(i32, i32)]) -> Board {
        let bonus: Vec<Coord> = bonus.iter().map(|&(c, r)| Coord::new(c, r)).collect();
        let purple: Vec<Coord> = purple.iter().map(|&(c, r)| Coord::new(c, r)).collect();
        Board::from_fn(Dimensions::new(7, 7), |c| {
            if bonus.contains(&c) {
                Some(TileKind::Bonus)
            } else if purple.contains(&c) {
                Some(TileKind::Normal(ColorValue::Purple))
            } else {
                Some(TileKind::Normal(striped(c)))
            }
        })
    }

    fn session_on(board: Board, config: GameConfig) -> (Session, EventLog) {
        let mut session = Session::with_board(config, board, 42).unwrap();
        let log = EventLog::new();
        session.subscribe(log.listener());
        (session, log)
    }

    fn accepted(outcome: SwapOutcome) -> bool {
        matches!(outcome, SwapOutcome::Accepted { .. })
    }

    #[test]
    fn test_rejects_out_of_bounds_target() {
        let (mut session, log) = session_on(board_with(&[], &[]), GameConfig::default());
        let before = session.board().clone();

        let outcome = session
            .request_swap_toward(Coord::new(0, 0), Direction::Down)
            .unwrap();

        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::TargetOutOfBounds));
        assert_eq!(session.board(), &before);
        assert!(session.is_idle());
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_rejects_bonus_target_and_origin() {
        let (mut session, _) = session_on(board_with(&[(3, 4)], &[]), GameConfig::default());

        let outcome = session
            .request_swap_toward(Coord::new(3, 3), Direction::Up)
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::TargetBonus));

        let outcome = session
            .request_swap_toward(Coord::new(3, 4), Direction::Down)
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::OriginNotMovable));
    }

    #[test]
    fn test_rejects_empty_target() {
        let mut board = board_with(&[], &[]);
        board.take(Coord::new(2, 3)).unwrap();
        let (mut session, _) = session_on(board, GameConfig::default());

        let outcome = session
            .request_swap_toward(Coord::new(2, 2), Direction::Up)
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::TargetEmpty));
    }

    #[test]
    fn test_rejects_zero_drag_and_no_moves() {
        let (mut session, _) = session_on(board_with(&[], &[]), GameConfig::default());
        let outcome = session
            .request_swap(Coord::new(2, 2), WorldPos::new(0.0, 0.0))
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::ZeroDrag));

        let config = GameConfig {
            max_moves: 0,
            ..GameConfig::default()
        };
        let (mut session, _) = session_on(board_with(&[], &[]), config);
        let outcome = session
            .request_swap_toward(Coord::new(2, 2), Direction::Up)
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::NoMovesRemaining));
    }

    #[test]
    fn test_rejects_while_busy() {
        let (mut session, _) = session_on(board_with(&[], &[]), GameConfig::default());
        assert!(accepted(
            session
                .request_swap_toward(Coord::new(2, 2), Direction::Up)
                .unwrap()
        ));

        let outcome = session
            .request_swap_toward(Coord::new(4, 4), Direction::Up)
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(SwapRejection::Busy));
    }

    #[test]
    fn test_drag_vector_selects_neighbor() {
        let (mut session, _) = session_on(board_with(&[], &[]), GameConfig::default());
        let outcome = session
            .request_swap(Coord::new(2, 2), WorldPos::new(0.1, 2.0))
            .unwrap();
        match outcome {
            SwapOutcome::Accepted { target, .. } => assert_eq!(target, Coord::new(2, 3)),
            other => panic!("expected swap, got {:?}", other),
        }
    }

    #[test]
    fn test_unproductive_swap_reverts() {
        let (mut session, log) = session_on(board_with(&[], &[]), GameConfig::default());
        let before = session.board().clone();

        assert!(accepted(
            session
                .request_swap_toward(Coord::new(2, 2), Direction::Up)
                .unwrap()
        ));
        assert_ne!(session.board(), &before);

        assert_eq!(
            session.advance().unwrap(),
            Pace::Wait(session.config().timing.revert_delay())
        );
        assert!(matches!(session.state(), EngineState::Reverting { .. }));
        assert_eq!(session.advance().unwrap(), Pace::Idle);

        assert_eq!(session.board(), &before);
        assert_eq!(session.mission().moves_remaining(), 20);
        assert_eq!(session.mission().total_score(), 0);
        assert_eq!(
            log.events(),
            vec![
                GameEvent::TilesSwapped {
                    a: Coord::new(2, 2),
                    b: Coord::new(2, 3)
                },
                GameEvent::SwapReverted {
                    a: Coord::new(2, 2),
                    b: Coord::new(2, 3)
                },
            ]
        );
    }

    #[test]
    fn test_productive_swap_walks_through_cascade_steps() {
        let board = board_with(&[], &[(3, 1), (3, 2), (3, 4)]);
        let (mut session, log) = session_on(board, GameConfig::default());
        let timing = session.config().timing;

        assert!(accepted(
            session
                .request_swap_toward(Coord::new(3, 4), Direction::Down)
                .unwrap()
        ));

        assert_eq!(session.advance().unwrap(), Pace::Wait(timing.crush_effect()));
        assert_eq!(session.mission().moves_remaining(), 19);
        assert_eq!(session.mission().total_score(), 60);
        for row in 1..=3 {
            assert!(session.board().get(Coord::new(3, row)).is_none());
        }

        match session.advance().unwrap() {
            Pace::Falls { falls, duration } => {
                assert_eq!(duration, timing.tile_fall());
                assert_eq!(falls.len(), 6);
                assert_eq!(falls.iter().filter(|f| f.spawned).count(), 3);
            }
            other => panic!("expected falls, got {:?}", other),
        }
        assert_eq!(session.board().tiles().count(), 49);

        assert_eq!(
            session.advance().unwrap(),
            Pace::Wait(timing.post_fall_settle())
        );
        session.run_until_idle().unwrap();

        assert!(session.is_idle());
        assert!(matcher::find_all_matches(session.board()).is_empty());
        assert_eq!(log.count(|e| matches!(e, GameEvent::CascadeFinished { .. })), 1);
        assert!(session.board().verify().is_ok());
    }

    #[test]
    fn test_bonus_triggers_once_per_pass() {
        // (4,2) touches both (3,2) and (3,3)
        let board = board_with(&[(4, 2)], &[(3, 1), (3, 2), (3, 4)]);
        let config = GameConfig {
            bonus_target: 5,
            ..GameConfig::default()
        };
        let (mut session, log) = session_on(board, config);

        session
            .request_swap_toward(Coord::new(3, 4), Direction::Down)
            .unwrap();
        session.advance().unwrap();

        assert_eq!(session.mission().bonus_remaining(), 4);
        assert_eq!(session.mission().total_score(), 60 + 300);
        assert_eq!(log.count(|e| matches!(e, GameEvent::BonusTriggered { .. })), 1);
        assert!(session.board().get(Coord::new(4, 2)).unwrap().is_bonus());
        assert_eq!(session.pending_effects().len(), 1);
    }

    #[test]
    fn test_bonus_effect_completion_reports_progress() {
        let board = board_with(&[(4, 2)], &[(3, 1), (3, 2), (3, 4)]);
        let (mut session, log) = session_on(board, GameConfig::default());

        session
            .request_swap_toward(Coord::new(3, 4), Direction::Down)
            .unwrap();
        session.advance().unwrap();
        log.drain();

        let effect = session.pending_effects()[0];
        assert!(session.complete_bonus_effect(effect));
        assert!(!session.complete_bonus_effect(effect));
        assert_eq!(
            log.events(),
            vec![GameEvent::MissionProgressChanged { remaining: 9 }]
        );
    }

    #[test]
    fn test_start_announces_counters() {
        let (mut session, log) = session_on(board_with(&[], &[]), GameConfig::default());
        session.start();
        assert_eq!(
            log.events(),
            vec![
                GameEvent::MissionProgressChanged { remaining: 10 },
                GameEvent::MoveCountChanged { remaining: 20 },
            ]
        );
    }

    #[test]
    fn test_with_board_rejects_inconsistent_config() {
        let config = GameConfig {
            color_count: 9,
            ..GameConfig::default()
        };
        assert!(matches!(
            Session::with_board(config, board_with(&[], &[]), 1),
            Err(EngineError::InvalidConfig(ConfigError::ColorCount { .. }))
        ));
    }
}
