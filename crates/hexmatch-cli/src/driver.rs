//! Real-time driver for a single session.
//!
//! The session itself never sleeps. This loop owns it, asks it for one step
//! at a time and waits as instructed:
//! - `Pace::Wait` is a plain timer
//! - `Pace::Falls` spawns one timer per falling tile and joins them all
//! - each bonus trigger starts an effect timer that reports back over a
//!   channel, and completions are applied by this loop only

use crate::settings::Settings;
use hexmatch_core::{
    Bot, EffectId, EventLog, GameEvent, Outcome, Pace, Session, SwapOutcome,
};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// How a driven session finished
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub outcome: Option<Outcome>,
    pub score: u64,
    pub moves_remaining: u32,
    pub bonus_remaining: u32,
    pub swaps: u32,
}

pub struct Driver {
    session: Session,
    log: EventLog,
    bot: Bot,
    time_scale: f64,
    bonus_effect: Duration,
    effects_tx: mpsc::UnboundedSender<EffectId>,
    effects_rx: mpsc::UnboundedReceiver<EffectId>,
}

impl Driver {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let bonus_effect = settings.config.timing.bonus_effect();
        let (mut session, bot) = match settings.seed {
            Some(seed) => (
                Session::with_seed(settings.config, seed)?,
                Bot::with_seed(settings.bot, seed),
            ),
            None => (Session::new(settings.config)?, Bot::new(settings.bot)),
        };

        let log = EventLog::new();
        session.subscribe(log.listener());
        let (effects_tx, effects_rx) = mpsc::unbounded_channel();

        Ok(Self {
            session,
            log,
            bot,
            time_scale: settings.time_scale,
            bonus_effect,
            effects_tx,
            effects_rx,
        })
    }

    fn scaled(&self, duration: Duration) -> Duration {
        duration.mul_f64(self.time_scale)
    }

    /// Play until the session ends or the bot runs out of productive swaps
    pub async fn run(mut self) -> anyhow::Result<Summary> {
        self.session.start();
        self.flush_events();

        let mut swaps = 0;
        while !self.session.mission().game_ended() && self.session.mission().moves_remaining() > 0 {
            let Some(candidate) = self.bot.choose_swap(self.session.board()) else {
                warn!("No productive swap left on the board, stopping");
                break;
            };

            match self
                .session
                .request_swap_toward(candidate.origin, candidate.direction)?
            {
                SwapOutcome::Accepted { settle, .. } => {
                    swaps += 1;
                    self.flush_events();
                    self.pause(settle).await;
                    self.resolve().await?;
                }
                SwapOutcome::Rejected(reason) => {
                    warn!(?candidate, %reason, "Bot swap rejected");
                    break;
                }
            }
        }

        // Let outstanding bonus effects finish; the last one may complete the mission
        while !self.session.pending_effects().is_empty() {
            match self.effects_rx.recv().await {
                Some(effect) => self.finish_effect(effect),
                None => break,
            }
        }

        let mission = self.session.mission();
        Ok(Summary {
            outcome: mission.outcome(),
            score: mission.total_score(),
            moves_remaining: mission.moves_remaining(),
            bonus_remaining: mission.bonus_remaining(),
            swaps,
        })
    }

    /// Step the session until it is idle again
    async fn resolve(&mut self) -> anyhow::Result<()> {
        loop {
            let pace = self.session.advance()?;
            self.flush_events();

            match pace {
                Pace::Idle => return Ok(()),
                Pace::Wait(duration) => self.pause(duration).await,
                Pace::Falls { falls, duration } => {
                    let duration = self.scaled(duration);
                    let mut landing = JoinSet::new();
                    for fall in falls {
                        landing.spawn(async move {
                            tokio::time::sleep(duration).await;
                            fall.tile
                        });
                    }
                    while let Some(landed) = landing.join_next().await {
                        let tile = landed?;
                        debug!(?tile, "Tile landed");
                    }
                }
            }
        }
    }

    /// Sleep, applying bonus effect completions as they arrive
    async fn pause(&mut self, duration: Duration) {
        let sleep = tokio::time::sleep(self.scaled(duration));
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => break,
                Some(effect) = self.effects_rx.recv() => {
                    complete_effect(&mut self.session, effect);
                    drain_log(&self.log, &self.effects_tx, self.bonus_effect.mul_f64(self.time_scale));
                }
            }
        }
    }

    fn finish_effect(&mut self, effect: EffectId) {
        complete_effect(&mut self.session, effect);
        self.flush_events();
    }

    fn flush_events(&self) {
        drain_log(&self.log, &self.effects_tx, self.scaled(self.bonus_effect));
    }
}

fn complete_effect(session: &mut Session, effect: EffectId) {
    if !session.complete_bonus_effect(effect) {
        warn!(?effect, "Completion for unknown bonus effect");
    }
}

/// Log recorded events and start a timer for every new bonus effect
fn drain_log(log: &EventLog, effects: &mpsc::UnboundedSender<EffectId>, effect_time: Duration) {
    for event in log.drain() {
        match &event {
            GameEvent::BonusTriggered {
                effect, position, ..
            } => {
                info!(?effect, x = position.x, y = position.y, "Bonus triggered");
                let effect = *effect;
                let effects = effects.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(effect_time).await;
                    let _ = effects.send(effect);
                });
            }
            GameEvent::ScoreGained { amount, .. } => info!(amount, "Score gained"),
            GameEvent::ScoreUpdated { total } => debug!(total, "Score updated"),
            GameEvent::MoveCountChanged { remaining } => info!(remaining, "Moves remaining"),
            GameEvent::MissionProgressChanged { remaining } => {
                info!(remaining, "Bonus triggers remaining")
            }
            GameEvent::MissionComplete => info!("Mission complete"),
            GameEvent::GameOver => info!("Game over"),
            GameEvent::CascadeFinished { passes } => debug!(passes, "Cascade finished"),
            GameEvent::TilesRemoved { tiles } => debug!(count = tiles.len(), "Tiles removed"),
            GameEvent::TilesFell { falls } => debug!(count = falls.len(), "Tiles falling"),
            GameEvent::TilesSwapped { a, b } => debug!(?a, ?b, "Tiles swapped"),
            GameEvent::SwapReverted { a, b } => debug!(?a, ?b, "Swap reverted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmatch_core::{BotDifficulty, GameConfig};

    fn instant(seed: u64) -> Settings {
        Settings {
            config: GameConfig::default(),
            seed: Some(seed),
            time_scale: 0.0,
            bot: BotDifficulty::Greedy,
        }
    }

    #[tokio::test]
    async fn test_instant_game_finishes() {
        let driver = Driver::new(instant(5)).unwrap();
        let summary = driver.run().await.unwrap();

        assert_eq!(summary.swaps > 0, summary.score > 0);
        // Either the game ended or the bot ran out of productive swaps
        assert!(summary.outcome.is_some() || summary.moves_remaining > 0);
    }

    #[tokio::test]
    async fn test_all_bonus_effects_are_completed() {
        let mut settings = instant(8);
        settings.config.bonus_target = 1;
        settings.config.bonus_tiles = 6;
        let driver = Driver::new(settings).unwrap();
        let summary = driver.run().await.unwrap();

        if summary.bonus_remaining == 0 {
            assert!(summary.outcome.is_some());
        }
    }
}
