//! Single-writer driver for one engine.

use std::time::Duration;
use tracing::trace;

use crate::core::Command;
use crate::rules::{Engine, Transition};
use crate::scores::ScoreStore;

use super::clock::{Clock, SystemClock};
use super::ticker::Ticker;

/// Owns one engine and the score store, and feeds it commands and timer
/// steps strictly one at a time.
pub struct Runner<E: Engine, S: ScoreStore> {
    engine: E,
    scores: S,
    ticker: Ticker,
    clock: Box<dyn Clock>,
    last_pump: Duration,
}

impl<E: Engine, S: ScoreStore> Runner<E, S> {
    /// Runner on the wall clock.
    pub fn new(engine: E, scores: S) -> Self {
        Self::with_clock(engine, scores, SystemClock::new())
    }

    /// Runner on a custom clock.
    pub fn with_clock(engine: E, scores: S, clock: impl Clock + 'static) -> Self {
        let last_pump = clock.now();
        let mut ticker = Ticker::new();
        ticker.sync(engine.timer_interval());
        Self {
            engine,
            scores,
            ticker,
            clock: Box::new(clock),
            last_pump,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access. The timer is re-synced on the next call into
    /// the runner.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn into_parts(self) -> (E, S) {
        (self.engine, self.scores)
    }

    /// Apply one input command against the live state.
    pub fn command(&mut self, command: Command) -> Transition {
        self.ticker.sync(self.engine.timer_interval());
        let transition = self.engine.apply_command(command, &mut self.scores);
        self.sync();
        trace!(%command, ?transition, "command");
        transition
    }

    /// Let `dt` pass and fire every timer step that falls due, in order.
    ///
    /// The interval is re-read after every step, so speed-ups apply from the
    /// next deadline and a step that leaves `Playing` stops the rest.
    pub fn advance(&mut self, dt: Duration) -> Vec<Transition> {
        self.ticker.sync(self.engine.timer_interval());
        self.ticker.accumulate(dt);

        let mut fired = Vec::new();
        while let Some(interval) = self.engine.timer_interval() {
            if !self.ticker.take_due(interval) {
                break;
            }
            fired.push(self.engine.on_timer(&mut self.scores));
            self.sync();
        }
        fired
    }

    /// Advance by the time the clock moved since the last pump.
    pub fn pump(&mut self) -> Vec<Transition> {
        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_pump);
        self.last_pump = now;
        self.advance(dt)
    }

    fn sync(&mut self) {
        let was_armed = self.ticker.is_armed();
        self.ticker.sync(self.engine.timer_interval());
        if was_armed && !self.ticker.is_armed() {
            trace!(game = %self.engine.game_id(), state = ?self.engine.state(), "timer disarmed");
        }
    }
}
