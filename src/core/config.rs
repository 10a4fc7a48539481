//! Engine configuration.
//!
//! Every tunable constant of the three cores lives here. Defaults reproduce
//! the classic arcade behaviour; hosts can override any subset from JSON:
//!
//! ```
//! use arcade_cores::core::ArcadeConfig;
//!
//! let config = ArcadeConfig::from_json(r#"{ "seed": 7, "snake": { "tick_ms": 120 } }"#).unwrap();
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.snake.tick_ms, 120);
//! assert_eq!(config.snake.board_size, 20); // untouched fields keep defaults
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ArcadeError;
use super::side::Side;

/// Snake tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Board is `board_size` x `board_size`.
    pub board_size: usize,

    /// Cell the single-segment snake starts on.
    pub start: (i32, i32),

    /// Food position before the first meal.
    pub initial_food: (i32, i32),

    /// Points per food.
    pub food_score: u64,

    /// Tick interval at the start of a game.
    pub tick_ms: u64,

    /// Interval reduction per food eaten.
    pub speedup_ms: u64,

    /// Interval never drops below this.
    pub min_tick_ms: u64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            start: (10, 10),
            initial_food: (15, 15),
            food_score: 10,
            tick_ms: 150,
            speedup_ms: 2,
            min_tick_ms: 80,
        }
    }
}

impl SnakeConfig {
    /// Use a different board size.
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Use a different start cell.
    pub fn with_start(mut self, x: i32, y: i32) -> Self {
        self.start = (x, y);
        self
    }

    /// Use a different initial food cell.
    pub fn with_initial_food(mut self, x: i32, y: i32) -> Self {
        self.initial_food = (x, y);
        self
    }

    /// Use a different tick schedule.
    pub fn with_timing(mut self, tick_ms: u64, speedup_ms: u64, min_tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self.speedup_ms = speedup_ms;
        self.min_tick_ms = min_tick_ms;
        self
    }

    /// Interval for a game that has eaten `meals` foods.
    #[must_use]
    pub fn interval_after(&self, meals: u64) -> Duration {
        let ms = self
            .tick_ms
            .saturating_sub(self.speedup_ms.saturating_mul(meals))
            .max(self.min_tick_ms);
        Duration::from_millis(ms)
    }

    /// Check the snake section; engines refuse configs that fail this.
    pub fn validate(&self) -> Result<(), ArcadeError> {
        if self.board_size < 2 {
            return Err(invalid("snake.board_size must be at least 2"));
        }
        let size = self.board_size as i32;
        let on_board = |(x, y): (i32, i32)| (0..size).contains(&x) && (0..size).contains(&y);
        if !on_board(self.start) {
            return Err(invalid("snake.start must lie on the board"));
        }
        if !on_board(self.initial_food) || self.initial_food == self.start {
            return Err(invalid("snake.initial_food must be an empty board cell"));
        }
        if self.food_score == 0 {
            return Err(invalid("snake.food_score must be positive"));
        }
        check_timing("snake", self.tick_ms, self.min_tick_ms)
    }
}

/// Tetris tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    pub width: usize,
    pub height: usize,

    /// Column of the spawned piece's origin.
    pub spawn_x: i32,

    /// Row of the spawned piece's origin.
    pub spawn_y: i32,

    /// Gravity interval at level 1.
    pub tick_ms: u64,

    /// Interval reduction per level gained.
    pub level_step_ms: u64,

    /// Interval never drops below this.
    pub min_tick_ms: u64,

    /// Cumulative cleared lines per level.
    pub lines_per_level: u32,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            spawn_x: 3,
            spawn_y: 0,
            tick_ms: 1000,
            level_step_ms: 100,
            min_tick_ms: 100,
            lines_per_level: 10,
        }
    }
}

impl TetrisConfig {
    /// Use a different board size.
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Use a different spawn origin.
    pub fn with_spawn(mut self, x: i32, y: i32) -> Self {
        self.spawn_x = x;
        self.spawn_y = y;
        self
    }

    /// Use a different gravity schedule.
    pub fn with_timing(mut self, tick_ms: u64, level_step_ms: u64, min_tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self.level_step_ms = level_step_ms;
        self.min_tick_ms = min_tick_ms;
        self
    }

    /// Gravity interval at `level` (1-based).
    #[must_use]
    pub fn interval_at(&self, level: u32) -> Duration {
        let steps = u64::from(level.saturating_sub(1));
        let ms = self
            .tick_ms
            .saturating_sub(self.level_step_ms.saturating_mul(steps))
            .max(self.min_tick_ms);
        Duration::from_millis(ms)
    }

    /// Check the tetris section; engines refuse configs that fail this.
    pub fn validate(&self) -> Result<(), ArcadeError> {
        if self.width < 4 || self.height < 4 {
            return Err(invalid("tetris board must be at least 4x4"));
        }
        if self.spawn_x < 0 || self.spawn_x + 4 > self.width as i32 {
            return Err(invalid("tetris.spawn_x must leave room for a 4-wide piece"));
        }
        if self.spawn_y < 0 || self.spawn_y >= self.height as i32 {
            return Err(invalid("tetris.spawn_y must lie on the board"));
        }
        if self.lines_per_level == 0 {
            return Err(invalid("tetris.lines_per_level must be positive"));
        }
        check_timing("tetris", self.tick_ms, self.min_tick_ms)
    }
}

/// Checkers tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckersConfig {
    /// Side played by the computer, `None` for two human players.
    pub ai: Option<Side>,

    /// Delay between the AI's turn starting and its move.
    pub ai_delay_ms: u64,
}

impl Default for CheckersConfig {
    fn default() -> Self {
        Self {
            ai: Some(Side::Black),
            ai_delay_ms: 500,
        }
    }
}

impl CheckersConfig {
    /// Let the computer play `side`.
    pub fn with_ai(mut self, side: Side) -> Self {
        self.ai = Some(side);
        self
    }

    /// Two human players.
    pub fn without_ai(mut self) -> Self {
        self.ai = None;
        self
    }

    pub fn with_ai_delay(mut self, ms: u64) -> Self {
        self.ai_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Check the checkers section; engines refuse configs that fail this.
    pub fn validate(&self) -> Result<(), ArcadeError> {
        if self.ai.is_some() && self.ai_delay_ms == 0 {
            return Err(invalid("checkers.ai_delay_ms must be positive"));
        }
        Ok(())
    }
}

/// Configuration for all cores plus the shared RNG seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Root seed; each game derives its own stream from it.
    pub seed: u64,
    pub snake: SnakeConfig,
    pub tetris: TetrisConfig,
    pub checkers: CheckersConfig,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            snake: SnakeConfig::default(),
            tetris: TetrisConfig::default(),
            checkers: CheckersConfig::default(),
        }
    }
}

impl ArcadeConfig {
    /// Use a different root seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ArcadeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ArcadeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section for values the engines cannot run with.
    pub fn validate(&self) -> Result<(), ArcadeError> {
        self.snake.validate()?;
        self.tetris.validate()?;
        self.checkers.validate()
    }
}

fn invalid(message: &str) -> ArcadeError {
    ArcadeError::InvalidConfig(message.to_string())
}

fn check_timing(section: &str, tick_ms: u64, min_tick_ms: u64) -> Result<(), ArcadeError> {
    if min_tick_ms == 0 {
        return Err(ArcadeError::InvalidConfig(format!("{section}.min_tick_ms must be positive")));
    }
    if min_tick_ms > tick_ms {
        return Err(ArcadeError::InvalidConfig(format!(
            "{section}.min_tick_ms ({min_tick_ms}) exceeds {section}.tick_ms ({tick_ms})"
        )));
    }
    Ok(())
}
