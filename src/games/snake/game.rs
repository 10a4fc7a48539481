//! Snake engine implementation.

use im::Vector;
use std::time::Duration;
use tracing::debug;

use crate::core::{
    ArcadeConfig, ArcadeError, Command, GameId, GameRng, Grid, Pos, Session, SessionState,
    SnakeConfig,
};
use crate::rules::{Engine, Transition};
use crate::scores::ScoreStore;

/// Heading given to the snake when a game starts.
const DEFAULT_HEADING: Pos = Pos::new(1, 0);

/// Cell contents in a board snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnakeCell {
    #[default]
    Empty,
    Head,
    Body,
    Food,
}

/// Snake simulation core.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: SnakeConfig,
    session: Session,
    /// Segments, head first. No two segments share a cell.
    body: Vector<Pos>,
    velocity: Pos,
    /// `None` only once the snake covers the whole board.
    food: Option<Pos>,
    meals: u64,
    rng: GameRng,
}

impl SnakeGame {
    /// Create a game in `Menu` with the initial board.
    ///
    /// Fails if `config` does not pass [`SnakeConfig::validate`].
    pub fn new(
        config: SnakeConfig,
        rng: GameRng,
        scores: &dyn ScoreStore,
    ) -> Result<Self, ArcadeError> {
        config.validate()?;
        let mut game = Self {
            session: Session::new(GameId::Snake, scores),
            body: Vector::new(),
            velocity: Pos::default(),
            food: None,
            meals: 0,
            rng,
            config,
        };
        game.reset_board();
        Ok(game)
    }

    /// Create from the arcade config, deriving the snake RNG stream.
    pub fn from_config(
        config: &ArcadeConfig,
        scores: &dyn ScoreStore,
    ) -> Result<Self, ArcadeError> {
        let rng = GameRng::new(config.seed).for_context(GameId::Snake.key());
        Self::new(config.snake.clone(), rng, scores)
    }

    // === Queries ===

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Segments, head first.
    pub fn body(&self) -> &Vector<Pos> {
        &self.body
    }

    pub fn head(&self) -> Pos {
        self.body.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// The snake always has at least its head.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn velocity(&self) -> Pos {
        self.velocity
    }

    pub fn food(&self) -> Option<Pos> {
        self.food
    }

    /// Foods eaten this game.
    pub fn meals(&self) -> u64 {
        self.meals
    }

    /// Current tick interval.
    pub fn interval(&self) -> Duration {
        self.config.interval_after(self.meals)
    }

    fn size(&self) -> i32 {
        self.config.board_size as i32
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        (0..self.size()).contains(&pos.x) && (0..self.size()).contains(&pos.y)
    }

    fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    /// Render-ready snapshot of the board.
    pub fn board(&self) -> Grid<SnakeCell> {
        let mut grid = Grid::new(self.config.board_size, self.config.board_size, SnakeCell::Empty);
        if let Some(food) = self.food {
            grid.set(food, SnakeCell::Food);
        }
        for (i, &segment) in self.body.iter().enumerate() {
            grid.set(segment, if i == 0 { SnakeCell::Head } else { SnakeCell::Body });
        }
        grid
    }

    // === Transitions ===

    fn reset_board(&mut self) {
        let (x, y) = self.config.start;
        let (fx, fy) = self.config.initial_food;
        self.body = Vector::unit(Pos::new(x, y));
        self.velocity = Pos::default();
        self.food = Some(Pos::new(fx, fy));
        self.meals = 0;
    }

    /// Reset the board and enter `Playing` with the default heading.
    pub fn start(&mut self) {
        self.reset();
        self.session.begin();
        self.velocity = DEFAULT_HEADING;
    }

    /// Replace the snake, heading and food with a custom arrangement.
    ///
    /// The session state and score are left alone.
    pub fn set_position(&mut self, body: &[Pos], velocity: Pos, food: Pos) -> Result<(), ArcadeError> {
        let invalid = |msg: &str| Err(ArcadeError::InvalidPosition(msg.to_string()));

        if body.is_empty() {
            return invalid("snake needs at least one segment");
        }
        if let Some(p) = body.iter().find(|p| !self.in_bounds(**p)) {
            return Err(ArcadeError::InvalidPosition(format!("segment {p} is off the board")));
        }
        for (i, p) in body.iter().enumerate() {
            if body[..i].contains(p) {
                return Err(ArcadeError::InvalidPosition(format!("segment {p} appears twice")));
            }
        }
        if velocity.x.abs() + velocity.y.abs() != 1 {
            return invalid("velocity must be a unit step along one axis");
        }
        if !self.in_bounds(food) || body.contains(&food) {
            return invalid("food must be on an empty board cell");
        }

        self.body = body.iter().copied().collect();
        self.velocity = velocity;
        self.food = Some(food);
        Ok(())
    }

    /// Change heading, rejecting any change to an axis already in motion.
    ///
    /// This also makes repeated presses of the current direction no-ops.
    pub fn steer(&mut self, dx: i32, dy: i32) -> Transition {
        if !self.session.is_playing() {
            return Transition::Rejected;
        }
        let allowed = if dx != 0 { self.velocity.x == 0 } else { self.velocity.y == 0 };
        if !allowed {
            return Transition::Rejected;
        }
        self.velocity = Pos::new(dx, dy);
        Transition::Applied
    }

    /// Advance the snake one cell.
    pub fn step(&mut self, scores: &mut dyn ScoreStore) -> Transition {
        if !self.session.is_playing() {
            return Transition::Rejected;
        }

        let head = self.head().offset(self.velocity);

        if !self.in_bounds(head) {
            debug!(%head, "snake hit the wall");
            self.session.finish();
            return Transition::GameOver;
        }
        if self.occupies(head) {
            debug!(%head, "snake hit itself");
            self.session.finish();
            return Transition::GameOver;
        }

        self.body.push_front(head);

        if self.food == Some(head) {
            self.meals += 1;
            self.session.add_score(self.config.food_score, scores);
            self.food = self.place_food();
            debug!(%head, len = self.body.len(), food = ?self.food, "food eaten");

            if self.food.is_none() {
                debug!("board full, no cell left for food");
                self.session.finish();
                return Transition::GameOver;
            }
        } else {
            self.body.pop_back();
        }

        Transition::Applied
    }

    /// Pick a uniformly random cell not covered by the snake.
    ///
    /// Returns `None` when the snake covers every cell.
    fn place_food(&mut self) -> Option<Pos> {
        let size = self.size();
        if self.body.len() >= (size * size) as usize {
            return None;
        }
        loop {
            let candidate = Pos::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !self.occupies(candidate) {
                return Some(candidate);
            }
        }
    }
}

impl Engine for SnakeGame {
    fn session(&self) -> &Session {
        &self.session
    }

    fn apply_command(&mut self, command: Command, _scores: &mut dyn ScoreStore) -> Transition {
        match (self.session.state(), command) {
            (SessionState::Menu | SessionState::GameOver, Command::Confirm) => {
                self.start();
                Transition::Applied
            }
            (SessionState::Menu | SessionState::GameOver, Command::Cancel) => Transition::Exit,
            (SessionState::Playing, Command::TogglePause) => {
                self.session.pause();
                Transition::Applied
            }
            (SessionState::Paused, Command::TogglePause) => {
                self.session.resume();
                Transition::Applied
            }
            (SessionState::Playing | SessionState::Paused, Command::Cancel) => {
                self.session.to_menu();
                Transition::Applied
            }
            (SessionState::Playing, _) => match command.delta() {
                Some((dx, dy)) => self.steer(dx, dy),
                None => Transition::Rejected,
            },
            _ => Transition::Rejected,
        }
    }

    fn timer_interval(&self) -> Option<Duration> {
        self.session.is_playing().then(|| self.interval())
    }

    fn on_timer(&mut self, scores: &mut dyn ScoreStore) -> Transition {
        self.step(scores)
    }

    fn reset(&mut self) {
        self.session.reset();
        self.reset_board();
    }
}
