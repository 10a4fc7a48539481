//! Tetris engine implementation.

use std::time::Duration;
use tracing::debug;

use super::piece::{Color, Piece, PieceKind, PieceQueue};
use crate::core::{
    ArcadeConfig, ArcadeError, Command, GameId, GameRng, Grid, Pos, Session, SessionState,
    TetrisConfig,
};
use crate::rules::{Engine, Transition};
use crate::scores::ScoreStore;

/// Base points for clearing 0..=4 lines in one lock, multiplied by level.
pub const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];

/// Settled cell: empty, or the color of the piece that locked there.
pub type Cell = Option<Color>;

/// Summary of one lock event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockReport {
    pub lines_cleared: u32,
    pub points: u64,
    pub leveled_up: bool,
}

/// Tetris simulation core.
#[derive(Clone, Debug)]
pub struct TetrisGame {
    config: TetrisConfig,
    session: Session,
    board: Grid<Cell>,
    /// Falling piece. `None` in `Menu` and after a spawn collision.
    active: Option<Piece>,
    queue: PieceQueue,
    lines: u32,
    level: u32,
    last_lock: Option<LockReport>,
    rng: GameRng,
}

impl TetrisGame {
    /// Create a game in `Menu` with an empty board.
    ///
    /// Fails if `config` does not pass [`TetrisConfig::validate`].
    pub fn new(
        config: TetrisConfig,
        mut rng: GameRng,
        scores: &dyn ScoreStore,
    ) -> Result<Self, ArcadeError> {
        config.validate()?;
        Ok(Self {
            session: Session::new(GameId::Tetris, scores),
            board: Grid::new(config.width, config.height, None),
            active: None,
            queue: PieceQueue::new(&mut rng),
            lines: 0,
            level: 1,
            last_lock: None,
            rng,
            config,
        })
    }

    /// Create from the arcade config, deriving the tetris RNG stream.
    pub fn from_config(
        config: &ArcadeConfig,
        scores: &dyn ScoreStore,
    ) -> Result<Self, ArcadeError> {
        let rng = GameRng::new(config.seed).for_context(GameId::Tetris.key());
        Self::new(config.tetris.clone(), rng, scores)
    }

    // === Queries ===

    pub fn config(&self) -> &TetrisConfig {
        &self.config
    }

    /// Settled blocks only.
    pub fn board(&self) -> &Grid<Cell> {
        &self.board
    }

    /// Settled blocks with the falling piece drawn in.
    pub fn board_with_active(&self) -> Grid<Cell> {
        let mut grid = self.board.clone();
        if let Some(piece) = &self.active {
            for cell in piece.cells() {
                grid.set(cell, Some(piece.color()));
            }
        }
        grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// The look-ahead piece.
    pub fn next(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Result of the most recent lock, if any this game.
    pub fn last_lock(&self) -> Option<LockReport> {
        self.last_lock
    }

    /// Current gravity interval.
    pub fn interval(&self) -> Duration {
        self.config.interval_at(self.level)
    }

    /// True when any filled cell of `piece` is off the sides or bottom, or
    /// overlaps a settled block. Cells above the top row never collide.
    pub fn collides(&self, piece: &Piece) -> bool {
        let width = self.board.width() as i32;
        let height = self.board.height() as i32;

        piece.cells().any(|cell| {
            if cell.x < 0 || cell.x >= width || cell.y >= height {
                return true;
            }
            if cell.y < 0 {
                return false;
            }
            matches!(self.board.get(cell), Some(Some(_)))
        })
    }

    // === Setup ===

    fn spawn_origin(&self) -> Pos {
        Pos::new(self.config.spawn_x, self.config.spawn_y)
    }

    /// Clear the board and counters and enter `Playing` with a fresh piece.
    pub fn start(&mut self) {
        self.reset();
        self.session.begin();
        self.queue = PieceQueue::new(&mut self.rng);
        if !self.spawn() {
            self.session.finish();
        }
    }

    /// Place or clear one settled cell.
    ///
    /// Rejects cells off the board, cells under the falling piece, and fills
    /// that would complete a row (rows only clear through a lock).
    pub fn set_cell(&mut self, pos: Pos, cell: Cell) -> Result<(), ArcadeError> {
        if !self.board.in_bounds(pos) {
            return Err(ArcadeError::InvalidPosition(format!("cell {pos} is off the board")));
        }
        if cell.is_some() {
            if self.active.as_ref().is_some_and(|p| p.cells().any(|c| c == pos)) {
                return Err(ArcadeError::InvalidPosition(format!(
                    "cell {pos} is under the falling piece"
                )));
            }
            let others_filled = (0..self.board.width() as i32)
                .filter(|&x| x != pos.x)
                .all(|x| matches!(self.board.get(Pos::new(x, pos.y)), Some(Some(_))));
            if others_filled {
                return Err(ArcadeError::InvalidPosition(format!("row {} would be full", pos.y)));
            }
        }
        self.board.set(pos, cell);
        Ok(())
    }

    /// Replace the falling piece.
    pub fn set_active(&mut self, kind: PieceKind, origin: Pos) -> Result<(), ArcadeError> {
        let piece = Piece::new(kind, origin);
        if self.collides(&piece) {
            return Err(ArcadeError::InvalidPosition(format!(
                "{kind:?} at {origin} collides with the board"
            )));
        }
        self.active = Some(piece);
        Ok(())
    }

    /// Replace the look-ahead piece.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.queue.set_next(kind);
    }

    // === Transitions ===

    /// Make the queued piece active at the spawn origin.
    ///
    /// Returns false, leaving no active piece, if it collides on arrival.
    fn spawn(&mut self) -> bool {
        let kind = self.queue.draw(&mut self.rng);
        let piece = Piece::new(kind, self.spawn_origin());
        if self.collides(&piece) {
            debug!(?kind, "spawn blocked");
            self.active = None;
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Replace the active piece with `candidate` if it fits.
    fn try_place(&mut self, candidate: Piece) -> Transition {
        if self.collides(&candidate) {
            return Transition::Rejected;
        }
        self.active = Some(candidate);
        Transition::Applied
    }

    /// Shift the falling piece one column.
    pub fn shift(&mut self, dx: i32) -> Transition {
        let candidate = match (&self.active, self.session.is_playing()) {
            (Some(piece), true) => piece.moved(dx, 0),
            _ => return Transition::Rejected,
        };
        self.try_place(candidate)
    }

    /// Rotate the falling piece clockwise in place, if it fits.
    pub fn rotate(&mut self) -> Transition {
        let candidate = match (&self.active, self.session.is_playing()) {
            (Some(piece), true) => piece.rotated(),
            _ => return Transition::Rejected,
        };
        self.try_place(candidate)
    }

    /// Move down one row, locking the piece if it cannot move.
    ///
    /// This is both the gravity step and the soft drop.
    pub fn soft_drop(&mut self, scores: &mut dyn ScoreStore) -> Transition {
        let candidate = match (&self.active, self.session.is_playing()) {
            (Some(piece), true) => piece.moved(0, 1),
            _ => return Transition::Rejected,
        };
        if self.collides(&candidate) {
            self.lock(scores)
        } else {
            self.active = Some(candidate);
            Transition::Applied
        }
    }

    /// Drop to the lowest valid row and lock immediately.
    pub fn hard_drop(&mut self, scores: &mut dyn ScoreStore) -> Transition {
        let mut piece = match (&self.active, self.session.is_playing()) {
            (Some(piece), true) => piece.clone(),
            _ => return Transition::Rejected,
        };
        loop {
            let below = piece.moved(0, 1);
            if self.collides(&below) {
                break;
            }
            piece = below;
        }
        self.active = Some(piece);
        self.lock(scores)
    }

    /// Merge the active piece, clear full rows, score, then spawn the next
    /// piece. A spawn collision against the updated board ends the game.
    fn lock(&mut self, scores: &mut dyn ScoreStore) -> Transition {
        let Some(piece) = self.active.take() else {
            return Transition::Rejected;
        };

        let color = piece.color();
        for cell in piece.cells() {
            // Cells above the top row are dropped
            self.board.set(cell, Some(color));
        }

        let cleared = self.board.collapse_rows(|cell| cell.is_some(), None);
        let points = LINE_SCORES[cleared.min(4)] * u64::from(self.level);
        let previous_level = self.level;

        self.lines += cleared as u32;
        self.level = 1 + self.lines.checked_div(self.config.lines_per_level).unwrap_or(0);
        self.session.add_score(points, scores);

        let report = LockReport {
            lines_cleared: cleared as u32,
            points,
            leveled_up: self.level > previous_level,
        };
        self.last_lock = Some(report);

        if cleared > 0 {
            debug!(
                cleared,
                points,
                lines = self.lines,
                level = self.level,
                "lines cleared"
            );
        }
        if report.leveled_up {
            debug!(level = self.level, interval = ?self.interval(), "level up");
        }

        if self.spawn() {
            Transition::Applied
        } else {
            self.session.finish();
            Transition::GameOver
        }
    }
}

impl Engine for TetrisGame {
    fn session(&self) -> &Session {
        &self.session
    }

    fn apply_command(&mut self, command: Command, scores: &mut dyn ScoreStore) -> Transition {
        match (self.session.state(), command) {
            (SessionState::Menu | SessionState::GameOver, Command::Confirm) => {
                self.start();
                if self.session.is_playing() {
                    Transition::Applied
                } else {
                    Transition::GameOver
                }
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
            (SessionState::Playing, Command::MoveLeft) => self.shift(-1),
            (SessionState::Playing, Command::MoveRight) => self.shift(1),
            (SessionState::Playing, Command::MoveDown) => self.soft_drop(scores),
            (SessionState::Playing, Command::Rotate | Command::MoveUp) => self.rotate(),
            (SessionState::Playing, Command::HardDrop) => self.hard_drop(scores),
            _ => Transition::Rejected,
        }
    }

    fn timer_interval(&self) -> Option<Duration> {
        self.session.is_playing().then(|| self.interval())
    }

    fn on_timer(&mut self, scores: &mut dyn ScoreStore) -> Transition {
        self.soft_drop(scores)
    }

    fn reset(&mut self) {
        self.session.reset();
        self.board = Grid::new(self.config.width, self.config.height, None);
        self.active = None;
        self.lines = 0;
        self.level = 1;
        self.last_lock = None;
    }
}
