//! Checkers engine implementation.

use std::time::Duration;
use tracing::{debug, info};

use crate::core::{
    ArcadeConfig, ArcadeError, CheckersConfig, Command, GameId, GameRng, Session, SessionState,
};
use crate::rules::{Engine, Transition};
use crate::scores::ScoreStore;

use super::ai::{CaptureFirst, MovePolicy};
use super::board::{
    self, captures_from, count_pieces, initial_board, piece_at, Board, Checker, Move, Side,
    SideMap, Square, BOARD_SIZE,
};

/// Why a game of checkers ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The loser has no pieces left.
    NoPieces,
    /// The loser was on turn with no legal move.
    NoMoves,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Side,
    pub reason: EndReason,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner == side
    }
}

/// Checkers simulation core.
#[derive(Clone, Debug)]
pub struct CheckersGame {
    config: CheckersConfig,
    session: Session,
    board: Board,
    to_move: Side,
    pieces: SideMap<u32>,
    /// Square of the piece that must keep capturing this turn.
    chain: Option<Square>,
    cursor: Square,
    selected: Option<Square>,
    result: Option<GameResult>,
    rng: GameRng,
}

impl CheckersGame {
    /// Create a game in `Menu` with the opening position.
    ///
    /// Fails if `config` does not pass [`CheckersConfig::validate`].
    pub fn new(
        config: CheckersConfig,
        rng: GameRng,
        scores: &dyn ScoreStore,
    ) -> Result<Self, ArcadeError> {
        config.validate()?;
        let mut game = Self {
            session: Session::new(GameId::Checkers, scores),
            board: initial_board(),
            to_move: Side::Red,
            pieces: SideMap::default(),
            chain: None,
            cursor: Square::new(0, 0),
            selected: None,
            result: None,
            rng,
            config,
        };
        game.reset_board();
        Ok(game)
    }

    /// Create from the arcade config, deriving the checkers RNG stream.
    pub fn from_config(
        config: &ArcadeConfig,
        scores: &dyn ScoreStore,
    ) -> Result<Self, ArcadeError> {
        let rng = GameRng::new(config.seed).for_context(GameId::Checkers.key());
        Self::new(config.checkers.clone(), rng, scores)
    }

    // === Queries ===

    pub fn config(&self) -> &CheckersConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Checker> {
        piece_at(&self.board, square)
    }

    /// Side on turn.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Live pieces for `side`.
    pub fn pieces(&self, side: Side) -> u32 {
        self.pieces[side]
    }

    /// Piece locked into a capture chain, if any.
    pub fn chain(&self) -> Option<Square> {
        self.chain
    }

    pub fn cursor(&self) -> Square {
        self.cursor
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// True when the computer plays the side on turn.
    pub fn is_ai_turn(&self) -> bool {
        self.config.ai == Some(self.to_move)
    }

    /// Legal moves for the side on turn.
    ///
    /// Mandatory capture applies across the side; during a chain only the
    /// chained piece's captures are legal.
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.chain {
            Some(square) => captures_from(&self.board, square).to_vec(),
            None => board::legal_moves(&self.board, self.to_move),
        }
    }

    /// Legal moves starting on `square`.
    pub fn moves_for(&self, square: Square) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.from == square)
            .collect()
    }

    /// Destinations of the selected piece.
    pub fn highlighted(&self) -> Vec<Square> {
        self.selected
            .map(|sq| self.moves_for(sq).into_iter().map(|m| m.to).collect())
            .unwrap_or_default()
    }

    // === Transitions ===

    fn reset_board(&mut self) {
        self.board = initial_board();
        self.to_move = Side::Red;
        self.recount();
        self.chain = None;
        self.selected = None;
        self.result = None;
        self.cursor = self.home_cursor();
    }

    fn recount(&mut self) {
        let board = &self.board;
        self.pieces = SideMap::new(|side| count_pieces(board, side));
    }

    /// Front-row square on the human side.
    fn home_cursor(&self) -> Square {
        match self.config.ai {
            Some(Side::Red) => Square::new(5, 0),
            _ => Square::new(2, 1),
        }
    }

    /// Reset the board and enter `Playing` with red on turn.
    pub fn start(&mut self) {
        self.reset();
        self.session.begin();
    }

    /// Replace the board with a custom arrangement and set the side on turn.
    ///
    /// Pieces must stand on distinct dark squares. Any chain, selection and
    /// result are cleared. While `Playing`, a position that is already decided
    /// (a side without pieces, or no legal move for `to_move`) ends the game
    /// at once; in other states the session is left alone.
    pub fn set_position(&mut self, pieces: &[(Square, Checker)], to_move: Side) -> Result<(), ArcadeError> {
        let mut board = Board::new(BOARD_SIZE, BOARD_SIZE, None);

        for &(square, piece) in pieces {
            if !board.in_bounds(square.pos()) || !square.is_dark() {
                return Err(ArcadeError::InvalidPosition(format!(
                    "{square} is not a dark board square"
                )));
            }
            if piece_at(&board, square).is_some() {
                return Err(ArcadeError::InvalidPosition(format!("{square} is occupied twice")));
            }
            board.set(square.pos(), Some(piece));
        }

        self.board = board;
        self.to_move = to_move;
        self.recount();
        self.chain = None;
        self.selected = None;
        self.result = None;

        if self.session.is_playing() {
            self.end_if_decided();
        }
        Ok(())
    }

    /// End the game if the position on the board has no continuation.
    fn end_if_decided(&mut self) {
        let side = self.to_move;
        if self.pieces[side] == 0 {
            self.end(side.opponent(), EndReason::NoPieces);
        } else if self.pieces[side.opponent()] == 0 {
            self.end(side, EndReason::NoPieces);
        } else if self.legal_moves().is_empty() {
            self.end(side.opponent(), EndReason::NoMoves);
        }
    }

    /// Select the piece on `square` for the human player.
    ///
    /// Rejected unless the piece belongs to the side on turn and has a legal
    /// move, so a piece without a capture cannot be selected while any
    /// capture is available.
    pub fn select(&mut self, square: Square) -> Transition {
        if !self.session.is_playing() || self.is_ai_turn() {
            return Transition::Rejected;
        }
        if self.chain.is_some_and(|sq| sq != square) {
            return Transition::Rejected;
        }
        if self.moves_for(square).is_empty() {
            return Transition::Rejected;
        }
        self.selected = Some(square);
        Transition::Applied
    }

    /// Move the selected piece to `to`.
    pub fn move_selected(&mut self, to: Square) -> Transition {
        if self.is_ai_turn() {
            return Transition::Rejected;
        }
        let Some(from) = self.selected else {
            return Transition::Rejected;
        };
        match self.moves_for(from).into_iter().find(|m| m.to == to) {
            Some(mv) => self.play(mv),
            None => Transition::Rejected,
        }
    }

    /// Execute `mv` for the side on turn.
    pub fn play(&mut self, mv: Move) -> Transition {
        if !self.session.is_playing() || !self.legal_moves().contains(&mv) {
            return Transition::Rejected;
        }
        let Some(mut piece) = self.piece_at(mv.from) else {
            return Transition::Rejected;
        };
        let mover = self.to_move;
        let opponent = mover.opponent();

        if !piece.king && mv.to.row == mover.promotion_row() {
            piece.king = true;
            debug!(side = %mover, square = %mv.to, "crowned");
        }
        self.board.set(mv.from.pos(), None);
        self.board.set(mv.to.pos(), Some(piece));

        if let Some(captured) = mv.captured {
            self.board.set(captured.pos(), None);
            self.pieces[opponent] = self.pieces[opponent].saturating_sub(1);
            debug!(
                side = %mover,
                from = %mv.from,
                to = %mv.to,
                captured = %captured,
                remaining = self.pieces[opponent],
                "capture"
            );

            if self.pieces[opponent] == 0 {
                return self.end(mover, EndReason::NoPieces);
            }
            if !captures_from(&self.board, mv.to).is_empty() {
                self.chain = Some(mv.to);
                self.selected = Some(mv.to);
                self.cursor = mv.to;
                return Transition::Applied;
            }
        }

        self.chain = None;
        self.selected = None;
        self.to_move = opponent;

        if board::legal_moves(&self.board, opponent).is_empty() {
            return self.end(mover, EndReason::NoMoves);
        }
        Transition::Applied
    }

    /// Let the computer play one move for the side on turn.
    pub fn ai_move(&mut self) -> Transition {
        if !self.session.is_playing() || !self.is_ai_turn() {
            return Transition::Rejected;
        }
        let moves = self.legal_moves();
        match CaptureFirst.choose_move(&moves, &mut self.rng) {
            Some(mv) => self.play(mv),
            None => self.end(self.to_move.opponent(), EndReason::NoMoves),
        }
    }

    fn end(&mut self, winner: Side, reason: EndReason) -> Transition {
        self.result = Some(GameResult { winner, reason });
        self.chain = None;
        self.selected = None;
        info!(winner = %winner, ?reason, "checkers decided");
        self.session.finish();
        Transition::GameOver
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) -> Transition {
        let next = Square::new(self.cursor.row + dy, self.cursor.col + dx);
        if !self.board.in_bounds(next.pos()) {
            return Transition::Rejected;
        }
        self.cursor = next;
        Transition::Applied
    }

    /// Move to the cursor if it is a highlighted destination, else select it.
    fn confirm_at_cursor(&mut self) -> Transition {
        if self.highlighted().contains(&self.cursor) {
            self.move_selected(self.cursor)
        } else {
            self.select(self.cursor)
        }
    }
}

impl Engine for CheckersGame {
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
            (SessionState::Playing, Command::Confirm) => self.confirm_at_cursor(),
            (SessionState::Playing, Command::Cancel) => {
                if self.selected.is_some() && self.chain.is_none() {
                    self.selected = None;
                } else {
                    self.session.to_menu();
                }
                Transition::Applied
            }
            (SessionState::Playing, _) => match command.delta() {
                Some((dx, dy)) => self.move_cursor(dx, dy),
                None => Transition::Rejected,
            },
            _ => Transition::Rejected,
        }
    }

    fn timer_interval(&self) -> Option<Duration> {
        (self.session.is_playing() && self.is_ai_turn()).then(|| self.config.ai_delay())
    }

    fn on_timer(&mut self, _scores: &mut dyn ScoreStore) -> Transition {
        self.ai_move()
    }

    fn reset(&mut self) {
        self.session.reset();
        self.reset_board();
    }
}
