//! Checkers board, pieces and move generation.
//!
//! Rows are numbered from the top: red starts on rows 0-2 and moves toward
//! increasing rows, black starts on rows 5-7 and moves toward decreasing
//! rows. Pieces only ever stand on dark squares (`row + col` odd).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::core::{Grid, Pos};
pub use crate::core::Side;

/// Board edge length.
pub const BOARD_SIZE: usize = 8;

/// Rows of men each side starts with.
const START_ROWS: i32 = 3;

/// Board orientation of each side.
impl Side {
    /// Row direction of a man's forward moves.
    #[must_use]
    pub fn forward(self) -> i32 {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }

    /// Farthest row from this side's start; men are crowned there.
    #[must_use]
    pub fn promotion_row(self) -> i32 {
        match self {
            Side::Red => BOARD_SIZE as i32 - 1,
            Side::Black => 0,
        }
    }
}

/// Per-side storage indexed by `Side`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Red), factory(Side::Black)],
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}

/// A piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checker {
    pub side: Side,
    pub king: bool,
}

impl Checker {
    #[must_use]
    pub fn man(side: Side) -> Self {
        Self { side, king: false }
    }

    #[must_use]
    pub fn king(side: Side) -> Self {
        Self { side, king: true }
    }

    /// Diagonal `(row, col)` directions this piece may move along.
    pub fn directions(self) -> SmallVec<[(i32, i32); 4]> {
        let forward = self.side.forward();
        let mut dirs = SmallVec::new();
        dirs.push((forward, -1));
        dirs.push((forward, 1));
        if self.king {
            dirs.push((-forward, -1));
            dirs.push((-forward, 1));
        }
        dirs
    }
}

/// A board square by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        (self.row + self.col).rem_euclid(2) == 1
    }

    #[must_use]
    pub fn step(self, (dr, dc): (i32, i32), distance: i32) -> Self {
        Self::new(self.row + dr * distance, self.col + dc * distance)
    }

    /// Grid coordinate (`x` = column, `y` = row).
    #[must_use]
    pub fn pos(self) -> Pos {
        Pos::new(self.col, self.row)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single step or a single jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Square of the jumped piece, for captures.
    pub captured: Option<Square>,
}

impl Move {
    #[must_use]
    pub fn step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    #[must_use]
    pub fn jump(from: Square, over: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: Some(over),
        }
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// 8x8 board of optional pieces.
pub type Board = Grid<Option<Checker>>;

/// Piece at `square`, `None` when empty or off the board.
pub fn piece_at(board: &Board, square: Square) -> Option<Checker> {
    board.get(square.pos()).copied().flatten()
}

fn is_empty(board: &Board, square: Square) -> bool {
    matches!(board.get(square.pos()), Some(None))
}

/// Standard opening: twelve men per side on the dark squares.
pub fn initial_board() -> Board {
    let mut board = Grid::new(BOARD_SIZE, BOARD_SIZE, None);
    let last = BOARD_SIZE as i32 - 1;

    for row in 0..BOARD_SIZE as i32 {
        for col in 0..BOARD_SIZE as i32 {
            let square = Square::new(row, col);
            if !square.is_dark() {
                continue;
            }
            if row < START_ROWS {
                board.set(square.pos(), Some(Checker::man(Side::Red)));
            } else if row > last - START_ROWS {
                board.set(square.pos(), Some(Checker::man(Side::Black)));
            }
        }
    }
    board
}

/// Moves for the piece on `from`, ignoring the rest of its side.
///
/// If the piece has any capture, only its captures are returned.
pub fn piece_moves(board: &Board, from: Square) -> SmallVec<[Move; 4]> {
    let Some(piece) = piece_at(board, from) else {
        return SmallVec::new();
    };

    let mut steps = SmallVec::new();
    let mut jumps: SmallVec<[Move; 4]> = SmallVec::new();

    for dir in piece.directions() {
        let adjacent = from.step(dir, 1);
        if is_empty(board, adjacent) {
            steps.push(Move::step(from, adjacent));
            continue;
        }
        let landing = from.step(dir, 2);
        let opposing = piece_at(board, adjacent).is_some_and(|p| p.side != piece.side);
        if opposing && is_empty(board, landing) {
            jumps.push(Move::jump(from, adjacent, landing));
        }
    }

    if jumps.is_empty() {
        steps
    } else {
        jumps
    }
}

/// Captures available to the piece on `from`.
pub fn captures_from(board: &Board, from: Square) -> SmallVec<[Move; 4]> {
    let mut moves = piece_moves(board, from);
    moves.retain(|m| m.is_capture());
    moves
}

/// Squares holding `side`'s pieces.
pub fn squares_of(board: &Board, side: Side) -> impl Iterator<Item = Square> + '_ {
    board.iter().filter_map(move |(pos, cell)| match cell {
        Some(piece) if piece.side == side => Some(Square::new(pos.y, pos.x)),
        _ => None,
    })
}

/// True if any of `side`'s pieces can capture.
pub fn has_capture(board: &Board, side: Side) -> bool {
    squares_of(board, side).any(|sq| !captures_from(board, sq).is_empty())
}

/// Every legal move for `side`, applying mandatory capture across the side:
/// if any piece can capture, only captures are returned.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let all: Vec<Move> = squares_of(board, side)
        .flat_map(|sq| piece_moves(board, sq))
        .collect();

    if all.iter().any(Move::is_capture) {
        all.into_iter().filter(Move::is_capture).collect()
    } else {
        all
    }
}

/// Count `side`'s pieces.
pub fn count_pieces(board: &Board, side: Side) -> u32 {
    squares_of(board, side).count() as u32
}
