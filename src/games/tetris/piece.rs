//! Tetrominoes: kinds, shape matrices, rotation and the look-ahead queue.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, Pos};

/// The seven tetromino kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Color stored in the board when this piece locks.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }

    /// Spawn orientation.
    #[must_use]
    pub fn shape(self) -> Shape {
        match self {
            PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
            PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
            PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
            PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        }
    }

    /// Uniformly random kind.
    pub fn random(rng: &mut GameRng) -> Self {
        Self::ALL[rng.gen_range_usize(0..Self::ALL.len())]
    }
}

/// Settled block color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

/// Rectangular 0/1 matrix, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: SmallVec<[bool; 16]>,
}

impl Shape {
    /// Build from rows of 0/1. All rows must have the same length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        assert!(rows.iter().all(|r| r.len() == cols), "Shape rows must be the same length");

        Self {
            rows: rows.len(),
            cols,
            cells: rows.iter().flat_map(|r| r.iter().map(|&c| c != 0)).collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// 90° clockwise: transpose, then reverse each row.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        let (rows, cols) = (self.cols, self.rows);
        let mut cells = SmallVec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(self.is_filled(self.rows - 1 - c, r));
            }
        }
        Self { rows, cols, cells }
    }

    /// Filled cells as `(col, row)` offsets.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(i, _)| (i % self.cols, i / self.cols))
    }
}

/// A falling piece: shape at an origin (top-left of the matrix).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub origin: Pos,
}

impl Piece {
    /// Piece of `kind` in spawn orientation.
    #[must_use]
    pub fn new(kind: PieceKind, origin: Pos) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            origin,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Board coordinates of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| self.origin.offset(Pos::new(dx as i32, dy as i32)))
    }

    /// Copy shifted by `(dx, dy)`.
    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.offset(Pos::new(dx, dy)),
            ..self.clone()
        }
    }

    /// Copy rotated clockwise about the same origin.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..self.clone()
        }
    }
}

/// One-piece look-ahead queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceQueue {
    next: PieceKind,
}

impl PieceQueue {
    /// Fill the queue with a random piece.
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            next: PieceKind::random(rng),
        }
    }

    #[must_use]
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the queued piece and refill.
    pub fn draw(&mut self, rng: &mut GameRng) -> PieceKind {
        std::mem::replace(&mut self.next, PieceKind::random(rng))
    }

    /// Replace the queued piece.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }
}
