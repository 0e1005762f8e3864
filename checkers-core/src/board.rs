//! Checkers board geometry, pieces and per-piece move generation
//!
//! Coordinates are `(row, col)` with both in `0..8`. Only dark squares
//! (`row + col` even) can hold pieces. Red men advance toward row 7,
//! Blue men toward row 0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board width and height
pub const BOARD_SIZE: i8 = 8;

/// Rows each side fills at the start of a game
const STARTING_ROWS: i8 = 3;

/// Diagonal direction vectors (d_row, d_col)
const ALL_DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const RED_FORWARD: [(i8, i8); 2] = [(1, -1), (1, 1)];
const BLUE_FORWARD: [(i8, i8); 2] = [(-1, -1), (-1, 1)];

// ============================================================================
// COLORS AND PIECES
// ============================================================================

/// Side color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Row on which this color's men are crowned
    pub fn crowning_row(self) -> i8 {
        match self {
            Color::Red => BOARD_SIZE - 1,
            Color::Blue => 0,
        }
    }

    /// Row this color starts behind (the opponent's crowning row)
    pub fn home_row(self) -> i8 {
        self.opponent().crowning_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub const fn new(color: Color) -> Self {
        Self { color, king: false }
    }

    pub const fn crowned(color: Color) -> Self {
        Self { color, king: true }
    }

    /// Material value: 1 for a man, 2 for a king
    pub fn value(&self) -> f32 {
        if self.king {
            2.0
        } else {
            1.0
        }
    }

    /// Diagonals this piece may move along before any occupancy check
    fn directions(&self) -> &'static [(i8, i8)] {
        if self.king {
            &ALL_DIAGONALS
        } else {
            match self.color {
                Color::Red => &RED_FORWARD,
                Color::Blue => &BLUE_FORWARD,
            }
        }
    }
}

// ============================================================================
// COORDINATES
// ============================================================================

/// Board coordinate (may point off the board until validated)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this coordinate is on the board
    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Playable squares are the dark ones
    pub fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    pub fn offset(&self, d_row: i8, d_col: i8) -> Coord {
        Coord::new(self.row + d_row, self.col + d_col)
    }

    /// One diagonal step apart
    pub fn is_adjacent(&self, other: Coord) -> bool {
        (self.row - other.row).abs() == 1 && (self.col - other.col).abs() == 1
    }

    /// Square jumped over when moving two diagonals to `other`
    pub fn midpoint(&self, other: Coord) -> Coord {
        Coord::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: Coord) -> f32 {
        let dr = (self.row - other.row) as f32;
        let dc = (self.col - other.col) as f32;
        (dr * dr + dc * dc).sqrt()
    }

    fn index(&self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.row as usize * BOARD_SIZE as usize + self.col as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ============================================================================
// SQUARES
// ============================================================================

/// Fixed square color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shade {
    Light,
    Dark,
}

/// A board square: fixed shade plus optional occupant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    shade: Shade,
    occupant: Option<Piece>,
}

impl Square {
    pub fn shade(&self) -> Shade {
        self.shade
    }

    pub fn occupant(&self) -> Option<Piece> {
        self.occupant
    }
}

/// Invalid board setup
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinate {0} is off the board")]
    OffBoard(Coord),

    #[error("coordinate {0} is a light square and cannot hold a piece")]
    LightSquare(Coord),
}

// ============================================================================
// BOARD
// ============================================================================

/// 8x8 board stored as a flat array (cheap to clone per search branch)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Square; 64],
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        let mut squares = [Square {
            shade: Shade::Light,
            occupant: None,
        }; 64];
        for coord in all_coords() {
            if coord.is_dark() {
                if let Some(i) = coord.index() {
                    squares[i].shade = Shade::Dark;
                }
            }
        }
        Self { squares }
    }

    /// Opening position: three rows of men per side on the dark squares
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for coord in all_coords().filter(|c| c.is_dark()) {
            let color = if coord.row < STARTING_ROWS {
                Color::Red
            } else if coord.row >= BOARD_SIZE - STARTING_ROWS {
                Color::Blue
            } else {
                continue;
            };
            if let Some(i) = coord.index() {
                board.squares[i].occupant = Some(Piece::new(color));
            }
        }
        board
    }

    pub fn square(&self, coord: Coord) -> Option<&Square> {
        coord.index().map(|i| &self.squares[i])
    }

    /// Occupant of a square; off-board coordinates are simply empty
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.square(coord).and_then(|sq| sq.occupant)
    }

    /// Put a piece on a dark square (replacing any occupant)
    pub fn place(&mut self, coord: Coord, piece: Piece) -> Result<(), BoardError> {
        let i = coord.index().ok_or(BoardError::OffBoard(coord))?;
        if self.squares[i].shade != Shade::Dark {
            return Err(BoardError::LightSquare(coord));
        }
        self.squares[i].occupant = Some(piece);
        Ok(())
    }

    /// The four diagonal neighbours, unfiltered by board bounds
    pub fn adjacent_squares(&self, coord: Coord) -> [Coord; 4] {
        ALL_DIAGONALS.map(|(dr, dc)| coord.offset(dr, dc))
    }

    /// Legal destinations for the piece at `from`.
    ///
    /// Empty squares one diagonal away are simple steps, and an adjacent
    /// enemy with an empty square behind it yields a capture landing.
    /// With `mid_hop` set, only capture landings are returned.
    pub fn legal_steps(&self, from: Coord, mid_hop: bool) -> Vec<Coord> {
        let Some(piece) = self.piece_at(from) else {
            return Vec::new();
        };

        let mut steps = Vec::with_capacity(4);
        for &(dr, dc) in piece.directions() {
            let next = from.offset(dr, dc);
            if !next.is_on_board() {
                continue;
            }
            match self.piece_at(next) {
                None => {
                    if !mid_hop {
                        steps.push(next);
                    }
                }
                Some(other) if other.color != piece.color => {
                    let landing = next.offset(dr, dc);
                    if landing.is_on_board() && self.piece_at(landing).is_none() {
                        steps.push(landing);
                    }
                }
                Some(_) => {}
            }
        }
        steps
    }

    /// Relocate the piece at `from` to `to`, crowning it on the far row
    pub fn move_piece(&mut self, from: Coord, to: Coord) {
        let (Some(fi), Some(ti)) = (from.index(), to.index()) else {
            return;
        };
        let Some(mut piece) = self.squares[fi].occupant.take() else {
            return;
        };
        if to.row == piece.color.crowning_row() {
            piece.king = true;
        }
        self.squares[ti].occupant = Some(piece);
    }

    /// Clear a square
    pub fn remove_piece(&mut self, coord: Coord) {
        if let Some(i) = coord.index() {
            self.squares[i].occupant = None;
        }
    }

    /// All occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        all_coords().filter_map(move |c| self.piece_at(c).map(|p| (c, p)))
    }

    pub fn locations_of_color(&self, color: Color) -> Vec<Coord> {
        self.pieces()
            .filter(|(_, p)| p.color == color)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn king_locations_of_color(&self, color: Color) -> Vec<Coord> {
        self.pieces()
            .filter(|(_, p)| p.color == color && p.king)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  01234567")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", row)?;
            for col in 0..BOARD_SIZE {
                let coord = Coord::new(row, col);
                let ch = match self.piece_at(coord) {
                    Some(Piece { color: Color::Red, king: false }) => 'r',
                    Some(Piece { color: Color::Red, king: true }) => 'R',
                    Some(Piece { color: Color::Blue, king: false }) => 'b',
                    Some(Piece { color: Color::Blue, king: true }) => 'B',
                    None if coord.is_dark() => '.',
                    None => ' ',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Every coordinate on the board in row-major order
pub fn all_coords() -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(row, col)))
}

// ============================================================================
// TESTS
// ============================================================================
