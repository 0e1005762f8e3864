//! Static board evaluation
//!
//! Every evaluation function is a pure `(board, perspective) -> score`
//! mapping, selected at runtime by name through [`EvalFn`].

use crate::board::{Board, Color, Coord, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Win value (effectively infinite)
pub const WIN_VALUE: f32 = 99_999_999.0;

/// Pieces per side at the start of a game
const STARTING_PIECES: f32 = 24.0;

/// Corner-to-corner distance, the largest possible between two squares
pub fn max_board_distance() -> f32 {
    let span = (BOARD_SIZE - 1) as f32;
    (2.0 * span * span).sqrt()
}

/// Named evaluation heuristics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvalFn {
    /// Own pieces minus opponent pieces
    #[default]
    #[serde(rename = "piece2val")]
    PieceCount,
    /// Inverted material count (a deliberately weak baseline)
    #[serde(rename = "piece2val_inv")]
    PieceCountInverted,
    /// Material with kings weighted 5 and men 1
    #[serde(rename = "piece2val_favor_kings")]
    FavorKings,
    /// Material plus a bonus for guarding the home row
    #[serde(rename = "piece2val_keep_back_row")]
    KeepBackRow,
    /// Closeness of the two sides' centres of mass
    #[serde(rename = "piece2val_move_to_opponent")]
    MoveToOpponent,
    /// Closeness of the most distant own king to its nearest enemy
    #[serde(rename = "furthest_king")]
    FurthestKing,
}

impl EvalFn {
    pub const ALL: [EvalFn; 6] = [
        EvalFn::PieceCount,
        EvalFn::PieceCountInverted,
        EvalFn::FavorKings,
        EvalFn::KeepBackRow,
        EvalFn::MoveToOpponent,
        EvalFn::FurthestKing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EvalFn::PieceCount => "piece2val",
            EvalFn::PieceCountInverted => "piece2val_inv",
            EvalFn::FavorKings => "piece2val_favor_kings",
            EvalFn::KeepBackRow => "piece2val_keep_back_row",
            EvalFn::MoveToOpponent => "piece2val_move_to_opponent",
            EvalFn::FurthestKing => "furthest_king",
        }
    }

    /// Score `board` from `color`'s point of view
    pub fn evaluate(&self, board: &Board, color: Color) -> f32 {
        match self {
            EvalFn::PieceCount => piece2val(board, color),
            EvalFn::PieceCountInverted => STARTING_PIECES - piece2val(board, color),
            EvalFn::FavorKings => favor_kings(board, color),
            EvalFn::KeepBackRow => keep_back_row(board, color),
            EvalFn::MoveToOpponent => move_to_opponent(board, color),
            EvalFn::FurthestKing => max_board_distance() - furthest_king_distance(board, color),
        }
    }
}

impl fmt::Display for EvalFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvalFn {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EvalFn::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| crate::ConfigError::UnknownEvalFn(s.to_string()))
    }
}

// ============================================================================
// HEURISTICS
// ============================================================================

/// Own pieces minus opponent pieces
pub fn piece2val(board: &Board, color: Color) -> f32 {
    weighted_material(board, color, |_| 1.0)
}

fn favor_kings(board: &Board, color: Color) -> f32 {
    weighted_material(board, color, |king| if king { 5.0 } else { 1.0 })
}

fn keep_back_row(board: &Board, color: Color) -> f32 {
    let home = color.home_row();
    let guard: f32 = board
        .pieces()
        .filter(|(c, p)| p.color == color && c.row == home)
        .map(|(_, p)| p.value() * 0.5)
        .sum();
    piece2val(board, color) + guard
}

fn move_to_opponent(board: &Board, color: Color) -> f32 {
    match center_of_mass_distance(board, color) {
        Some(distance) => max_board_distance() - distance,
        None => piece2val(board, color),
    }
}

fn weighted_material(board: &Board, color: Color, weight: impl Fn(bool) -> f32) -> f32 {
    board
        .pieces()
        .map(|(_, p)| {
            let value = weight(p.king);
            if p.color == color {
                value
            } else {
                -value
            }
        })
        .sum()
}

// ============================================================================
// GEOMETRY HELPERS
// ============================================================================

/// Mean (row, col) of a set of squares
pub fn center_of_mass(locations: &[Coord]) -> Option<(f32, f32)> {
    if locations.is_empty() {
        return None;
    }
    let n = locations.len() as f32;
    let row = locations.iter().map(|c| c.row as f32).sum::<f32>() / n;
    let col = locations.iter().map(|c| c.col as f32).sum::<f32>() / n;
    Some((row, col))
}

/// Distance between the two sides' centres of mass (`None` if a side is empty)
pub fn center_of_mass_distance(board: &Board, color: Color) -> Option<f32> {
    let (own_r, own_c) = center_of_mass(&board.locations_of_color(color))?;
    let (opp_r, opp_c) = center_of_mass(&board.locations_of_color(color.opponent()))?;
    Some(((own_r - opp_r).powi(2) + (own_c - opp_c).powi(2)).sqrt())
}

/// Largest distance between any own king and any enemy piece (0 without kings or enemies)
pub fn furthest_king_distance(board: &Board, color: Color) -> f32 {
    let enemies = board.locations_of_color(color.opponent());
    board
        .king_locations_of_color(color)
        .into_iter()
        .flat_map(|king| enemies.iter().map(move |e| king.distance_to(*e)))
        .fold(0.0, f32::max)
}

/// Largest distance from any own king to its nearest enemy piece (0 without kings or enemies)
pub fn king_proximity_distance(board: &Board, color: Color) -> f32 {
    let enemies = board.locations_of_color(color.opponent());
    board
        .king_locations_of_color(color)
        .into_iter()
        .filter_map(|king| {
            enemies
                .iter()
                .map(|e| king.distance_to(*e))
                .min_by(|a, b| a.total_cmp(b))
        })
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn lopsided_board() -> Board {
        let mut board = Board::standard();
        board.remove_piece(Coord::new(5, 1));
        board.remove_piece(Coord::new(6, 2));
        board
    }

    #[test]
    fn test_piece2val_counts_material() {
        let board = lopsided_board();
        assert_eq!(piece2val(&board, Color::Red), 2.0);
        assert_eq!(piece2val(&board, Color::Blue), -2.0);
        assert_eq!(piece2val(&Board::standard(), Color::Blue), 0.0);
    }

    #[test]
    fn test_piece2val_is_idempotent() {
        let board = lopsided_board();
        let first = EvalFn::PieceCount.evaluate(&board, Color::Red);
        let second = EvalFn::PieceCount.evaluate(&board, Color::Red);
        assert_eq!(first, second);
        let expected = board.count(Color::Red) as f32 - board.count(Color::Blue) as f32;
        assert_eq!(first, expected);
    }

    #[test]
    fn test_inverted_count() {
        let board = lopsided_board();
        assert_eq!(EvalFn::PieceCountInverted.evaluate(&board, Color::Red), 22.0);
    }

    #[test]
    fn test_favor_kings() {
        let mut board = Board::empty();
        board.place(Coord::new(0, 0), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(4, 4), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(4, 6), Piece::new(Color::Blue)).unwrap();
        assert_eq!(EvalFn::FavorKings.evaluate(&board, Color::Red), 3.0);
        assert_eq!(EvalFn::FavorKings.evaluate(&board, Color::Blue), -3.0);
    }

    #[test]
    fn test_keep_back_row_bonus() {
        let board = Board::standard();
        // Four men on each home row, 0.5 each
        assert_eq!(EvalFn::KeepBackRow.evaluate(&board, Color::Red), 2.0);
        assert_eq!(EvalFn::KeepBackRow.evaluate(&board, Color::Blue), 2.0);
    }

    #[test]
    fn test_move_to_opponent() {
        let mut board = Board::empty();
        board.place(Coord::new(0, 0), Piece::new(Color::Red)).unwrap();
        board.place(Coord::new(7, 7), Piece::new(Color::Blue)).unwrap();
        assert!(EvalFn::MoveToOpponent.evaluate(&board, Color::Red).abs() < 1e-4);

        board.remove_piece(Coord::new(7, 7));
        board.place(Coord::new(1, 1), Piece::new(Color::Blue)).unwrap();
        let close = EvalFn::MoveToOpponent.evaluate(&board, Color::Red);
        assert!((close - (max_board_distance() - 2f32.sqrt())).abs() < 1e-4);

        // Falls back to material when a side is gone
        board.remove_piece(Coord::new(1, 1));
        assert_eq!(EvalFn::MoveToOpponent.evaluate(&board, Color::Red), 1.0);
    }

    #[test]
    fn test_furthest_king() {
        let mut board = Board::empty();
        board.place(Coord::new(0, 0), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(2, 2), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(3, 3), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(7, 7), Piece::new(Color::Blue)).unwrap();
        // (0,0) to (7,7) is the furthest king/enemy pair
        assert!((furthest_king_distance(&board, Color::Red) - max_board_distance()).abs() < 1e-4);
        assert!(EvalFn::FurthestKing.evaluate(&board, Color::Red).abs() < 1e-4);
        assert_eq!(furthest_king_distance(&board, Color::Blue), 0.0);
        assert_eq!(EvalFn::FurthestKing.evaluate(&board, Color::Blue), max_board_distance());
    }

    #[test]
    fn test_furthest_king_ignores_nearest_enemy() {
        let mut board = Board::empty();
        board.place(Coord::new(0, 0), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(1, 1), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(7, 7), Piece::new(Color::Blue)).unwrap();
        assert!(EvalFn::FurthestKing.evaluate(&board, Color::Red).abs() < 1e-4);
        assert!((king_proximity_distance(&board, Color::Red) - 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_king_proximity_distance() {
        let mut board = Board::empty();
        board.place(Coord::new(0, 0), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(2, 2), Piece::crowned(Color::Red)).unwrap();
        board.place(Coord::new(3, 3), Piece::new(Color::Blue)).unwrap();
        board.place(Coord::new(7, 7), Piece::new(Color::Blue)).unwrap();
        let expected = 18f32.sqrt();
        assert!((king_proximity_distance(&board, Color::Red) - expected).abs() < 1e-4);
        assert_eq!(king_proximity_distance(&board, Color::Blue), 0.0);
    }

    #[test]
    fn test_eval_fn_names_round_trip() {
        for eval_fn in EvalFn::ALL {
            assert_eq!(eval_fn.name().parse::<EvalFn>().unwrap(), eval_fn);
            let json = serde_json::to_string(&eval_fn).unwrap();
            assert_eq!(json, format!("\"{}\"", eval_fn.name()));
        }
        assert!("material".parse::<EvalFn>().is_err());
    }
}
