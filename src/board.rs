//! Board grid, cell model, and the canonical string encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    pieces::{Color, Piece, PieceKind},
    types::{Coord, BOARD_SIZE, TRAP_SQUARES},
    Error, Result,
};

/// One board cell. Trap squares revert to `Trap` when vacated, so the trap
/// layout survives any sequence of placements and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Trap,
    Occupied(Piece),
}

impl Cell {
    /// Whether a piece can be placed here.
    pub fn is_unoccupied(self) -> bool {
        matches!(self, Cell::Empty | Cell::Trap)
    }

    /// The piece standing here, if any.
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            _ => None,
        }
    }

    /// Canonical character: '0' empty, '1' unoccupied trap, piece initial otherwise.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Trap => '1',
            Cell::Occupied(piece) => piece.to_char(),
        }
    }
}

/// The 8x8 grid. Owns its pieces; a piece's position is wherever the grid
/// says it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board with the four traps in place.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for trap in TRAP_SQUARES {
            cells[trap.row()][trap.col()] = Cell::Trap;
        }
        Board { cells }
    }

    /// The cell at `at`.
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.row()][at.col()]
    }

    /// The piece at `at`, if any.
    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.get(at).piece()
    }

    /// Whether `at` holds no piece.
    pub fn is_unoccupied(&self, at: Coord) -> bool {
        self.get(at).is_unoccupied()
    }

    /// Place a piece on an unoccupied square.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OccupiedSquare`] if a piece already stands there.
    pub fn place(&mut self, at: Coord, piece: Piece) -> Result<()> {
        if !self.is_unoccupied(at) {
            return Err(Error::OccupiedSquare { at });
        }
        self.cells[at.row()][at.col()] = Cell::Occupied(piece);
        Ok(())
    }

    /// Remove and return the piece at `at`, restoring the underlying empty
    /// or trap cell. Returns `None` if the square held no piece.
    pub fn take(&mut self, at: Coord) -> Option<Piece> {
        let piece = self.piece_at(at)?;
        self.cells[at.row()][at.col()] = if at.is_trap() { Cell::Trap } else { Cell::Empty };
        Some(piece)
    }

    /// All pieces with their coordinates, in row-major order.
    pub fn pieces(&self) -> Vec<(Coord, Piece)> {
        let mut out = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Cell::Occupied(piece) = self.cells[row][col] {
                    out.push((Coord::from_raw(row, col), piece));
                }
            }
        }
        out
    }

    /// Pieces of one color, in row-major order.
    pub fn pieces_of(&self, color: Color) -> Vec<(Coord, Piece)> {
        self.pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// Number of rabbits of `color` still on the board.
    pub fn rabbit_count(&self, color: Color) -> usize {
        self.pieces_of(color)
            .iter()
            .filter(|(_, piece)| piece.kind == PieceKind::Rabbit)
            .count()
    }

    /// Canonical signature: eight newline-terminated rows, top row first.
    /// Uppercase initials are Gold, lowercase Silver, '0' an empty square,
    /// '1' an unoccupied trap.
    pub fn canonical_string(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
        for row in &self.cells {
            for cell in row {
                out.push(cell.to_char());
            }
            out.push('\n');
        }
        out
    }

    /// Parse a canonical signature back into a board.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not 8 rows of 8 cells, contains an
    /// unknown character, or marks traps anywhere but the four fixed squares.
    pub fn from_canonical(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != BOARD_SIZE {
            return Err(Error::InvalidBoardShape { rows: lines.len() });
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let characters: Vec<char> = line.chars().collect();
            if characters.len() != BOARD_SIZE {
                return Err(Error::InvalidRowWidth {
                    row,
                    width: characters.len(),
                });
            }
            for (col, &character) in characters.iter().enumerate() {
                let at = Coord::from_raw(row, col);
                match character {
                    '0' => {
                        if at.is_trap() {
                            return Err(Error::TrapLayoutMismatch { row, col });
                        }
                    }
                    '1' => {
                        if !at.is_trap() {
                            return Err(Error::TrapLayoutMismatch { row, col });
                        }
                    }
                    _ => match Piece::from_char(character) {
                        Some(piece) => board.cells[row][col] = Cell::Occupied(piece),
                        None => {
                            return Err(Error::InvalidCellCharacter {
                                character,
                                row,
                                col,
                            })
                        }
                    },
                }
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_has_traps_only() {
        let board = Board::new();
        let expected = "00000000\n\
                        00000000\n\
                        00100100\n\
                        00000000\n\
                        00000000\n\
                        00100100\n\
                        00000000\n\
                        00000000\n";
        assert_eq!(board.canonical_string(), expected);
    }

    #[test]
    fn test_take_restores_trap_cell() {
        let mut board = Board::new();
        let trap = Coord::from_raw(2, 2);
        let piece = Piece::new(Color::Gold, PieceKind::Dog);
        board.place(trap, piece).unwrap();
        assert_eq!(board.get(trap), Cell::Occupied(piece));

        assert_eq!(board.take(trap), Some(piece));
        assert_eq!(board.get(trap), Cell::Trap);
        assert_eq!(board.take(trap), None);
    }

    #[test]
    fn test_place_rejects_occupied_square() {
        let mut board = Board::new();
        let at = Coord::from_raw(3, 3);
        board
            .place(at, Piece::new(Color::Gold, PieceKind::Cat))
            .unwrap();
        let result = board.place(at, Piece::new(Color::Silver, PieceKind::Dog));
        assert!(matches!(result, Err(Error::OccupiedSquare { .. })));
    }

    #[test]
    fn test_canonical_round_trip() {
        let mut board = Board::new();
        board
            .place(
                Coord::from_raw(0, 0),
                Piece::new(Color::Silver, PieceKind::Elephant),
            )
            .unwrap();
        board
            .place(
                Coord::from_raw(7, 7),
                Piece::new(Color::Gold, PieceKind::Rabbit),
            )
            .unwrap();
        board
            .place(
                Coord::from_raw(2, 2),
                Piece::new(Color::Gold, PieceKind::Camel),
            )
            .unwrap();

        let text = board.canonical_string();
        let parsed = Board::from_canonical(&text).unwrap();
        assert_eq!(parsed, board);
        assert_eq!(parsed.canonical_string(), text);
    }

    #[test]
    fn test_from_canonical_rejects_bad_shapes() {
        assert!(matches!(
            Board::from_canonical("00000000\n"),
            Err(Error::InvalidBoardShape { rows: 1 })
        ));

        let short_row = "00000000\n".repeat(7) + "0000000\n";
        assert!(matches!(
            Board::from_canonical(&short_row),
            Err(Error::InvalidRowWidth { row: 7, width: 7 })
        ));
    }

    #[test]
    fn test_from_canonical_rejects_unknown_character() {
        let text = Board::new().canonical_string().replacen('0', "x", 1);
        assert!(matches!(
            Board::from_canonical(&text),
            Err(Error::InvalidCellCharacter { character: 'x', .. })
        ));
    }

    #[test]
    fn test_from_canonical_rejects_misplaced_trap() {
        // '1' outside the four fixed trap squares
        let text = Board::new().canonical_string().replacen('0', "1", 1);
        assert!(matches!(
            Board::from_canonical(&text),
            Err(Error::TrapLayoutMismatch { row: 0, col: 0 })
        ));

        // '0' on a trap square
        let text = Board::new().canonical_string().replacen('1', "0", 1);
        assert!(matches!(
            Board::from_canonical(&text),
            Err(Error::TrapLayoutMismatch { row: 2, col: 2 })
        ));
    }

    #[test]
    fn test_rabbit_count_tracks_color() {
        let mut board = Board::new();
        board
            .place(
                Coord::from_raw(1, 1),
                Piece::new(Color::Gold, PieceKind::Rabbit),
            )
            .unwrap();
        board
            .place(
                Coord::from_raw(1, 2),
                Piece::new(Color::Gold, PieceKind::Rabbit),
            )
            .unwrap();
        board
            .place(
                Coord::from_raw(6, 1),
                Piece::new(Color::Silver, PieceKind::Rabbit),
            )
            .unwrap();
        assert_eq!(board.rabbit_count(Color::Gold), 2);
        assert_eq!(board.rabbit_count(Color::Silver), 1);
    }
}
