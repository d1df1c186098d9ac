//! Piece catalog: the two colors, the six kinds, and their strength order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Gold,
    Silver,
}

impl Color {
    /// The other side.
    pub fn opponent(self) -> Color {
        match self {
            Color::Gold => Color::Silver,
            Color::Silver => Color::Gold,
        }
    }

    /// The row this color's rabbits are trying to reach (the opponent's home edge).
    pub fn goal_row(self) -> usize {
        match self {
            Color::Gold => 0,
            Color::Silver => 7,
        }
    }

    /// The row this color's rabbits start on. Rabbits may never step back toward it.
    pub fn home_row(self) -> usize {
        match self {
            Color::Gold => 7,
            Color::Silver => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Gold => write!(f, "Gold"),
            Color::Silver => write!(f, "Silver"),
        }
    }
}

/// The six piece kinds, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Rabbit,
    Cat,
    Dog,
    Horse,
    Camel,
    Elephant,
}

impl PieceKind {
    /// All six kinds, weakest first.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Rabbit,
        PieceKind::Cat,
        PieceKind::Dog,
        PieceKind::Horse,
        PieceKind::Camel,
        PieceKind::Elephant,
    ];

    /// Strength rank, Rabbit = 1 through Elephant = 6. The order is strict:
    /// no two kinds share a rank.
    pub fn rank(self) -> u8 {
        match self {
            PieceKind::Rabbit => 1,
            PieceKind::Cat => 2,
            PieceKind::Dog => 3,
            PieceKind::Horse => 4,
            PieceKind::Camel => 5,
            PieceKind::Elephant => 6,
        }
    }

    /// Lowercase canonical initial. The camel uses 'm' so it stays distinct
    /// from the cat.
    pub fn initial(self) -> char {
        match self {
            PieceKind::Rabbit => 'r',
            PieceKind::Cat => 'c',
            PieceKind::Dog => 'd',
            PieceKind::Horse => 'h',
            PieceKind::Camel => 'm',
            PieceKind::Elephant => 'e',
        }
    }

    /// Parse a canonical initial (either case).
    pub fn from_initial(character: char) -> Option<PieceKind> {
        match character.to_ascii_lowercase() {
            'r' => Some(PieceKind::Rabbit),
            'c' => Some(PieceKind::Cat),
            'd' => Some(PieceKind::Dog),
            'h' => Some(PieceKind::Horse),
            'm' => Some(PieceKind::Camel),
            'e' => Some(PieceKind::Elephant),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Rabbit => "Rabbit",
            PieceKind::Cat => "Cat",
            PieceKind::Dog => "Dog",
            PieceKind::Horse => "Horse",
            PieceKind::Camel => "Camel",
            PieceKind::Elephant => "Elephant",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A piece on the board. Plain value record; its location is wherever the
/// board says it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// Create a new piece.
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Strength rank of this piece's kind.
    pub fn rank(&self) -> u8 {
        self.kind.rank()
    }

    /// Canonical character: uppercase for Gold, lowercase for Silver.
    pub fn to_char(&self) -> char {
        match self.color {
            Color::Gold => self.kind.initial().to_ascii_uppercase(),
            Color::Silver => self.kind.initial(),
        }
    }

    /// Parse a canonical character, inferring the color from its case.
    pub fn from_char(character: char) -> Option<Piece> {
        let kind = PieceKind::from_initial(character)?;
        let color = if character.is_ascii_uppercase() {
            Color::Gold
        } else {
            Color::Silver
        };
        Some(Piece { color, kind })
    }

    /// Whether this piece strictly outranks `other`. Equal ranks never
    /// satisfy this.
    pub fn outranks(&self, other: &Piece) -> bool {
        self.rank() > other.rank()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
