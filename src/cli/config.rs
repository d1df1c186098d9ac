//! Shared configuration types for CLI commands

use std::fmt;

use clap::ValueEnum;

use crate::{game::GameState, pieces::Color};

/// Which starting position to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SetupChoice {
    /// Full armies: rabbits on the home rows, officers in front
    Full,
    /// A sparse seven-piece demonstration layout; silver opens
    Demo,
}

impl SetupChoice {
    /// Build the chosen starting state.
    pub fn build(self) -> GameState {
        match self {
            SetupChoice::Full => GameState::with_default_setup(),
            SetupChoice::Demo => GameState::with_demo_setup(),
        }
    }
}

impl fmt::Display for SetupChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupChoice::Full => write!(f, "full"),
            SetupChoice::Demo => write!(f, "demo"),
        }
    }
}

/// Side selector for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideChoice {
    Gold,
    Silver,
}

impl SideChoice {
    /// The selected color.
    pub fn color(self) -> Color {
        match self {
            SideChoice::Gold => Color::Gold,
            SideChoice::Silver => Color::Silver,
        }
    }
}

impl fmt::Display for SideChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideChoice::Gold => write!(f, "gold"),
            SideChoice::Silver => write!(f, "silver"),
        }
    }
}
