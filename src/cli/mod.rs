//! CLI infrastructure for the arimaa engine
//!
//! This module provides the command-line interface for running engine
//! self-play games and analyzing positions.

pub mod commands;
pub mod config;
pub mod output;
