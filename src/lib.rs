//! # Cookie Crunch
//!
//! This library provides the rules engine for a tile-matching puzzle: a board
//! of playable cells filled with tokens of six kinds, where swapping two
//! neighbours to line up three or more of a kind removes them, lets the tokens
//! above fall, and drops new tokens in from the top until the board is stable.
//!
//! It has no rendering or input of its own. Every step returns plain data
//! (created tokens, removed chains, fallen tokens) for a presentation layer to
//! animate. The `simulate` binary plays a level headlessly.
//!
//! ## Modules
//! - `grid`: `Grid2D`, the fixed-size optional-cell store behind the board.
//! - `token`: token kinds (`TokenKind`), tokens (`Token`) and swaps (`Swap`).
//! - `chain`: matched runs (`Chain`) and their orientation.
//! - `engine`: the board (`Board`) with swap detection, matching, scoring,
//!   gravity and refill, and the play session (`Game`).
//! - `level`: loading and validating JSON level descriptors.
//! - `heuristics`: strategies for choosing a swap.
//! - `utils`: building boards from text rows, mostly for scenarios and tests.

pub mod chain;
pub mod engine;
pub mod grid;
pub mod heuristics;
pub mod level;
pub mod token;
pub mod utils;
