//! Level descriptors: which cells are playable, the target score and the move budget.
//!
//! Levels are JSON documents:
//!
//! ```json
//! { "tiles": [[0, 1, 1, 0], [1, 1, 1, 1]], "targetScore": 1000, "moves": 15 }
//! ```
//!
//! `tiles` lists rows top first, `1` marking a playable cell. A [`Level`] is a
//! descriptor that passed validation and can be handed to
//! [`Board::from_level`](crate::engine::Board::from_level).
use crate::engine::mask_admits_swap;
use crate::grid::Grid2D;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading or building a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells (expected {expected})")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile value {value} in row {row} col {col} (expected 0 or 1)")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    InvalidChar { ch: char, row: usize, col: usize },

    #[error("level layout cannot hold any legal swap")]
    Unplayable,
}

/// A level as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    pub tiles: Vec<Vec<u8>>,
    pub target_score: u32,
    pub moves: u32,
}

/// A validated level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    mask_rows: Vec<Vec<bool>>,
    target_score: u32,
    moves: u32,
}

impl Level {
    /// Validates a descriptor.
    ///
    /// The grid must be non-empty and rectangular, hold only 0s and 1s, and
    /// have a layout where a legal swap is possible.
    pub fn from_descriptor(descriptor: LevelDescriptor) -> Result<Self, LevelError> {
        let expected = descriptor.tiles.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::Empty);
        }

        let mut mask_rows = Vec::with_capacity(descriptor.tiles.len());
        for (row, values) in descriptor.tiles.iter().enumerate() {
            if values.len() != expected {
                return Err(LevelError::Ragged {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            let mut line = Vec::with_capacity(expected);
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => line.push(false),
                    1 => line.push(true),
                    _ => return Err(LevelError::InvalidCell { row, col, value }),
                }
            }
            mask_rows.push(line);
        }

        let level = Level {
            mask_rows,
            target_score: descriptor.target_score,
            moves: descriptor.moves,
        };
        if !mask_admits_swap(&level.mask()) {
            return Err(LevelError::Unplayable);
        }
        Ok(level)
    }

    /// Parses and validates a JSON level.
    ///
    /// # Examples
    /// ```
    /// use cookie_crunch::level::Level;
    ///
    /// let json = r#"{ "tiles": [[1, 1, 1, 1]], "targetScore": 300, "moves": 5 }"#;
    /// let level = Level::from_json_str(json).unwrap();
    /// assert_eq!(level.width(), 4);
    /// assert_eq!(level.moves(), 5);
    ///
    /// assert!(Level::from_json_str(r#"{ "tiles": [[1, 1, 1]], "targetScore": 1, "moves": 1 }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let descriptor: LevelDescriptor = serde_json::from_str(json)?;
        Self::from_descriptor(descriptor)
    }

    /// Reads and validates a JSON level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LevelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Playable cells, top row first, as authored.
    pub fn mask_rows(&self) -> &[Vec<bool>] {
        &self.mask_rows
    }

    pub fn width(&self) -> usize {
        self.mask_rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.mask_rows.len()
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    fn mask(&self) -> Grid2D<bool> {
        let mut grid = Grid2D::new(self.width(), self.height());
        for (row, line) in self.mask_rows.iter().enumerate() {
            for (col, &playable) in line.iter().enumerate() {
                grid.set(col, row, Some(playable));
            }
        }
        grid
    }
}
