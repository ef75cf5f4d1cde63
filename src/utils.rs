use crate::engine::Board;
use crate::level::LevelError;
use crate::token::TokenKind;

/// Seed used for boards built from text, so any tokens they draw later are reproducible.
pub const DEFAULT_SEED: u64 = 514514;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from the top row, the way level files
/// are authored; the last string becomes row 0. All rows must have the same
/// length.
///
/// Valid characters:
/// - a kind letter (`C`, `U`, `D`, `O`, `M`, `S`, see [`TokenKind::to_char`]):
///   a playable cell holding a token of that kind
/// - `.`: a playable, empty cell
/// - `#`: a cell outside play
///
/// The returned board has its legal swaps computed and is not shuffled.
///
/// # Examples
/// ```
/// use cookie_crunch::utils::board_from_str_array;
/// use cookie_crunch::token::TokenKind;
///
/// let board = board_from_str_array(&["#CU", "D.O"], 1000, 15).unwrap();
/// assert_eq!(board.token_at(1, 1).unwrap().kind(), TokenKind::Croissant);
/// assert!(!board.is_playable(0, 1));
/// assert!(board.is_playable(1, 0));
/// assert!(board.token_at(1, 0).is_none());
///
/// assert!(board_from_str_array(&["CX"], 0, 0).is_err());
/// assert!(board_from_str_array(&["CU", "C"], 0, 0).is_err());
/// ```
pub fn board_from_str_array(s: &[&str], target_score: u32, max_moves: u32) -> Result<Board, LevelError> {
    let width = s.first().map_or(0, |row| row.chars().count());
    if width == 0 {
        return Err(LevelError::Empty);
    }

    let mut mask = Vec::with_capacity(s.len());
    let mut placed = Vec::new();
    for (r, row_str) in s.iter().enumerate() {
        let found = row_str.chars().count();
        if found != width {
            return Err(LevelError::Ragged {
                row: r,
                expected: width,
                found,
            });
        }

        let row = s.len() - r - 1;
        let mut line = Vec::with_capacity(width);
        for (col, ch) in row_str.chars().enumerate() {
            match ch {
                '.' => line.push(true),
                '#' => line.push(false),
                _ => match TokenKind::from_char(ch) {
                    Some(kind) => {
                        line.push(true);
                        placed.push((col, row, kind));
                    }
                    None => return Err(LevelError::InvalidChar { ch, row: r, col }),
                },
            }
        }
        mask.push(line);
    }

    let mut board = Board::load_mask(&mask, target_score, max_moves, DEFAULT_SEED);
    for (col, row, kind) in placed {
        board.spawn(col, row, kind);
    }
    board.detect_legal_swaps();
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["CUDOMS", "..####"], 10, 3).unwrap();
        assert_eq!(board.cols(), 6);
        assert_eq!(board.rows(), 2);
        assert_eq!(board.target_score(), 10);
        assert_eq!(board.max_moves(), 3);
        let kinds: Vec<TokenKind> = (0..6).map(|c| board.token_at(c, 1).unwrap().kind()).collect();
        assert_eq!(kinds, TokenKind::ALL.to_vec());
        assert!(board.is_playable(1, 0));
        assert!(!board.is_playable(2, 0));
        assert_eq!(board.tokens().count(), 6);
    }

    #[test]
    fn test_board_from_str_array_assigns_distinct_ids() {
        let board = board_from_str_array(&["CCU", "UUC"], 0, 0).unwrap();
        let mut ids: Vec<u32> = board.tokens().map(|t| t.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let err = board_from_str_array(&["CUX"], 0, 0).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized character 'X' in row 0 col 2");
    }

    #[test]
    fn test_board_from_str_array_with_spaces() {
        let err = board_from_str_array(&["C U"], 0, 0).unwrap_err();
        assert!(err.to_string().contains("unrecognized character ' '"));
    }

    #[test]
    fn test_board_from_str_array_ragged() {
        let err = board_from_str_array(&["CUD", "CU"], 0, 0).unwrap_err();
        assert!(matches!(
            err,
            LevelError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let empty: [&str; 0] = [];
        assert!(matches!(board_from_str_array(&empty, 0, 0), Err(LevelError::Empty)));
        assert!(matches!(board_from_str_array(&[""], 0, 0), Err(LevelError::Empty)));
    }

    #[test]
    fn test_board_from_str_array_computes_legal_swaps() {
        let board = board_from_str_array(&["CUC", "UCU"], 0, 0).unwrap();
        assert_eq!(board.legal_swaps().len(), 1);
    }
}
