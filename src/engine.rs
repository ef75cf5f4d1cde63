//! Core rules engine for the tile-matching puzzle.
//!
//! This module defines:
//! - `Board`: the playable mask and the tokens on it, legal-swap detection,
//!   chain detection and scoring, and the remove / fall / top-up steps.
//! - `Game`: a play session on top of a board, tracking score, moves left and
//!   the level target, and running the resolution loop after each swap.
//!
//! Coordinates are `(col, row)` with row 0 at the bottom of the board.
use crate::chain::{Chain, ChainKind};
use crate::grid::Grid2D;
use crate::level::Level;
use crate::token::{Swap, Token, TokenKind};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt;

/// Shortest run of same-kind tokens that counts as a chain.
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Points for each token of a chain beyond the first two, before the combo multiplier.
pub const POINTS_PER_EXTRA_TOKEN: u32 = 60;

/// Returns true if some assignment of tokens to `mask` admits a legal swap.
///
/// That holds exactly when three playable cells in a line either continue to a
/// fourth playable cell on the same line, or have a playable cell directly
/// beside one of the three across the line.
pub(crate) fn mask_admits_swap(mask: &Grid2D<bool>) -> bool {
    let cols = mask.cols() as isize;
    let rows = mask.rows() as isize;
    let playable = |c: isize, r: isize| {
        c >= 0
            && r >= 0
            && c < cols
            && r < rows
            && mask.get(c as usize, r as usize).copied().unwrap_or(false)
    };

    for r in 0..rows {
        for c in 0..cols {
            if playable(c, r) && playable(c + 1, r) && playable(c + 2, r) {
                if playable(c - 1, r) || playable(c + 3, r) {
                    return true;
                }
                if (0..3).any(|d| playable(c + d, r - 1) || playable(c + d, r + 1)) {
                    return true;
                }
            }
            if playable(c, r) && playable(c, r + 1) && playable(c, r + 2) {
                if playable(c, r - 1) || playable(c, r + 3) {
                    return true;
                }
                if (0..3).any(|d| playable(c - 1, r + d) || playable(c + 1, r + d)) {
                    return true;
                }
            }
        }
    }
    false
}

/// A board: which cells are playable, which tokens sit on them, and the swaps
/// currently legal.
///
/// A token only ever occupies a playable cell. A playable cell may be empty
/// between match removal and top-up.
#[derive(Clone, Debug)]
pub struct Board {
    tokens: Grid2D<Token>,
    mask: Grid2D<bool>,
    legal_swaps: Vec<Swap>,
    combo_multiplier: u32,
    target_score: u32,
    max_moves: u32,
    next_id: u32,
    rng: SmallRng,
}

impl Board {
    /// Creates an empty board from a playable mask.
    ///
    /// `rows` lists the mask top row first, as level files are authored. The
    /// board stores it bottom row first, so `rows[0]` becomes the top row
    /// `rows.len() - 1` and the last entry becomes row 0.
    ///
    /// `seed` drives every token kind this board will ever draw.
    ///
    /// # Panics
    /// Panics if the mask is empty or its rows differ in length. Level loading
    /// rejects such input before it gets here.
    ///
    /// # Examples
    /// ```
    /// use cookie_crunch::engine::Board;
    ///
    /// let rows = vec![vec![true, false], vec![false, false], vec![false, true]];
    /// let board = Board::load_mask(&rows, 1000, 15, 42);
    /// assert!(board.is_playable(0, 2)); // first authored row is the top
    /// assert!(board.is_playable(1, 0)); // last authored row is the bottom
    /// assert!(!board.is_playable(0, 0));
    /// ```
    pub fn load_mask(rows: &[Vec<bool>], target_score: u32, max_moves: u32, seed: u64) -> Self {
        assert!(
            !rows.is_empty() && !rows[0].is_empty(),
            "level mask must have at least one cell"
        );
        let num_rows = rows.len();
        let num_cols = rows[0].len();

        let mut mask = Grid2D::new(num_cols, num_rows);
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), num_cols, "level mask row {} is ragged", i);
            let row = num_rows - i - 1;
            for (col, &playable) in line.iter().enumerate() {
                mask.set(col, row, Some(playable));
            }
        }

        Board {
            tokens: Grid2D::new(num_cols, num_rows),
            mask,
            legal_swaps: Vec::new(),
            combo_multiplier: 1,
            target_score,
            max_moves,
            next_id: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates an empty board for a validated level.
    pub fn from_level(level: &Level, seed: u64) -> Self {
        Self::load_mask(level.mask_rows(), level.target_score(), level.moves(), seed)
    }

    pub fn cols(&self) -> usize {
        self.tokens.cols()
    }

    pub fn rows(&self) -> usize {
        self.tokens.rows()
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn max_moves(&self) -> u32 {
        self.max_moves
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    /// Returns the token at `(col, row)`, if any.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn token_at(&self, col: usize, row: usize) -> Option<&Token> {
        self.tokens.get(col, row)
    }

    /// Returns whether `(col, row)` takes part in play.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn is_playable(&self, col: usize, row: usize) -> bool {
        self.mask.get(col, row).copied().unwrap_or(false)
    }

    /// All tokens on the board, bottom row first, left to right.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Swaps found by the last call to [`Board::detect_legal_swaps`], in discovery order.
    pub fn legal_swaps(&self) -> &[Swap] {
        &self.legal_swaps
    }

    pub fn is_legal(&self, swap: &Swap) -> bool {
        self.legal_swaps.contains(swap)
    }

    fn kind_at(&self, col: usize, row: usize) -> Option<TokenKind> {
        self.tokens.get(col, row).map(Token::kind)
    }

    /// Puts a new token of `kind` at `(col, row)`, replacing whatever was there.
    pub(crate) fn spawn(&mut self, col: usize, row: usize, kind: TokenKind) -> Token {
        assert!(
            self.is_playable(col, row),
            "cannot place a token on unplayable cell ({}, {})",
            col,
            row
        );
        let token = Token::new(self.next_id, col, row, kind);
        self.next_id += 1;
        self.tokens.set(col, row, Some(token));
        token
    }

    /// Fills every playable cell with a fresh token such that no chain exists.
    ///
    /// Cells are filled bottom row first, left to right, so when a cell is
    /// drawn only its left and lower neighbours are occupied; redrawing until
    /// the cell is not part of a run keeps the whole board chain-free.
    fn create_initial_tokens(&mut self) -> Vec<Token> {
        self.tokens.clear();
        let mut created = Vec::new();

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if !self.is_playable(col, row) {
                    continue;
                }
                let kind = TokenKind::random(&mut self.rng);
                let mut token = self.spawn(col, row, kind);
                while self.has_chain_at(col, row) {
                    token.kind = TokenKind::random(&mut self.rng);
                    self.tokens.set(col, row, Some(token));
                }
                created.push(token);
            }
        }
        created
    }

    /// Replaces every token with a new chain-free fill that has at least one
    /// legal swap, and returns the tokens created.
    ///
    /// Score-related state (combo multiplier, target, moves) is untouched.
    ///
    /// # Panics
    /// Panics if the mask can never hold a legal swap, since no fill would
    /// ever satisfy the guarantee.
    pub fn shuffle(&mut self) -> Vec<Token> {
        assert!(
            mask_admits_swap(&self.mask),
            "board mask can never hold a legal swap"
        );
        loop {
            let created = self.create_initial_tokens();
            self.detect_legal_swaps();
            if !self.legal_swaps.is_empty() {
                return created;
            }
        }
    }

    /// Recomputes the legal-swap list from the current tokens.
    ///
    /// Each token is tried against its right and upper neighbour; the pair is
    /// legal if exchanging them puts either one in a run. The board is left
    /// as it was.
    pub fn detect_legal_swaps(&mut self) {
        let mut swaps = Vec::new();

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let token = match self.tokens.get(col, row) {
                    Some(&token) => token,
                    None => continue,
                };

                if col + 1 < self.cols() {
                    if let Some(&other) = self.tokens.get(col + 1, row) {
                        if self.swap_creates_chain((col, row), (col + 1, row)) {
                            swaps.push(Swap::new(token, other));
                        }
                    }
                }

                if row + 1 < self.rows() {
                    if let Some(&other) = self.tokens.get(col, row + 1) {
                        if self.swap_creates_chain((col, row), (col, row + 1)) {
                            swaps.push(Swap::new(token, other));
                        }
                    }
                }
            }
        }
        self.legal_swaps = swaps;
    }

    fn swap_creates_chain(&mut self, a: (usize, usize), b: (usize, usize)) -> bool {
        self.tokens.swap(a, b);
        let found = self.has_chain_at(a.0, a.1) || self.has_chain_at(b.0, b.1);
        self.tokens.swap(a, b);
        found
    }

    /// True if the token at `(col, row)` is part of a horizontal or vertical
    /// run of at least [`MIN_CHAIN_LENGTH`].
    fn has_chain_at(&self, col: usize, row: usize) -> bool {
        let kind = match self.kind_at(col, row) {
            Some(kind) => kind,
            None => return false,
        };
        let same = |c: usize, r: usize| self.kind_at(c, r) == Some(kind);

        let horizontal = 1
            + (0..col).rev().take_while(|&c| same(c, row)).count()
            + (col + 1..self.cols()).take_while(|&c| same(c, row)).count();
        if horizontal >= MIN_CHAIN_LENGTH {
            return true;
        }

        let vertical = 1
            + (0..row).rev().take_while(|&r| same(col, r)).count()
            + (row + 1..self.rows()).take_while(|&r| same(col, r)).count();
        vertical >= MIN_CHAIN_LENGTH
    }

    /// Exchanges the two tokens of `swap`, updating their coordinates.
    ///
    /// Legality is not checked; use [`Board::is_legal`] first. Applying the
    /// same swap twice restores the board.
    ///
    /// # Panics
    /// Panics if either cell named by the swap is empty.
    pub fn apply_swap(&mut self, swap: &Swap) {
        let (col_a, row_a) = swap.first().position();
        let (col_b, row_b) = swap.second().position();

        match (self.tokens.take(col_a, row_a), self.tokens.take(col_b, row_b)) {
            (Some(mut a), Some(mut b)) => {
                a.col = col_b;
                a.row = row_b;
                b.col = col_a;
                b.row = row_a;
                self.tokens.set(col_b, row_b, Some(a));
                self.tokens.set(col_a, row_a, Some(b));
            }
            _ => panic!("{} refers to an empty cell", swap),
        }
    }

    /// Finds horizontal runs, scanning rows bottom to top and each row left to right.
    ///
    /// A run is taken whole and scanning resumes after its last token.
    pub fn detect_horizontal_matches(&self) -> Vec<Chain> {
        let mut chains = Vec::new();

        for row in 0..self.rows() {
            let mut col = 0;
            while col + 2 < self.cols() {
                if let Some(kind) = self.kind_at(col, row) {
                    if self.kind_at(col + 1, row) == Some(kind)
                        && self.kind_at(col + 2, row) == Some(kind)
                    {
                        let mut chain = Chain::new(ChainKind::Horizontal);
                        while col < self.cols() {
                            match self.tokens.get(col, row) {
                                Some(token) if token.kind == kind => chain.add_token(*token),
                                _ => break,
                            }
                            col += 1;
                        }
                        chains.push(chain);
                        continue;
                    }
                }
                col += 1;
            }
        }
        chains
    }

    /// Finds vertical runs, scanning columns left to right and each column bottom to top.
    pub fn detect_vertical_matches(&self) -> Vec<Chain> {
        let mut chains = Vec::new();

        for col in 0..self.cols() {
            let mut row = 0;
            while row + 2 < self.rows() {
                if let Some(kind) = self.kind_at(col, row) {
                    if self.kind_at(col, row + 1) == Some(kind)
                        && self.kind_at(col, row + 2) == Some(kind)
                    {
                        let mut chain = Chain::new(ChainKind::Vertical);
                        while row < self.rows() {
                            match self.tokens.get(col, row) {
                                Some(token) if token.kind == kind => chain.add_token(*token),
                                _ => break,
                            }
                            row += 1;
                        }
                        chains.push(chain);
                        continue;
                    }
                }
                row += 1;
            }
        }
        chains
    }

    /// Sets the multiplier back to 1. Call at the start of every turn.
    pub fn reset_combo_multiplier(&mut self) {
        self.combo_multiplier = 1;
    }

    /// Scores `chains` in order: `60 * (length - 2) * multiplier`, bumping the
    /// multiplier after each chain.
    pub fn calculate_scores(&mut self, chains: &mut [Chain]) {
        for chain in chains.iter_mut() {
            let extra = (chain.len() - 2) as u32;
            chain.set_score(POINTS_PER_EXTRA_TOKEN * extra * self.combo_multiplier);
            self.combo_multiplier += 1;
        }
    }

    /// Removes every chained token and returns the scored chains, horizontal
    /// chains first.
    ///
    /// A token in both a horizontal and a vertical run appears in two chains.
    /// An empty result means the board is stable.
    pub fn remove_matches(&mut self) -> Vec<Chain> {
        let mut horizontal = self.detect_horizontal_matches();
        let mut vertical = self.detect_vertical_matches();

        self.remove_tokens(&horizontal);
        self.remove_tokens(&vertical);

        self.calculate_scores(&mut horizontal);
        self.calculate_scores(&mut vertical);

        horizontal.extend(vertical);
        horizontal
    }

    fn remove_tokens(&mut self, chains: &[Chain]) {
        for chain in chains {
            for token in chain.tokens() {
                self.tokens.set(token.col, token.row, None);
            }
        }
    }

    /// Lets tokens fall into empty playable cells below them.
    ///
    /// Returns, per column that changed, the tokens that moved in the order
    /// they landed (bottom first). Tokens keep their relative order.
    pub fn fill_holes(&mut self) -> Vec<Vec<Token>> {
        let mut columns = Vec::new();

        for col in 0..self.cols() {
            let mut fallen = Vec::new();
            for row in 0..self.rows() {
                if !self.is_playable(col, row) || self.tokens.get(col, row).is_some() {
                    continue;
                }
                for lookup in row + 1..self.rows() {
                    if let Some(mut token) = self.tokens.take(col, lookup) {
                        token.row = row;
                        self.tokens.set(col, row, Some(token));
                        fallen.push(token);
                        break;
                    }
                }
            }
            if !fallen.is_empty() {
                columns.push(fallen);
            }
        }
        columns
    }

    /// Creates tokens in the empty playable cells at the top of each column.
    ///
    /// Each column is walked down from the top while cells are empty. A new
    /// token never repeats the kind of the token created just before it in
    /// this pass. Returns, per column that changed, the new tokens top first.
    pub fn top_up(&mut self) -> Vec<Vec<Token>> {
        let mut columns = Vec::new();
        let mut previous: Option<TokenKind> = None;

        for col in 0..self.cols() {
            let mut spawned = Vec::new();
            let mut row = self.rows();
            while row > 0 && self.tokens.get(col, row - 1).is_none() {
                row -= 1;
                if !self.is_playable(col, row) {
                    continue;
                }
                let kind = loop {
                    let kind = TokenKind::random(&mut self.rng);
                    if Some(kind) != previous {
                        break kind;
                    }
                };
                previous = Some(kind);
                spawned.push(self.spawn(col, row, kind));
            }
            if !spawned.is_empty() {
                columns.push(spawned);
            }
        }
        columns
    }
}

impl fmt::Display for Board {
    /// Prints the board top row first: a kind letter per token, `.` for an
    /// empty playable cell and `#` for a cell outside play.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows()).rev() {
            for col in 0..self.cols() {
                let c = match self.token_at(col, row) {
                    Some(token) => token.kind().to_char(),
                    None if self.is_playable(col, row) => '.',
                    None => '#',
                };
                write!(f, "{}", c)?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Where a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The score reached the level target.
    LevelComplete,
    /// Moves ran out before the target was reached.
    GameOver,
}

/// Why a move was refused. A refused move leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already finished ({0:?})")]
    GameFinished(GameStatus),

    #[error("{0} is not a legal swap")]
    IllegalSwap(Swap),
}

/// One wave of the resolution loop: chains removed, tokens fallen, tokens added.
#[derive(Clone, Debug)]
pub struct Cascade {
    pub chains: Vec<Chain>,
    pub fallen: Vec<Vec<Token>>,
    pub spawned: Vec<Vec<Token>>,
}

impl Cascade {
    pub fn points(&self) -> u32 {
        self.chains.iter().map(Chain::score).sum()
    }
}

/// The result of a successful swap.
#[derive(Clone, Debug)]
pub struct TurnReport {
    /// Waves in order; the first comes from the swap itself.
    pub cascades: Vec<Cascade>,
    /// Points earned this turn.
    pub points: u32,
    /// Status after the turn.
    pub status: GameStatus,
}

/// A play session: a board plus score, moves left and the level target.
///
/// # Examples
/// ```
/// use cookie_crunch::engine::{Board, Game, GameStatus};
///
/// let mask = vec![vec![true; 9]; 9];
/// let mut game = Game::new(Board::load_mask(&mask, 1000, 15, 7));
/// assert_eq!(game.moves_left(), 15);
/// assert_eq!(game.status(), GameStatus::InProgress);
///
/// let swap = game.board().legal_swaps()[0];
/// let report = game.process_swap(&swap).unwrap();
/// assert!(report.points >= 60);
/// assert_eq!(game.moves_left(), 14);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    score: u32,
    moves_left: u32,
}

impl Game {
    /// Starts a game on `board`, shuffling it first.
    pub fn new(board: Board) -> Self {
        let mut game = Game {
            board,
            score: 0,
            moves_left: 0,
        };
        game.begin();
        game
    }

    /// Starts a game on `board` as it is, without shuffling.
    ///
    /// Useful for handcrafted positions. Legal swaps are recomputed.
    pub fn new_with_board(mut board: Board) -> Self {
        board.reset_combo_multiplier();
        board.detect_legal_swaps();
        Game {
            score: 0,
            moves_left: board.max_moves(),
            board,
        }
    }

    /// Restarts the game: zero score, full move budget, fresh shuffle.
    /// Returns the tokens created by the shuffle.
    pub fn begin(&mut self) -> Vec<Token> {
        self.score = 0;
        self.moves_left = self.board.max_moves();
        self.board.reset_combo_multiplier();
        self.board.shuffle()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn status(&self) -> GameStatus {
        if self.score >= self.board.target_score() {
            GameStatus::LevelComplete
        } else if self.moves_left == 0 {
            GameStatus::GameOver
        } else {
            GameStatus::InProgress
        }
    }

    /// True when no legal swap is left and the player has to shuffle.
    pub fn needs_shuffle(&self) -> bool {
        self.board.legal_swaps().is_empty()
    }

    /// Plays one turn.
    ///
    /// The swap must be legal. It is applied, then chains are removed, tokens
    /// fall and new ones drop in until the board is stable. The chain scores
    /// are added, the multiplier is reset, legal swaps are recomputed and one
    /// move is spent.
    pub fn process_swap(&mut self, swap: &Swap) -> Result<TurnReport, MoveError> {
        let status = self.status();
        if status != GameStatus::InProgress {
            return Err(MoveError::GameFinished(status));
        }
        if !self.board.is_legal(swap) {
            return Err(MoveError::IllegalSwap(*swap));
        }

        self.board.apply_swap(swap);
        let cascades = self.resolve_matches();
        let points = cascades.iter().map(Cascade::points).sum();
        self.score += points;
        self.begin_next_turn();

        Ok(TurnReport {
            cascades,
            points,
            status: self.status(),
        })
    }

    /// Reshuffles the board at the cost of one move.
    pub fn shuffle(&mut self) -> Result<Vec<Token>, MoveError> {
        let status = self.status();
        if status != GameStatus::InProgress {
            return Err(MoveError::GameFinished(status));
        }
        let created = self.board.shuffle();
        self.moves_left = self.moves_left.saturating_sub(1);
        Ok(created)
    }

    fn resolve_matches(&mut self) -> Vec<Cascade> {
        let mut cascades = Vec::new();
        loop {
            let chains = self.board.remove_matches();
            if chains.is_empty() {
                return cascades;
            }
            let fallen = self.board.fill_holes();
            let spawned = self.board.top_up();
            cascades.push(Cascade {
                chains,
                fallen,
                spawned,
            });
        }
    }

    fn begin_next_turn(&mut self) {
        self.board.reset_combo_multiplier();
        self.board.detect_legal_swaps();
        self.moves_left = self.moves_left.saturating_sub(1);
    }
}
