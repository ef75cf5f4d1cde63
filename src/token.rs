//! Tokens placed on the board and the swaps proposed between them.
//!
//! - `TokenKind`: the six kinds a token can have.
//! - `Token`: one piece at one cell, identified by a board-assigned id.
//! - `Swap`: an unordered pair of adjacent tokens.
use rand::Rng;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The kind of a token. Runs of three or more tokens of the same kind form a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Croissant,
    Cupcake,
    Danish,
    Donut,
    Macaroon,
    SugarCookie,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Croissant,
        TokenKind::Cupcake,
        TokenKind::Danish,
        TokenKind::Donut,
        TokenKind::Macaroon,
        TokenKind::SugarCookie,
    ];

    /// Draws a kind uniformly at random.
    pub fn random(rng: &mut impl Rng) -> TokenKind {
        TokenKind::ALL[rng.gen_range(0..TokenKind::ALL.len())]
    }

    /// Converts the kind to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use cookie_crunch::token::TokenKind;
    /// assert_eq!(TokenKind::Donut.to_char(), 'O');
    /// assert_eq!(TokenKind::from_char('O'), Some(TokenKind::Donut));
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            TokenKind::Croissant => 'C',
            TokenKind::Cupcake => 'U',
            TokenKind::Danish => 'D',
            TokenKind::Donut => 'O',
            TokenKind::Macaroon => 'M',
            TokenKind::SugarCookie => 'S',
        }
    }

    /// Inverse of [`TokenKind::to_char`].
    pub fn from_char(c: char) -> Option<TokenKind> {
        TokenKind::ALL.into_iter().find(|kind| kind.to_char() == c)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Croissant => "Croissant",
            TokenKind::Cupcake => "Cupcake",
            TokenKind::Danish => "Danish",
            TokenKind::Donut => "Donut",
            TokenKind::Macaroon => "Macaroon",
            TokenKind::SugarCookie => "SugarCookie",
        };
        f.write_str(name)
    }
}

/// A token occupying one cell of a board.
///
/// Tokens are plain values. The board keeps the authoritative copy in its grid
/// and updates `col`/`row` there when the token falls or is swapped; everything
/// handed out by the board is a snapshot.
///
/// Two tokens are equal when they are the same token (same `id`) at the same
/// cell with the same kind. Use [`Token::same_cell`] to compare positions only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub(crate) id: u32,
    pub(crate) col: usize,
    pub(crate) row: usize,
    pub(crate) kind: TokenKind,
}

impl Token {
    pub(crate) fn new(id: u32, col: usize, row: usize, kind: TokenKind) -> Self {
        Token { id, col, row, kind }
    }

    /// Board-unique identity, stable while the token lives.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row index; row 0 is the bottom of the board.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn position(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    pub fn same_cell(&self, other: &Token) -> bool {
        self.position() == other.position()
    }

    /// True if `other` sits directly left, right, above or below this token.
    pub fn is_adjacent(&self, other: &Token) -> bool {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row) == 1
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({}, {})", self.kind, self.col, self.row)
    }
}

/// An unordered pair of adjacent tokens proposed for exchange.
///
/// `Swap::new(a, b) == Swap::new(b, a)`, and both hash the same.
#[derive(Clone, Copy, Debug)]
pub struct Swap {
    a: Token,
    b: Token,
}

impl Swap {
    /// Pairs two adjacent tokens.
    ///
    /// # Panics
    /// Panics if the tokens are not orthogonally adjacent.
    ///
    /// # Examples
    /// ```
    /// use cookie_crunch::utils::board_from_str_array;
    /// use cookie_crunch::token::Swap;
    ///
    /// let board = board_from_str_array(&["CUC", "CCU"], 0, 0).unwrap();
    /// let a = *board.token_at(0, 0).unwrap();
    /// let b = *board.token_at(1, 0).unwrap();
    /// assert_eq!(Swap::new(a, b), Swap::new(b, a));
    /// ```
    pub fn new(a: Token, b: Token) -> Self {
        assert!(
            a.is_adjacent(&b),
            "swap requires adjacent tokens, got {} and {}",
            a,
            b
        );
        Swap { a, b }
    }

    pub fn first(&self) -> &Token {
        &self.a
    }

    pub fn second(&self) -> &Token {
        &self.b
    }

    /// The pair ordered by position (row, then column), so equal swaps agree.
    fn ordered(&self) -> (&Token, &Token) {
        if (self.a.row, self.a.col) <= (self.b.row, self.b.col) {
            (&self.a, &self.b)
        } else {
            (&self.b, &self.a)
        }
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for Swap {}

impl Hash for Swap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (lo, hi) = self.ordered();
        lo.hash(state);
        hi.hash(state);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {} with {}", self.a, self.b)
    }
}
