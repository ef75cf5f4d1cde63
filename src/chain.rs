//! Matched runs of same-kind tokens.
use crate::token::Token;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Orientation of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainKind {
    Horizontal,
    Vertical,
    /// Reserved: the board never merges crossing runs, so no chain has this kind.
    LShaped,
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainKind::Horizontal => f.write_str("Horizontal"),
            ChainKind::Vertical => f.write_str("Vertical"),
            ChainKind::LShaped => f.write_str("L-Shaped"),
        }
    }
}

/// A run of three or more same-kind tokens found on the board.
///
/// Tokens are kept in scan order: left to right for horizontal chains,
/// bottom to top for vertical ones. The score is zero until the board
/// scores the chain during match removal.
///
/// Equality and hashing look at the token sequence only.
#[derive(Clone, Debug)]
pub struct Chain {
    kind: ChainKind,
    tokens: Vec<Token>,
    score: u32,
}

impl Chain {
    pub fn new(kind: ChainKind) -> Self {
        Chain {
            kind,
            tokens: Vec::new(),
            score: 0,
        }
    }

    pub fn add_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn first_token(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for Chain {}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chain of {} [", self.kind, self.tokens.len())?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({}, {})", token.col(), token.row())?;
        }
        write!(f, "] score {}", self.score)
    }
}
