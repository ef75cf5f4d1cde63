use cookie_crunch::engine::{Board, Game, GameStatus};
use cookie_crunch::level::{Level, LevelDescriptor};
use cookie_crunch::token::{Swap, Token};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const SIZE: usize = 9;

fn full_board(seed: u64) -> Board {
    let mut board = Board::load_mask(&vec![vec![true; SIZE]; SIZE], 0, 0, seed);
    board.shuffle();
    board
}

fn snapshot(board: &Board) -> Vec<Token> {
    board.tokens().copied().collect()
}

fn hash_of(swap: &Swap) -> u64 {
    let mut hasher = DefaultHasher::new();
    swap.hash(&mut hasher);
    hasher.finish()
}

/// The neighbour to the right (`horizontal`) or above, if it is on the board.
fn neighbour(board: &Board, col: usize, row: usize, horizontal: bool) -> Option<(usize, usize)> {
    let (c, r) = if horizontal { (col + 1, row) } else { (col, row + 1) };
    (c < board.cols() && r < board.rows()).then_some((c, r))
}

fn column_ids(board: &Board, col: usize) -> Vec<u32> {
    (0..board.rows())
        .filter_map(|row| board.token_at(col, row).map(Token::id))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shuffle_leaves_no_chain_and_a_legal_swap(seed in any::<u64>()) {
        let board = full_board(seed);
        prop_assert!(board.detect_horizontal_matches().is_empty());
        prop_assert!(board.detect_vertical_matches().is_empty());
        prop_assert!(!board.legal_swaps().is_empty());
        prop_assert_eq!(board.tokens().count(), SIZE * SIZE);
    }

    #[test]
    fn prop_shuffle_on_shaped_levels(
        tiles in prop::collection::vec(prop::collection::vec(0u8..=1, 6), 6),
        seed in any::<u64>(),
    ) {
        let level = Level::from_descriptor(LevelDescriptor { tiles, target_score: 0, moves: 1 });
        prop_assume!(level.is_ok());
        let level = level.unwrap();

        let mut board = Board::from_level(&level, seed);
        board.shuffle();
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                prop_assert_eq!(board.token_at(col, row).is_some(), board.is_playable(col, row));
            }
        }
        prop_assert!(board.detect_horizontal_matches().is_empty());
        prop_assert!(board.detect_vertical_matches().is_empty());
        prop_assert!(!board.legal_swaps().is_empty());
    }

    #[test]
    fn prop_swap_is_symmetric(
        seed in any::<u64>(),
        col in 0..SIZE,
        row in 0..SIZE,
        horizontal in any::<bool>(),
    ) {
        let board = full_board(seed);
        let other = neighbour(&board, col, row, horizontal);
        prop_assume!(other.is_some());
        let (oc, or) = other.unwrap();

        let a = *board.token_at(col, row).unwrap();
        let b = *board.token_at(oc, or).unwrap();
        prop_assert_eq!(Swap::new(a, b), Swap::new(b, a));
        prop_assert_eq!(hash_of(&Swap::new(a, b)), hash_of(&Swap::new(b, a)));
        prop_assert_eq!(board.is_legal(&Swap::new(a, b)), board.is_legal(&Swap::new(b, a)));
    }

    #[test]
    fn prop_swap_twice_restores_board(
        seed in any::<u64>(),
        col in 0..SIZE,
        row in 0..SIZE,
        horizontal in any::<bool>(),
    ) {
        let mut board = full_board(seed);
        let other = neighbour(&board, col, row, horizontal);
        prop_assume!(other.is_some());
        let (oc, or) = other.unwrap();

        let before = snapshot(&board);
        let swap = Swap::new(*board.token_at(col, row).unwrap(), *board.token_at(oc, or).unwrap());
        board.apply_swap(&swap);
        board.apply_swap(&swap);
        prop_assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn prop_legal_swap_yields_scored_chains(seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let mut board = full_board(seed);
        let swap = *pick.get(board.legal_swaps());
        board.apply_swap(&swap);

        let chains = board.remove_matches();
        prop_assert!(!chains.is_empty());
        for (i, chain) in chains.iter().enumerate() {
            prop_assert!(chain.len() >= 3);
            let expected = 60 * (chain.len() as u32 - 2) * (i as u32 + 1);
            prop_assert_eq!(chain.score(), expected);
            for token in chain.tokens() {
                prop_assert!(board.token_at(token.col(), token.row()).is_none());
            }
        }
    }

    #[test]
    fn prop_fill_holes_and_top_up(seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let mut board = full_board(seed);
        let swap = *pick.get(board.legal_swaps());
        board.apply_swap(&swap);
        board.remove_matches();

        let order: Vec<Vec<u32>> = (0..SIZE).map(|col| column_ids(&board, col)).collect();
        board.fill_holes();
        for col in 0..SIZE {
            // Same tokens, same order, packed against the bottom.
            prop_assert_eq!(&column_ids(&board, col), &order[col]);
            let height = order[col].len();
            for row in 0..SIZE {
                prop_assert_eq!(board.token_at(col, row).is_some(), row < height);
            }
        }

        let spawned = board.top_up();
        prop_assert_eq!(board.tokens().count(), SIZE * SIZE);
        for column in &spawned {
            for pair in column.windows(2) {
                prop_assert_ne!(pair[0].kind(), pair[1].kind());
                prop_assert_eq!(pair[0].row(), pair[1].row() + 1);
            }
        }
    }

    #[test]
    fn prop_turns_resolve_to_a_stable_board(seed in any::<u64>()) {
        let mut game = Game::new(Board::load_mask(&vec![vec![true; SIZE]; SIZE], u32::MAX, 5, seed));
        while game.status() == GameStatus::InProgress {
            if game.needs_shuffle() {
                game.shuffle().unwrap();
                continue;
            }
            let swap = game.board().legal_swaps()[0];
            let report = game.process_swap(&swap).unwrap();
            prop_assert!(!report.cascades.is_empty());
            prop_assert!(report.cascades.len() < 1000);
            prop_assert!(game.board().detect_horizontal_matches().is_empty());
            prop_assert!(game.board().detect_vertical_matches().is_empty());
            prop_assert_eq!(game.board().tokens().count(), SIZE * SIZE);
        }
        prop_assert_eq!(game.status(), GameStatus::GameOver);
    }
}
