//! Strategies for picking the next swap.
use crate::chain::Chain;
use crate::engine::Board;
use crate::token::Swap;
use rand::seq::SliceRandom;
use rand::Rng;

/// Points the first resolution wave of `swap` would earn on `board`, with a
/// fresh combo multiplier. Cascades caused by new tokens are not counted since
/// their kinds are not known yet.
///
/// The board itself is not modified.
pub fn immediate_score(board: &Board, swap: &Swap) -> u32 {
    let mut trial = board.clone();
    trial.reset_combo_multiplier();
    trial.apply_swap(swap);
    trial.remove_matches().iter().map(Chain::score).sum()
}

/// Chooses a swap with the Maximize Immediate Score (MIS) strategy.
///
/// Every legal swap is scored with [`immediate_score`]; the best one wins, and
/// on a tie the one found first by legal-swap detection is kept.
///
/// # Returns
/// `Some((score, swap))`, or `None` if the board has no legal swap.
///
/// # Examples
/// ```
/// use cookie_crunch::heuristics::choose_swap_mis;
/// use cookie_crunch::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["CUC", "UCU"], 0, 0).unwrap();
/// let (score, swap) = choose_swap_mis(&board).unwrap();
/// assert_eq!(score, 180);
/// assert!(board.is_legal(&swap));
/// ```
pub fn choose_swap_mis(board: &Board) -> Option<(u32, Swap)> {
    let mut best: Option<(u32, Swap)> = None;
    for swap in board.legal_swaps() {
        let score = immediate_score(board, swap);
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, *swap));
        }
    }
    best
}

/// Chooses any legal swap uniformly at random.
pub fn choose_swap_random(board: &Board, rng: &mut impl Rng) -> Option<Swap> {
    board.legal_swaps().choose(rng).copied()
}
