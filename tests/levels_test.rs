use cookie_crunch::engine::{Board, Game, GameStatus};
use cookie_crunch::heuristics::choose_swap_mis;
use cookie_crunch::level::Level;
use std::path::PathBuf;

fn level_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels").join(name)
}

#[test]
fn test_bundled_levels_load_and_shuffle() {
    for name in ["level_0.json", "level_1.json", "level_2.json"] {
        let level = Level::load(level_path(name)).unwrap();
        assert_eq!(level.width(), 9, "{}", name);
        assert_eq!(level.height(), 9, "{}", name);

        let mut board = Board::from_level(&level, 1);
        let created = board.shuffle();
        let playable = level.mask_rows().iter().flatten().filter(|&&p| p).count();
        assert_eq!(created.len(), playable, "{}", name);
        assert!(board.detect_horizontal_matches().is_empty(), "{}", name);
        assert!(board.detect_vertical_matches().is_empty(), "{}", name);
        assert!(!board.legal_swaps().is_empty(), "{}", name);
    }
}

#[test]
fn test_level_0_layout_is_flipped_into_the_board() {
    let level = Level::load(level_path("level_0.json")).unwrap();
    let board = Board::from_level(&level, 1);
    // Authored top and bottom rows are both "000111000"; row 2 from the top
    // ("011111110") becomes board row 6.
    assert!(!board.is_playable(0, 0));
    assert!(board.is_playable(3, 0));
    assert!(board.is_playable(3, 8));
    assert!(!board.is_playable(0, 6));
    assert!(board.is_playable(1, 6));
    assert!(board.is_playable(0, 4));
}

#[test]
fn test_mis_player_finishes_a_level() {
    let level = Level::load(level_path("level_1.json")).unwrap();
    let mut game = Game::new(Board::from_level(&level, 2024));
    let mut turns = 0;

    while game.status() == GameStatus::InProgress {
        turns += 1;
        if game.needs_shuffle() {
            game.shuffle().unwrap();
            continue;
        }
        let (expected_min, swap) = choose_swap_mis(game.board()).unwrap();
        let before = game.score();
        let report = game.process_swap(&swap).unwrap();
        // The first wave is exactly what the heuristic predicted.
        assert_eq!(report.cascades[0].points(), expected_min);
        assert!(report.points >= expected_min);
        assert_eq!(game.score(), before + report.points);
    }

    assert!(turns <= level.moves());
    assert_ne!(game.status(), GameStatus::InProgress);
    assert_eq!(game.board().combo_multiplier(), 1);
}
