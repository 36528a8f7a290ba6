//! Match detection and scoring tests

use fruity_crush::core::{score_chains, BoardConfig, Level};
use fruity_crush::types::{ChainKind, FruitKind};

/// Full board with a repeating pattern that contains no run of three.
///
/// Uses Pineapple, Grapes and Watermelon only, so Apples placed by a test
/// never join the background.
fn staged_level() -> Level {
    let mut level = Level::full(BoardConfig::default(), 1).unwrap();
    let kinds = [FruitKind::Pineapple, FruitKind::Grapes, FruitKind::Watermelon];
    for row in 0..level.rows() {
        for column in 0..level.columns() {
            level.place_fruit(column, row, kinds[(column + 2 * row) % 3]);
        }
    }
    assert!(level.detect_matches().is_empty());
    level
}

#[test]
fn test_five_in_a_row_is_one_chain() {
    let mut level = staged_level();
    for column in 2..7 {
        level.place_fruit(column, 4, FruitKind::Apple);
    }

    let mut chains = level.detect_matches();
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].kind, ChainKind::Horizontal);
    assert_eq!(chains[0].len(), 5);

    let total = score_chains(&mut chains);
    assert_eq!(chains[0].score, 180);
    assert_eq!(total, 180);
}

#[test]
fn test_chain_scores_by_length() {
    for (len, expected) in [(3usize, 60u32), (4, 120), (5, 180), (9, 420)] {
        let mut level = staged_level();
        for row in 0..len {
            level.place_fruit(6, row, FruitKind::Cherry);
        }
        let mut chains = level.detect_matches();
        assert_eq!(chains.len(), 1, "length {}", len);
        assert_eq!(chains[0].kind, ChainKind::Vertical);
        score_chains(&mut chains);
        assert_eq!(chains[0].score, expected, "length {}", len);
    }
}

#[test]
fn test_chain_fruits_are_in_scan_order() {
    let mut level = staged_level();
    for column in 5..9 {
        level.place_fruit(column, 0, FruitKind::Apple);
    }
    let chains = level.detect_matches();
    let columns: Vec<_> = chains[0].fruits.iter().map(|f| f.column).collect();
    assert_eq!(columns, vec![5, 6, 7, 8]);
    assert!(chains[0].fruits.iter().all(|f| f.row == 0));

    let mut level = staged_level();
    for row in 6..9 {
        level.place_fruit(2, row, FruitKind::Apple);
    }
    let chains = level.detect_matches();
    let rows: Vec<_> = chains[0].fruits.iter().map(|f| f.row).collect();
    assert_eq!(rows, vec![6, 7, 8]);
}

#[test]
fn test_crossing_runs_score_independently() {
    let mut level = staged_level();
    // L shape sharing the corner at (0, 0)
    level.place_fruit(0, 0, FruitKind::Apple);
    level.place_fruit(1, 0, FruitKind::Apple);
    level.place_fruit(2, 0, FruitKind::Apple);
    level.place_fruit(0, 1, FruitKind::Apple);
    level.place_fruit(0, 2, FruitKind::Apple);
    let corner = level.fruit_at(0, 0).unwrap();

    let mut chains = level.detect_matches();
    assert_eq!(chains.len(), 2);
    assert_eq!(chains[0].kind, ChainKind::Horizontal);
    assert_eq!(chains[1].kind, ChainKind::Vertical);
    assert!(chains.iter().all(|c| c.contains(&corner)));

    let total = score_chains(&mut chains);
    assert_eq!(total, 120);
}

#[test]
fn test_t_shape_counts_both_chains() {
    let mut level = staged_level();
    // Horizontal run on row 5 crossing a vertical run through (4, 5)
    for column in 3..6 {
        level.place_fruit(column, 5, FruitKind::Apple);
    }
    level.place_fruit(4, 4, FruitKind::Apple);
    level.place_fruit(4, 3, FruitKind::Apple);

    let mut chains = level.detect_matches();
    assert_eq!(chains.len(), 2);
    let lengths: Vec<_> = chains.iter().map(|c| c.len()).collect();
    assert_eq!(lengths, vec![3, 3]);
    assert_eq!(score_chains(&mut chains), 120);
}

#[test]
fn test_two_separate_runs_in_one_row() {
    let mut level = staged_level();
    for column in [0, 1, 2, 5, 6, 7] {
        level.place_fruit(column, 3, FruitKind::Strawberry);
    }
    let chains = level.detect_matches();
    assert_eq!(chains.len(), 2);
    assert_eq!(chains[0].first_fruit().unwrap().column, 0);
    assert_eq!(chains[1].first_fruit().unwrap().column, 5);
}

#[test]
fn test_detection_ignores_empty_cells() {
    let mut level = Level::full(BoardConfig::default(), 1).unwrap();
    level.place_fruit(0, 0, FruitKind::Apple);
    level.place_fruit(1, 0, FruitKind::Apple);
    level.place_fruit(3, 0, FruitKind::Apple);
    assert!(level.detect_matches().is_empty());
}

#[test]
fn test_remove_matches_clears_each_chained_cell_once() {
    let mut level = staged_level();
    level.place_fruit(0, 0, FruitKind::Apple);
    level.place_fruit(1, 0, FruitKind::Apple);
    level.place_fruit(2, 0, FruitKind::Apple);
    level.place_fruit(0, 1, FruitKind::Apple);
    level.place_fruit(0, 2, FruitKind::Apple);

    let (chains, score) = level.remove_matches();
    assert_eq!(chains.len(), 2);
    assert_eq!(score, 120);
    assert!(chains.iter().all(|c| c.score == 60));
    assert_eq!(level.fruit_count(), 81 - 5);
    for (column, row) in [(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)] {
        assert!(level.fruit_at(column, row).is_none());
    }
}
