//! Board tests - level loading, seeding, swaps and legality

use std::collections::HashSet;

use fruity_crush::core::{BoardConfig, Level, LevelLayout, Swap, Tile};
use fruity_crush::types::{Direction, FruitKind, NUM_COLUMNS, NUM_ROWS};

fn dealt_level(seed: u32) -> Level {
    let mut level = Level::full(BoardConfig::default(), seed).unwrap();
    level.shuffle();
    level
}

fn occupancy(level: &Level) -> Vec<Option<(u32, FruitKind)>> {
    let mut out = Vec::new();
    for row in 0..level.rows() {
        for column in 0..level.columns() {
            out.push(level.fruit_at(column, row).map(|f| (f.id.0, f.kind)));
        }
    }
    out
}

// ============== Loading ==============

#[test]
fn test_full_level_dimensions() {
    let level = Level::full(BoardConfig::default(), 1).unwrap();
    assert_eq!(level.columns(), NUM_COLUMNS);
    assert_eq!(level.rows(), NUM_ROWS);
    assert_eq!(level.fruit_count(), 0);

    for row in 0..NUM_ROWS {
        for column in 0..NUM_COLUMNS {
            assert_eq!(level.tile_at(column, row), Some(Tile));
            assert!(level.fruit_at(column, row).is_none());
        }
    }
}

#[test]
fn test_load_rejects_wrong_shape() {
    let config = BoardConfig::default();
    let small = BoardConfig::new(5, 5, 6).unwrap();
    let layout = LevelLayout::full(&small, 100, 5);
    assert!(Level::load(config, &layout, 1).is_err());
}

#[test]
fn test_unplayable_cells_never_hold_fruit() {
    let config = BoardConfig::default();
    let mut layout = LevelLayout::full(&config, 100, 5);
    // Authored top row -> board row 8
    layout.tiles[0] = vec![false; 9];
    layout.tiles[8][4] = false; // board (4, 0)

    let mut level = Level::load(config, &layout, 3).unwrap();
    let dealt = level.shuffle();
    assert_eq!(dealt.len(), 81 - 9 - 1);

    for column in 0..9 {
        assert!(level.tile_at(column, 8).is_none());
        assert!(level.fruit_at(column, 8).is_none());
    }
    assert!(level.fruit_at(4, 0).is_none());
}

// ============== Seeding ==============

#[test]
fn test_shuffle_deals_every_playable_cell() {
    let level = dealt_level(12345);
    assert_eq!(level.fruit_count(), 81);
    for fruit in level.fruits() {
        let at = level.fruit_at(fruit.column, fruit.row).unwrap();
        assert_eq!(at.id, fruit.id);
    }
}

#[test]
fn test_shuffle_never_seeds_a_chain() {
    for seed in 1..=50 {
        let level = dealt_level(seed);
        assert!(
            level.detect_matches().is_empty(),
            "seed {} dealt a chain:\n{}",
            seed,
            level.dump()
        );
    }
}

#[test]
fn test_shuffle_always_has_legal_swap() {
    for seed in 1..=50 {
        let level = dealt_level(seed);
        assert!(!level.possible_swaps().is_empty(), "seed {}", seed);
    }
}

#[test]
fn test_same_seed_same_board() {
    assert_eq!(dealt_level(2024).dump(), dealt_level(2024).dump());
    assert_ne!(dealt_level(2024).dump(), dealt_level(2025).dump());
}

#[test]
fn test_shuffle_with_four_kinds() {
    let config = BoardConfig::new(9, 9, 4).unwrap();
    let mut level = Level::full(config, 8).unwrap();
    level.shuffle();
    assert!(!level.possible_swaps().is_empty());
    assert!(level.detect_matches().is_empty());
    assert!(level.fruits().all(|f| f.kind.index() < 4));
}

#[test]
fn test_shuffle_gives_up_on_hopeless_layout() {
    // Two playable cells can never form a chain.
    let config = BoardConfig::new(3, 1, 6)
        .unwrap()
        .with_shuffle_attempts(5)
        .unwrap();
    let layout = LevelLayout {
        tiles: vec![vec![true, true, false]],
        target_score: 0,
        moves: 1,
    };
    let mut level = Level::load(config, &layout, 1).unwrap();
    let dealt = level.shuffle();
    assert_eq!(dealt.len(), 2);
    assert!(level.possible_swaps().is_empty());
}

#[test]
fn test_shuffle_plants_a_move_on_a_narrow_layout() {
    let config = BoardConfig::default().with_shuffle_attempts(2).unwrap();
    let mut layout = LevelLayout {
        tiles: vec![vec![false; 9]; 9],
        target_score: 0,
        moves: 1,
    };
    // One five-cell strip in the middle row
    for column in 2..7 {
        layout.tiles[4][column] = true;
    }

    for seed in 1..=25 {
        let mut level = Level::load(config, &layout, seed).unwrap();
        let dealt = level.shuffle();
        assert_eq!(dealt.len(), 5);
        assert!(level.detect_matches().is_empty(), "seed {}", seed);
        assert!(!level.possible_swaps().is_empty(), "seed {}", seed);
    }
}

// ============== Swaps ==============

#[test]
fn test_apply_twice_restores_board() {
    let mut level = dealt_level(31);
    let before = occupancy(&level);

    let swap = level.swap_toward(4, 4, Direction::Right).unwrap();
    level.apply(&swap);
    assert_ne!(occupancy(&level), before);

    level.apply(&swap);
    assert_eq!(occupancy(&level), before);
}

#[test]
fn test_apply_reversed_request_also_restores() {
    let mut level = dealt_level(32);
    let before = occupancy(&level);

    let swap = level.swap_toward(0, 0, Direction::Up).unwrap();
    level.apply(&swap);
    level.apply(&swap.reversed());
    assert_eq!(occupancy(&level), before);
}

#[test]
fn test_every_legal_swap_creates_a_chain() {
    let level = dealt_level(77);
    for swap in level.legal_swaps_sorted() {
        let mut probe = level.clone();
        probe.apply(&swap);
        assert!(
            !probe.detect_matches().is_empty(),
            "{} does not create a chain",
            swap
        );
    }
}

#[test]
fn test_every_adjacent_non_legal_swap_creates_no_chain() {
    let level = dealt_level(78);
    for row in 0..level.rows() as i32 {
        for column in 0..level.columns() as i32 {
            for dir in [Direction::Right, Direction::Up] {
                let Some(swap) = level.swap_toward(column, row, dir) else {
                    continue;
                };
                let mut probe = level.clone();
                probe.apply(&swap);
                assert_eq!(
                    level.is_legal(&swap),
                    !probe.detect_matches().is_empty(),
                    "{}",
                    swap
                );
            }
        }
    }
}

#[test]
fn test_legality_is_order_independent() {
    let level = dealt_level(5);
    for swap in level.possible_swaps() {
        assert!(level.is_legal(&Swap::new(swap.fruit_b, swap.fruit_a)));
    }
}

#[test]
fn test_legal_swaps_are_adjacent_and_distinct() {
    let level = dealt_level(6);
    let sorted = level.legal_swaps_sorted();
    assert_eq!(sorted.len(), level.possible_swaps().len());

    let unique: HashSet<_> = sorted.iter().copied().collect();
    assert_eq!(unique.len(), sorted.len());
    for swap in &sorted {
        assert!(swap.fruit_a.is_adjacent_to(&swap.fruit_b));
    }
}

#[test]
fn test_swap_toward_matches_board_contents() {
    let level = dealt_level(9);
    let swap = level.swap_toward(3, 5, Direction::Left).unwrap();
    assert_eq!(swap.fruit_a, level.fruit_at(3, 5).unwrap());
    assert_eq!(swap.fruit_b, level.fruit_at(2, 5).unwrap());

    assert!(level.swap_toward(8, 8, Direction::Right).is_none());
    assert!(level.swap_toward(8, 8, Direction::Up).is_none());
    assert!(level.swap_toward(0, 0, Direction::Down).is_none());
}
