//! Scoring tests over whole winning hands.
//!
//! These tests check:
//! - Signature hands are recognised by their pattern names
//! - Situational flags on a win add their patterns
//! - Payments always balance, and three-player tsumo pays like four-player
//! - Pattern overrides can come from a JSON configuration

use rust_mahjong::core::{GameOptions, PlayerId, Tile};
use rust_mahjong::scoring::{Scorer, Scoring, Win};

// =============================================================================
// Helpers
// =============================================================================

fn tiles(ids: &[u16]) -> Vec<Tile> {
    ids.iter().copied().map(Tile::new).collect()
}

fn ron(winner: u8, loser: u8, hand: &[u16]) -> Win {
    Win::new(PlayerId::new(winner), Some(PlayerId::new(loser)), tiles(hand), 4)
}

fn tsumo(winner: u8, hand: &[u16], player_count: usize) -> Win {
    Win::new(PlayerId::new(winner), None, tiles(hand), player_count)
}

fn score(win: &Win) -> Scoring {
    Scorer::score(win, &GameOptions::default())
}

fn assert_balanced(scoring: &Scoring) {
    let total: f64 = scoring.player_scores.iter().sum();
    assert!(total.abs() < 1e-9, "scores {:?} do not balance", scoring.player_scores);
}

/// 234s 567s 345p 678s + 77p, won on 4s.
const PLAIN: &[u16] = &[220, 230, 250, 260, 270, 130, 140, 150, 261, 271, 281, 170, 171, 240];

// =============================================================================
// Signature hands
// =============================================================================

/// Test that seven pairs scores as such and not as a closed ron.
#[test]
fn test_seven_pairs() {
    let win = ron(1, 2, &[10, 11, 30, 31, 150, 151, 220, 221, 310, 311, 350, 351, 370, 371]);
    let scoring = score(&win);
    assert!(scoring.patterns.contains_key("SEVEN_PAIRS"));
    assert!(!scoring.patterns.contains_key("NO_CALLS"));
    assert!(!scoring.patterns.contains_key("RED_DRAGON"));
    assert_balanced(&scoring);
}

/// Test thirteen orphans won on a tile held once.
#[test]
fn test_thirteen_orphans() {
    let win = ron(2, 0, &[10, 11, 90, 110, 190, 210, 290, 310, 320, 330, 340, 350, 360, 370]);
    let scoring = score(&win);
    assert!(scoring.patterns.contains_key("THIRTEEN_ORPHANS"));
    assert!(!scoring.patterns.contains_key("ALL_TERMINALS_AND_HONOURS"));
}

/// Test the nine gates won on the tile that completes its extra pair.
#[test]
fn test_true_nine_gates() {
    let win = tsumo(1, &[10, 11, 12, 20, 30, 40, 50, 60, 70, 80, 90, 91, 92, 51], 4);
    let scoring = score(&win);
    assert!(scoring.patterns.contains_key("TRUE_NINE_GATES"));
    assert!(scoring.patterns.contains_key("FULL_FLUSH"));
    assert!(!scoring.patterns.contains_key("NINE_GATES"));
}

/// Test an all-honours hand with every dragon triplet.
#[test]
fn test_big_three_dragons() {
    let win = ron(
        1,
        0,
        &[310, 311, 312, 350, 351, 352, 360, 361, 362, 320, 321, 370, 371, 372],
    );
    let scoring = score(&win);
    for name in ["ALL_HONOURS", "BIG_THREE_DRAGONS", "ALL_TRIPLETS", "WHITE_DRAGON", "RED_DRAGON"] {
        assert!(scoring.patterns.contains_key(name), "missing {}", name);
    }
    assert!(!scoring.patterns.contains_key("LITTLE_THREE_DRAGONS"));
}

// =============================================================================
// Situational flags
// =============================================================================

/// Test that riichi and double riichi are exclusive.
#[test]
fn test_riichi_flags() {
    let mut win = ron(1, 3, PLAIN);
    win.is_riichi = true;
    let scoring = score(&win);
    assert_eq!(scoring.patterns["RIICHI"].han, 1);

    win.is_double_riichi = true;
    win.is_ippatsu = true;
    let scoring = score(&win);
    assert!(!scoring.patterns.contains_key("RIICHI"));
    assert_eq!(scoring.patterns["DOUBLE_RIICHI"].han, 2);
    assert!(scoring.patterns.contains_key("IPPATSU"));
}

/// Test that drawn rounds before the win add a han each.
#[test]
fn test_draw_count_multiplies() {
    let plain = score(&ron(1, 3, PLAIN));
    let mut win = ron(1, 3, PLAIN);
    win.draw_count = 2;
    let scoring = score(&win);
    assert_eq!(scoring.patterns["DRAW"].han, 2);
    assert_eq!(scoring.han, plain.han + 2);
}

/// Test that winning right after replacement draws scores per replacement.
#[test]
fn test_after_kan_and_flower() {
    let mut win = tsumo(2, PLAIN, 4);
    win.after_kan_count = 1;
    win.after_flower_count = 2;
    let scoring = score(&win);
    assert_eq!(scoring.patterns["AFTER_A_KAN"].han, 2);
    assert_eq!(scoring.patterns["AFTER_A_FLOWER"].han, 2);
    assert_balanced(&scoring);
}

// =============================================================================
// Payments
// =============================================================================

/// Test that scoring does not depend on the order of the concealed tiles.
#[test]
fn test_scoring_is_deterministic() {
    let mut shuffled: Vec<u16> = PLAIN[..13].iter().rev().copied().collect();
    shuffled.push(PLAIN[13]);
    let first = score(&ron(1, 3, PLAIN));
    assert_eq!(score(&ron(1, 3, PLAIN)), first);
    assert_eq!(score(&ron(1, 3, &shuffled)), first);
}

/// Test that a tsumo earns the same with three or four players.
#[test]
fn test_three_player_tsumo_matches_four_player() {
    let four = GameOptions::four_player();
    let three = GameOptions::three_player();
    for winner in [0, 1] {
        let four_scoring = Scorer::score(&tsumo(winner, PLAIN, 4), &four);
        let three_scoring = Scorer::score(&tsumo(winner, PLAIN, 3), &three);
        assert_eq!(four_scoring.han, three_scoring.han);
        assert_eq!(
            four_scoring.player_scores[winner as usize],
            three_scoring.player_scores[winner as usize]
        );
        assert_eq!(three_scoring.player_scores.len(), 3);
        assert_balanced(&four_scoring);
        assert_balanced(&three_scoring);
    }
}

/// Test that the dealer is paid the dealer ron multiplier.
#[test]
fn test_dealer_ron_multiplier() {
    let dealer = score(&ron(0, 2, PLAIN));
    let other = score(&ron(1, 2, PLAIN));
    assert_eq!(dealer.han, other.han);
    assert_eq!(dealer.player_scores[0] / other.player_scores[1], 6.0 / 4.0);
    assert_eq!(dealer.player_scores[2], -dealer.player_scores[0]);
}

// =============================================================================
// Configuration
// =============================================================================

/// Test that pattern overrides load from JSON and change the scoring.
#[test]
fn test_json_pattern_override() {
    let options: GameOptions = serde_json::from_str(
        r#"{"pattern_data": {"ALL_SIMPLES": {"display_name": "Tanyao", "han": 2, "fu": 0}}}"#,
    )
    .unwrap();
    let base = score(&ron(1, 3, PLAIN));
    let scoring = Scorer::score(&ron(1, 3, PLAIN), &options);
    assert_eq!(scoring.patterns["ALL_SIMPLES"].display_name, "Tanyao");
    assert_eq!(scoring.han, base.han + 1);
}

/// Test that a scoring survives a JSON round trip.
#[test]
fn test_scoring_json_round_trip() {
    let scoring = score(&tsumo(2, PLAIN, 4));
    let json = serde_json::to_string(&scoring).unwrap();
    let restored: Scoring = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, scoring);
}
