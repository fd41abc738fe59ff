//! 貪欲な一手目選択ルール
//!
//! The selector never compares candidates. Each rule scans the board in a
//! fixed order and returns the first match:
//! bar re-entry, then bearing off (only with every checker home), then an
//! ordinary move.

use crate::core::{Board, Color, GameState, Move, PlayerData, BAR, OFF, POINT_COUNT};
use std::ops::RangeInclusive;

/// ホーム（ベアオフ可能な6ポイント）の大きさ
const HOME_SIZE: usize = 6;

/// 各色のホームのポイント範囲
pub fn home_range(color: Color) -> RangeInclusive<usize> {
    match color {
        Color::White => POINT_COUNT - HOME_SIZE..=POINT_COUNT - 1,
        Color::Black => 0..=HOME_SIZE - 1,
    }
}

pub fn is_eaten(color: Color, board: &Board) -> bool {
    board.eaten(color) > 0
}

/// バーからのエントリー先
///
/// Only the first active die is ever considered. If it is blocked there is
/// no entry, even when a later die would be open.
pub fn bar_entry_destination(color: Color, state: &GameState) -> Option<usize> {
    let dice = state.active_dice();
    let die = *dice.first()? as usize;

    let dest = match color {
        Color::White => die.checked_sub(1)?,
        Color::Black => POINT_COUNT.checked_sub(die)?,
    };

    if dest >= POINT_COUNT || state.board.is_blocked_for(dest, color) {
        return None;
    }
    Some(dest)
}

/// 全ての石がホームにあるか
pub fn all_checkers_home(color: Color, board: &Board) -> bool {
    let home = home_range(color);
    (0..POINT_COUNT)
        .filter(|point| !home.contains(point))
        .all(|point| board.count(point, color) == 0)
}

/// ベアオフする石のポイント
///
/// For each die in order: the exact point wins. Otherwise, if an own checker
/// sits farther from the edge than the exact point, this die cannot bear off
/// and the next die is tried. Otherwise the checker nearest the exact point
/// on the edge side is taken.
pub fn bear_off_source(color: Color, state: &GameState) -> Option<usize> {
    let board = &state.board;
    let has_own = |point: usize| board.count(point, color) > 0;

    for die in state.active_dice() {
        let die = die as usize;
        if die == 0 || die > HOME_SIZE {
            continue;
        }

        match color {
            Color::White => {
                let exact = POINT_COUNT - die;
                if has_own(exact) {
                    return Some(exact);
                }
                // exact より奥に石があればこのダイスでは出せない
                if (POINT_COUNT - HOME_SIZE..exact).any(|p| has_own(p)) {
                    continue;
                }
                if let Some(point) = (exact + 1..POINT_COUNT).find(|&p| has_own(p)) {
                    return Some(point);
                }
            }
            Color::Black => {
                let exact = die - 1;
                if has_own(exact) {
                    return Some(exact);
                }
                if (exact + 1..HOME_SIZE).any(|p| has_own(p)) {
                    continue;
                }
                if let Some(point) = (0..exact).rev().find(|&p| has_own(p)) {
                    return Some(point);
                }
            }
        }
    }

    None
}

/// ダイスで動かす先。範囲外なら None
fn destination(color: Color, from: usize, die: u32) -> Option<usize> {
    let dest = match color {
        Color::White => from as i64 + die as i64,
        Color::Black => from as i64 - die as i64,
    };
    if (0..POINT_COUNT as i64).contains(&dest) {
        Some(dest as usize)
    } else {
        None
    }
}

/// 通常の移動: 若い番号のポイントから順に、最初に動かせる組み合わせ
pub fn move_with_dice(color: Color, state: &GameState) -> Option<(usize, usize)> {
    let dice = state.active_dice();
    let board = &state.board;

    for from in 0..POINT_COUNT {
        if board.count(from, color) == 0 {
            continue;
        }
        for &die in &dice {
            if let Some(to) = destination(color, from, die) {
                if !board.is_blocked_for(to, color) {
                    return Some((from, to));
                }
            }
        }
    }

    None
}

/// 優先順位: バー → ベアオフ → 通常の移動
pub fn first_playable_move(player: &PlayerData, state: &GameState) -> Option<Move> {
    let color = player.color;

    if is_eaten(color, &state.board) {
        // バーに石がある間は他の手を指さない
        return bar_entry_destination(color, state)
            .map(|to| Move::new(BAR, to as i32, player.player_id));
    }

    if all_checkers_home(color, &state.board) {
        if let Some(from) = bear_off_source(color, state) {
            return Some(Move::new(from as i32, OFF, player.player_id));
        }
    }

    move_with_dice(color, state)
        .map(|(from, to)| Move::new(from as i32, to as i32, player.player_id))
}
