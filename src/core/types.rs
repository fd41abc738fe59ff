use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤上のポイント数
pub const POINT_COUNT: usize = 24;

/// バー / ベアオフを表す番兵値
pub const BAR: i32 = -1;
pub const OFF: i32 = -1;

/// 石の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// サーバーから割り当てられたプレイヤー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    #[serde(rename = "playerID")]
    pub player_id: i64,
    pub color: Color,
}

impl PlayerData {
    pub fn new(player_id: i64, color: Color) -> Self {
        PlayerData { player_id, color }
    }
}
