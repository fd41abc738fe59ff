use super::board::Board;
use super::types::{Color, PlayerData};
use serde::{Deserialize, Serialize};

/// ロビーがまだ揃っていない時の State 文字列
pub const WAITING_FOR_PLAYERS: &str = "Waiting for Players";

/// サーバーが返すゲーム全体のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(rename = "State", default)]
    pub state: String,
    /// 指し手の処理中は空でない
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "WhiteTurn", default)]
    pub white_turn: bool,
    #[serde(rename = "Dice", default)]
    pub dice: Vec<u32>,
    #[serde(rename = "Board", default)]
    pub board: Board,
    #[serde(rename = "WhiteWon", default)]
    pub white_won: bool,
    #[serde(rename = "BlackWon", default)]
    pub black_won: bool,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            state: String::new(),
            status: String::new(),
            white_turn: true,
            dice: Vec::new(),
            board: Board::new(),
            white_won: false,
            black_won: false,
        }
    }
}

impl GameState {
    pub fn is_waiting_for_players(&self) -> bool {
        self.state == WAITING_FOR_PLAYERS
    }

    /// 0 は使用済みのダイス
    pub fn active_dice(&self) -> Vec<u32> {
        self.dice.iter().copied().filter(|&die| die != 0).collect()
    }

    pub fn is_turn_of(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_turn,
            Color::Black => !self.white_turn,
        }
    }

    pub fn is_my_turn(&self, player: &PlayerData) -> bool {
        self.is_turn_of(player.color)
    }

    pub fn is_processing(&self) -> bool {
        !self.status.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.white_won || self.black_won
    }

    pub fn winner(&self) -> Option<Color> {
        if self.white_won {
            Some(Color::White)
        } else if self.black_won {
            Some(Color::Black)
        } else {
            None
        }
    }
}
