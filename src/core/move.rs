use super::types::{BAR, OFF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// サーバーに送る指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: i32,
    pub to: i32,
    #[serde(rename = "playerID")]
    pub player_id: i64,
}

impl Move {
    pub fn new(from: i32, to: i32, player_id: i64) -> Self {
        Move {
            from,
            to,
            player_id,
        }
    }

    pub fn is_bar_entry(&self) -> bool {
        self.from == BAR
    }

    pub fn is_bear_off(&self) -> bool {
        self.to == OFF && self.from != BAR
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_bar_entry() {
            write!(f, "bar -> {}", self.to)
        } else if self.is_bear_off() {
            write!(f, "{} -> off", self.from)
        } else {
            write!(f, "{} -> {}", self.from, self.to)
        }
    }
}
