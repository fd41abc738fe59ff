use super::types::{Color, POINT_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1ポイント分の石の数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "whiteCheckers", default)]
    pub white_checkers: u32,
    // サーバー側の綴りがこうなっている
    #[serde(rename = "BlackCheckers", default)]
    pub black_checkers: u32,
}

impl Column {
    pub fn new(white_checkers: u32, black_checkers: u32) -> Self {
        Column {
            white_checkers,
            black_checkers,
        }
    }

    pub fn count(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_checkers,
            Color::Black => self.black_checkers,
        }
    }

    /// 相手の石が2個以上あればそのポイントには入れない
    pub fn is_blocked_for(&self, color: Color) -> bool {
        self.count(color.opponent()) >= 2
    }
}

/// 盤面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    #[serde(rename = "whiteEaten", default)]
    pub white_eaten: u32,
    #[serde(rename = "blackEaten", default)]
    pub black_eaten: u32,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// 空の24ポイント盤面
    pub fn new() -> Self {
        Board {
            columns: vec![Column::default(); POINT_COUNT],
            white_eaten: 0,
            black_eaten: 0,
        }
    }

    pub fn place(&mut self, point: usize, color: Color, count: u32) {
        if let Some(column) = self.columns.get_mut(point) {
            match color {
                Color::White => column.white_checkers = count,
                Color::Black => column.black_checkers = count,
            }
        }
    }

    /// 範囲外のポイントは空として扱う
    pub fn column(&self, point: usize) -> Column {
        self.columns.get(point).copied().unwrap_or_default()
    }

    pub fn count(&self, point: usize, color: Color) -> u32 {
        self.column(point).count(color)
    }

    pub fn eaten(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_eaten,
            Color::Black => self.black_eaten,
        }
    }

    pub fn set_eaten(&mut self, color: Color, count: u32) {
        match color {
            Color::White => self.white_eaten = count,
            Color::Black => self.black_eaten = count,
        }
    }

    pub fn is_blocked_for(&self, point: usize, color: Color) -> bool {
        self.column(point).is_blocked_for(color)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "point  white  black")?;
        for (idx, column) in self.columns.iter().enumerate() {
            if column.white_checkers == 0 && column.black_checkers == 0 {
                continue;
            }
            writeln!(
                f,
                "{:>5}  {:>5}  {:>5}",
                idx, column.white_checkers, column.black_checkers
            )?;
        }
        write!(
            f,
            "  bar  {:>5}  {:>5}",
            self.white_eaten, self.black_eaten
        )
    }
}
