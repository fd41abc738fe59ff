pub mod board;
pub mod r#move;
pub mod state;
pub mod types;

pub use board::{Board, Column};
pub use r#move::Move;
pub use state::{GameState, WAITING_FOR_PLAYERS};
pub use types::{Color, PlayerData, BAR, OFF, POINT_COUNT};
