use crate::core::{GameState, Move, PlayerData};

/// 指し手選択のtrait
pub trait PlayerController {
    fn choose_move(&self, player: &PlayerData, state: &GameState) -> Option<Move>;
    fn name(&self) -> &str;
}
