use crate::core::{GameState, Move, PlayerData};
use crate::logic::first_playable_move;
use crate::player::PlayerController;

/// 盤面を順に走査して最初に見つかった手を指す
pub struct FirstMoveAI {
    pub name: String,
}

impl FirstMoveAI {
    pub fn new(name: &str) -> Self {
        FirstMoveAI {
            name: name.to_string(),
        }
    }
}

impl Default for FirstMoveAI {
    fn default() -> Self {
        Self::new("First Move AI")
    }
}

impl PlayerController for FirstMoveAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, player: &PlayerData, state: &GameState) -> Option<Move> {
        first_playable_move(player, state)
    }
}
