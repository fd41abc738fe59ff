use serde::{Deserialize, Serialize};

// レスポンスは core::{PlayerData, GameState} をそのまま使う

pub const REGISTER_PATH: &str = "/register";
pub const STATE_PATH: &str = "/getState";
pub const MOVE_PATH: &str = "/move";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "teamName")]
    pub team_name: String,
}

impl RegisterRequest {
    pub fn new(team_name: &str) -> Self {
        RegisterRequest {
            team_name: team_name.to_string(),
        }
    }
}
