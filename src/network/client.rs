use crate::core::{GameState, Move, PlayerData};
use crate::error::{ClientError, Result};
use crate::network::protocol::{RegisterRequest, MOVE_PATH, REGISTER_PATH, STATE_PATH};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// バックギャモンサーバーへの HTTP クライアント
#[derive(Debug, Clone)]
pub struct NetworkClient {
    http: reqwest::Client,
    base_url: String,
}

impl NetworkClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Returns `None` when the server rejects the name (taken, game full...).
    pub async fn register(&self, team_name: &str) -> Result<Option<PlayerData>> {
        let response = self
            .http
            .post(self.url(REGISTER_PATH))
            .json(&RegisterRequest::new(team_name))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "registration rejected");
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }

    pub async fn get_state(&self) -> Result<GameState> {
        let response = self.http.get(self.url(STATE_PATH)).send().await?;
        let state: GameState = read_json(STATE_PATH, response).await?;
        debug!(
            phase = %state.state,
            status = %state.status,
            white_turn = state.white_turn,
            dice = ?state.dice,
            "fetched state"
        );
        Ok(state)
    }

    pub async fn send_move(&self, mv: &Move) -> Result<GameState> {
        let response = self.http.post(self.url(MOVE_PATH)).json(mv).send().await?;
        read_json(MOVE_PATH, response).await
    }
}

async fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::UnexpectedStatus {
            endpoint,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}
