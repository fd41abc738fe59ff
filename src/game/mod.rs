pub mod watcher;

use crate::config::ClientConfig;
use crate::core::{Color, GameState, Move, PlayerData};
use crate::error::{ClientError, Result};
use crate::network::NetworkClient;
use crate::player::PlayerController;
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingLobby,
    Playing,
    Finished,
}

/// 送信した指し手の記録
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub mv: Move,
    pub submitted_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct GameSummary {
    pub winner: Option<Color>,
    pub moves: Vec<MoveRecord>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub final_state: Arc<GameState>,
}

impl GameSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

pub struct Game {
    client: NetworkClient,
    config: ClientConfig,
    player: PlayerData,
    phase: Phase,
    history: Vec<MoveRecord>,
}

impl Game {
    pub fn new(client: NetworkClient, config: ClientConfig, player: PlayerData) -> Self {
        Game {
            client,
            config,
            player,
            phase: Phase::AwaitingLobby,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// 対戦相手が揃うまでロビーをポーリングする
    pub async fn wait_for_players(&mut self) -> Result<()> {
        self.phase = Phase::AwaitingLobby;

        let mut state = self.client.get_state().await?;
        if state.is_waiting_for_players() {
            info!("Waiting for another player");
            while state.is_waiting_for_players() {
                tokio::time::sleep(self.config.lobby_poll_interval()).await;
                state = self.client.get_state().await?;
            }
        }
        Ok(())
    }

    /// 自分の手番で、かつサーバーが処理中でなくなるまで待つ。
    /// 勝敗がついた場合もそこで抜ける。
    async fn wait_for_turn(
        &self,
        shared: &watch::Sender<Arc<GameState>>,
        ended: &AtomicBool,
    ) -> Result<Arc<GameState>> {
        let mut state = Arc::clone(&shared.borrow());

        while !state.is_finished() && (!state.is_my_turn(&self.player) || state.is_processing()) {
            tokio::time::sleep(self.config.turn_poll_interval()).await;
            if ended.load(Ordering::SeqCst) {
                // 監視タスクが共有盤面で勝敗を見つけた
                return Ok(Arc::clone(&shared.borrow()));
            }
            state = Arc::new(self.client.get_state().await?);
            shared.send_replace(Arc::clone(&state));
        }

        Ok(state)
    }

    async fn turn_loop(
        &mut self,
        controller: &dyn PlayerController,
        shared: &watch::Sender<Arc<GameState>>,
        ended: &AtomicBool,
    ) -> Result<Arc<GameState>> {
        loop {
            let state = self.wait_for_turn(shared, ended).await?;
            if state.is_finished() || ended.load(Ordering::SeqCst) {
                return Ok(state);
            }

            // ここに来たら自分の手番
            let mv = controller
                .choose_move(&self.player, &state)
                .ok_or_else(|| ClientError::NoLegalMove {
                    dice: state.active_dice(),
                })?;
            debug!(controller = controller.name(), %mv, "chose move");

            let next = Arc::new(self.client.send_move(&mv).await?);
            info!(from = mv.from, to = mv.to, player_id = mv.player_id, "submitted move");

            self.history.push(MoveRecord {
                mv,
                submitted_at: Local::now(),
            });
            shared.send_replace(next);
        }
    }

    /// 勝敗がつくまで 手番待ち → 選択 → 送信 を繰り返す
    pub async fn play(&mut self, controller: &dyn PlayerController) -> Result<GameSummary> {
        let initial = self.client.get_state().await?;
        let (shared, _state_rx) = watch::channel(Arc::new(initial));
        self.play_on(controller, &shared).await
    }

    /// `play` with a caller-owned state handle. The loop publishes every
    /// state it fetches or receives into `shared`, and the win watcher
    /// subscribes to it.
    pub async fn play_on(
        &mut self,
        controller: &dyn PlayerController,
        shared: &watch::Sender<Arc<GameState>>,
    ) -> Result<GameSummary> {
        self.phase = Phase::Playing;
        let started_at = Local::now();

        let ended = Arc::new(AtomicBool::new(false));
        let watcher = watcher::spawn(
            shared.subscribe(),
            Arc::clone(&ended),
            self.config.win_check_interval(),
        );

        let result = self.turn_loop(controller, shared, &ended).await;
        watcher.abort();
        let final_state = result?;

        self.phase = Phase::Finished;
        let summary = GameSummary {
            winner: final_state.winner(),
            moves: self.history.clone(),
            started_at,
            finished_at: Local::now(),
            final_state,
        };

        info!(
            winner = ?summary.winner,
            moves = summary.moves.len(),
            elapsed_secs = summary.elapsed().num_seconds(),
            "finished game\n{}",
            summary.final_state.board
        );
        Ok(summary)
    }
}

/// 登録からゲーム終了まで。登録を断られた場合は `Ok(None)`
pub async fn run(
    config: ClientConfig,
    team_name: &str,
    controller: &dyn PlayerController,
) -> Result<Option<GameSummary>> {
    let client = NetworkClient::new(&config.base_url);

    let Some(player) = client.register(team_name).await? else {
        return Ok(None);
    };
    info!(player_id = player.player_id, color = %player.color, team = team_name, "registered");

    let mut game = Game::new(client, config, player);
    game.wait_for_players().await?;
    let summary = game.play(controller).await?;
    Ok(Some(summary))
}
