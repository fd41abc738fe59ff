use crate::core::GameState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// 共有されている最新の盤面を一定間隔で確認し、勝敗がついたら `ended` を立てる
///
/// The watcher only reads whatever state the main loop published last, so it
/// may lag one fetch behind. It stops its own timer once a win is seen.
pub fn spawn(
    state: watch::Receiver<Arc<GameState>>,
    ended: Arc<AtomicBool>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // 最初の tick は即座に完了する
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let snapshot = Arc::clone(&state.borrow());
            if snapshot.is_finished() {
                info!(winner = ?snapshot.winner(), "win observed");
                ended.store(true, Ordering::SeqCst);
                break;
            }
        }
    })
}
