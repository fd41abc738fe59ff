use backgammon_first_move::config::ClientConfig;
use backgammon_first_move::core::{Board, Color, GameState, PlayerData, WAITING_FOR_PLAYERS};
use backgammon_first_move::game::{self, Game, Phase};
use backgammon_first_move::network::NetworkClient;
use backgammon_first_move::player::FirstMoveAI;
use backgammon_first_move::ClientError;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use warp::http::StatusCode;
use warp::Filter;

/// テスト用の偽バックギャモンサーバー
#[derive(Default)]
struct FakeServer {
    registered: Vec<String>,
    /// /getState が順に返す盤面。最後の一つは繰り返す
    states: VecDeque<GameState>,
    /// /move が順に返す盤面
    move_replies: VecDeque<GameState>,
    moves: Vec<Value>,
    state_fetches: usize,
}

type Shared = Arc<Mutex<FakeServer>>;

fn with_server(server: Shared) -> impl Filter<Extract = (Shared,), Error = Infallible> + Clone {
    warp::any().map(move || server.clone())
}

fn next_state(queue: &mut VecDeque<GameState>) -> GameState {
    if queue.len() > 1 {
        queue.pop_front().unwrap()
    } else {
        queue.front().cloned().unwrap_or_default()
    }
}

async fn spawn_server(server: Shared) -> SocketAddr {
    let register = warp::path("register")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_server(server.clone()))
        .map(|body: Value, server: Shared| {
            let mut server = server.lock().unwrap();
            let name = body["teamName"].as_str().unwrap_or_default().to_string();
            if server.registered.contains(&name) {
                return warp::reply::with_status(
                    warp::reply::json(&json!({ "error": "Team name already taken" })),
                    StatusCode::CONFLICT,
                );
            }
            server.registered.push(name);
            let id = server.registered.len();
            let color = if id == 1 { "White" } else { "Black" };
            warp::reply::with_status(
                warp::reply::json(&json!({ "playerID": id, "color": color })),
                StatusCode::OK,
            )
        });

    let get_state = warp::path("getState")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_server(server.clone()))
        .map(|server: Shared| {
            let mut server = server.lock().unwrap();
            server.state_fetches += 1;
            let state = next_state(&mut server.states);
            warp::reply::json(&state)
        });

    let make_move = warp::path("move")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_server(server.clone()))
        .map(|body: Value, server: Shared| {
            let mut server = server.lock().unwrap();
            server.moves.push(body);
            let state = next_state(&mut server.move_replies);
            // 以降の /getState もこの盤面を返す
            server.states = VecDeque::from(vec![state.clone()]);
            warp::reply::json(&state)
        });

    let routes = register.or(get_state).or(make_move);
    let (addr, fut) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(fut);
    addr
}

fn fast_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        lobby_poll_ms: 10,
        turn_poll_ms: 5,
        win_check_ms: 20,
        ..ClientConfig::default()
    }
    .with_base_url(format!("http://{}", addr))
}

fn lobby() -> GameState {
    GameState {
        state: WAITING_FOR_PLAYERS.to_string(),
        ..GameState::default()
    }
}

fn playing(white_turn: bool, dice: &[u32], board: Board) -> GameState {
    GameState {
        state: "Playing".to_string(),
        white_turn,
        dice: dice.to_vec(),
        board,
        ..GameState::default()
    }
}

fn won(color: Color) -> GameState {
    GameState {
        state: "Finished".to_string(),
        white_won: color == Color::White,
        black_won: color == Color::Black,
        ..GameState::default()
    }
}

#[tokio::test]
async fn test_registers_waits_and_plays_first_move() {
    let mut board = Board::new();
    board.place(20, Color::White, 2);

    let server = Arc::new(Mutex::new(FakeServer {
        states: VecDeque::from(vec![
            lobby(),
            lobby(),
            playing(false, &[4, 2, 0, 0], Board::new()),
            playing(true, &[3, 0, 0, 0], board),
        ]),
        move_replies: VecDeque::from(vec![won(Color::White)]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;

    let summary = game::run(fast_config(addr), "Alpha", &FirstMoveAI::default())
        .await
        .unwrap()
        .expect("registration should succeed");

    assert_eq!(summary.winner, Some(Color::White));
    assert_eq!(summary.moves.len(), 1);

    let server = server.lock().unwrap();
    assert_eq!(server.registered, vec!["Alpha".to_string()]);
    assert_eq!(server.moves, vec![json!({ "from": 20, "to": 23, "playerID": 1 })]);
    // ロビー3回 + play 開始時の1回
    assert!(server.state_fetches >= 4);
}

#[tokio::test]
async fn test_waits_out_processing_then_reenters_from_bar() {
    let mut board = Board::new();
    board.set_eaten(Color::White, 1);
    board.place(4, Color::Black, 1);
    board.place(0, Color::White, 1);

    let mut processing = playing(true, &[5, 2, 0, 0], board.clone());
    processing.status = "Processing move".to_string();

    let server = Arc::new(Mutex::new(FakeServer {
        states: VecDeque::from(vec![
            playing(false, &[0, 0, 0, 0], Board::new()),
            processing.clone(),
            processing,
            playing(true, &[5, 2, 0, 0], board),
        ]),
        move_replies: VecDeque::from(vec![won(Color::Black)]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;

    let summary = game::run(fast_config(addr), "Alpha", &FirstMoveAI::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.winner, Some(Color::Black));
    let server = server.lock().unwrap();
    assert_eq!(server.moves, vec![json!({ "from": -1, "to": 4, "playerID": 1 })]);
}

#[tokio::test]
async fn test_rejected_registration_does_not_play() {
    let server = Arc::new(Mutex::new(FakeServer {
        registered: vec!["Alpha".to_string()],
        states: VecDeque::from(vec![lobby()]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;

    let result = game::run(fast_config(addr), "Alpha", &FirstMoveAI::default())
        .await
        .unwrap();
    assert!(result.is_none());

    let server = server.lock().unwrap();
    assert_eq!(server.state_fetches, 0);
    assert!(server.moves.is_empty());
}

#[tokio::test]
async fn test_no_playable_move_is_reported() {
    let mut board = Board::new();
    board.place(5, Color::White, 1);
    board.place(6, Color::Black, 2);

    let server = Arc::new(Mutex::new(FakeServer {
        states: VecDeque::from(vec![playing(true, &[1, 0, 0, 0], board)]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;

    let err = game::run(fast_config(addr), "Alpha", &FirstMoveAI::default())
        .await
        .unwrap_err();
    match err {
        ClientError::NoLegalMove { dice } => assert_eq!(dice, vec![1]),
        other => panic!("unexpected error: {}", other),
    }
    assert!(server.lock().unwrap().moves.is_empty());
}

#[tokio::test]
async fn test_already_finished_game_submits_nothing() {
    let server = Arc::new(Mutex::new(FakeServer {
        states: VecDeque::from(vec![won(Color::Black)]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;

    let summary = game::run(fast_config(addr), "Alpha", &FirstMoveAI::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.winner, Some(Color::Black));
    assert!(summary.moves.is_empty());
    assert!(server.lock().unwrap().moves.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // 一度 bind してすぐ閉じたポート
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = game::run(fast_config(addr), "Alpha", &FirstMoveAI::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_phase_follows_lobby_then_play() {
    let mut board = Board::new();
    board.place(20, Color::White, 2);

    let server = Arc::new(Mutex::new(FakeServer {
        states: VecDeque::from(vec![lobby(), playing(true, &[3, 0, 0, 0], board)]),
        move_replies: VecDeque::from(vec![won(Color::White)]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;
    let config = fast_config(addr);
    let client = NetworkClient::new(&config.base_url);

    let mut game = Game::new(client, config, PlayerData::new(1, Color::White));
    assert_eq!(game.phase(), Phase::AwaitingLobby);

    game.wait_for_players().await.unwrap();
    assert_eq!(game.phase(), Phase::AwaitingLobby);
    assert!(game.history().is_empty());

    let summary = game.play(&FirstMoveAI::default()).await.unwrap();
    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.history()[0].mv, summary.moves[0].mv);
    assert_eq!(game.history()[0].mv.to, 23);
}

#[tokio::test]
async fn test_watcher_ends_game_while_waiting_for_turn() {
    // サーバーはずっと相手の手番を返す
    let server = Arc::new(Mutex::new(FakeServer {
        states: VecDeque::from(vec![playing(false, &[4, 2, 0, 0], Board::new())]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;
    let config = ClientConfig {
        turn_poll_ms: 300,
        win_check_ms: 10,
        ..fast_config(addr)
    };
    let client = NetworkClient::new(&config.base_url);
    let initial = client.get_state().await.unwrap();

    let mut game = Game::new(client, config, PlayerData::new(1, Color::White));
    let (shared, _rx) = watch::channel(Arc::new(initial));
    let ai = FirstMoveAI::default();

    let (summary, _) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(game.play_on(&ai, &shared), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            shared.send_replace(Arc::new(won(Color::Black)));
        })
    })
    .await
    .expect("watcher should end the game");
    let summary = summary.unwrap();

    assert_eq!(summary.winner, Some(Color::Black));
    assert!(summary.moves.is_empty());
    assert_eq!(game.phase(), Phase::Finished);

    let server = server.lock().unwrap();
    assert!(server.moves.is_empty());
    // 手番待ちの sleep 明けに終了を検知するので追加の取得はない
    assert_eq!(server.state_fetches, 1);
}

#[tokio::test]
async fn test_keeps_moving_while_reply_is_still_my_turn() {
    let mut board = Board::new();
    board.place(20, Color::White, 2);

    let server = Arc::new(Mutex::new(FakeServer {
        states: VecDeque::from(vec![playing(true, &[3, 1, 0, 0], board.clone())]),
        move_replies: VecDeque::from(vec![
            playing(true, &[0, 1, 0, 0], board),
            won(Color::White),
        ]),
        ..FakeServer::default()
    }));
    let addr = spawn_server(server.clone()).await;

    let summary = game::run(fast_config(addr), "Alpha", &FirstMoveAI::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.moves.len(), 2);

    let server = server.lock().unwrap();
    assert_eq!(
        server.moves,
        vec![
            json!({ "from": 20, "to": 23, "playerID": 1 }),
            json!({ "from": 20, "to": 21, "playerID": 1 }),
        ]
    );
    // ロビー確認と play 開始時の2回だけ
    assert_eq!(server.state_fetches, 2);
}
