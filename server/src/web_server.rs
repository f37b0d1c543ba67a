use std::path::Path;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::{GameId, log, log_error};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::api::{ErrorResponse, GameStateResponse, MoveRequest, NewGameResponse, board_symbols};
use crate::server_config::ServerConfig;
use crate::session_store::{GameSessionStore, SessionError};

#[derive(Clone)]
pub struct WebServerState {
    pub store: GameSessionStore,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = match self {
            SessionError::GameNotFound(_) => StatusCode::NOT_FOUND,
            SessionError::GameOver | SessionError::Move(_) => StatusCode::BAD_REQUEST,
            SessionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log_error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

pub fn build_router(state: WebServerState, static_files_path: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/new-game", post(new_game_handler))
        .route("/api/move", post(move_handler))
        .route("/api/game/{game_id}", get(get_game_handler))
        .fallback_service(ServeDir::new(static_files_path))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(
    config: &ServerConfig,
    store: GameSessionStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let app = build_router(WebServerState { store }, Path::new(&config.static_files_path));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}

async fn new_game_handler(State(state): State<WebServerState>) -> Json<NewGameResponse> {
    let (game_id, snapshot) = state.store.create_game().await;
    Json(NewGameResponse {
        game_id,
        board: board_symbols(&snapshot.board),
    })
}

async fn move_handler(
    State(state): State<WebServerState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<GameStateResponse>, SessionError> {
    let snapshot = state
        .store
        .play_move(&request.game_id, request.position)
        .await?;
    Ok(Json(snapshot.into()))
}

async fn get_game_handler(
    State(state): State<WebServerState>,
    UrlPath(game_id): UrlPath<String>,
) -> Result<Json<GameStateResponse>, SessionError> {
    let snapshot = state.store.get_game(&GameId::from(game_id)).await?;
    Ok(Json(snapshot.into()))
}
