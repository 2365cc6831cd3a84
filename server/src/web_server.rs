use std::any::Any;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
};
use common::{GameState, log, log_debug};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;

use crate::api_error::{ApiError, ApiResult};
use crate::controller::SnakeController;
use crate::responses::{MoveResponse, StartResponse, json_reply};
use crate::server_config::ServerConfig;

#[derive(Clone)]
pub struct WebServerState {
    pub controller: Arc<dyn SnakeController>,
    pub decision_timeout: Option<Duration>,
}

impl WebServerState {
    pub fn new(controller: Arc<dyn SnakeController>, decision_timeout: Option<Duration>) -> Self {
        Self {
            controller,
            decision_timeout,
        }
    }
}

/// Routes are matched on path only; the engine is trusted to use the right
/// method.
pub fn router(state: WebServerState) -> Router {
    Router::new()
        .route("/ping", any(ping_handler))
        .route("/start", any(start_handler))
        .route("/move", any(move_handler))
        .route("/end", any(end_handler))
        .fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

async fn ping_handler() -> StatusCode {
    StatusCode::OK
}

async fn start_handler(State(state): State<WebServerState>, body: Bytes) -> ApiResult<Response> {
    let color = dispatch(&state, body, "start", |controller, game_state| {
        controller.start(game_state)
    })
    .await?;
    json_reply(&StartResponse::new(color))
}

async fn move_handler(State(state): State<WebServerState>, body: Bytes) -> ApiResult<Response> {
    let direction = dispatch(&state, body, "move", |controller, game_state| {
        controller.make_move(game_state)
    })
    .await?;
    json_reply(&MoveResponse::new(direction))
}

async fn end_handler(State(state): State<WebServerState>, body: Bytes) -> ApiResult<StatusCode> {
    dispatch(&state, body, "end", |controller, game_state| controller.end(game_state)).await?;
    Ok(StatusCode::OK)
}

async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

pub fn parse_game_state(body: &[u8]) -> ApiResult<GameState> {
    let text = std::str::from_utf8(body)?;
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("Request body must not be empty".to_string()));
    }
    Ok(GameState::from_json(text)?)
}

/// Parses the body and runs one controller call on the blocking pool, so a
/// slow decision for one game never stalls requests for other games.
async fn dispatch<T, F>(
    state: &WebServerState,
    body: Bytes,
    action: &'static str,
    call: F,
) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn SnakeController, &GameState) -> Result<T, String> + Send + 'static,
{
    let game_state = parse_game_state(&body)?;
    let context = format!("{} for game {} turn {}", action, game_state.game.id, game_state.turn);
    log_debug!("Handling {}", context);

    let controller = Arc::clone(&state.controller);
    let task = tokio::task::spawn_blocking(move || call(controller.as_ref(), &game_state));

    let joined = match state.decision_timeout {
        Some(limit) => tokio::time::timeout(limit, task)
            .await
            .map_err(|_| ApiError::Timeout(limit))?,
        None => task.await,
    };

    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ApiError::Controller(format!("{}: {}", context, e))),
        Err(e) if e.is_panic() => Err(ApiError::Controller(format!(
            "{} panicked: {}",
            context,
            panic_message(e.into_panic().as_ref())
        ))),
        Err(e) => Err(ApiError::Internal(format!("{}: {}", context, e))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal(format!("handler panicked: {}", panic_message(payload.as_ref())))
        .into_response()
}

/// Stops the accept loop of a [`SnakeServer`]. Cloneable; only the first
/// trigger has an effect.
#[derive(Clone)]
pub struct ShutdownHandle {
    stop_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl ShutdownHandle {
    fn new(stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            stop_tx: Arc::new(Mutex::new(Some(stop_tx))),
        }
    }

    /// Returns `true` if this call initiated the shutdown.
    pub fn trigger(&self) -> bool {
        let stop_tx = self
            .stop_tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        match stop_tx {
            Some(stop_tx) => {
                let _ = stop_tx.send(());
                true
            }
            None => false,
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.stop_tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

/// A running HTTP server. Dropping it stops accepting new connections; requests
/// already in flight run to completion.
pub struct SnakeServer {
    local_addr: SocketAddr,
    shutdown: ShutdownHandle,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl SnakeServer {
    pub async fn start(
        config: &ServerConfig,
        controller: Arc<dyn SnakeController>,
    ) -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
        let local_addr = listener.local_addr()?;

        let app = router(WebServerState::new(controller, config.decision_timeout()));
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        log!("Snake server listening on {}", local_addr);

        Ok(Self {
            local_addr,
            shutdown: ShutdownHandle::new(stop_tx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    pub fn shutdown(&self) {
        if self.shutdown.trigger() {
            log!("Stopping snake server on {}", self.local_addr);
        }
    }

    /// Waits until the server has stopped, which happens once a shutdown has
    /// been triggered and all open connections are done.
    pub async fn wait(mut self) -> std::io::Result<()> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };

        match task.await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::other(e)),
        }
    }

    pub async fn stop(self) -> std::io::Result<()> {
        self.shutdown();
        self.wait().await
    }
}

impl Drop for SnakeServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
