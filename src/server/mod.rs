//! WebSocket boundary and tick scheduler.
//!
//! The engine never touches sockets: this module owns the set of connected
//! observers, fans tick/command batches out through a bounded broadcast
//! channel, and drives `Simulation::step` at a fixed rate. One mutex
//! serializes tick execution with command handling; nothing holds it across
//! an await, so the simulation loop can never be blocked by a slow observer
//! (a lagging one is re-synced with a fresh full snapshot instead).

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::simulation::Simulation;
use crate::world::ChangeSet;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server terminated: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Broadcast queue depth per observer before a resync is forced.
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            channel_capacity: 256,
        }
    }
}

#[derive(Clone)]
struct AppState {
    sim: Arc<Mutex<Simulation>>,
    updates: broadcast::Sender<Arc<str>>,
}

fn lock(sim: &Mutex<Simulation>) -> MutexGuard<'_, Simulation> {
    // A panic while holding the lock poisons it; the world itself is still
    // consistent between phases, so keep serving.
    sim.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Serve the simulation until the process exits.
pub async fn run(sim: Simulation, config: ServerConfig) -> Result<(), ServerError> {
    let tick_rate = sim.config().tick_rate;
    let (updates, _) = broadcast::channel(config.channel_capacity);
    let state = AppState {
        sim: Arc::new(Mutex::new(sim)),
        updates,
    };

    tokio::spawn(tick_loop(state.clone(), tick_rate));

    let app = Router::new().route("/ws", get(ws_handler)).with_state(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.addr,
            source,
        })?;
    info!(addr = %config.addr, tick_rate, "granula server listening");

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}

/// Fixed-rate scheduler. Runs for the lifetime of the process; an in-tick
/// fault is isolated inside the phases and never stops the loop.
async fn tick_loop(state: AppState, tick_rate: u32) {
    let period = Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1)));
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let (tick, batch) = {
            let mut sim = lock(&state.sim);
            let batch = sim.step();
            (sim.tick(), batch)
        };
        if !batch.is_empty() {
            debug!(tick, changes = batch.len(), "broadcasting tick batch");
            publish(&state, batch);
        }
    }
}

/// Encode a batch once and hand it to every subscribed observer. Having no
/// observers is not an error.
fn publish(state: &AppState, batch: ChangeSet) {
    match serde_json::to_string(&ServerMessage::WorldUpdate(batch.into_entries())) {
        Ok(json) => {
            let _ = state.updates.send(json.into());
        }
        Err(err) => error!(%err, "failed to encode world update"),
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_observer(socket, state))
}

async fn handle_observer(socket: WebSocket, state: AppState) {
    info!("observer connected");

    // Subscribe before snapshotting: a batch that races in between gets
    // replayed on top of the snapshot, which is harmless because update
    // entries carry absolute cell states.
    let mut rx = state.updates.subscribe();

    let join_payload = {
        let sim = lock(&state.sim);
        let definitions =
            serde_json::to_string(&ServerMessage::ElementsDefinition(
                sim.registry().definitions().clone(),
            ));
        let full_world = serde_json::to_string(&ServerMessage::FullWorld(sim.full_world()));
        (definitions, full_world)
    };

    let (mut sink, mut stream) = socket.split();
    for payload in [join_payload.0, join_payload.1] {
        match payload {
            Ok(json) => {
                if sink.send(Message::Text(json)).await.is_err() {
                    return;
                }
            }
            Err(err) => {
                error!(%err, "failed to encode join payload");
                return;
            }
        }
    }

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(json) => {
                    if sink.send(Message::Text(json.to_string())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "observer lagged, resyncing with full world");
                    let resync = {
                        let sim = lock(&state.sim);
                        serde_json::to_string(&ServerMessage::FullWorld(sim.full_world()))
                    };
                    match resync {
                        Ok(json) => {
                            if sink.send(Message::Text(json)).await.is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            error!(%err, "failed to encode resync payload");
                            break;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => handle_client_message(&state, &text),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // pings are answered by the transport layer
                Some(Err(err)) => {
                    debug!(%err, "observer socket error");
                    break;
                }
            },
        }
    }

    info!("observer disconnected");
}

/// Commands apply synchronously on receipt and broadcast to everyone,
/// including the issuer.
fn handle_client_message(state: &AppState, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Draw(cmd)) => {
            let batch = lock(&state.sim).draw(&cmd);
            if !batch.is_empty() {
                publish(state, batch);
            }
        }
        Err(err) => warn!(%err, "ignoring malformed client message"),
    }
}
