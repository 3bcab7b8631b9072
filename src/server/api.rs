use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    routing::get,
};
use colored::*;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

use crate::board::Board;
use crate::hub::{HubEvent, SyncHub};
use crate::sync::protocol::ClientEvent;

#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<SyncHub>,
    pub inbound: mpsc::UnboundedSender<HubEvent>,
}

pub async fn serve(port: u16, bind: &str) -> Result<()> {
    // Single hub task: every connection funnels its events through one
    // channel, so the hub applies them one at a time to completion.
    let hub = Arc::new(SyncHub::new());
    let (inbound, inbound_rx) = mpsc::unbounded_channel();
    tokio::spawn(hub.clone().run(inbound_rx));

    let state = AppState { hub, inbound };

    let app = Router::new()
        .route("/", get(|| async { "Syncboard Collaboration Server" }))
        .route("/health", get(|| async { Json("OK") }))
        .route("/board", get(get_board))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", bind, port);
    println!(
        "{} Server running at {}",
        "✓".green(),
        format!("http://{}", addr).bright_blue()
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl axum::response::IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(state, socket))
}

async fn handle_ws(state: AppState, socket: WebSocket) {
    let participant = Uuid::new_v4().to_string();
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Outbound queue: the hub pushes typed events, this task serializes
    // them at the edge. Delivery failures end the writer; the hub never
    // waits on it.
    let (peer_tx, mut peer_rx) = mpsc::unbounded_channel();
    let _ = state.inbound.send(HubEvent::Connected {
        id: participant.clone(),
        peer: peer_tx,
    });

    let writer = tokio::spawn(async move {
        while let Some(event) = peer_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(text) => {
                    if ws_tx.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => debug!(error = %e, "failed to serialize outbound event"),
            }
        }
    });

    // Reader loop: frames that do not parse as a protocol envelope are
    // dropped with state untouched.
    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let text: String = text.to_string();
                match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => {
                        let _ = state.inbound.send(HubEvent::Inbound {
                            id: participant.clone(),
                            event,
                        });
                    }
                    Err(e) => {
                        debug!(participant = %participant, error = %e, "ignoring malformed frame");
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }

    // Socket gone: the hub releases the participant's interactions and
    // drops its queue, which in turn ends the writer task.
    let _ = state.inbound.send(HubEvent::Disconnected { id: participant });
    let _ = writer.await;
}

async fn get_board(State(state): State<AppState>) -> Json<Board> {
    Json(state.hub.board())
}
