use anyhow::{anyhow, Result};
use colored::*;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::board::{Board, Urgency};
use crate::sync::protocol::{ClientEvent, ServerEvent};

/// Typed participant channel over a WebSocket connection.
///
/// One `BoardClient` is one participant: the server assigns it a fresh
/// connection id on accept and unicasts the current board and interaction
/// snapshot before anything else arrives.
pub struct BoardClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl BoardClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| anyhow!("invalid ws url: {e}"))?;
        let (ws, _) = connect_async(url.as_str()).await?;
        Ok(Self { ws })
    }

    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let text = serde_json::to_string(event)?;
        self.ws.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Next protocol event from the server. Frames that are not protocol
    /// text (pings, unparseable payloads) are skipped; `None` means the
    /// server closed the channel.
    pub async fn recv(&mut self) -> Result<Option<ServerEvent>> {
        while let Some(msg) = self.ws.next().await {
            match msg? {
                Message::Text(text) => {
                    let text: String = text.to_string();
                    if let Ok(event) = serde_json::from_str::<ServerEvent>(&text) {
                        return Ok(Some(event));
                    }
                }
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
        Ok(None)
    }
}

/// Join a board as a terminal observer and render every broadcast until
/// the server goes away.
pub async fn watch(url: &str) -> Result<()> {
    let mut client = BoardClient::connect(url).await?;
    println!("{} Joined board at {}", "↔".bright_blue(), url.bright_yellow());

    while let Some(event) = client.recv().await? {
        match event {
            ServerEvent::ClientCount(count) => {
                println!(
                    "{} {} participant(s) online",
                    "→".bright_blue(),
                    count.to_string().bright_yellow()
                );
            }
            ServerEvent::UpdateBoard(board) => render_board(&board),
            ServerEvent::HighlightTask(map) => {
                if map.is_empty() {
                    println!("{} no active edits", "→".bright_blue());
                } else {
                    for (task, owner) in &map {
                        println!(
                            "{} task {} held by {}",
                            "→".bright_blue(),
                            task.bright_white(),
                            short_id(owner).bright_yellow()
                        );
                    }
                }
            }
        }
    }

    println!("{} Server closed the channel", "✗".red());
    Ok(())
}

fn render_board(board: &Board) {
    println!("{}", "Board".cyan().bold());
    println!("{}", "═".repeat(60).bright_black());

    for (name, tasks) in board.columns() {
        println!("{}", name.as_str().to_uppercase().bold());
        for task in tasks {
            let urgency = match task.urgency {
                Urgency::Low => "low".green(),
                Urgency::Medium => "medium".yellow(),
                Urgency::High => "high".red(),
            };
            let deadline = task
                .deadline
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {} {} [{}] due {}",
                "•".bright_black(),
                task.content.bright_white(),
                urgency,
                deadline
            );
        }
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}
