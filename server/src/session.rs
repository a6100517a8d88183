//! Per-connection session lifecycle: handshake, chat loop, teardown.
//!
//! Each connection gets two tasks: this reader-side session task, and a
//! writer task that owns the socket write half and drains the session's mpsc
//! channel. Everything that wants to talk to this client (broadcasts, PMs,
//! history replay) goes through the channel, so socket backpressure is
//! absorbed per client and never stalls a broadcast pass.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::broadcast::broadcast;
use crate::commands;
use crate::history::HistoryEntry;
use crate::protocol;
use crate::registry::RegisterError;
use crate::state::AppState;

/// Drive one client connection from accept to close.
/// Never returns an error: every failure is scoped to this session and ends
/// in the same teardown path.
pub async fn run_session(stream: TcpStream, addr: SocketAddr, state: AppState) {
    let (read_half, write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(writer_task(write_half, rx));

    // Handshake: the first line is the desired username.
    let username = match next_line(&mut lines, state.idle_timeout_secs).await {
        Ok(Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            tracing::debug!(%addr, "connection closed before handshake");
            drop(tx);
            let _ = writer.await;
            return;
        }
    };

    // Uniqueness and capacity are decided inside one registry lock, so two
    // clients racing for the same name (or the last slot) cannot both win.
    if let Err(err) = state.registry.register(&username, tx.clone()) {
        let notice = match err {
            RegisterError::AlreadyTaken => protocol::ERR_USERNAME_TAKEN,
            RegisterError::Full => protocol::ERR_SERVER_FULL,
        };
        tracing::info!(%addr, username = %username, reason = %err, "handshake rejected");
        let _ = tx.send(notice.to_string());
        drop(tx);
        // Let the writer flush the rejection before the socket closes.
        let _ = writer.await;
        return;
    }

    tracing::info!(%addr, username = %username, "client registered");

    // Announce the join to everyone, then replay the trailing history window
    // to this client alone.
    broadcast(&state.registry, &protocol::join_notice(&username), None);
    for entry in state.history.tail(state.history_size) {
        let _ = tx.send(protocol::history_line(&entry));
    }

    loop {
        match next_line(&mut lines, state.idle_timeout_secs).await {
            Ok(Some(line)) => {
                if line.is_empty() {
                    continue;
                }
                if line.starts_with('/') {
                    commands::dispatch(&line, &username, &tx, &state);
                    continue;
                }
                let timestamp = protocol::timestamp();
                tracing::info!(username = %username, text = %line, "chat message");
                state.history.append(HistoryEntry {
                    timestamp: timestamp.clone(),
                    username: username.clone(),
                    text: line.clone(),
                });
                broadcast(
                    &state.registry,
                    &protocol::chat_line(&timestamp, &username, &line),
                    Some(&username),
                );
            }
            Ok(None) => {
                tracing::info!(username = %username, "client disconnected");
                break;
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                tracing::info!(username = %username, "idle timeout, closing session");
                break;
            }
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "read error, closing session");
                break;
            }
        }
    }

    // Teardown runs once per session; the deregister return value decides
    // who announces the departure when this races with a broadcast that
    // already dropped us as unreachable.
    if state.registry.deregister(&username) {
        broadcast(&state.registry, &protocol::leave_notice(&username), None);
    }
    drop(tx);
    let _ = writer.await;
    tracing::info!(username = %username, "session closed");
}

/// Writer task: owns the socket write half, newline-frames every queued line.
/// Exits when all senders are gone or the peer stops accepting writes.
async fn writer_task(mut write_half: OwnedWriteHalf, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = rx.recv().await {
        if write_half.write_all(format!("{line}\n").as_bytes()).await.is_err() {
            break;
        }
    }
}

/// Read the next line, honoring the configured idle timeout (0 disables it).
async fn next_line(
    lines: &mut Lines<BufReader<OwnedReadHalf>>,
    idle_timeout_secs: u64,
) -> std::io::Result<Option<String>> {
    if idle_timeout_secs == 0 {
        return lines.next_line().await;
    }
    match timeout(Duration::from_secs(idle_timeout_secs), lines.next_line()).await {
        Ok(result) => result,
        Err(_) => Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "idle read timeout",
        )),
    }
}
