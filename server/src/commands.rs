//! Slash-command dispatch for active sessions.
//!
//! Commands are consumed here: they are not archived and not broadcast as
//! chat text. `/admin` output goes to the server log only, never to clients.

use crate::broadcast::send_to;
use crate::protocol;
use crate::registry::ClientSender;
use crate::state::AppState;

/// Handle one `/`-prefixed line from `sender_name`. Replies go to the
/// caller's own sender; `/pm` additionally writes to the target's sender.
pub fn dispatch(line: &str, sender_name: &str, own_tx: &ClientSender, state: &AppState) {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or_default();

    match command {
        "/list" => {
            let names = state.registry.usernames();
            let _ = own_tx.send(protocol::client_list_notice(&names));
        }
        "/pm" => match (parts.next(), parts.next()) {
            (Some(target), Some(text)) if !text.trim().is_empty() => {
                if !send_to(&state.registry, target, &protocol::pm_line(sender_name, text)) {
                    let _ = own_tx.send(protocol::user_not_found_notice(target));
                }
            }
            _ => {
                let _ = own_tx.send(protocol::ERR_PM_FORMAT.to_string());
            }
        },
        "/admin" => match parts.next() {
            Some("list") => {
                tracing::info!(
                    requested_by = %sender_name,
                    clients = %state.registry.usernames().join(", "),
                    "admin: connected clients"
                );
            }
            Some("history") => {
                let entries = state.history.all();
                tracing::info!(
                    requested_by = %sender_name,
                    entries = entries.len(),
                    "admin: full history dump"
                );
                for entry in &entries {
                    tracing::info!(
                        timestamp = %entry.timestamp,
                        username = %entry.username,
                        text = %entry.text,
                        "history entry"
                    );
                }
            }
            _ => {
                let _ = own_tx.send(protocol::unknown_command_notice(line));
            }
        },
        _ => {
            let _ = own_tx.send(protocol::unknown_command_notice(command));
        }
    }
}
