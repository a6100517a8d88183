//! Wire format: every payload in both directions is one newline-terminated
//! UTF-8 line. All server-to-client notice strings are built here.

use crate::history::HistoryEntry;

pub const ERR_USERNAME_TAKEN: &str = "ERROR: Username already taken.";
pub const ERR_SERVER_FULL: &str = "ERROR: Server is full.";
pub const ERR_PM_FORMAT: &str =
    "[SERVER] Invalid private message format. Use /pm <username> <message>.";

/// Local wall-clock timestamp in the format archived and shown to clients.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn chat_line(timestamp: &str, username: &str, text: &str) -> String {
    format!("[{timestamp}] {username}: {text}")
}

pub fn join_notice(username: &str) -> String {
    format!("[SERVER] {username} has joined the chat.")
}

pub fn leave_notice(username: &str) -> String {
    format!("[SERVER] {username} has left the chat.")
}

pub fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "[HISTORY] {} | {}: {}",
        entry.timestamp, entry.username, entry.text
    )
}

pub fn client_list_notice(names: &[String]) -> String {
    format!("[SERVER] Connected clients: {}", names.join(", "))
}

pub fn pm_line(sender: &str, text: &str) -> String {
    format!("[PM from {sender}] {text}")
}

pub fn user_not_found_notice(username: &str) -> String {
    format!("[SERVER] User {username} not found.")
}

pub fn unknown_command_notice(command: &str) -> String {
    format!("[SERVER] Unknown command: {command}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_line_format() {
        let entry = HistoryEntry {
            timestamp: "2026-01-01 12:00:00".to_string(),
            username: "alice".to_string(),
            text: "hello".to_string(),
        };
        assert_eq!(
            history_line(&entry),
            "[HISTORY] 2026-01-01 12:00:00 | alice: hello"
        );
    }

    #[test]
    fn list_notice_is_comma_joined() {
        let names = vec!["alice".to_string(), "bob".to_string()];
        assert_eq!(
            client_list_notice(&names),
            "[SERVER] Connected clients: alice, bob"
        );
    }
}
