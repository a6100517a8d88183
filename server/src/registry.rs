//! Connection registry: username -> connection sender.
//!
//! A single mutex guards the whole map so the uniqueness check, the capacity
//! check, and the insert happen as one atomic step. Two clients racing to
//! register the same name can never both succeed, and two clients racing for
//! the last free slot can never both be admitted.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;

/// Sender half of a session's outbound channel.
/// The session's writer task owns the socket write half; every other part of
/// the system pushes lines to the client by cloning this sender.
pub type ClientSender = mpsc::UnboundedSender<String>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("username already taken")]
    AlreadyTaken,
    #[error("server is at capacity")]
    Full,
}

/// Shared mapping of connected usernames to their outbound senders.
pub struct Registry {
    capacity: usize,
    clients: Mutex<HashMap<String, ClientSender>>,
}

impl Registry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a new client. Uniqueness and capacity are checked under the
    /// same lock acquisition as the insert.
    pub fn register(&self, username: &str, sender: ClientSender) -> Result<(), RegisterError> {
        let mut clients = self.clients.lock().expect("registry lock poisoned");
        if clients.contains_key(username) {
            return Err(RegisterError::AlreadyTaken);
        }
        if clients.len() >= self.capacity {
            return Err(RegisterError::Full);
        }
        clients.insert(username.to_string(), sender);
        Ok(())
    }

    /// Remove a client. Idempotent: returns true only for the call that
    /// actually removed the entry, so racing teardown paths (session exit vs
    /// broadcast-discovered dead peer) produce exactly one departure
    /// announcement between them.
    pub fn deregister(&self, username: &str) -> bool {
        let mut clients = self.clients.lock().expect("registry lock poisoned");
        clients.remove(username).is_some()
    }

    pub fn contains(&self, username: &str) -> bool {
        let clients = self.clients.lock().expect("registry lock poisoned");
        clients.contains_key(username)
    }

    pub fn len(&self) -> usize {
        let clients = self.clients.lock().expect("registry lock poisoned");
        clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a single client's sender (private message path).
    pub fn get(&self, username: &str) -> Option<ClientSender> {
        let clients = self.clients.lock().expect("registry lock poisoned");
        clients.get(username).cloned()
    }

    /// Consistent copy of the current membership, taken under the lock and
    /// released before the caller does any delivery work.
    pub fn snapshot(&self) -> Vec<(String, ClientSender)> {
        let clients = self.clients.lock().expect("registry lock poisoned");
        clients
            .iter()
            .map(|(name, tx)| (name.clone(), tx.clone()))
            .collect()
    }

    /// Sorted usernames, for `/list` and admin inspection.
    pub fn usernames(&self) -> Vec<String> {
        let clients = self.clients.lock().expect("registry lock poisoned");
        let mut names: Vec<String> = clients.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> ClientSender {
        mpsc::unbounded_channel().0
    }

    #[test]
    fn register_rejects_duplicate_name() {
        let registry = Registry::new(4);
        registry.register("alice", sender()).unwrap();
        assert_eq!(
            registry.register("alice", sender()),
            Err(RegisterError::AlreadyTaken)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_rejects_when_full() {
        let registry = Registry::new(2);
        registry.register("alice", sender()).unwrap();
        registry.register("bob", sender()).unwrap();
        assert_eq!(registry.register("carol", sender()), Err(RegisterError::Full));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn name_is_reusable_after_departure() {
        let registry = Registry::new(2);
        registry.register("alice", sender()).unwrap();
        assert!(registry.deregister("alice"));
        registry.register("alice", sender()).unwrap();
        assert!(registry.contains("alice"));
    }

    #[test]
    fn deregister_is_idempotent() {
        let registry = Registry::new(2);
        registry.register("alice", sender()).unwrap();
        assert!(registry.deregister("alice"));
        assert!(!registry.deregister("alice"));
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshot_is_a_copy() {
        let registry = Registry::new(4);
        registry.register("alice", sender()).unwrap();
        let snap = registry.snapshot();
        registry.deregister("alice");
        assert_eq!(snap.len(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn usernames_are_sorted() {
        let registry = Registry::new(4);
        registry.register("carol", sender()).unwrap();
        registry.register("alice", sender()).unwrap();
        registry.register("bob", sender()).unwrap();
        assert_eq!(registry.usernames(), vec!["alice", "bob", "carol"]);
    }
}
