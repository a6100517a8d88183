//! Fan-out of one line to every connected client.
//!
//! Delivery works against a registry snapshot, never against the live map:
//! the registry lock is released before any send, so a slow or dead peer
//! cannot stall other deliveries or deadlock the deregistration it triggers.
//! A send only fails when the peer's writer task has exited (receiver
//! dropped), which means the connection is gone.

use std::collections::VecDeque;

use crate::protocol;
use crate::registry::Registry;

/// Deliver `text` to every registered client except `exclude`.
///
/// Dead peers discovered during the fan-out are deregistered and a departure
/// notice is queued for the survivors. The queue loops until a pass finds no
/// new dead peers. Send failures never reach the caller.
pub fn broadcast(registry: &Registry, text: &str, exclude: Option<&str>) {
    let mut queue: VecDeque<(String, Option<String>)> = VecDeque::new();
    queue.push_back((text.to_string(), exclude.map(str::to_string)));

    while let Some((line, excluded)) = queue.pop_front() {
        for (username, sender) in registry.snapshot() {
            if excluded.as_deref() == Some(username.as_str()) {
                continue;
            }
            if sender.send(line.clone()).is_err() && registry.deregister(&username) {
                tracing::info!(username = %username, "dropped unreachable client during broadcast");
                queue.push_back((protocol::leave_notice(&username), None));
            }
        }
    }
}

/// Direct write to one client. Returns false if the target is not registered
/// or unreachable; an unreachable target is deregistered and announced as
/// departed, same as a broadcast-discovered dead peer.
pub fn send_to(registry: &Registry, username: &str, text: &str) -> bool {
    let Some(sender) = registry.get(username) else {
        return false;
    };
    if sender.send(text.to_string()).is_ok() {
        return true;
    }
    if registry.deregister(username) {
        tracing::info!(username = %username, "dropped unreachable client during direct send");
        broadcast(registry, &protocol::leave_notice(username), None);
    }
    false
}
