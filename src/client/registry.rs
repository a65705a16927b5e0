//! Client registry
//!
//! Tracks connected clients and enforces the connection limit.

use std::collections::HashMap;
use std::net::SocketAddr;

/// What the server knows about one connected client.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Username of the authenticated session, if any.
    pub username: Option<String>,
}

/// Registry for tracking connected clients
pub struct ClientRegistry {
    clients: HashMap<SocketAddr, ClientInfo>,
    max_clients: usize,
}

impl ClientRegistry {
    pub fn new(max_clients: usize) -> Self {
        Self {
            clients: HashMap::new(),
            max_clients,
        }
    }

    /// Registers `addr`, returning false when the registry is full.
    pub fn try_insert(&mut self, addr: SocketAddr) -> bool {
        if self.clients.len() >= self.max_clients && !self.clients.contains_key(&addr) {
            return false;
        }
        self.clients.insert(addr, ClientInfo::default());
        true
    }

    pub fn set_username(&mut self, addr: &SocketAddr, username: Option<String>) {
        if let Some(info) = self.clients.get_mut(addr) {
            info.username = username;
        }
    }

    pub fn remove(&mut self, addr: &SocketAddr) -> Option<ClientInfo> {
        self.clients.remove(addr)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn max_clients(&self) -> usize {
        self.max_clients
    }

    pub fn authenticated_count(&self) -> usize {
        self.clients.values().filter(|c| c.username.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn enforces_limit() {
        let mut registry = ClientRegistry::new(2);
        assert!(registry.try_insert(addr(1)));
        assert!(registry.try_insert(addr(2)));
        assert!(!registry.try_insert(addr(3)));

        registry.remove(&addr(1));
        assert!(registry.try_insert(addr(3)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn tracks_authenticated_clients() {
        let mut registry = ClientRegistry::new(4);
        registry.try_insert(addr(1));
        registry.try_insert(addr(2));
        registry.set_username(&addr(1), Some("alice".into()));

        assert_eq!(registry.authenticated_count(), 1);

        registry.set_username(&addr(1), None);
        assert_eq!(registry.authenticated_count(), 0);

        registry.set_username(&addr(2), Some("bob".into()));
        registry.remove(&addr(2));
        assert_eq!(registry.authenticated_count(), 0);
    }
}
