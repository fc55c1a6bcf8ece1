//! Clients and the client lookup collaborator.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Identifier of a client (login name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new client ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the client ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A customer as returned by the client lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// The client identifier.
    pub id: ClientId,

    /// Whether the client pays for the premium subscription.
    pub has_premium_subscription: bool,
}

impl Client {
    /// Creates a new client.
    pub fn new(id: impl Into<ClientId>, has_premium_subscription: bool) -> Self {
        Self {
            id: id.into(),
            has_premium_subscription,
        }
    }

    /// Creates a client without a premium subscription.
    pub fn regular(id: impl Into<ClientId>) -> Self {
        Self::new(id, false)
    }

    /// Creates a client with a premium subscription.
    pub fn premium(id: impl Into<ClientId>) -> Self {
        Self::new(id, true)
    }
}

/// Looks up clients by id.
///
/// An unknown id is not an error: implementations return `None`.
pub trait ClientProvider: Send + Sync {
    /// Fetches the client with the given id, if it exists.
    fn fetch_client(&self, client_id: &ClientId) -> Option<Client>;
}

/// In-memory client provider for testing and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientProvider {
    clients: Arc<RwLock<HashMap<ClientId, Client>>>,
}

impl InMemoryClientProvider {
    /// Creates a new empty client provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a client and returns the provider, for chained construction.
    pub fn with_client(self, client: Client) -> Self {
        self.insert(client);
        self
    }

    /// Adds or replaces a client.
    pub fn insert(&self, client: Client) {
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(client.id.clone(), client);
    }

    /// Returns the number of known clients.
    pub fn client_count(&self) -> usize {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl FromIterator<Client> for InMemoryClientProvider {
    fn from_iter<I: IntoIterator<Item = Client>>(iter: I) -> Self {
        let provider = Self::new();
        for client in iter {
            provider.insert(client);
        }
        provider
    }
}

impl ClientProvider for InMemoryClientProvider {
    fn fetch_client(&self, client_id: &ClientId) -> Option<Client> {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(client_id)
            .cloned()
    }
}
